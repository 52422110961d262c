//! Contracts for the collaborators the controller is attached to
//!
//! The windowing system provides a [`HostWindow`] and the UI event loop
//! provides a [`Scheduler`]. Neither is owned by the core.

mod scheduler;

pub use scheduler::{LocalScheduler, ManualScheduler};

/// Handler invoked when the window system asks to close the window.
/// Returning `true` suppresses the close.
pub type CloseHandler = Box<dyn Fn() -> bool>;

/// Handler invoked for every key-down. Returning `true` consumes the event.
pub type KeyHandler = Box<dyn Fn(&KeyDown) -> bool>;

/// Opaque native window handle (an `HWND` on Windows)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WindowHandle(isize);

impl WindowHandle {
    pub const NULL: WindowHandle = WindowHandle(0);

    pub fn from_raw(raw: isize) -> Self {
        Self(raw)
    }

    pub fn as_raw(self) -> isize {
        self.0
    }

    pub fn is_null(self) -> bool {
        self.0 == 0
    }
}

/// A raw key-down as delivered by the window system
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyDown {
    /// Text of the pressed key (`"c"`, `"space"`, ...)
    pub text: String,
    /// Names of the modifiers held at the time (`"ctrl"`, `"alt"`, ...)
    pub modifiers: Vec<String>,
}

impl KeyDown {
    pub fn new<I, S>(text: impl Into<String>, modifiers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            text: text.into(),
            modifiers: modifiers.into_iter().map(Into::into).collect(),
        }
    }
}

/// The native window the controller shows and hides
pub trait HostWindow {
    /// Handle used for foreground calls and hotkey registration
    fn handle(&self) -> WindowHandle;

    fn show(&self);

    fn hide(&self);

    /// Bring the window to the foreground and give it input focus
    fn bring_to_front(&self);

    /// Install the interceptor for close requests
    fn set_close_handler(&self, handler: CloseHandler);

    /// Install the receiver of raw key-down events
    fn set_key_handler(&self, handler: KeyHandler);

    /// End the process immediately
    fn terminate(&self, code: i32);
}

/// Runs a callback on a later iteration of the UI event loop
pub trait Scheduler {
    fn schedule_once(&self, task: Box<dyn FnOnce()>);
}
