//! Visibility state machine
//!
//! Starts Hidden at attach. A hide arms one deferred listen cycle for the
//! show hotkey; when the hotkey fires the window becomes Visible until it
//! is closed or hidden again. Closing the window never ends the process,
//! only the exit combination does.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use tracing::{debug, error, info, warn};

use crate::config::HotkeyConfig;
use crate::events::{LifecycleObserver, NoopObserver};
use crate::host::{HostWindow, KeyDown, Scheduler, WindowHandle};
use crate::hotkey::{
    ExitInterceptor, HotkeyBackend, HotkeyError, HotkeyListener, HotkeyRegistrar, KeyCombo,
    ListenOutcome,
};

/// The two states of the window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VisibilityState {
    /// Window hidden, waiting for the show hotkey
    #[default]
    Hidden,
    /// Window shown, watching for the exit combination
    Visible,
}

impl std::fmt::Display for VisibilityState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VisibilityState::Hidden => write!(f, "Hidden"),
            VisibilityState::Visible => write!(f, "Visible"),
        }
    }
}

/// Everything captured at attach time
struct Binding {
    window: WindowHandle,
    show_combo: KeyCombo,
    exit: ExitInterceptor,
}

struct Inner<B> {
    window: Rc<dyn HostWindow>,
    scheduler: Rc<dyn Scheduler>,
    observer: Rc<dyn LifecycleObserver>,
    backend: Rc<B>,
    config: HotkeyConfig,
    registrar: Rc<RefCell<HotkeyRegistrar<B>>>,
    listener: HotkeyListener<B>,
    state: Cell<VisibilityState>,
    binding: RefCell<Option<Binding>>,
}

/// Builds a [`VisibilityController`] from its collaborators
pub struct ControllerBuilder<B> {
    window: Rc<dyn HostWindow>,
    scheduler: Rc<dyn Scheduler>,
    backend: Rc<B>,
    observer: Rc<dyn LifecycleObserver>,
    config: HotkeyConfig,
}

impl<B: HotkeyBackend + 'static> ControllerBuilder<B> {
    pub fn new(window: Rc<dyn HostWindow>, scheduler: Rc<dyn Scheduler>, backend: Rc<B>) -> Self {
        Self {
            window,
            scheduler,
            backend,
            observer: Rc::new(NoopObserver),
            config: HotkeyConfig::default(),
        }
    }

    pub fn config(mut self, config: HotkeyConfig) -> Self {
        self.config = config;
        self
    }

    pub fn observer(mut self, observer: Rc<dyn LifecycleObserver>) -> Self {
        self.observer = observer;
        self
    }

    pub fn build(self) -> VisibilityController<B> {
        let registrar = Rc::new(RefCell::new(HotkeyRegistrar::new(Rc::clone(&self.backend))));
        let listener = HotkeyListener::new(Rc::clone(&self.backend), Rc::clone(&registrar));

        VisibilityController {
            inner: Rc::new(Inner {
                window: self.window,
                scheduler: self.scheduler,
                observer: self.observer,
                backend: self.backend,
                config: self.config,
                registrar,
                listener,
                state: Cell::new(VisibilityState::Hidden),
                binding: RefCell::new(None),
            }),
        }
    }
}

/// Coordinates show/hide transitions for one host window.
///
/// Cloning yields another handle to the same controller.
pub struct VisibilityController<B> {
    inner: Rc<Inner<B>>,
}

impl<B> Clone for VisibilityController<B> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<B: HotkeyBackend + 'static> VisibilityController<B> {
    pub fn builder(
        window: Rc<dyn HostWindow>,
        scheduler: Rc<dyn Scheduler>,
        backend: Rc<B>,
    ) -> ControllerBuilder<B> {
        ControllerBuilder::new(window, scheduler, backend)
    }

    /// Get the current state
    pub fn state(&self) -> VisibilityState {
        self.inner.state.get()
    }

    pub fn is_attached(&self) -> bool {
        self.inner.binding.borrow().is_some()
    }

    /// Bind to the host window and enter the initial Hidden state.
    ///
    /// Panics when the backend cannot run on this platform. Fails with
    /// `InvalidCombo` before touching the window if either shortcut is
    /// malformed.
    pub fn attach(&self) -> Result<(), HotkeyError> {
        if let Err(e) = self.inner.backend.check_platform() {
            panic!("{e}");
        }

        if self.is_attached() {
            warn!("controller already attached, ignoring");
            return Ok(());
        }

        let keys = self.inner.config.resolve();
        let show_combo = KeyCombo::parse(&keys.key_show)?;
        let exit_combo = KeyCombo::parse(&keys.key_exit)?;

        self.inner.window.bring_to_front();
        let window = self.inner.window.handle();

        let weak = Rc::downgrade(&self.inner);
        self.inner.window.set_close_handler(Box::new(move || {
            with_controller(&weak, |controller| controller.handle_close_request()).unwrap_or(false)
        }));
        let weak = Rc::downgrade(&self.inner);
        self.inner.window.set_key_handler(Box::new(move |event: &KeyDown| {
            with_controller(&weak, |controller| controller.handle_key_down(event)).unwrap_or(false)
        }));

        *self.inner.binding.borrow_mut() = Some(Binding {
            window,
            show_combo,
            exit: ExitInterceptor::new(exit_combo),
        });

        info!(
            show = %show_combo,
            exit = %exit_combo,
            window = window.as_raw(),
            "hotkey controller attached"
        );

        self.inner.observer.on_init();
        self.hide();
        Ok(())
    }

    /// Notify `on_show`, then show and foreground the window
    pub fn show(&self) {
        let from = self.state();
        info!(from = %from, to = %VisibilityState::Visible, "showing window");

        self.inner.observer.on_show();
        self.inner.window.show();
        self.inner.window.bring_to_front();
        self.inner.state.set(VisibilityState::Visible);
    }

    /// Notify `on_hide`, hide the window and arm one listen cycle
    pub fn hide(&self) {
        let from = self.state();
        info!(from = %from, to = %VisibilityState::Hidden, "hiding window");

        self.inner.observer.on_hide();
        self.inner.window.hide();
        self.inner.state.set(VisibilityState::Hidden);
        self.arm_listener();
    }

    /// Close requests hide the window instead. Always suppresses the close.
    pub fn handle_close_request(&self) -> bool {
        debug!("close requested, hiding instead");
        self.hide();
        true
    }

    /// Terminate on the exit combination. Returns whether the event was consumed.
    pub fn handle_key_down(&self, event: &KeyDown) -> bool {
        if self.state() != VisibilityState::Visible {
            return false;
        }

        let matched = self
            .inner
            .binding
            .borrow()
            .as_ref()
            .is_some_and(|binding| binding.exit.matches(event));
        if !matched {
            return false;
        }

        info!(text = %event.text, modifiers = ?event.modifiers, "exit combination pressed");
        self.inner.observer.on_exit();
        self.terminate(0);
        true
    }

    fn arm_listener(&self) {
        if !self.is_attached() {
            warn!("hidden before attach, hotkey listener not armed");
            return;
        }

        let weak = Rc::downgrade(&self.inner);
        self.inner.scheduler.schedule_once(Box::new(move || {
            with_controller(&weak, |controller| controller.listen_for_show());
        }));
    }

    fn listen_for_show(&self) {
        if self.state() != VisibilityState::Hidden {
            debug!("window shown before the listener was armed, skipping");
            return;
        }

        let Some((combo, window)) = self
            .inner
            .binding
            .borrow()
            .as_ref()
            .map(|binding| (binding.show_combo, binding.window))
        else {
            return;
        };

        let controller = self.clone();
        match self.inner.listener.listen(&combo, window, || controller.show()) {
            Ok(ListenOutcome::Fired) => debug!(combo = %combo, "listen cycle finished"),
            Ok(ListenOutcome::Drained) => {
                // Still hidden and nothing armed: the window is unreachable
                error!(combo = %combo, "message queue drained before hotkey fired, exiting");
                self.terminate(1);
            }
            Err(e) => {
                // A hidden window without a working hotkey can never come back
                error!(error = %e, "hotkey listener failed, exiting");
                self.terminate(1);
            }
        }
    }

    fn terminate(&self, code: i32) {
        self.inner.registrar.borrow_mut().release();
        info!(code, "terminating");
        self.inner.window.terminate(code);
    }
}

fn with_controller<B, T>(
    weak: &Weak<Inner<B>>,
    f: impl FnOnce(&VisibilityController<B>) -> T,
) -> Option<T>
where
    B: HotkeyBackend + 'static,
{
    weak.upgrade().map(|inner| f(&VisibilityController { inner }))
}
