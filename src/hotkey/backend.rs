//! Seam between the hotkey core and the operating system

use crate::host::WindowHandle;

use super::error::HotkeyError;
use super::keys::KeyCombo;

/// OS primitives for global hotkeys and the thread message queue.
///
/// All calls happen on the UI thread that owns the window.
pub trait HotkeyBackend {
    /// A message pulled off the thread's queue
    type Message;

    /// Fails when this backend cannot run on the current platform
    fn check_platform(&self) -> Result<(), HotkeyError>;

    /// Bind `combo` system-wide under slot `id`. The error carries the OS reason.
    fn register_hotkey(&self, id: i32, combo: &KeyCombo, window: WindowHandle) -> Result<(), String>;

    fn unregister_hotkey(&self, id: i32, window: WindowHandle) -> Result<(), String>;

    /// Block until the next message arrives. `None` once the queue is drained.
    fn next_message(&self) -> Option<Self::Message>;

    /// Slot id carried by a hotkey-fired message, `None` for anything else
    fn hotkey_id(&self, message: &Self::Message) -> Option<i32>;

    /// Translate and dispatch a message the listener does not consume
    fn dispatch(&self, message: &Self::Message);
}
