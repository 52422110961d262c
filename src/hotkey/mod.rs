//! Hotkey module for global show hotkeys and the exit combination
//!
//! Parses shortcut strings, owns the single OS-wide registration slot and
//! runs the blocking message loop that waits for the hotkey to fire.

mod backend;
mod error;
mod interceptor;
mod keys;
mod listener;
mod registrar;

pub use backend::HotkeyBackend;
pub use error::HotkeyError;
pub use interceptor::ExitInterceptor;
pub use keys::{flags, Key, KeyCombo, Modifier, ModifierSet};
pub use listener::{HotkeyListener, ListenOutcome};
pub use registrar::{HotkeyRegistrar, HotkeyRegistration, HOTKEY_ID};
