//! hotkey-toggle: keep a desktop window hidden until a global hotkey
//!
//! The window starts hidden. Pressing the show hotkey (default
//! `alt+space`) brings it to the foreground; closing it hides it again
//! and re-arms the hotkey. While visible, the exit combination (default
//! `ctrl+c`) ends the process.
//!
//! Components:
//! - [`hotkey`]: shortcut parsing, the single registration slot and the
//!   blocking listener loop
//! - [`state`]: the Hidden/Visible state machine
//! - [`events`]: init/show/hide/exit notifications
//! - [`host`]: window and scheduler contracts supplied by the UI toolkit
//! - [`platform`]: the Win32 implementation of those contracts

pub mod config;
pub mod events;
pub mod host;
pub mod hotkey;
pub mod platform;
pub mod state;

#[cfg(test)]
mod testing;

pub use config::HotkeyConfig;
pub use events::{BroadcastObserver, LifecycleEvent, LifecycleObserver};
pub use hotkey::{HotkeyError, KeyCombo};
pub use state::{VisibilityController, VisibilityState};
