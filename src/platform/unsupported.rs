//! Stand-in backend for platforms without Win32 hotkeys

use crate::host::WindowHandle;
use crate::hotkey::{HotkeyBackend, HotkeyError, KeyCombo};

/// Reports every operation as unsupported
#[derive(Debug, Clone, Copy, Default)]
pub struct Win32Backend;

impl Win32Backend {
    pub fn new() -> Self {
        Self
    }
}

impl HotkeyBackend for Win32Backend {
    type Message = ();

    fn check_platform(&self) -> Result<(), HotkeyError> {
        Err(HotkeyError::UnsupportedPlatform(std::env::consts::OS.to_string()))
    }

    fn register_hotkey(&self, _id: i32, _combo: &KeyCombo, _window: WindowHandle) -> Result<(), String> {
        Err("global hotkeys are only supported on Windows".to_string())
    }

    fn unregister_hotkey(&self, _id: i32, _window: WindowHandle) -> Result<(), String> {
        Err("global hotkeys are only supported on Windows".to_string())
    }

    fn next_message(&self) -> Option<()> {
        None
    }

    fn hotkey_id(&self, _message: &()) -> Option<i32> {
        None
    }

    fn dispatch(&self, _message: &()) {}
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use super::*;
    use crate::config::HotkeyConfig;
    use crate::host::ManualScheduler;
    use crate::state::VisibilityController;
    use crate::testing::{FakeWindow, Journal};

    #[test]
    fn test_reports_unsupported_platform() {
        let result = Win32Backend::new().check_platform();
        assert!(matches!(result, Err(HotkeyError::UnsupportedPlatform(_))));
    }

    #[test]
    #[should_panic(expected = "does not work for your platform")]
    fn test_attach_fails_fast() {
        let controller = VisibilityController::builder(
            Rc::new(FakeWindow::new(Journal::default())),
            Rc::new(ManualScheduler::new()),
            Rc::new(Win32Backend::new()),
        )
        .config(HotkeyConfig::default())
        .build();

        let _ = controller.attach();
    }
}
