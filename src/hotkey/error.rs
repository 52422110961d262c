//! Errors raised while parsing, registering and listening for hotkeys

use super::keys::KeyCombo;

/// Errors that can occur in the hotkey core
#[derive(Debug, thiserror::Error)]
pub enum HotkeyError {
    #[error("invalid key combination '{spec}': {reason}")]
    InvalidCombo { spec: String, reason: String },

    #[error("hotkey slot {id} is already registered for '{combo}'")]
    AlreadyRegistered { id: i32, combo: KeyCombo },

    #[error("could not register hotkey '{combo}': {reason}")]
    RegistrationFailed { combo: KeyCombo, reason: String },

    #[error("hotkey functionality does not work for your platform '{0}'")]
    UnsupportedPlatform(String),
}
