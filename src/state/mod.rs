//! Visibility state machine for the host window
//!
//! Two states:
//! - Hidden: window hidden, one listener armed for the show hotkey
//! - Visible: window shown, key-downs checked against the exit combination

mod machine;

pub use machine::{ControllerBuilder, VisibilityController, VisibilityState};
