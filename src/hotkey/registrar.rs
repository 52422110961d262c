//! Ownership of the single global hotkey slot

use std::rc::Rc;

use tracing::{info, warn};

use crate::host::WindowHandle;

use super::backend::HotkeyBackend;
use super::error::HotkeyError;
use super::keys::KeyCombo;

/// Slot id reserved for the show hotkey
pub const HOTKEY_ID: i32 = 1;

/// An active system-wide binding, returned as the handle for `unregister`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HotkeyRegistration {
    id: i32,
    combo: KeyCombo,
    window: WindowHandle,
}

impl HotkeyRegistration {
    pub fn id(&self) -> i32 {
        self.id
    }
}

/// Wraps register/unregister and enforces at most one active registration
pub struct HotkeyRegistrar<B> {
    backend: Rc<B>,
    active: Option<HotkeyRegistration>,
}

impl<B: HotkeyBackend> HotkeyRegistrar<B> {
    pub fn new(backend: Rc<B>) -> Self {
        Self {
            backend,
            active: None,
        }
    }

    /// Register `combo` in the reserved slot.
    ///
    /// Fails with `AlreadyRegistered` while a previous registration is still
    /// held, and with `RegistrationFailed` when the OS refuses the binding.
    pub fn register(
        &mut self,
        combo: &KeyCombo,
        window: WindowHandle,
    ) -> Result<HotkeyRegistration, HotkeyError> {
        if let Some(active) = &self.active {
            return Err(HotkeyError::AlreadyRegistered {
                id: active.id,
                combo: active.combo,
            });
        }

        info!(combo = %combo, id = HOTKEY_ID, "registering hotkey");
        self.backend
            .register_hotkey(HOTKEY_ID, combo, window)
            .map_err(|reason| HotkeyError::RegistrationFailed {
                combo: *combo,
                reason,
            })?;

        let registration = HotkeyRegistration {
            id: HOTKEY_ID,
            combo: *combo,
            window,
        };
        self.active = Some(registration.clone());
        Ok(registration)
    }

    /// Release a registration. Safe to call on an already released handle.
    pub fn unregister(&mut self, registration: &HotkeyRegistration) {
        match &self.active {
            Some(active) if active == registration => {}
            Some(active) => {
                warn!(
                    requested = %registration.combo,
                    active = %active.combo,
                    "unregister requested for a stale registration, ignoring"
                );
                return;
            }
            None => {
                warn!(combo = %registration.combo, "hotkey already unregistered");
                return;
            }
        }

        self.active = None;
        info!(combo = %registration.combo, "unregistering current hotkey");
        if let Err(reason) = self
            .backend
            .unregister_hotkey(registration.id, registration.window)
        {
            // The firing event can consume the binding on some platforms
            warn!(%reason, "hotkey could not be unregistered");
        }
    }

    /// Best-effort cleanup before the process exits
    pub fn release(&mut self) {
        if let Some(active) = self.active.clone() {
            self.unregister(&active);
        }
    }

    pub fn active(&self) -> Option<&HotkeyRegistration> {
        self.active.as_ref()
    }
}
