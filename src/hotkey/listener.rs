//! Blocking message loop that waits for the show hotkey
//!
//! Registers the combo, then drains the current thread's message queue
//! until the hotkey-fired message for our slot arrives. Every other
//! message is translated and dispatched so normal window routing keeps
//! working while we wait.

use std::cell::RefCell;
use std::rc::Rc;

use tracing::{debug, info};

use crate::host::WindowHandle;

use super::backend::HotkeyBackend;
use super::error::HotkeyError;
use super::keys::KeyCombo;
use super::registrar::HotkeyRegistrar;

/// How a listen cycle ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListenOutcome {
    /// The hotkey fired and the callback ran
    Fired,
    /// The message queue was drained (quit) before the hotkey fired
    Drained,
}

/// Runs one register/wait/unregister cycle per call to [`HotkeyListener::listen`]
pub struct HotkeyListener<B> {
    backend: Rc<B>,
    registrar: Rc<RefCell<HotkeyRegistrar<B>>>,
}

impl<B: HotkeyBackend> HotkeyListener<B> {
    pub fn new(backend: Rc<B>, registrar: Rc<RefCell<HotkeyRegistrar<B>>>) -> Self {
        Self { backend, registrar }
    }

    /// Block until `combo` fires, then call `on_fire`.
    ///
    /// The registration is released on every exit path that got past
    /// registering. Registration errors are returned untouched.
    pub fn listen<F>(
        &self,
        combo: &KeyCombo,
        window: WindowHandle,
        on_fire: F,
    ) -> Result<ListenOutcome, HotkeyError>
    where
        F: FnOnce(),
    {
        let registration = self.registrar.borrow_mut().register(combo, window)?;
        info!(combo = %combo, "waiting for hotkey");

        let mut outcome = ListenOutcome::Drained;
        while let Some(message) = self.backend.next_message() {
            if self.backend.hotkey_id(&message) == Some(registration.id()) {
                debug!(id = registration.id(), "hotkey fired");
                on_fire();
                outcome = ListenOutcome::Fired;
                break;
            }

            self.backend.dispatch(&message);
        }

        self.registrar.borrow_mut().unregister(&registration);
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;
    use crate::hotkey::registrar::HOTKEY_ID;
    use crate::testing::{FakeBackend, FakeMessage};

    fn listener() -> (HotkeyListener<FakeBackend>, Rc<FakeBackend>) {
        let backend = Rc::new(FakeBackend::default());
        let registrar = Rc::new(RefCell::new(HotkeyRegistrar::new(Rc::clone(&backend))));
        (HotkeyListener::new(Rc::clone(&backend), registrar), backend)
    }

    #[test]
    fn test_fires_on_matching_hotkey() {
        let (listener, backend) = listener();
        backend.push_message(FakeMessage::Other(1));
        backend.push_message(FakeMessage::Hotkey(HOTKEY_ID));
        backend.push_message(FakeMessage::Other(2));

        let fired = Cell::new(false);
        let combo = KeyCombo::parse("alt+space").unwrap();
        let outcome = listener
            .listen(&combo, WindowHandle::NULL, || fired.set(true))
            .unwrap();

        assert_eq!(outcome, ListenOutcome::Fired);
        assert!(fired.get());
        // Messages before the hotkey are pumped, the loop stops right after it
        assert_eq!(backend.dispatched(), vec![FakeMessage::Other(1)]);
        assert_eq!(backend.pending_messages(), 1);
        assert_eq!(backend.unregistered(), vec![HOTKEY_ID]);
    }

    #[test]
    fn test_foreign_hotkey_ids_are_dispatched() {
        let (listener, backend) = listener();
        backend.push_message(FakeMessage::Hotkey(HOTKEY_ID + 1));

        let combo = KeyCombo::parse("ctrl+alt+space").unwrap();
        let outcome = listener
            .listen(&combo, WindowHandle::NULL, || panic!("wrong slot fired"))
            .unwrap();

        assert_eq!(outcome, ListenOutcome::Drained);
        assert_eq!(backend.dispatched(), vec![FakeMessage::Hotkey(HOTKEY_ID + 1)]);
    }

    #[test]
    fn test_drained_queue_still_unregisters() {
        let (listener, backend) = listener();
        let combo = KeyCombo::parse("alt+space").unwrap();

        let outcome = listener.listen(&combo, WindowHandle::NULL, || {}).unwrap();
        assert_eq!(outcome, ListenOutcome::Drained);
        assert_eq!(backend.unregistered(), vec![HOTKEY_ID]);

        // The slot is free again for the next cycle
        listener.listen(&combo, WindowHandle::NULL, || {}).unwrap();
        assert_eq!(backend.registered().len(), 2);
    }

    #[test]
    fn test_registration_failure_skips_loop() {
        let (listener, backend) = listener();
        backend.refuse_registration("claimed by another process");
        backend.push_message(FakeMessage::Hotkey(HOTKEY_ID));

        let combo = KeyCombo::parse("alt+space").unwrap();
        let result = listener.listen(&combo, WindowHandle::NULL, || {});

        assert!(matches!(result, Err(HotkeyError::RegistrationFailed { .. })));
        assert_eq!(backend.pending_messages(), 1);
        assert!(backend.unregistered().is_empty());
    }
}
