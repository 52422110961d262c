//! In-memory collaborators for unit tests

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;

use crate::events::{LifecycleEvent, LifecycleObserver};
use crate::host::{CloseHandler, HostWindow, KeyDown, KeyHandler, WindowHandle};
use crate::hotkey::{HotkeyBackend, HotkeyError, KeyCombo};

/// Something observable that happened to the window or observer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Event(LifecycleEvent),
    Show,
    Hide,
    BringToFront,
    Terminate(i32),
}

/// Shared, ordered log of calls
#[derive(Debug, Clone, Default)]
pub struct Journal(Rc<RefCell<Vec<Call>>>);

impl Journal {
    pub fn push(&self, call: Call) {
        self.0.borrow_mut().push(call);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.0.borrow().clone()
    }

    pub fn count(&self, call: &Call) -> usize {
        self.0.borrow().iter().filter(|c| *c == call).count()
    }

    pub fn clear(&self) {
        self.0.borrow_mut().clear();
    }
}

pub struct RecordingObserver {
    journal: Journal,
}

impl RecordingObserver {
    pub fn new(journal: Journal) -> Self {
        Self { journal }
    }
}

impl LifecycleObserver for RecordingObserver {
    fn on_init(&self) {
        self.journal.push(Call::Event(LifecycleEvent::Init));
    }

    fn on_show(&self) {
        self.journal.push(Call::Event(LifecycleEvent::Show));
    }

    fn on_hide(&self) {
        self.journal.push(Call::Event(LifecycleEvent::Hide));
    }

    fn on_exit(&self) {
        self.journal.push(Call::Event(LifecycleEvent::Exit));
    }
}

pub struct FakeWindow {
    journal: Journal,
    close_handler: RefCell<Option<CloseHandler>>,
    key_handler: RefCell<Option<KeyHandler>>,
    terminated: Cell<Option<i32>>,
}

impl FakeWindow {
    pub fn new(journal: Journal) -> Self {
        Self {
            journal,
            close_handler: RefCell::new(None),
            key_handler: RefCell::new(None),
            terminated: Cell::new(None),
        }
    }

    /// Deliver a close request; `true` when it was suppressed
    pub fn request_close(&self) -> bool {
        self.close_handler
            .borrow()
            .as_ref()
            .is_some_and(|handler| handler())
    }

    /// Deliver a key-down; `true` when it was consumed
    pub fn press_key(&self, event: &KeyDown) -> bool {
        self.key_handler
            .borrow()
            .as_ref()
            .is_some_and(|handler| handler(event))
    }

    pub fn has_close_handler(&self) -> bool {
        self.close_handler.borrow().is_some()
    }

    pub fn terminated(&self) -> Option<i32> {
        self.terminated.get()
    }
}

impl HostWindow for FakeWindow {
    fn handle(&self) -> WindowHandle {
        WindowHandle::from_raw(0x1234)
    }

    fn show(&self) {
        self.journal.push(Call::Show);
    }

    fn hide(&self) {
        self.journal.push(Call::Hide);
    }

    fn bring_to_front(&self) {
        self.journal.push(Call::BringToFront);
    }

    fn set_close_handler(&self, handler: CloseHandler) {
        *self.close_handler.borrow_mut() = Some(handler);
    }

    fn set_key_handler(&self, handler: KeyHandler) {
        *self.key_handler.borrow_mut() = Some(handler);
    }

    fn terminate(&self, code: i32) {
        self.journal.push(Call::Terminate(code));
        self.terminated.set(Some(code));
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FakeMessage {
    Hotkey(i32),
    Other(u32),
}

/// Backend with a scripted message queue. An empty queue reads as drained.
#[derive(Default)]
pub struct FakeBackend {
    queue: RefCell<VecDeque<FakeMessage>>,
    registered: RefCell<Vec<(i32, KeyCombo, WindowHandle)>>,
    unregistered: RefCell<Vec<i32>>,
    dispatched: RefCell<Vec<FakeMessage>>,
    refusal: RefCell<Option<String>>,
    fail_unregister: Cell<bool>,
}

impl FakeBackend {
    pub fn push_message(&self, message: FakeMessage) {
        self.queue.borrow_mut().push_back(message);
    }

    pub fn pending_messages(&self) -> usize {
        self.queue.borrow().len()
    }

    pub fn refuse_registration(&self, reason: &str) {
        *self.refusal.borrow_mut() = Some(reason.to_string());
    }

    pub fn fail_unregister(&self, fail: bool) {
        self.fail_unregister.set(fail);
    }

    pub fn registered(&self) -> Vec<(i32, KeyCombo, WindowHandle)> {
        self.registered.borrow().clone()
    }

    pub fn unregistered(&self) -> Vec<i32> {
        self.unregistered.borrow().clone()
    }

    pub fn dispatched(&self) -> Vec<FakeMessage> {
        self.dispatched.borrow().clone()
    }
}

impl HotkeyBackend for FakeBackend {
    type Message = FakeMessage;

    fn check_platform(&self) -> Result<(), HotkeyError> {
        Ok(())
    }

    fn register_hotkey(&self, id: i32, combo: &KeyCombo, window: WindowHandle) -> Result<(), String> {
        if let Some(reason) = self.refusal.borrow().clone() {
            return Err(reason);
        }
        self.registered.borrow_mut().push((id, *combo, window));
        Ok(())
    }

    fn unregister_hotkey(&self, id: i32, _window: WindowHandle) -> Result<(), String> {
        self.unregistered.borrow_mut().push(id);
        if self.fail_unregister.get() {
            return Err("hotkey is not registered".to_string());
        }
        Ok(())
    }

    fn next_message(&self) -> Option<FakeMessage> {
        self.queue.borrow_mut().pop_front()
    }

    fn hotkey_id(&self, message: &FakeMessage) -> Option<i32> {
        match message {
            FakeMessage::Hotkey(id) => Some(*id),
            FakeMessage::Other(_) => None,
        }
    }

    fn dispatch(&self, message: &FakeMessage) {
        self.dispatched.borrow_mut().push(*message);
    }
}
