//! Lifecycle notifications emitted by the visibility controller
//!
//! Four fixed notification points: init, show, hide and exit. Consumers
//! implement [`LifecycleObserver`] directly, or use [`BroadcastObserver`]
//! to receive them as [`LifecycleEvent`] values on a channel.

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use tracing::debug;

/// Events emitted as the controller moves through its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LifecycleEvent {
    /// Attach finished, right before the initial hide
    Init,

    /// The show hotkey fired, right before the window is shown
    Show,

    /// Right before the window is hidden
    Hide,

    /// The exit combination was pressed, right before termination
    Exit,
}

impl std::fmt::Display for LifecycleEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LifecycleEvent::Init => write!(f, "ON_INIT"),
            LifecycleEvent::Show => write!(f, "ON_SHOW"),
            LifecycleEvent::Hide => write!(f, "ON_HIDE"),
            LifecycleEvent::Exit => write!(f, "ON_EXIT"),
        }
    }
}

/// Synchronous hooks, each called before the matching window-level effect.
///
/// Every hook defaults to doing nothing.
pub trait LifecycleObserver {
    fn on_init(&self) {}

    fn on_show(&self) {}

    fn on_hide(&self) {}

    fn on_exit(&self) {}
}

/// Observer that ignores every notification
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl LifecycleObserver for NoopObserver {}

/// Forwards every notification onto a broadcast channel
#[derive(Debug, Clone)]
pub struct BroadcastObserver {
    event_tx: broadcast::Sender<LifecycleEvent>,
}

impl BroadcastObserver {
    pub fn new(event_tx: broadcast::Sender<LifecycleEvent>) -> Self {
        Self { event_tx }
    }

    fn emit(&self, event: LifecycleEvent) {
        debug!(%event, "emitting lifecycle event");
        // Nobody listening is fine
        let _ = self.event_tx.send(event);
    }
}

impl LifecycleObserver for BroadcastObserver {
    fn on_init(&self) {
        self.emit(LifecycleEvent::Init);
    }

    fn on_show(&self) {
        self.emit(LifecycleEvent::Show);
    }

    fn on_hide(&self) {
        self.emit(LifecycleEvent::Hide);
    }

    fn on_exit(&self) {
        self.emit(LifecycleEvent::Exit);
    }
}
