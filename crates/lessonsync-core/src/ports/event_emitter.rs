//! Sync event emitter port.
//!
//! Progress is published as typed [`SyncEvent`]s rather than through a
//! callback; subscribers receive them over a channel.

use tokio::sync::mpsc;

use crate::events::SyncEvent;

/// Port for emitting synchronization progress events.
pub trait SyncEventEmitterPort: Send + Sync {
    /// Emit a sync event.
    fn emit(&self, event: SyncEvent);

    /// Clone this emitter into a boxed trait object.
    fn clone_box(&self) -> Box<dyn SyncEventEmitterPort>;
}

/// A no-op emitter for tests and contexts without progress output.
#[derive(Debug, Clone, Default)]
pub struct NoopSyncEmitter;

impl NoopSyncEmitter {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl SyncEventEmitterPort for NoopSyncEmitter {
    fn emit(&self, _event: SyncEvent) {}

    fn clone_box(&self) -> Box<dyn SyncEventEmitterPort> {
        Box::new(self.clone())
    }
}

/// Forwards events into an unbounded channel.
///
/// Events emitted after the receiver is dropped are discarded, which lets a
/// subscriber stop listening at any time.
#[derive(Debug, Clone)]
pub struct ChannelSyncEmitter {
    sender: mpsc::UnboundedSender<SyncEvent>,
}

impl ChannelSyncEmitter {
    /// Create an emitter together with the receiving end of its channel.
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<SyncEvent>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self { sender }, receiver)
    }
}

impl SyncEventEmitterPort for ChannelSyncEmitter {
    fn emit(&self, event: SyncEvent) {
        let _ = self.sender.send(event);
    }

    fn clone_box(&self) -> Box<dyn SyncEventEmitterPort> {
        Box::new(self.clone())
    }
}
