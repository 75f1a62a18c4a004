//! Bridge events for observers beyond the single listener slots.

use tokio::sync::broadcast;

use crate::envelope::StateValue;

/// Something the bridge observed from the content side.
#[derive(Debug, Clone, PartialEq)]
pub enum BridgeEvent {
    /// An inbound state update was cached.
    StateUpdated { key: String, value: StateValue },
    /// The content raised a named event.
    Event { name: String, data: StateValue },
    /// A handshake arrived. `first` is true only for the one that flipped
    /// the bridge to initialized.
    Handshake { first: bool },
}

/// Broadcast fan-out of [`BridgeEvent`]s.
#[derive(Debug)]
pub struct EventBus {
    sender: broadcast::Sender<BridgeEvent>,
}

impl EventBus {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<BridgeEvent> {
        self.sender.subscribe()
    }

    /// Publish to every current subscriber, returning how many there are.
    pub fn publish(&self, event: BridgeEvent) -> usize {
        self.sender.send(event).unwrap_or(0)
    }
}
