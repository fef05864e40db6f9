//! Topic-based event bus.
//!
//! Domain events publish here only after their transaction has committed;
//! delivery is fire-and-forget and a topic without subscribers is normal.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{RwLock, broadcast};

use kitty_core::LedgerEvent;

/// Topics for event routing.
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq)]
pub enum Topic {
    /// Ownership and approval changes (Transfer, Approval, SiringApproval).
    Ownership,
    /// Lifecycle of matings and births (Pregnant, Birth).
    Breeding,
}

impl Topic {
    /// Routes an event to its topic.
    pub fn of(event: &LedgerEvent) -> Topic {
        match event {
            LedgerEvent::Transfer { .. }
            | LedgerEvent::Approval { .. }
            | LedgerEvent::SiringApproval { .. } => Topic::Ownership,
            LedgerEvent::Birth { .. } | LedgerEvent::Pregnant { .. } => Topic::Breeding,
        }
    }
}

/// Broadcast bus that lets consumers subscribe per topic and only receive
/// the events they care about.
pub struct EventBus {
    channels: Arc<RwLock<HashMap<Topic, broadcast::Sender<LedgerEvent>>>>,
}

impl EventBus {
    /// Creates a new event bus with default capacity for each topic.
    pub fn new() -> Self {
        Self::with_capacity(100)
    }

    /// Creates a new event bus with the given capacity per topic.
    pub fn with_capacity(capacity: usize) -> Self {
        let mut channels = HashMap::new();
        channels.insert(Topic::Ownership, broadcast::channel(capacity).0);
        channels.insert(Topic::Breeding, broadcast::channel(capacity).0);

        Self {
            channels: Arc::new(RwLock::new(channels)),
        }
    }

    /// Publishes an event to its topic. Best-effort: if the bus is under
    /// contention or the topic has no subscribers, the event is dropped.
    pub fn publish(&self, event: LedgerEvent) {
        let topic = Topic::of(&event);

        match self.channels.try_read() {
            Ok(channels) => {
                if let Some(tx) = channels.get(&topic)
                    && tx.send(event).is_err()
                {
                    tracing::trace!("no subscribers for topic {:?}", topic);
                }
            }
            Err(_) => {
                tracing::debug!("failed to acquire event bus lock for topic {:?}", topic);
            }
        }
    }

    /// Subscribes to a single topic.
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<LedgerEvent> {
        let channels = self
            .channels
            .try_read()
            .expect("failed to acquire read lock on event channels");
        channels
            .get(&topic)
            .expect("topic channel not initialized")
            .subscribe()
    }
}

impl Clone for EventBus {
    fn clone(&self) -> Self {
        Self {
            channels: Arc::clone(&self.channels),
        }
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kitty_core::{Identity, KittyId};

    #[test]
    fn events_route_to_their_topic() {
        let bus = EventBus::new();
        let mut ownership = bus.subscribe(Topic::Ownership);
        let mut breeding = bus.subscribe(Topic::Breeding);

        bus.publish(LedgerEvent::Transfer {
            from: Identity::empty(),
            to: Identity::from("alice"),
            kitty_id: KittyId(1),
        });

        let received = ownership.try_recv().unwrap();
        assert_eq!(received.name(), "Transfer");
        assert!(breeding.try_recv().is_err());
    }

    #[test]
    fn publishing_without_subscribers_is_not_an_error() {
        let bus = EventBus::new();
        bus.publish(LedgerEvent::Pregnant {
            owner: Identity::from("alice"),
            matron_id: KittyId(1),
            sire_id: KittyId(2),
            matron_cooldown_end: kitty_core::Timestamp(10),
        });
    }
}
