//! Topic-based event bus implementation.

use std::collections::HashMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use super::types::{DialogueEvent, PlayerEvent, ProgressEvent, SessionEvent, WorldEvent};

/// Topics for event routing
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub enum Topic {
    /// Player body, inventory and notices
    Player,
    /// Entities, clock, bosses and lore discoveries
    World,
    /// Quest lifecycle
    Progress,
    /// Villager conversations and lore text
    Dialogue,
    /// Persistence and end-of-run signals
    Session,
}

impl Topic {
    pub const ALL: [Topic; 5] = [
        Topic::Player,
        Topic::World,
        Topic::Progress,
        Topic::Dialogue,
        Topic::Session,
    ];

    fn index(self) -> usize {
        self as usize
    }
}

/// Event wrapper that carries the topic and typed event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Event {
    Player(PlayerEvent),
    World(WorldEvent),
    Progress(ProgressEvent),
    Dialogue(DialogueEvent),
    Session(SessionEvent),
}

impl Event {
    pub fn topic(&self) -> Topic {
        match self {
            Event::Player(_) => Topic::Player,
            Event::World(_) => Topic::World,
            Event::Progress(_) => Topic::Progress,
            Event::Dialogue(_) => Topic::Dialogue,
            Event::Session(_) => Topic::Session,
        }
    }

    pub fn notice(message: impl Into<String>) -> Self {
        Event::Player(PlayerEvent::Notice {
            message: message.into(),
        })
    }
}

/// Topic-based event bus
///
/// Allows consumers to subscribe to specific topics and only receive
/// events they care about. Every topic channel exists from construction,
/// so subscribing never fails.
pub struct EventBus {
    channels: Arc<[broadcast::Sender<Event>; 5]>,
}

impl EventBus {
    /// Creates a new event bus with default capacity for each topic
    pub fn new() -> Self {
        Self::with_capacity(100)
    }

    /// Creates a new event bus with specified capacity per topic
    pub fn with_capacity(capacity: usize) -> Self {
        let channels = Topic::ALL.map(|_| broadcast::channel(capacity.max(1)).0);
        Self {
            channels: Arc::new(channels),
        }
    }

    /// Publish an event to its corresponding topic
    pub fn publish(&self, event: Event) {
        let topic = event.topic();
        if self.channels[topic.index()].send(event).is_err() {
            // No subscribers for this topic - this is normal, not an error
            tracing::trace!("No subscribers for topic {:?}", topic);
        }
    }

    /// Subscribe to a specific topic
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.channels[topic.index()].subscribe()
    }

    /// Subscribe to multiple topics
    pub fn subscribe_multiple(
        &self,
        topics: &[Topic],
    ) -> HashMap<Topic, broadcast::Receiver<Event>> {
        topics
            .iter()
            .map(|&topic| (topic, self.subscribe(topic)))
            .collect()
    }

    pub fn subscriber_count(&self, topic: Topic) -> usize {
        self.channels[topic.index()].receiver_count()
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
    use crate::events::WorldEvent;

    #[tokio::test]
    async fn subscribers_only_see_their_topic() {
        let bus = EventBus::with_capacity(8);
        let mut world = bus.subscribe(Topic::World);
        let mut session = bus.subscribe(Topic::Session);

        bus.publish(Event::notice("hello"));
        bus.publish(Event::World(WorldEvent::ClockTick { time: 6100 }));

        assert_eq!(
            world.recv().await.unwrap(),
            Event::World(WorldEvent::ClockTick { time: 6100 })
        );
        assert!(session.try_recv().is_err());
    }

    #[test]
    fn publishing_without_subscribers_is_silent() {
        let bus = EventBus::default();
        bus.publish(Event::notice("nobody listens"));
        assert_eq!(bus.subscriber_count(Topic::Player), 0);
    }
}
