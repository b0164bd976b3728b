//! Outbound notifications produced by the engine.
//!
//! The engine never calls back into consumers. Everything observable is pushed
//! onto [`EventQueue`] in the order it happened and drained by the runtime
//! once per tick.

use std::collections::VecDeque;

use crate::env::QuestId;
use crate::state::{EntityId, EntityKind};
use crate::world::TileKind;

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GameEvent {
    /// Player body, health, flags or equipment changed.
    PlayerChanged,
    InventoryChanged,
    /// Entity list changed (spawn, death, movement).
    EntitiesChanged,
    ClockTick {
        time: u32,
    },
    /// A lore-bearing tile was broken at the given depth below the surface.
    LoreDiscovered {
        tile: TileKind,
        depth: i32,
    },
    BossSpawned {
        kind: EntityKind,
        name: String,
    },
    QuestOffered {
        quest: QuestId,
        giver: EntityId,
    },
    QuestReadyToComplete {
        quest: QuestId,
        giver: EntityId,
    },
    QuestProgress {
        quest: QuestId,
        progress: u32,
        goal: u32,
    },
    QuestCompleted {
        quest: QuestId,
    },
    DialogueOpened {
        entity: EntityId,
    },
    /// Short user-facing message ("TARGET NEUTRALIZED: GUARDIAN").
    Notice {
        message: String,
    },
    GameOver {
        reason: String,
    },
    GameWon,
}

impl GameEvent {
    /// Change markers carry no payload and are coalesced within one drain.
    pub fn is_change_marker(&self) -> bool {
        matches!(
            self,
            Self::PlayerChanged | Self::InventoryChanged | Self::EntitiesChanged
        )
    }

    pub fn notice(message: impl Into<String>) -> Self {
        Self::Notice {
            message: message.into(),
        }
    }
}

/// FIFO of pending events.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EventQueue {
    pending: VecDeque<GameEvent>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: GameEvent) {
        if event.is_change_marker() && self.pending.contains(&event) {
            return;
        }
        self.pending.push_back(event);
    }

    pub fn notice(&mut self, message: impl Into<String>) {
        self.push(GameEvent::notice(message));
    }

    /// Removes and returns every pending event in emission order.
    pub fn drain(&mut self) -> Vec<GameEvent> {
        self.pending.drain(..).collect()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &GameEvent> {
        self.pending.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn change_markers_coalesce_until_drained() {
        let mut queue = EventQueue::new();
        queue.push(GameEvent::PlayerChanged);
        queue.notice("hello");
        queue.push(GameEvent::PlayerChanged);
        assert_eq!(queue.len(), 2);

        let drained = queue.drain();
        assert_eq!(drained[0], GameEvent::PlayerChanged);
        assert!(queue.is_empty());

        queue.push(GameEvent::PlayerChanged);
        assert_eq!(queue.len(), 1);
    }

    #[test]
    fn payload_events_are_never_coalesced() {
        let mut queue = EventQueue::new();
        queue.push(GameEvent::ClockTick { time: 100 });
        queue.push(GameEvent::ClockTick { time: 100 });
        assert_eq!(queue.len(), 2);
    }
}
