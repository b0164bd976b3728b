//! Event types for different topics.

use serde::{Deserialize, Serialize};

use game_core::env::QuestId;
use game_core::{EntityId, EntityKind, GameEvent, TileKind, VillagerOrder};

/// Player body, inventory and user-facing notices.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PlayerEvent {
    Changed,
    InventoryChanged,
    /// Short message meant for a toast or status line.
    Notice { message: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum WorldEvent {
    EntitiesChanged,
    ClockTick { time: u32 },
    BossSpawned { kind: EntityKind, name: String },
    LoreDiscovered { tile: TileKind, depth: i32 },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ProgressEvent {
    QuestOffered { quest: QuestId, giver: EntityId },
    QuestReadyToComplete { quest: QuestId, giver: EntityId },
    QuestProgress { quest: QuestId, progress: u32, goal: u32 },
    QuestCompleted { quest: QuestId },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DialogueEvent {
    /// The player opened a conversation with a villager.
    Opened { entity: EntityId },
    /// A villager answered; `order` has already been applied.
    Reply {
        entity: EntityId,
        name: String,
        text: String,
        order: VillagerOrder,
    },
    /// Flavor text for a lore tile the player broke.
    Lore { tile: TileKind, text: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SessionEvent {
    Saved { slot: String, tick: u64 },
    SaveFailed { slot: String, error: String },
    Loaded { slot: String, tick: u64 },
    LoadFailed { slot: String, error: String },
    GameOver { reason: String },
    GameWon,
}

impl SessionEvent {
    /// Toast text shown for persistence outcomes.
    pub fn notice(&self) -> Option<&'static str> {
        match self {
            Self::Saved { .. } => Some("Game Saved!"),
            Self::SaveFailed { .. } => Some("Save Failed"),
            Self::Loaded { .. } => Some("Game Loaded!"),
            Self::LoadFailed { .. } => Some("Load Failed (Corrupt Save?)"),
            _ => None,
        }
    }
}

/// Routes an engine event onto the bus.
pub fn route(event: GameEvent) -> super::Event {
    use super::Event;

    match event {
        GameEvent::PlayerChanged => Event::Player(PlayerEvent::Changed),
        GameEvent::InventoryChanged => Event::Player(PlayerEvent::InventoryChanged),
        GameEvent::Notice { message } => Event::Player(PlayerEvent::Notice { message }),
        GameEvent::EntitiesChanged => Event::World(WorldEvent::EntitiesChanged),
        GameEvent::ClockTick { time } => Event::World(WorldEvent::ClockTick { time }),
        GameEvent::BossSpawned { kind, name } => Event::World(WorldEvent::BossSpawned { kind, name }),
        GameEvent::LoreDiscovered { tile, depth } => {
            Event::World(WorldEvent::LoreDiscovered { tile, depth })
        }
        GameEvent::QuestOffered { quest, giver } => {
            Event::Progress(ProgressEvent::QuestOffered { quest, giver })
        }
        GameEvent::QuestReadyToComplete { quest, giver } => {
            Event::Progress(ProgressEvent::QuestReadyToComplete { quest, giver })
        }
        GameEvent::QuestProgress {
            quest,
            progress,
            goal,
        } => Event::Progress(ProgressEvent::QuestProgress {
            quest,
            progress,
            goal,
        }),
        GameEvent::QuestCompleted { quest } => {
            Event::Progress(ProgressEvent::QuestCompleted { quest })
        }
        GameEvent::DialogueOpened { entity } => Event::Dialogue(DialogueEvent::Opened { entity }),
        GameEvent::GameOver { reason } => Event::Session(SessionEvent::GameOver { reason }),
        GameEvent::GameWon => Event::Session(SessionEvent::GameWon),
    }
}
