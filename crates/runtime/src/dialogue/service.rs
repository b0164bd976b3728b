//! Dialogue service contract and reply parsing.

use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;

use game_content::Mood;
use game_core::state::{AiState, ChatLine, VillagerJob};
use game_core::{EntityId, GameState, TileKind, VillagerOrder};

/// Text a villager says when the service fails.
pub const CHAT_FALLBACK: &str = "...";
/// Text shown for a lore tile when the service fails.
pub const LORE_FALLBACK: &str = "Data corrupted.";

#[derive(Debug, Error)]
pub enum DialogueError {
    #[error("no scripted lines for {0}")]
    NoLines(String),

    #[error("malformed reply: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("dialogue backend unavailable: {0}")]
    Unavailable(String),
}

/// Everything a service needs to answer a villager conversation.
#[derive(Clone, Debug, PartialEq)]
pub struct ChatRequest {
    pub entity: EntityId,
    pub name: String,
    pub personality: String,
    pub job: VillagerJob,
    pub mood: Mood,
    pub hostile: bool,
    /// Earlier lines of this conversation, oldest first.
    pub history: Vec<ChatLine>,
    pub message: String,
}

impl ChatRequest {
    /// Captures the villager's situation. `None` when `entity` is not a live
    /// villager.
    pub fn from_state(state: &GameState, entity: EntityId, message: impl Into<String>) -> Option<Self> {
        let villager = state.entities.live(entity)?;
        let data = villager.villager()?;
        let hostile = villager.is_hostile_villager();

        let mood = if hostile {
            Mood::Angry
        } else if villager.health * 2 < villager.max_health {
            Mood::Hurt
        } else if data.has_quest {
            Mood::Quest
        } else if villager.ai == AiState::SeekingShelter {
            Mood::Shelter
        } else if data.job == VillagerJob::Librarian {
            Mood::Librarian
        } else if state.clock.is_heavy_rain() {
            Mood::Rain
        } else if state.clock.is_night() {
            Mood::Night
        } else {
            Mood::Day
        };

        Some(Self {
            entity,
            name: data.name.clone(),
            personality: data.personality.clone(),
            job: data.job,
            mood,
            hostile,
            history: data.chat.iter().cloned().collect(),
            message: message.into(),
        })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LoreRequest {
    pub tile: TileKind,
    /// Rows below the surface where the tile was broken.
    pub depth: i32,
}

/// A villager's answer: spoken text plus an optional order for itself.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DialogueReply {
    pub text: String,
    pub action: VillagerOrder,
}

#[derive(Default, Deserialize)]
#[serde(default)]
struct RawReply {
    text: Option<String>,
    action: Option<String>,
}

impl DialogueReply {
    pub fn new(text: impl Into<String>, action: VillagerOrder) -> Self {
        Self {
            text: text.into(),
            action,
        }
    }

    pub fn fallback() -> Self {
        Self::new(CHAT_FALLBACK, VillagerOrder::None)
    }

    /// Parses a structured `{"text": .., "action": ..}` reply.
    ///
    /// Surrounding prose or code fences are skipped, missing or empty text
    /// becomes the fallback line and unknown actions become `NONE`.
    pub fn parse(raw: &str) -> Result<Self, DialogueError> {
        let body = match (raw.find('{'), raw.rfind('}')) {
            (Some(start), Some(end)) if start < end => &raw[start..=end],
            _ => raw.trim(),
        };
        let reply: RawReply = serde_json::from_str(body)?;
        let text = reply
            .text
            .map(|t| t.trim().to_owned())
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| CHAT_FALLBACK.to_owned());
        let action = reply
            .action
            .and_then(|a| a.trim().parse().ok())
            .unwrap_or_default();
        Ok(Self { text, action })
    }
}

/// Produces villager replies and lore text.
///
/// Calls run outside the simulation; results are applied on the next tick.
#[async_trait]
pub trait DialogueService: Send + Sync {
    async fn chat(&self, request: &ChatRequest) -> Result<DialogueReply, DialogueError>;

    async fn lore(&self, request: &LoreRequest) -> Result<String, DialogueError>;
}
