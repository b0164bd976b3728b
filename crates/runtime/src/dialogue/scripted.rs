//! Offline dialogue backed by the authored line tables.

use std::sync::Arc;

use async_trait::async_trait;

use game_content::DialogueLines;
use game_core::VillagerOrder;

use super::service::{ChatRequest, DialogueError, DialogueReply, DialogueService, LoreRequest};

/// Answers from [`DialogueLines`] and reads orders from keywords in the
/// player's message.
pub struct ScriptedDialogue {
    lines: Arc<DialogueLines>,
}

impl ScriptedDialogue {
    pub fn new(lines: Arc<DialogueLines>) -> Self {
        Self { lines }
    }

    fn intent(message: &str) -> VillagerOrder {
        let message = message.to_ascii_lowercase();
        let said = |words: &[&str]| words.iter().any(|w| message.contains(w));
        if said(&["join", "party", "team"]) {
            VillagerOrder::JoinParty
        } else if said(&["follow", "come with"]) {
            VillagerOrder::Follow
        } else if said(&["stay", "wait", "hold"]) {
            VillagerOrder::Stay
        } else if said(&["attack", "fight", "kill"]) {
            VillagerOrder::Attack
        } else {
            VillagerOrder::None
        }
    }
}

#[async_trait]
impl DialogueService for ScriptedDialogue {
    async fn chat(&self, request: &ChatRequest) -> Result<DialogueReply, DialogueError> {
        let lines = self.lines.lines(request.mood);
        if lines.is_empty() {
            return Err(DialogueError::NoLines(format!("{:?}", request.mood)));
        }
        let pick = (request.entity.0 as usize + request.history.len()) % lines.len();
        let action = if request.hostile {
            VillagerOrder::None
        } else {
            Self::intent(&request.message)
        };
        Ok(DialogueReply::new(lines[pick].clone(), action))
    }

    async fn lore(&self, request: &LoreRequest) -> Result<String, DialogueError> {
        let lines = self.lines.lore(request.tile);
        if lines.is_empty() {
            return Err(DialogueError::NoLines(request.tile.to_string()));
        }
        Ok(lines[request.depth.unsigned_abs() as usize % lines.len()].clone())
    }
}
