//! Runtime wrapper around static game content.
//!
//! The catalogs are immutable while the runtime runs; dynamic state lives in
//! [`game_core::GameState`] and the save repositories. [`OracleManager`] is
//! cheap to clone and hands out [`GameEnv`] views on demand.

use std::sync::Arc;

use game_content::DialogueLines;
use game_core::{ContentSnapshot, GameEnv};

/// Bundles the engine catalogs with the scripted dialogue lines.
#[derive(Clone, Default)]
pub struct OracleManager {
    content: Arc<ContentSnapshot>,
    dialogue: Arc<DialogueLines>,
}

impl OracleManager {
    pub fn new(content: ContentSnapshot, dialogue: DialogueLines) -> Self {
        Self {
            content: Arc::new(content),
            dialogue: Arc::new(dialogue),
        }
    }

    /// Converts oracle manager into GameEnv for game-core
    pub fn as_game_env(&self) -> GameEnv<'_> {
        self.content.env()
    }

    pub fn content(&self) -> &ContentSnapshot {
        &self.content
    }

    pub fn dialogue(&self) -> Arc<DialogueLines> {
        Arc::clone(&self.dialogue)
    }
}
