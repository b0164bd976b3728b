//! Side quest loader.

use std::path::Path;

use game_core::env::QuestsSnapshot;

use crate::loaders::{LoadResult, parse_ron, read_file};

/// Loader for side quests (`quests.ron`).
pub struct QuestLoader;

impl QuestLoader {
    pub fn load(path: &Path) -> LoadResult<QuestsSnapshot> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(source: &str) -> LoadResult<QuestsSnapshot> {
        let quests: QuestsSnapshot = parse_ron(source, "quests")?;
        for quest in &quests.quests {
            anyhow::ensure!(
                quest.objective.amount() > 0,
                "quest '{}' has an empty objective",
                quest.id
            );
        }
        Ok(quests)
    }
}
