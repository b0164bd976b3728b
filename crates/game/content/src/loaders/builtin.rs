//! Catalogs compiled into the crate.

use game_core::ContentSnapshot;
use game_core::env::RosterSnapshot;

use crate::dialogue::DialogueLines;
use crate::loaders::{ItemLoader, LoadResult, QuestLoader, TablesLoader, parse_ron};

const ITEMS: &str = include_str!("../../data/items.ron");
const TABLES: &str = include_str!("../../data/tables.ron");
const QUESTS: &str = include_str!("../../data/quests.ron");
const ROSTER: &str = include_str!("../../data/roster.ron");
const DIALOGUE: &str = include_str!("../../data/dialogue.ron");

/// The shipped content catalogs.
pub fn snapshot() -> LoadResult<ContentSnapshot> {
    let roster: RosterSnapshot = parse_ron(ROSTER, "roster")?;
    Ok(ContentSnapshot::new(
        ItemLoader::parse(ITEMS)?,
        TablesLoader::parse(TABLES)?,
        QuestLoader::parse(QUESTS)?,
        roster,
    ))
}

/// The shipped dialogue lines.
pub fn dialogue() -> LoadResult<DialogueLines> {
    parse_ron(DIALOGUE, "dialogue")
}
