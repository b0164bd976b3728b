//! Content loaders for reading game data from files.
//!
//! Every catalog is a single RON document; loaders parse into the core
//! snapshot types, which implement the oracle traits directly.

pub mod builtin;
pub mod dialogue;
pub mod factory;
pub mod item;
pub mod quests;
pub mod roster;
pub mod tables;

pub use dialogue::DialogueLoader;
pub use factory::ContentFactory;
pub use item::ItemLoader;
pub use quests::QuestLoader;
pub use roster::RosterLoader;
pub use tables::TablesLoader;

use std::path::Path;

use anyhow::Context;
use serde::de::DeserializeOwned;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path).with_context(|| format!("Failed to read file {}", path.display()))
}

/// Parses a RON document, naming the catalog in the error.
pub(crate) fn parse_ron<T: DeserializeOwned>(source: &str, what: &str) -> LoadResult<T> {
    ron::from_str(source).with_context(|| format!("Failed to parse {what} RON"))
}
