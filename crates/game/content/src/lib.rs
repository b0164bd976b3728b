//! Data-driven content definitions and loaders.
//!
//! This crate houses the static catalogs and provides loaders for RON data files:
//! - Item catalog (tools, weapons, armor, consumables, materials)
//! - Loot tables and crafting recipes
//! - Side quests
//! - Villager roster (names and personalities)
//! - Scripted dialogue lines for the offline dialogue service
//!
//! Content is consumed through the core oracle traits and never appears in
//! game state. The default catalogs ship inside the crate; a data directory
//! with the same file names overrides them.

pub mod dialogue;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use dialogue::{DialogueLines, LoreLines, Mood};

#[cfg(feature = "loaders")]
pub use loaders::{
    ContentFactory, DialogueLoader, ItemLoader, QuestLoader, RosterLoader, TablesLoader, builtin,
};
