//! In-memory oracle implementations.
//!
//! Snapshots hold plain catalog data and implement the oracle traits directly.
//! Content loaders deserialize into them; tests build them by hand.

use super::{
    GameEnv, ItemDefinition, ItemOracle, LootEntry, NpcOracle, QuestDefinition, QuestId,
    QuestOracle, Recipe, RecipeId, TablesOracle,
};
use crate::state::{EntityKind, ItemId};

#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ItemsSnapshot {
    pub items: Vec<ItemDefinition>,
}

impl ItemsSnapshot {
    pub fn new(items: Vec<ItemDefinition>) -> Self {
        Self { items }
    }
}

impl ItemOracle for ItemsSnapshot {
    fn definition(&self, id: &ItemId) -> Option<ItemDefinition> {
        self.items.iter().find(|item| &item.id == id).cloned()
    }

    fn all_definitions(&self) -> Vec<ItemDefinition> {
        self.items.clone()
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LootTable {
    pub kind: EntityKind,
    pub drops: Vec<LootEntry>,
}

#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TablesSnapshot {
    pub loot: Vec<LootTable>,
    pub recipes: Vec<Recipe>,
}

impl TablesSnapshot {
    pub fn new(loot: Vec<LootTable>, recipes: Vec<Recipe>) -> Self {
        Self { loot, recipes }
    }
}

impl TablesOracle for TablesSnapshot {
    fn loot(&self, kind: EntityKind) -> Vec<LootEntry> {
        self.loot
            .iter()
            .find(|table| table.kind == kind)
            .map(|table| table.drops.clone())
            .unwrap_or_default()
    }

    fn recipe(&self, id: &RecipeId) -> Option<Recipe> {
        self.recipes.iter().find(|r| &r.id == id).cloned()
    }

    fn recipes(&self) -> Vec<Recipe> {
        self.recipes.clone()
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct QuestsSnapshot {
    pub quests: Vec<QuestDefinition>,
}

impl QuestsSnapshot {
    pub fn new(quests: Vec<QuestDefinition>) -> Self {
        Self { quests }
    }
}

impl QuestOracle for QuestsSnapshot {
    fn quest(&self, id: &QuestId) -> Option<QuestDefinition> {
        self.quests.iter().find(|q| &q.id == id).cloned()
    }

    fn quests(&self) -> Vec<QuestDefinition> {
        self.quests.clone()
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RosterSnapshot {
    pub names: Vec<String>,
    pub personalities: Vec<String>,
}

impl NpcOracle for RosterSnapshot {
    fn names(&self) -> Vec<String> {
        self.names.clone()
    }

    fn personalities(&self) -> Vec<String> {
        self.personalities.clone()
    }
}

/// Every catalog the engine reads, bundled.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ContentSnapshot {
    pub items: ItemsSnapshot,
    pub tables: TablesSnapshot,
    pub quests: QuestsSnapshot,
    pub roster: RosterSnapshot,
}

impl ContentSnapshot {
    pub fn new(
        items: ItemsSnapshot,
        tables: TablesSnapshot,
        quests: QuestsSnapshot,
        roster: RosterSnapshot,
    ) -> Self {
        Self {
            items,
            tables,
            quests,
            roster,
        }
    }

    pub fn env(&self) -> GameEnv<'_> {
        let items: &dyn ItemOracle = &self.items;
        let tables: &dyn TablesOracle = &self.tables;
        let quests: &dyn QuestOracle = &self.quests;
        let npcs: &dyn NpcOracle = &self.roster;
        GameEnv::with_all(items, tables, quests, npcs)
    }
}
