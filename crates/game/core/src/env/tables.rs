use crate::state::{EntityKind, ItemKey, ItemStack};
use crate::world::TileKind;

/// Oracle providing drop tables and crafting recipes.
pub trait TablesOracle: Send + Sync {
    /// Drops rolled when an entity of `kind` dies. Empty for kinds without loot.
    fn loot(&self, kind: EntityKind) -> Vec<LootEntry>;

    fn recipe(&self, id: &RecipeId) -> Option<Recipe>;

    fn recipes(&self) -> Vec<Recipe>;
}

/// One independently rolled drop.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LootEntry {
    pub item: ItemKey,
    pub count: u16,
    pub chance: f32,
}

impl LootEntry {
    pub fn new(item: ItemKey, count: u16, chance: f32) -> Self {
        Self {
            item,
            count,
            chance,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct RecipeId(pub String);

impl RecipeId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl core::fmt::Display for RecipeId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Recipe {
    pub id: RecipeId,
    pub result: ItemStack,
    pub ingredients: Vec<ItemStack>,
    /// Crafting station that must be near the player.
    #[cfg_attr(feature = "serde", serde(default))]
    pub station: Option<TileKind>,
}
