//! Traits describing read-only content.
//!
//! Oracles expose the item catalog, loot and recipe tables, side quests and
//! the villager roster. The [`Env`] aggregate bundles them so the engine can
//! reach everything it needs without hard coupling to concrete
//! implementations. Randomness lives in [`GameRng`], which is part of the
//! game state rather than an oracle.
mod error;
mod items;
mod npc;
mod quests;
mod rng;
mod snapshot;
mod tables;

pub use error::OracleError;
pub use items::{ItemDefinition, ItemKind, ItemOracle, ItemStats, ShootProfile};
pub use npc::{FALLBACK_NAME, FALLBACK_PERSONALITY, NpcOracle};
pub use quests::{QuestAmbush, QuestDefinition, QuestId, QuestObjective, QuestOracle};
pub use rng::{GameRng, compute_seed};
pub use snapshot::{
    ContentSnapshot, ItemsSnapshot, LootTable, QuestsSnapshot, RosterSnapshot, TablesSnapshot,
};
pub use tables::{LootEntry, Recipe, RecipeId, TablesOracle};

/// Aggregates read-only oracles required by the engine.
pub struct Env<'a, I, T, Q, N>
where
    I: ItemOracle + ?Sized,
    T: TablesOracle + ?Sized,
    Q: QuestOracle + ?Sized,
    N: NpcOracle + ?Sized,
{
    items: Option<&'a I>,
    tables: Option<&'a T>,
    quests: Option<&'a Q>,
    npcs: Option<&'a N>,
}

impl<I, T, Q, N> Clone for Env<'_, I, T, Q, N>
where
    I: ItemOracle + ?Sized,
    T: TablesOracle + ?Sized,
    Q: QuestOracle + ?Sized,
    N: NpcOracle + ?Sized,
{
    fn clone(&self) -> Self {
        *self
    }
}

impl<I, T, Q, N> Copy for Env<'_, I, T, Q, N>
where
    I: ItemOracle + ?Sized,
    T: TablesOracle + ?Sized,
    Q: QuestOracle + ?Sized,
    N: NpcOracle + ?Sized,
{
}

pub type GameEnv<'a> =
    Env<'a, dyn ItemOracle + 'a, dyn TablesOracle + 'a, dyn QuestOracle + 'a, dyn NpcOracle + 'a>;

impl<'a, I, T, Q, N> Env<'a, I, T, Q, N>
where
    I: ItemOracle + ?Sized,
    T: TablesOracle + ?Sized,
    Q: QuestOracle + ?Sized,
    N: NpcOracle + ?Sized,
{
    pub fn new(
        items: Option<&'a I>,
        tables: Option<&'a T>,
        quests: Option<&'a Q>,
        npcs: Option<&'a N>,
    ) -> Self {
        Self {
            items,
            tables,
            quests,
            npcs,
        }
    }

    pub fn with_all(items: &'a I, tables: &'a T, quests: &'a Q, npcs: &'a N) -> Self {
        Self::new(Some(items), Some(tables), Some(quests), Some(npcs))
    }

    pub fn empty() -> Self {
        Self {
            items: None,
            tables: None,
            quests: None,
            npcs: None,
        }
    }

    /// Returns the ItemOracle, or an error if not available.
    ///
    /// # Errors
    ///
    /// Returns `OracleError::ItemsNotAvailable` if no items oracle was provided.
    pub fn items(&self) -> Result<&'a I, OracleError> {
        self.items.ok_or(OracleError::ItemsNotAvailable)
    }

    /// Returns the TablesOracle, or an error if not available.
    ///
    /// # Errors
    ///
    /// Returns `OracleError::TablesNotAvailable` if no tables oracle was provided.
    pub fn tables(&self) -> Result<&'a T, OracleError> {
        self.tables.ok_or(OracleError::TablesNotAvailable)
    }

    /// Returns the QuestOracle, or an error if not available.
    ///
    /// # Errors
    ///
    /// Returns `OracleError::QuestsNotAvailable` if no quest oracle was provided.
    pub fn quests(&self) -> Result<&'a Q, OracleError> {
        self.quests.ok_or(OracleError::QuestsNotAvailable)
    }

    /// Returns the NpcOracle, or an error if not available.
    ///
    /// # Errors
    ///
    /// Returns `OracleError::NpcsNotAvailable` if no npc oracle was provided.
    pub fn npcs(&self) -> Result<&'a N, OracleError> {
        self.npcs.ok_or(OracleError::NpcsNotAvailable)
    }

    /// Looks up a catalog item.
    ///
    /// # Errors
    ///
    /// Fails when the items oracle is missing or does not know `id`.
    pub fn item(&self, id: &crate::state::ItemId) -> Result<ItemDefinition, OracleError> {
        self.items()?
            .definition(id)
            .ok_or_else(|| OracleError::ItemNotFound(id.clone()))
    }
}

impl<'a, I, T, Q, N> Env<'a, I, T, Q, N>
where
    I: ItemOracle + 'a,
    T: TablesOracle + 'a,
    Q: QuestOracle + 'a,
    N: NpcOracle + 'a,
{
    /// Converts this environment into a trait-object based `GameEnv`.
    pub fn into_game_env(self) -> GameEnv<'a> {
        let items: Option<&'a dyn ItemOracle> = self.items.map(|items| items as _);
        let tables: Option<&'a dyn TablesOracle> = self.tables.map(|tables| tables as _);
        let quests: Option<&'a dyn QuestOracle> = self.quests.map(|quests| quests as _);
        let npcs: Option<&'a dyn NpcOracle> = self.npcs.map(|npcs| npcs as _);
        Env::new(items, tables, quests, npcs)
    }
}
