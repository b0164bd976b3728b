//! Oracle access errors.
//!
//! Errors related to oracle availability and data access.

use crate::error::{ErrorSeverity, GameError};
use crate::state::ItemId;

use super::{QuestId, RecipeId};

/// Errors that occur when accessing Oracle data.
///
/// A missing oracle is fatal: the engine cannot resolve loot, recipes or
/// quests without one. Unknown ids are validation errors raised by commands
/// that reference catalog entries.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum OracleError {
    /// ItemOracle is not available in the environment.
    #[error("ItemOracle not available")]
    ItemsNotAvailable,

    /// TablesOracle is not available in the environment.
    #[error("TablesOracle not available")]
    TablesNotAvailable,

    /// QuestOracle is not available in the environment.
    #[error("QuestOracle not available")]
    QuestsNotAvailable,

    /// NpcOracle is not available in the environment.
    #[error("NpcOracle not available")]
    NpcsNotAvailable,

    #[error("item definition '{0}' not found")]
    ItemNotFound(ItemId),

    #[error("recipe '{0}' not found")]
    RecipeNotFound(RecipeId),

    #[error("quest '{0}' not found")]
    QuestNotFound(QuestId),
}

impl GameError for OracleError {
    fn severity(&self) -> ErrorSeverity {
        use OracleError::*;
        match self {
            ItemsNotAvailable | TablesNotAvailable | QuestsNotAvailable | NpcsNotAvailable => {
                ErrorSeverity::Fatal
            }
            ItemNotFound(_) | RecipeNotFound(_) | QuestNotFound(_) => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        use OracleError::*;
        match self {
            ItemsNotAvailable => "ORACLE_ITEMS_NOT_AVAILABLE",
            TablesNotAvailable => "ORACLE_TABLES_NOT_AVAILABLE",
            QuestsNotAvailable => "ORACLE_QUESTS_NOT_AVAILABLE",
            NpcsNotAvailable => "ORACLE_NPCS_NOT_AVAILABLE",
            ItemNotFound(_) => "ORACLE_ITEM_NOT_FOUND",
            RecipeNotFound(_) => "ORACLE_RECIPE_NOT_FOUND",
            QuestNotFound(_) => "ORACLE_QUEST_NOT_FOUND",
        }
    }
}
