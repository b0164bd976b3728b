//! Inbound commands and their rejection reasons.

use crate::env::{OracleError, QuestId, RecipeId};
use crate::error::{ErrorSeverity, GameError};
use crate::state::{ArmorSlot, ChatLine, EntityId, EntityKind, HeldKeys, ItemKey};
use crate::world::TileKind;

/// Which pointer button changed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PointerButton {
    /// Attack, shoot or mine.
    Primary,
    /// Talk, place, toggle doors or use items.
    Secondary,
}

/// Orders a villager accepts from the dialogue channel.
///
/// Parses from the upper-case tags dialogue replies carry (`"JOIN_PARTY"`).
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display, strum::EnumString, strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
pub enum VillagerOrder {
    Follow,
    Stay,
    Attack,
    JoinParty,
    #[default]
    None,
}

/// Discrete input applied between ticks.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Command {
    KeyDown(HeldKeys),
    KeyUp(HeldKeys),
    /// Pointer position in world pixels.
    Pointer { x: f32, y: f32 },
    Button { button: PointerButton, pressed: bool },
    SelectSlot(usize),
    ToggleInventory,
    OrderVillager { entity: EntityId, order: VillagerOrder },
    /// Appends a line to a villager's chat memory.
    Remember { entity: EntityId, line: ChatLine },
    AcceptQuest { quest: QuestId, giver: EntityId },
    CompleteQuest,
    Craft(RecipeId),
    /// Equips the armor in an inventory slot.
    Equip(usize),
    Unequip(ArmorSlot),
    Swap(usize, usize),
    /// Hands the item in an inventory slot to a villager.
    EquipVillager { entity: EntityId, slot: usize },
    ToggleCreative,
    Teleport(EntityKind),
}

/// Reasons the engine refuses a command. State is left untouched.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    #[error("session is over")]
    SessionOver,

    #[error("recipe '{0}' is not in the catalog")]
    UnknownRecipe(RecipeId),

    #[error("missing ingredient {0}")]
    MissingIngredient(ItemKey),

    #[error("requires {0} nearby")]
    StationMissing(TileKind),

    #[error("inventory slot {0} is empty")]
    EmptySlot(usize),

    #[error("inventory slot {0} is out of range")]
    SlotOutOfRange(usize),

    #[error("item cannot be equipped")]
    NotEquippable,

    #[error("inventory is full")]
    InventoryFull,

    #[error("nothing equipped in {0} slot")]
    NothingEquipped(ArmorSlot),

    #[error("entity {0} does not exist")]
    UnknownEntity(EntityId),

    #[error("entity {0} is not a villager")]
    NotAVillager(EntityId),

    #[error("villager {0} refuses orders")]
    VillagerHostile(EntityId),

    #[error("party is full ({0} members)")]
    PartyFull(usize),

    #[error("a quest is already active")]
    QuestAlreadyActive,

    #[error("quest '{0}' is not in the catalog")]
    UnknownQuest(QuestId),

    #[error("no active quest")]
    NoActiveQuest,

    #[error("quest objective not met")]
    QuestNotReady,

    #[error("only available in creative mode")]
    CreativeOnly,

    #[error("no structure for {0} in this world")]
    StructureNotFound(EntityKind),

    #[error("structure has not appeared yet")]
    StructureNotSpawned,

    #[error("no teleport target for {0}")]
    NoTeleportTarget(EntityKind),

    #[error(transparent)]
    Oracle(#[from] OracleError),
}

impl GameError for CommandError {
    fn severity(&self) -> ErrorSeverity {
        use CommandError::*;
        match self {
            SessionOver => ErrorSeverity::Fatal,
            InventoryFull | PartyFull(_) | QuestNotReady | StructureNotSpawned => {
                ErrorSeverity::Recoverable
            }
            Oracle(err) => err.severity(),
            _ => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        use CommandError::*;
        match self {
            SessionOver => "COMMAND_SESSION_OVER",
            UnknownRecipe(_) => "COMMAND_UNKNOWN_RECIPE",
            MissingIngredient(_) => "COMMAND_MISSING_INGREDIENT",
            StationMissing(_) => "COMMAND_STATION_MISSING",
            EmptySlot(_) => "COMMAND_EMPTY_SLOT",
            SlotOutOfRange(_) => "COMMAND_SLOT_OUT_OF_RANGE",
            NotEquippable => "COMMAND_NOT_EQUIPPABLE",
            InventoryFull => "COMMAND_INVENTORY_FULL",
            NothingEquipped(_) => "COMMAND_NOTHING_EQUIPPED",
            UnknownEntity(_) => "COMMAND_UNKNOWN_ENTITY",
            NotAVillager(_) => "COMMAND_NOT_A_VILLAGER",
            VillagerHostile(_) => "COMMAND_VILLAGER_HOSTILE",
            PartyFull(_) => "COMMAND_PARTY_FULL",
            QuestAlreadyActive => "COMMAND_QUEST_ALREADY_ACTIVE",
            UnknownQuest(_) => "COMMAND_UNKNOWN_QUEST",
            NoActiveQuest => "COMMAND_NO_ACTIVE_QUEST",
            QuestNotReady => "COMMAND_QUEST_NOT_READY",
            CreativeOnly => "COMMAND_CREATIVE_ONLY",
            StructureNotFound(_) => "COMMAND_STRUCTURE_NOT_FOUND",
            StructureNotSpawned => "COMMAND_STRUCTURE_NOT_SPAWNED",
            NoTeleportTarget(_) => "COMMAND_NO_TELEPORT_TARGET",
            Oracle(err) => err.error_code(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn orders_parse_from_reply_tags() {
        assert_eq!(VillagerOrder::from_str("JOIN_PARTY"), Ok(VillagerOrder::JoinParty));
        assert_eq!(VillagerOrder::from_str("follow"), Ok(VillagerOrder::Follow));
        assert!(VillagerOrder::from_str("DANCE").is_err());
        assert_eq!(VillagerOrder::Stay.to_string(), "STAY");
    }

    #[test]
    fn oracle_failures_keep_their_classification() {
        let err = CommandError::from(OracleError::QuestsNotAvailable);
        assert_eq!(err.severity(), ErrorSeverity::Fatal);
        assert_eq!(err.error_code(), "ORACLE_QUESTS_NOT_AVAILABLE");
        assert!(CommandError::PartyFull(2).severity().is_recoverable());
    }
}
