use crate::state::{EntityKind, ItemKey, ItemStack};

/// Side-quest catalog offered by villagers.
pub trait QuestOracle: Send + Sync {
    fn quest(&self, id: &QuestId) -> Option<QuestDefinition>;

    fn quests(&self) -> Vec<QuestDefinition>;
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct QuestId(pub String);

impl QuestId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for QuestId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum QuestObjective {
    Kill { target: EntityKind, amount: u32 },
    Collect { item: ItemKey, amount: u32 },
}

impl QuestObjective {
    pub fn amount(&self) -> u32 {
        match self {
            Self::Kill { amount, .. } | Self::Collect { amount, .. } => *amount,
        }
    }
}

/// Entities spawned around the player when a quest is accepted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum QuestAmbush {
    /// One flyer high above and to the side of the player.
    Aerial(EntityKind),
    /// A pack of walkers on both sides of the player.
    Pack(EntityKind, u32),
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct QuestDefinition {
    pub id: QuestId,
    pub title: String,
    pub description: String,
    pub objective: QuestObjective,
    pub reward: ItemStack,
    #[cfg_attr(feature = "serde", serde(default))]
    pub ambush: Option<QuestAmbush>,
    /// Notice shown when the ambush triggers.
    #[cfg_attr(feature = "serde", serde(default))]
    pub ambush_notice: Option<String>,
}
