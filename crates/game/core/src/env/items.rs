use crate::config::GameConfig;
use crate::state::{ArmorSlot, ItemId, ProjectileKind};

/// Catalog of non-tile items. Tile blocks are implicit items and never appear
/// here.
pub trait ItemOracle: Send + Sync {
    fn definition(&self, id: &ItemId) -> Option<ItemDefinition>;

    /// Every catalog entry, in declaration order.
    fn all_definitions(&self) -> Vec<ItemDefinition>;
}

/// Item definition with common fields and type-specific data.
///
/// Stats that only matter for some kinds (mining power, heal amount) live in
/// [`ItemStats`] with neutral defaults so loaders can omit them.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemDefinition {
    pub id: ItemId,
    pub name: String,
    pub kind: ItemKind,
    #[cfg_attr(feature = "serde", serde(default))]
    pub stats: ItemStats,
    #[cfg_attr(feature = "serde", serde(default))]
    pub shoot: Option<ShootProfile>,
    #[cfg_attr(feature = "serde", serde(default = "default_max_stack"))]
    pub max_stack: u16,
}

#[cfg(feature = "serde")]
fn default_max_stack() -> u16 {
    GameConfig::MAX_STACK
}

impl ItemDefinition {
    pub fn new(id: &str, name: &str, kind: ItemKind) -> Self {
        let max_stack = match kind {
            ItemKind::Consumable | ItemKind::Material => GameConfig::MAX_STACK,
            _ => 1,
        };
        Self {
            id: ItemId::new(id),
            name: name.to_owned(),
            kind,
            stats: ItemStats::default(),
            shoot: None,
            max_stack,
        }
    }

    pub fn with_stats(mut self, stats: ItemStats) -> Self {
        self.stats = stats;
        self
    }

    pub fn with_shoot(mut self, shoot: ShootProfile) -> Self {
        self.shoot = Some(shoot);
        self
    }

    pub fn armor_slot(&self) -> Option<ArmorSlot> {
        match self.kind {
            ItemKind::Armor(slot) => Some(slot),
            _ => None,
        }
    }

    /// Melee damage; bare-handed swings deal 2.
    pub fn melee_damage(&self) -> i32 {
        self.stats.damage.unwrap_or(2)
    }

    /// Ticks between attacks with this item.
    pub fn attack_cooldown(&self) -> u32 {
        self.stats.speed.unwrap_or(20)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ItemKind {
    Tool,
    Weapon,
    Armor(ArmorSlot),
    Consumable,
    Material,
    /// Quest relic; cannot be used or equipped.
    Artifact,
}

/// Numeric item stats. Absent values fall back to the bare-hand rules.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ItemStats {
    pub damage: Option<i32>,
    /// Attack cooldown in ticks.
    pub speed: Option<u32>,
    pub range: Option<f32>,
    pub mining_power: Option<u32>,
    pub defense: i32,
    /// Movement bonus granted when worn in the module slot.
    pub move_bonus: i32,
    pub heal: i32,
}

/// How a ranged weapon fires.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ShootProfile {
    pub projectile: ProjectileKind,
    pub speed: f32,
    #[cfg_attr(feature = "serde", serde(default = "default_pellets"))]
    pub count: u32,
    /// Total random spread in radians.
    #[cfg_attr(feature = "serde", serde(default))]
    pub spread: f32,
}

#[cfg(feature = "serde")]
fn default_pellets() -> u32 {
    1
}

impl ShootProfile {
    pub fn single(projectile: ProjectileKind, speed: f32) -> Self {
        Self {
            projectile,
            speed,
            count: 1,
            spread: 0.0,
        }
    }

    pub fn scatter(mut self, count: u32, spread: f32) -> Self {
        self.count = count.max(1);
        self.spread = spread;
        self
    }
}
