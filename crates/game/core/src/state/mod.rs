//! Authoritative game state representation.
//!
//! This module owns the data structures that describe the world grid, the
//! player, entities, projectiles and progression. Runtime layers clone or
//! query this state but mutate it exclusively through the engine.
mod body;
mod clock;
mod entity;
mod input;
mod inventory;
mod player;
mod progress;
mod projectile;

pub use body::{Body, Rect};
pub use clock::WorldClock;
pub use entity::{
    AiState, BossData, ChatLine, ChatLog, EntitiesState, EntityId, EntityKind, EntityRole,
    EntityState, KindStats, MovementClass, Speaker, TargetRef, Temperament, VillagerData,
    VillagerJob,
};
pub use input::{HeldKeys, InputState};
pub use inventory::{InventoryState, ItemId, ItemKey, ItemStack};
pub use player::{ActiveQuest, ArmorSlot, Equipment, EquippedItem, MovementFlags, PlayerState};
pub use progress::{
    MiningState, ProgressState, SessionStatus, StructureLocations, retarget as retarget_mining,
};
pub use projectile::{Projectile, ProjectileKind, ProjectileTarget};

use crate::config::GameConfig;
use crate::engine::EventQueue;
use crate::env::GameRng;
use crate::world::TileGrid;

/// Canonical snapshot of the simulation.
///
/// Everything that survives a save/load lives here; transient per-frame data
/// (input, mining progress, queued events) is skipped by serialization.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameState {
    /// Seed the world was generated from.
    pub seed: u64,
    /// Ticks simulated since the session started.
    pub tick: u64,
    /// Stream for every in-play random draw.
    pub rng: GameRng,
    #[cfg_attr(feature = "serde", serde(default))]
    pub config: GameConfig,
    pub world: TileGrid,
    pub player: PlayerState,
    pub inventory: InventoryState,
    pub entities: EntitiesState,
    #[cfg_attr(feature = "serde", serde(default))]
    pub projectiles: Vec<Projectile>,
    pub clock: WorldClock,
    #[cfg_attr(feature = "serde", serde(default))]
    pub structures: StructureLocations,
    #[cfg_attr(feature = "serde", serde(default))]
    pub progress: ProgressState,
    #[cfg_attr(feature = "serde", serde(default))]
    pub status: SessionStatus,
    /// Global cooldown between interaction-step actions.
    #[cfg_attr(feature = "serde", serde(default))]
    pub action_cooldown: u32,

    #[cfg_attr(feature = "serde", serde(skip))]
    pub input: InputState,
    #[cfg_attr(feature = "serde", serde(skip))]
    pub mining: Option<MiningState>,
    #[cfg_attr(feature = "serde", serde(skip))]
    pub events: EventQueue,
}

impl GameState {
    /// Creates a state around an existing world with a fresh player at `spawn`.
    pub fn new(seed: u64, world: TileGrid, spawn: (f32, f32)) -> Self {
        Self {
            seed,
            tick: 0,
            rng: GameRng::new(seed.wrapping_add(1)),
            config: GameConfig::default(),
            world,
            player: PlayerState::new(spawn.0, spawn.1),
            inventory: InventoryState::new(),
            entities: EntitiesState::new(),
            projectiles: Vec::new(),
            clock: WorldClock::new(),
            structures: StructureLocations::default(),
            progress: ProgressState::default(),
            status: SessionStatus::Running,
            action_cooldown: 0,
            input: InputState::default(),
            mining: None,
            events: EventQueue::default(),
        }
    }

    pub fn is_running(&self) -> bool {
        !self.status.is_over()
    }

    /// Item stack in the selected hotbar slot.
    pub fn selected_stack(&self) -> Option<&ItemStack> {
        self.inventory.slot(self.player.selected_slot)
    }
}
