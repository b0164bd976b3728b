//! Deterministic simulation for a side-view survival sandbox.
//!
//! `game-core` owns the canonical rules (world grid, physics, combat, AI,
//! progression) and exposes pure APIs reused by the runtime and offline
//! tools. All state mutation flows through [`engine::GameEngine`]; content
//! arrives through the oracle traits in [`env`].
pub mod ai;
pub mod combat;
pub mod config;
pub mod engine;
pub mod env;
pub mod error;
pub mod physics;
pub mod state;
pub mod world;
pub mod worldgen;

pub use config::GameConfig;
pub use engine::{
    Command, CommandError, EventQueue, GameEngine, GameEvent, PointerButton, TickOutcome,
    TickPhase, VillagerOrder,
};
pub use env::{
    ContentSnapshot, GameEnv, GameRng, ItemDefinition, ItemKind, ItemOracle, NpcOracle,
    OracleError, QuestDefinition, QuestId, QuestOracle, RecipeId, TablesOracle,
};
pub use error::{ErrorSeverity, GameError};
pub use state::{
    AiState, EntityId, EntityKind, EntityState, GameState, HeldKeys, InventoryState, ItemKey,
    ItemStack, PlayerState, SessionStatus, WorldClock,
};
pub use world::{TileGrid, TileKind};
pub use worldgen::{GeneratedWorld, WorldGenerator};
