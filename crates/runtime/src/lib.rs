//! Async shell around the single-threaded game simulation.
//!
//! This crate wires together content oracles, save repositories, the
//! dialogue bridge and the simulation worker into a cohesive runtime API.
//! Consumers embed [`Runtime`] to drive ticks, subscribe to events, and
//! interact with the world through [`RuntimeHandle`].
//!
//! Modules are organized by responsibility:
//! - [`runtime`] hosts the orchestrator and builder
//! - [`api`] exposes the types downstream clients interact with
//! - [`events`] provides topic-based event bus for flexible event routing
//! - [`dialogue`] keeps villager conversations off the simulation
//! - [`oracle`] and [`repository`] provide data adapters
//! - workers stay internal to the crate
pub mod api;
pub mod dialogue;
pub mod events;
pub mod oracle;
pub mod repository;
pub mod runtime;

mod workers;

pub use api::{Result, RuntimeError, RuntimeHandle};
pub use dialogue::{
    ChatRequest, DialogueBridge, DialogueError, DialogueOutcome, DialogueReply, DialogueService,
    LoreRequest, ScriptedDialogue,
};
pub use events::{
    DialogueEvent, Event, EventBus, PlayerEvent, ProgressEvent, SessionEvent, Topic, WorldEvent,
};
pub use oracle::OracleManager;
pub use repository::{
    FileSaveRepository, InMemorySaveRepository, RepositoryError, SaveRecord, SaveRepository,
    SnapshotService,
};
pub use runtime::{Runtime, RuntimeBuilder, RuntimeConfig};
