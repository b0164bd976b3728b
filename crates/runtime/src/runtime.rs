//! High-level runtime orchestrator.
//!
//! The runtime owns the simulation worker, wires up command/event channels,
//! and exposes a builder-based API for clients to drive the simulation.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{info, warn};

use game_core::engine::session;
use game_core::{GameConfig, GameState, TickOutcome};

use crate::api::{Result, RuntimeError, RuntimeHandle};
use crate::dialogue::{DialogueBridge, DialogueService, ScriptedDialogue};
use crate::events::EventBus;
use crate::oracle::OracleManager;
use crate::repository::{RepositoryError, SaveRepository, SnapshotService};
use crate::workers::{Command, Persistence, SimulationWorker};

/// Runtime configuration shared across the orchestrator and workers.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub game_config: GameConfig,
    /// World seed; drawn at random when unset.
    pub seed: Option<u64>,
    /// Simulation ticks per second for [`Runtime::run`].
    pub tick_rate: u32,
    /// Ticks between autosaves; `None` disables autosave.
    pub autosave_interval: Option<u64>,
    pub save_slot: String,
    /// Resume from the save slot at startup when it holds a record.
    pub resume: bool,
    pub event_buffer_size: usize,
    pub command_buffer_size: usize,
    pub dialogue_buffer_size: usize,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            game_config: GameConfig::default(),
            seed: None,
            tick_rate: 60,
            autosave_interval: Some(60 * 60),
            save_slot: "wasteland".to_owned(),
            resume: false,
            event_buffer_size: 256,
            command_buffer_size: 32,
            dialogue_buffer_size: 16,
        }
    }
}

/// Main runtime that orchestrates game simulation
///
/// The runtime owns the worker task; [`RuntimeHandle`] provides a cloneable
/// façade for clients.
pub struct Runtime {
    handle: RuntimeHandle,
    tick_rate: u32,
    sim_worker_handle: JoinHandle<()>,
}

impl Runtime {
    /// Create a new runtime builder
    pub fn builder() -> RuntimeBuilder {
        RuntimeBuilder::new()
    }

    /// Get a cloneable handle to this runtime
    pub fn handle(&self) -> RuntimeHandle {
        self.handle.clone()
    }

    /// Ticks at the configured rate until the session ends or `limit` ticks
    /// have run. Late ticks are skipped rather than bunched.
    pub async fn run(&self, limit: Option<u64>) -> Result<TickOutcome> {
        let period = Duration::from_secs_f64(1.0 / f64::from(self.tick_rate.max(1)));
        let mut interval = tokio::time::interval(period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

        let mut ran = 0u64;
        let mut outcome = TickOutcome::Advanced(0);
        while limit.is_none_or(|limit| ran < limit) {
            interval.tick().await;
            outcome = self.handle.tick().await?;
            ran += 1;
            if let TickOutcome::Halted(status) = outcome {
                info!(?status, ticks = ran, "Session ended");
                break;
            }
        }
        Ok(outcome)
    }

    /// Shutdown the runtime gracefully
    ///
    /// The worker stops once every outstanding [`RuntimeHandle`] clone is
    /// dropped as well.
    pub async fn shutdown(self) -> Result<()> {
        drop(self.handle);

        self.sim_worker_handle
            .await
            .map_err(RuntimeError::WorkerJoin)?;

        Ok(())
    }
}

/// Builder for [`Runtime`] with flexible configuration.
pub struct RuntimeBuilder {
    config: RuntimeConfig,
    state: Option<GameState>,
    oracles: Option<OracleManager>,
    saves: Option<Arc<dyn SaveRepository>>,
    dialogue: Option<Arc<dyn DialogueService>>,
}

impl RuntimeBuilder {
    fn new() -> Self {
        Self {
            config: RuntimeConfig::default(),
            state: None,
            oracles: None,
            saves: None,
            dialogue: None,
        }
    }

    /// Override runtime configuration
    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    /// Provide initial game state instead of generating a world
    pub fn initial_state(mut self, state: GameState) -> Self {
        self.state = Some(state);
        self
    }

    /// Set required oracle manager
    pub fn oracles(mut self, oracles: OracleManager) -> Self {
        self.oracles = Some(oracles);
        self
    }

    /// Enables save/load against `repository`
    pub fn save_repository(mut self, repository: Arc<dyn SaveRepository>) -> Self {
        self.saves = Some(repository);
        self
    }

    /// Replaces the scripted dialogue service
    pub fn dialogue_service(mut self, service: Arc<dyn DialogueService>) -> Self {
        self.dialogue = Some(service);
        self
    }

    /// Build the runtime
    pub async fn build(self) -> Result<Runtime> {
        let oracles = self.oracles.ok_or(RuntimeError::MissingOracles)?;
        let config = self.config;
        let snapshots = self.saves.map(SnapshotService::new);

        let resumed = match &snapshots {
            Some(service) if config.resume && self.state.is_none() => {
                match service.load(&config.save_slot) {
                    Ok(state) => Some(state),
                    Err(RepositoryError::NotFound(_)) => None,
                    Err(error) => {
                        warn!(slot = %config.save_slot, %error, "Could not resume, starting a new game");
                        None
                    }
                }
            }
            _ => None,
        };

        let initial_state = match self.state.or(resumed) {
            Some(state) => state,
            None => {
                let seed = config.seed.unwrap_or_else(rand::random);
                info!(seed, "Generating world");
                let mut state = session::new_game(seed, &oracles.as_game_env());
                state.config = config.game_config.clone();
                state
            }
        };

        let (command_tx, command_rx) = mpsc::channel::<Command>(config.command_buffer_size);
        let event_bus = EventBus::with_capacity(config.event_buffer_size);
        let handle = RuntimeHandle::new(command_tx, event_bus.clone());

        let service: Arc<dyn DialogueService> = match self.dialogue {
            Some(service) => service,
            None => Arc::new(ScriptedDialogue::new(oracles.dialogue())),
        };
        let dialogue = DialogueBridge::new(service, config.dialogue_buffer_size);

        let persistence = snapshots.map(|service| Persistence {
            service,
            slot: config.save_slot.clone(),
            autosave_interval: config.autosave_interval,
        });

        let sim_worker = SimulationWorker::new(
            initial_state,
            oracles,
            command_rx,
            event_bus,
            dialogue,
            persistence,
        );

        let sim_worker_handle = tokio::spawn(async move {
            sim_worker.run().await;
        });

        Ok(Runtime {
            handle,
            tick_rate: config.tick_rate,
            sim_worker_handle,
        })
    }
}
