//! Simulation worker that owns the authoritative [`game_core::GameState`].
//!
//! Receives commands from [`RuntimeHandle`](crate::RuntimeHandle), drives
//! [`game_core::GameEngine`], and publishes every engine event to the
//! [`EventBus`]. Dialogue replies and autosaves are folded in between ticks.

use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, warn};

use game_core::state::{ChatLine, Speaker};
use game_core::{
    Command as GameCommand, CommandError, EntityId, GameEngine, GameError, GameEvent, GameState,
    TickOutcome, VillagerOrder,
};

use crate::api::{Result, RuntimeError};
use crate::dialogue::{ChatRequest, DialogueBridge, DialogueOutcome, LoreRequest};
use crate::events::{DialogueEvent, Event, EventBus, SessionEvent, route};
use crate::oracle::OracleManager;
use crate::repository::SnapshotService;

/// Commands that can be sent to the simulation worker
pub enum Command {
    /// Apply a player command between ticks.
    Apply {
        command: GameCommand,
        reply: oneshot::Sender<Result<()>>,
    },
    /// Advance up to `count` ticks.
    Tick {
        count: u32,
        reply: oneshot::Sender<TickOutcome>,
    },
    /// Query the current game state (read-only).
    QueryState { reply: oneshot::Sender<GameState> },
    Save { reply: oneshot::Sender<Result<()>> },
    Load { reply: oneshot::Sender<Result<()>> },
    /// Forward a player line to a villager's dialogue service.
    RequestDialogue {
        entity: EntityId,
        message: String,
        reply: oneshot::Sender<Result<()>>,
    },
}

/// Save slot wiring for the worker.
pub struct Persistence {
    pub service: SnapshotService,
    pub slot: String,
    /// Ticks between autosaves; `None` disables autosave.
    pub autosave_interval: Option<u64>,
}

/// Background task that processes gameplay commands.
pub struct SimulationWorker {
    state: GameState,
    oracles: OracleManager,
    command_rx: mpsc::Receiver<Command>,
    event_bus: EventBus,
    dialogue: DialogueBridge,
    persistence: Option<Persistence>,
}

impl SimulationWorker {
    /// Creates a new simulation worker.
    pub fn new(
        state: GameState,
        oracles: OracleManager,
        command_rx: mpsc::Receiver<Command>,
        event_bus: EventBus,
        dialogue: DialogueBridge,
        persistence: Option<Persistence>,
    ) -> Self {
        info!(
            seed = state.seed,
            tick = state.tick,
            entities = state.entities.len(),
            "SimulationWorker initialized"
        );

        Self {
            state,
            oracles,
            command_rx,
            event_bus,
            dialogue,
            persistence,
        }
    }

    /// Main worker loop. Ends once every command sender is dropped.
    pub async fn run(mut self) {
        // Events queued while the session was built (new game markers).
        self.publish_pending();
        loop {
            tokio::select! {
                Some(cmd) = self.command_rx.recv() => {
                    self.handle_command(cmd);
                }
                else => break,
            }
        }
        debug!(tick = self.state.tick, "SimulationWorker stopped");
    }

    fn handle_command(&mut self, cmd: Command) {
        match cmd {
            Command::Apply { command, reply } => {
                let result = self.apply(command);
                if reply.send(result).is_err() {
                    debug!("Apply reply channel closed (caller dropped)");
                }
            }
            Command::Tick { count, reply } => {
                let outcome = self.advance(count);
                if reply.send(outcome).is_err() {
                    debug!("Tick reply channel closed (caller dropped)");
                }
            }
            Command::QueryState { reply } => {
                if reply.send(self.state.clone()).is_err() {
                    debug!("QueryState reply channel closed (caller dropped)");
                }
            }
            Command::Save { reply } => {
                let result = self.save();
                if reply.send(result).is_err() {
                    debug!("Save reply channel closed (caller dropped)");
                }
            }
            Command::Load { reply } => {
                let result = self.load();
                if reply.send(result).is_err() {
                    debug!("Load reply channel closed (caller dropped)");
                }
            }
            Command::RequestDialogue {
                entity,
                message,
                reply,
            } => {
                let result = self.request_dialogue(entity, message);
                if reply.send(result).is_err() {
                    debug!("RequestDialogue reply channel closed (caller dropped)");
                }
            }
        }
    }

    fn apply(&mut self, command: GameCommand) -> Result<()> {
        let env = self.oracles.as_game_env();
        let result = GameEngine::new(&mut self.state).apply(&env, command);
        self.publish_pending();
        result.map_err(|error| {
            debug!(code = error.error_code(), %error, "Command rejected");
            RuntimeError::from(error)
        })
    }

    fn advance(&mut self, count: u32) -> TickOutcome {
        let mut outcome = TickOutcome::Halted(self.state.status);
        for _ in 0..count.max(1) {
            self.apply_dialogue_outcomes();

            let env = self.oracles.as_game_env();
            outcome = GameEngine::new(&mut self.state).tick(&env);
            self.publish_pending();

            match outcome {
                TickOutcome::Advanced(tick) => self.autosave_if_due(tick),
                TickOutcome::Halted(status) => {
                    debug!(?status, "Tick requested on a finished session");
                    break;
                }
            }
        }
        outcome
    }

    /// Publishes queued engine events and starts lore lookups for freshly
    /// broken lore tiles.
    fn publish_pending(&mut self) {
        for event in self.state.events.drain() {
            if let GameEvent::LoreDiscovered { tile, depth } = event {
                self.dialogue.request_lore(LoreRequest { tile, depth });
            }
            self.event_bus.publish(route(event));
        }
    }

    /// Folds finished dialogue calls into the session.
    fn apply_dialogue_outcomes(&mut self) {
        for outcome in self.dialogue.drain() {
            match outcome {
                DialogueOutcome::Chat {
                    entity,
                    name,
                    reply,
                } => {
                    let env = self.oracles.as_game_env();
                    let mut engine = GameEngine::new(&mut self.state);
                    let line = ChatLine {
                        speaker: Speaker::Villager,
                        text: reply.text.clone(),
                    };
                    if let Err(error) = engine.apply(&env, GameCommand::Remember { entity, line }) {
                        debug!(%entity, %error, "Dropping reply for unavailable villager");
                        continue;
                    }
                    if reply.action != VillagerOrder::None
                        && let Err(error) = engine.apply(
                            &env,
                            GameCommand::OrderVillager {
                                entity,
                                order: reply.action,
                            },
                        )
                    {
                        debug!(%entity, order = %reply.action, %error, "Villager order refused");
                    }
                    self.event_bus.publish(Event::Dialogue(DialogueEvent::Reply {
                        entity,
                        name,
                        text: reply.text,
                        order: reply.action,
                    }));
                }
                DialogueOutcome::Lore { tile, text } => {
                    self.event_bus
                        .publish(Event::Dialogue(DialogueEvent::Lore { tile, text }));
                }
            }
        }
    }

    fn request_dialogue(&mut self, entity: EntityId, message: String) -> Result<()> {
        let request = ChatRequest::from_state(&self.state, entity, message.as_str()).ok_or_else(
            || match self.state.entities.live(entity) {
                Some(_) => CommandError::NotAVillager(entity),
                None => CommandError::UnknownEntity(entity),
            },
        )?;
        let line = ChatLine {
            speaker: Speaker::Player,
            text: message,
        };
        self.apply(GameCommand::Remember { entity, line })?;
        debug!(%entity, mood = ?request.mood, "Dialogue requested");
        self.dialogue.request_chat(request);
        Ok(())
    }

    fn save(&mut self) -> Result<()> {
        let Some(persistence) = &self.persistence else {
            return Err(RuntimeError::PersistenceDisabled);
        };
        let slot = persistence.slot.clone();
        match persistence.service.save(&slot, &self.state) {
            Ok(()) => {
                let tick = self.state.tick;
                self.publish_session(SessionEvent::Saved { slot, tick });
                Ok(())
            }
            Err(error) => {
                warn!(%slot, %error, "Save failed");
                self.publish_session(SessionEvent::SaveFailed {
                    slot,
                    error: error.to_string(),
                });
                Err(error.into())
            }
        }
    }

    fn load(&mut self) -> Result<()> {
        let Some(persistence) = &self.persistence else {
            return Err(RuntimeError::PersistenceDisabled);
        };
        let slot = persistence.slot.clone();
        match persistence.service.load(&slot) {
            Ok(state) => {
                self.state = state;
                let tick = self.state.tick;
                self.publish_session(SessionEvent::Loaded { slot, tick });
                for event in [
                    GameEvent::PlayerChanged,
                    GameEvent::InventoryChanged,
                    GameEvent::EntitiesChanged,
                ] {
                    self.event_bus.publish(route(event));
                }
                Ok(())
            }
            Err(error) => {
                warn!(%slot, %error, "Load failed, keeping the running session");
                self.publish_session(SessionEvent::LoadFailed {
                    slot,
                    error: error.to_string(),
                });
                Err(error.into())
            }
        }
    }

    fn autosave_if_due(&mut self, tick: u64) {
        let due = self
            .persistence
            .as_ref()
            .and_then(|p| p.autosave_interval)
            .is_some_and(|interval| interval > 0 && tick % interval == 0);
        if due && self.save().is_ok() {
            debug!(tick, "Autosaved");
        }
    }

    fn publish_session(&self, event: SessionEvent) {
        if let Some(message) = event.notice() {
            self.event_bus.publish(Event::notice(message));
        }
        self.event_bus.publish(Event::Session(event));
    }
}
