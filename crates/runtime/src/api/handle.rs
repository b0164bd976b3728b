//! Cloneable façade for issuing commands to the runtime.
//!
//! [`RuntimeHandle`] hides channel plumbing and offers async helpers for
//! stepping the simulation, persisting it, talking to villagers and
//! streaming events from specific topics.
use std::collections::HashMap;

use tokio::sync::{broadcast, mpsc, oneshot};

use game_core::{Command as GameCommand, EntityId, GameState, TickOutcome};

use super::errors::{Result, RuntimeError};
use crate::events::{Event, EventBus, Topic};
use crate::workers::Command;

/// Client-facing handle to interact with the runtime
#[derive(Clone)]
pub struct RuntimeHandle {
    command_tx: mpsc::Sender<Command>,
    event_bus: EventBus,
}

impl RuntimeHandle {
    pub(crate) fn new(command_tx: mpsc::Sender<Command>, event_bus: EventBus) -> Self {
        Self {
            command_tx,
            event_bus,
        }
    }

    async fn request<T>(&self, build: impl FnOnce(oneshot::Sender<T>) -> Command) -> Result<T> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(build(reply_tx))
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)
    }

    /// Applies one player command between ticks.
    pub async fn send_command(&self, command: GameCommand) -> Result<()> {
        self.request(|reply| Command::Apply { command, reply })
            .await?
    }

    /// Advances the simulation by one tick.
    pub async fn tick(&self) -> Result<TickOutcome> {
        self.tick_many(1).await
    }

    /// Advances up to `count` ticks, stopping early when the session ends.
    pub async fn tick_many(&self, count: u32) -> Result<TickOutcome> {
        self.request(|reply| Command::Tick { count, reply }).await
    }

    /// Query the current game state (read-only snapshot)
    pub async fn query_state(&self) -> Result<GameState> {
        self.request(|reply| Command::QueryState { reply }).await
    }

    /// Writes the session to the configured save slot.
    pub async fn save(&self) -> Result<()> {
        self.request(|reply| Command::Save { reply }).await?
    }

    /// Replaces the session with the configured save slot. On failure the
    /// running session is left untouched.
    pub async fn load(&self) -> Result<()> {
        self.request(|reply| Command::Load { reply }).await?
    }

    /// Sends the player's `message` to a villager. The reply arrives later
    /// on [`Topic::Dialogue`].
    pub async fn request_dialogue(&self, entity: EntityId, message: impl Into<String>) -> Result<()> {
        let message = message.into();
        self.request(|reply| Command::RequestDialogue {
            entity,
            message,
            reply,
        })
        .await?
    }

    /// Subscribe to events from a specific topic
    ///
    /// # Topics
    ///
    /// - `Topic::Player` - Player body, inventory and notices
    /// - `Topic::World` - Entities, clock, bosses and lore discoveries
    /// - `Topic::Progress` - Quest lifecycle
    /// - `Topic::Dialogue` - Villager replies and lore text
    /// - `Topic::Session` - Save/load outcomes, game over and victory
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use runtime::Topic;
    ///
    /// let mut session = handle.subscribe(Topic::Session);
    /// while let Ok(event) = session.recv().await {
    ///     // React to saves, game over, ...
    /// }
    /// ```
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.event_bus.subscribe(topic)
    }

    /// Subscribe to multiple topics at once
    pub fn subscribe_multiple(&self, topics: &[Topic]) -> HashMap<Topic, broadcast::Receiver<Event>> {
        self.event_bus.subscribe_multiple(topics)
    }

    /// Get a reference to the event bus for advanced usage
    pub fn event_bus(&self) -> &EventBus {
        &self.event_bus
    }
}
