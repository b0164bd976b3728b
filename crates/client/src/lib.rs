//! Headless client: the composition root around the runtime.
//!
//! # Architecture
//!
//! ```text
//! Client
//!   ├─→ content   (built-in catalogs or CONTENT_DIR overrides)
//!   ├─→ saves     (FileSaveRepository under SAVE_DATA_DIR)
//!   ├─→ Runtime   (simulation worker, event bus, dialogue bridge)
//!   └─→ observers (one task per topic, writing events to the log)
//! ```

pub mod config;
pub mod logging;

use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::sync::broadcast::error::RecvError;
use tokio::task::JoinHandle;
use tracing::{debug, info, trace, warn};

use game_content::{ContentFactory, builtin};
use game_core::{Command, TickOutcome};
use runtime::{
    DialogueEvent, Event, FileSaveRepository, OracleManager, PlayerEvent, ProgressEvent, Runtime,
    SessionEvent, Topic, WorldEvent,
};

pub use config::ClientConfig;

/// A built session ready to run.
pub struct Client {
    config: ClientConfig,
    runtime: Runtime,
}

impl Client {
    /// Loads content, opens the save directory and starts the runtime,
    /// resuming the session's save slot when one exists.
    pub async fn build(config: ClientConfig) -> Result<Self> {
        let oracles = load_oracles(&config)?;
        let saves = FileSaveRepository::new(&config.save_data_dir).with_context(|| {
            format!("Failed to open save directory: {}", config.save_data_dir.display())
        })?;
        info!("Save directory: {}", config.save_data_dir.display());

        let runtime = Runtime::builder()
            .config(config.runtime_config())
            .oracles(oracles)
            .save_repository(Arc::new(saves))
            .build()
            .await?;

        Ok(Self { config, runtime })
    }

    /// Runs until the session ends, the tick budget is spent or Ctrl-C,
    /// then saves and shuts the runtime down.
    pub async fn run(self) -> Result<Option<TickOutcome>> {
        let handle = self.runtime.handle();
        let observers = spawn_observers(&self.runtime);

        let state = handle.query_state().await?;
        info!(seed = state.seed, tick = state.tick, "Session ready");
        if self.config.creative && !state.player.creative {
            handle.send_command(Command::ToggleCreative).await?;
        }

        let outcome = tokio::select! {
            outcome = self.runtime.run(self.config.ticks) => Some(outcome?),
            _ = tokio::signal::ctrl_c() => {
                info!("Interrupted");
                None
            }
        };

        if let Err(error) = handle.save().await {
            warn!(%error, "Final save failed");
        }
        let state = handle.query_state().await?;
        info!(
            tick = state.tick,
            health = state.player.health,
            bosses = state.progress.defeated.len(),
            status = ?state.status,
            "Session finished"
        );

        drop(handle);
        self.runtime.shutdown().await?;
        for observer in observers {
            observer.abort();
        }
        Ok(outcome)
    }
}

fn load_oracles(config: &ClientConfig) -> Result<OracleManager> {
    let (content, dialogue) = match &config.content_dir {
        Some(dir) => {
            info!("Loading content from {}", dir.display());
            let factory = ContentFactory::new(dir.clone());
            (factory.load_snapshot()?, factory.load_dialogue()?)
        }
        None => (builtin::snapshot()?, builtin::dialogue()?),
    };
    debug!(
        items = content.items.items.len(),
        recipes = content.tables.recipes.len(),
        quests = content.quests.quests.len(),
        "Content loaded"
    );
    Ok(OracleManager::new(content, dialogue))
}

fn spawn_observers(runtime: &Runtime) -> Vec<JoinHandle<()>> {
    runtime
        .handle()
        .subscribe_multiple(&Topic::ALL)
        .into_iter()
        .map(|(topic, mut rx)| {
            tokio::spawn(async move {
                loop {
                    match rx.recv().await {
                        Ok(event) => log_event(&event),
                        Err(RecvError::Lagged(skipped)) => {
                            debug!(?topic, skipped, "Observer lagged");
                        }
                        Err(RecvError::Closed) => break,
                    }
                }
            })
        })
        .collect()
}

fn log_event(event: &Event) {
    match event {
        Event::Player(PlayerEvent::Notice { message }) => info!("{message}"),
        Event::World(WorldEvent::BossSpawned { name, .. }) => warn!("{name} has awakened"),
        Event::World(WorldEvent::LoreDiscovered { tile, depth }) => {
            debug!(%tile, depth, "Lore tile broken");
        }
        Event::Progress(ProgressEvent::QuestOffered { quest, giver }) => {
            info!(%giver, "Quest offered: {}", quest.0);
        }
        Event::Progress(ProgressEvent::QuestProgress {
            quest,
            progress,
            goal,
        }) => info!("{}: {progress}/{goal}", quest.0),
        Event::Progress(ProgressEvent::QuestCompleted { quest }) => {
            info!("Quest complete: {}", quest.0);
        }
        Event::Dialogue(DialogueEvent::Reply { name, text, .. }) => info!("{name}: {text}"),
        Event::Dialogue(DialogueEvent::Lore { text, .. }) => info!("[lore] {text}"),
        Event::Session(SessionEvent::GameOver { reason }) => warn!("GAME OVER: {reason}"),
        Event::Session(SessionEvent::GameWon) => info!("The artifact is yours. You win!"),
        other => trace!("{other:?}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn short_headless_run_saves_its_slot() {
        let saves = TempDir::new().unwrap();
        let config = ClientConfig {
            seed: Some(7),
            ticks: Some(5),
            tick_rate: 1000,
            save_data_dir: saves.path().to_path_buf(),
            session_id: "headless".into(),
            ..ClientConfig::default()
        };

        let client = Client::build(config).await.unwrap();
        let outcome = client.run().await.unwrap();
        assert_eq!(outcome, Some(TickOutcome::Advanced(5)));
        assert!(saves.path().join("headless.save.json").exists());
    }
}
