//! Whole-session save records.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use game_core::GameState;

use super::SaveRepository;
use super::error::{RepositoryError, Result};

/// Envelope written to the save store.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SaveRecord {
    #[serde(default = "SaveRecord::current_version")]
    pub version: u32,
    /// Tick the record was taken at.
    #[serde(default)]
    pub tick: u64,
    pub state: GameState,
}

impl SaveRecord {
    pub const VERSION: u32 = 1;

    fn current_version() -> u32 {
        Self::VERSION
    }

    pub fn new(state: GameState) -> Self {
        Self {
            version: Self::VERSION,
            tick: state.tick,
            state,
        }
    }

    pub fn encode(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Parses a record, filling missing optional sections with defaults.
    pub fn decode(raw: &str) -> Result<Self> {
        let record: SaveRecord = serde_json::from_str(raw)?;
        if record.version > Self::VERSION {
            return Err(RepositoryError::UnsupportedVersion {
                found: record.version,
                expected: Self::VERSION,
            });
        }
        Ok(record)
    }
}

/// Save/load facade over a [`SaveRepository`].
///
/// A record is encoded completely before it touches the store and decoded
/// completely before it is handed back, so callers never see half a save.
#[derive(Clone)]
pub struct SnapshotService {
    repo: Arc<dyn SaveRepository>,
}

impl SnapshotService {
    pub fn new(repo: Arc<dyn SaveRepository>) -> Self {
        Self { repo }
    }

    pub fn save(&self, slot: &str, state: &GameState) -> Result<()> {
        let raw = SaveRecord::new(state.clone()).encode()?;
        self.repo.put(slot, &raw)?;
        tracing::info!(slot, tick = state.tick, bytes = raw.len(), "Snapshot saved");
        Ok(())
    }

    pub fn load(&self, slot: &str) -> Result<GameState> {
        let raw = self
            .repo
            .get(slot)?
            .ok_or_else(|| RepositoryError::NotFound(slot.to_owned()))?;
        let record = SaveRecord::decode(&raw)?;
        tracing::info!(slot, tick = record.tick, "Snapshot loaded");
        Ok(record.state)
    }

    pub fn exists(&self, slot: &str) -> Result<bool> {
        self.repo.contains(slot)
    }

    pub fn delete(&self, slot: &str) -> Result<()> {
        self.repo.delete(slot)
    }

    pub fn slots(&self) -> Result<Vec<String>> {
        self.repo.keys()
    }
}
