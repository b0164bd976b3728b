//! Runs dialogue calls off the simulation and parks their results.
//!
//! Requests are spawned as tokio tasks. Each finished call drops its outcome
//! into a bounded result channel; the simulation worker drains that channel
//! at the start of its next tick, so replies never touch the game state from
//! outside the tick loop. A failed call still produces an outcome carrying
//! the neutral fallback text.

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, warn};

use game_core::{EntityId, TileKind};

use super::service::{
    ChatRequest, DialogueReply, DialogueService, LORE_FALLBACK, LoreRequest,
};

/// A finished dialogue call.
#[derive(Clone, Debug, PartialEq)]
pub enum DialogueOutcome {
    Chat {
        entity: EntityId,
        name: String,
        reply: DialogueReply,
    },
    Lore {
        tile: TileKind,
        text: String,
    },
}

pub struct DialogueBridge {
    service: Arc<dyn DialogueService>,
    results_tx: mpsc::Sender<DialogueOutcome>,
    results_rx: mpsc::Receiver<DialogueOutcome>,
}

impl DialogueBridge {
    pub fn new(service: Arc<dyn DialogueService>, capacity: usize) -> Self {
        let (results_tx, results_rx) = mpsc::channel(capacity.max(1));
        Self {
            service,
            results_tx,
            results_rx,
        }
    }

    pub fn request_chat(&self, request: ChatRequest) {
        let service = Arc::clone(&self.service);
        let tx = self.results_tx.clone();
        tokio::spawn(async move {
            let reply = match service.chat(&request).await {
                Ok(reply) => reply,
                Err(error) => {
                    warn!(entity = %request.entity, %error, "Dialogue call failed, using fallback");
                    DialogueReply::fallback()
                }
            };
            let outcome = DialogueOutcome::Chat {
                entity: request.entity,
                name: request.name,
                reply,
            };
            if tx.send(outcome).await.is_err() {
                debug!("Dialogue result channel closed (worker stopped)");
            }
        });
    }

    pub fn request_lore(&self, request: LoreRequest) {
        let service = Arc::clone(&self.service);
        let tx = self.results_tx.clone();
        tokio::spawn(async move {
            let text = match service.lore(&request).await {
                Ok(text) => text,
                Err(error) => {
                    warn!(tile = %request.tile, %error, "Lore call failed, using fallback");
                    LORE_FALLBACK.to_owned()
                }
            };
            let outcome = DialogueOutcome::Lore {
                tile: request.tile,
                text,
            };
            if tx.send(outcome).await.is_err() {
                debug!("Dialogue result channel closed (worker stopped)");
            }
        });
    }

    /// Takes every outcome that has arrived so far, in arrival order.
    pub fn drain(&mut self) -> Vec<DialogueOutcome> {
        let mut outcomes = Vec::new();
        while let Ok(outcome) = self.results_rx.try_recv() {
            outcomes.push(outcome);
        }
        outcomes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialogue::{CHAT_FALLBACK, DialogueError};
    use async_trait::async_trait;
    use game_content::Mood;
    use game_core::VillagerOrder;
    use game_core::state::VillagerJob;
    use std::time::Duration;

    struct Offline;

    #[async_trait]
    impl DialogueService for Offline {
        async fn chat(&self, _request: &ChatRequest) -> Result<DialogueReply, DialogueError> {
            Err(DialogueError::Unavailable("offline".into()))
        }

        async fn lore(&self, _request: &LoreRequest) -> Result<String, DialogueError> {
            Err(DialogueError::Unavailable("offline".into()))
        }
    }

    async fn settle(bridge: &mut DialogueBridge, expected: usize) -> Vec<DialogueOutcome> {
        let mut outcomes = Vec::new();
        for _ in 0..100 {
            outcomes.extend(bridge.drain());
            if outcomes.len() >= expected {
                break;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        outcomes
    }

    #[tokio::test]
    async fn failures_degrade_to_fallbacks() {
        let mut bridge = DialogueBridge::new(Arc::new(Offline), 4);
        bridge.request_chat(ChatRequest {
            entity: EntityId(7),
            name: "Kit".into(),
            personality: "Shy".into(),
            job: VillagerJob::Farmer,
            mood: Mood::Day,
            hostile: false,
            history: Vec::new(),
            message: "follow me".into(),
        });
        bridge.request_lore(LoreRequest {
            tile: TileKind::Debris,
            depth: 2,
        });

        let outcomes = settle(&mut bridge, 2).await;
        assert_eq!(outcomes.len(), 2);
        assert!(outcomes.contains(&DialogueOutcome::Chat {
            entity: EntityId(7),
            name: "Kit".into(),
            reply: DialogueReply::new(CHAT_FALLBACK, VillagerOrder::None),
        }));
        assert!(outcomes.contains(&DialogueOutcome::Lore {
            tile: TileKind::Debris,
            text: LORE_FALLBACK.into(),
        }));
    }

    #[test]
    fn draining_an_idle_bridge_is_empty() {
        let mut bridge = DialogueBridge::new(Arc::new(Offline), 1);
        assert!(bridge.drain().is_empty());
    }
}
