#![allow(dead_code)]

use std::time::Duration;

use game_core::state::{EntityRole, EntityState, VillagerData, VillagerJob};
use game_core::{EntityId, EntityKind, GameState, TileGrid, TileKind};
use runtime::{Event, OracleManager, RuntimeHandle};
use tokio::sync::broadcast;

/// Flat stone floor at row 30 with the player standing on it.
pub fn arena() -> GameState {
    let mut grid = TileGrid::new(80, 40);
    for x in 0..80 {
        grid.set(x, 30, TileKind::Stone);
    }
    GameState::new(9, grid, (400.0, 30.0 * 16.0 - 24.0))
}

pub fn add_villager(state: &mut GameState, name: &str, x: f32) -> EntityId {
    let id = state.entities.allocate_id();
    let data = VillagerData::new(name.into(), "Calm".into(), VillagerJob::Farmer, (x, 456.0));
    state
        .entities
        .insert(EntityState::new(id, EntityKind::Villager, x, 456.0, EntityRole::Villager(data)));
    id
}

pub fn oracles() -> OracleManager {
    OracleManager::new(
        game_content::builtin::snapshot().expect("builtin content parses"),
        game_content::builtin::dialogue().expect("builtin dialogue parses"),
    )
}

/// Ticks until `pick` accepts an event from `rx`, or gives up.
pub async fn tick_until<T>(
    handle: &RuntimeHandle,
    rx: &mut broadcast::Receiver<Event>,
    mut pick: impl FnMut(Event) -> Option<T>,
) -> Option<T> {
    for _ in 0..200 {
        handle.tick().await.expect("tick succeeds");
        while let Ok(event) = rx.try_recv() {
            if let Some(found) = pick(event) {
                return Some(found);
            }
        }
        tokio::time::sleep(Duration::from_millis(2)).await;
    }
    None
}

/// Collects whatever is already queued on `rx`.
pub fn drain(rx: &mut broadcast::Receiver<Event>) -> Vec<Event> {
    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    events
}
