//! End-of-tick death processing.

use crate::env::GameEnv;
use crate::engine::{self, GameEvent};
use crate::state::{EntityKind, GameState, ItemKey, SessionStatus};

use super::damage::KillLog;

/// Item granted for defeating the final boss.
pub const ARTIFACT_ITEM: &str = "artifact_teddy_bear";

/// Runs the death pipeline for every kill logged this tick.
///
/// Credited kills run, in order: trophy bookkeeping, the unlock gate, loot
/// rolls, and kill-quest credit. Uncredited kills only disappear.
pub fn resolve(state: &mut GameState, env: &GameEnv<'_>, kills: KillLog) {
    if kills.is_empty() {
        return;
    }
    for kill in kills.into_kills() {
        if !kill.credited {
            continue;
        }
        let Some(kind) = state.entities.get(kill.id).map(|e| e.kind) else {
            continue;
        };
        record_trophy(state, kind);
        if state.progress.unlock_ready() {
            engine::session::spawn_sky_island(state, env);
        }
        if kind != EntityKind::Villager {
            roll_loot(state, env, kind);
        }
        engine::quests::record_kill(state, kind);
        if kind == EntityKind::Ursus {
            win(state);
        }
    }
    state.events.push(GameEvent::EntitiesChanged);
}

fn record_trophy(state: &mut GameState, kind: EntityKind) {
    if kind.is_trophy() && state.progress.record_defeat(kind) {
        state
            .events
            .notice(format!("TARGET NEUTRALIZED: {}", kind.display_name()));
    }
}

fn roll_loot(state: &mut GameState, env: &GameEnv<'_>, kind: EntityKind) {
    let Ok(tables) = env.tables() else {
        return;
    };
    for entry in tables.loot(kind) {
        if state.rng.chance(entry.chance) {
            engine::inventory::give(state, entry.item, entry.count);
        }
    }
}

fn win(state: &mut GameState) {
    engine::inventory::give(state, ItemKey::item(ARTIFACT_ITEM), 1);
    state.events.notice("BOSS DEFEATED! You found the artifact!");
    if state.status == SessionStatus::Running {
        state.status = SessionStatus::GameWon;
        state.events.push(GameEvent::GameWon);
    }
}
