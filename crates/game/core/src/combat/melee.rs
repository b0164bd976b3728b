//! Melee swings around the pointer.

use crate::config::GameConfig;
use crate::engine::GameEvent;
use crate::env::ItemDefinition;
use crate::state::GameState;

use super::damage::{KillLog, strike};

/// Margin added around every entity's hitbox when testing the pointer.
const SWING_MARGIN: f32 = 20.0;

/// Swings the held item (or bare hands) at the pointer. Every live entity
/// outside the party whose widened hitbox contains the pointer is hit and
/// knocked away from the player. Returns whether anything was hit.
pub fn swing(state: &mut GameState, item: Option<&ItemDefinition>, kills: &mut KillLog) -> bool {
    let (px, py) = state.input.pointer;
    let (cx, cy) = state.player.body.center();
    let range = item.and_then(|i| i.stats.range).unwrap_or(GameConfig::REACH) + SWING_MARGIN;
    if (px - cx).hypot(py - cy) >= range {
        return false;
    }

    let damage = item.map_or(2, ItemDefinition::melee_damage);
    let player_x = state.player.body.x;
    let mut hit = false;
    for entity in state.entities.iter_mut() {
        if !entity.is_alive() || entity.in_party() {
            continue;
        }
        if !entity.body.rect().expanded(SWING_MARGIN).contains(px, py) {
            continue;
        }
        strike(entity, damage, true, kills);
        entity.body.vx = if entity.body.x > player_x { 5.0 } else { -5.0 };
        entity.body.vy = -3.0;
        hit = true;
    }

    if hit {
        state.action_cooldown = item.map_or(20, ItemDefinition::attack_cooldown);
        state.events.push(GameEvent::EntitiesChanged);
    }
    hit
}
