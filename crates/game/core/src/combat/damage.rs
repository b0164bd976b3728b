//! Damage formula and its application to the player and entities.

use crate::config::GameConfig;
use crate::engine::GameEvent;
use crate::state::{EntityId, EntityState, GameState, SessionStatus};

/// `max(1, raw - defense)`: every landed hit deals at least one point.
pub fn mitigate(raw: i32, defense: i32) -> i32 {
    (raw - defense).max(1)
}

/// Damage for a landing at `impact` speed, if it exceeds the threshold.
pub fn fall_damage(impact: f32) -> Option<i32> {
    if impact <= GameConfig::FALL_DAMAGE_THRESHOLD {
        return None;
    }
    let damage = ((impact - GameConfig::FALL_DAMAGE_THRESHOLD) * GameConfig::FALL_DAMAGE_MULTIPLIER)
        .floor() as i32;
    (damage > 0).then_some(damage)
}

/// Result of hitting an entity.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HitOutcome {
    /// Target already dead or shielded by its immunity window.
    Ignored,
    Wounded(i32),
    /// This hit took the target to zero; reported exactly once per entity.
    Killed(i32),
}

impl HitOutcome {
    pub fn landed(self) -> bool {
        !matches!(self, Self::Ignored)
    }
}

/// Applies `raw` damage to an entity.
///
/// Party members get the same post-hit immunity window as the player.
pub fn hurt_entity(entity: &mut EntityState, raw: i32) -> HitOutcome {
    if entity.dead {
        return HitOutcome::Ignored;
    }
    let party = entity.in_party();
    if party && entity.damage_cooldown > 0 {
        return HitOutcome::Ignored;
    }
    let amount = mitigate(raw, entity.defense());
    entity.health -= amount;
    entity.damage_taken += amount;
    if party {
        entity.damage_cooldown = GameConfig::DAMAGE_IMMUNITY_TICKS;
    }
    if entity.health <= 0 {
        entity.dead = true;
        HitOutcome::Killed(amount)
    } else {
        HitOutcome::Wounded(amount)
    }
}

/// Applies `raw` damage to the player. Returns false when the hit was
/// absorbed by creative mode, a running immunity window, or a roll.
pub fn hurt_player(state: &mut GameState, raw: i32) -> bool {
    let player = &mut state.player;
    if player.creative || player.damage_cooldown > 0 || player.is_rolling() {
        return false;
    }
    player.health -= mitigate(raw, player.defense());
    player.damage_cooldown = GameConfig::DAMAGE_IMMUNITY_TICKS;
    state.events.push(GameEvent::PlayerChanged);

    if player.health <= 0 && state.status == SessionStatus::Running {
        state.status = SessionStatus::GameOver;
        state.events.push(GameEvent::GameOver {
            reason: "Vital signs critical.".into(),
        });
    }
    true
}

/// A death awaiting end-of-tick processing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Kill {
    pub id: EntityId,
    /// Killed by the player or a party member: triggers trophies, loot and
    /// quest credit.
    pub credited: bool,
}

/// Deaths collected during one tick, in the order they happened.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct KillLog {
    kills: Vec<Kill>,
}

impl KillLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, id: EntityId, credited: bool) {
        self.kills.push(Kill { id, credited });
    }

    pub fn is_empty(&self) -> bool {
        self.kills.is_empty()
    }

    pub fn len(&self) -> usize {
        self.kills.len()
    }

    pub fn into_kills(self) -> Vec<Kill> {
        self.kills
    }
}

/// Hurts an entity and logs the kill if this hit was the fatal one.
pub fn strike(entity: &mut EntityState, raw: i32, credited: bool, kills: &mut KillLog) -> HitOutcome {
    let outcome = hurt_entity(entity, raw);
    if let HitOutcome::Killed(_) = outcome {
        kills.record(entity.id, credited);
    }
    outcome
}

/// Landing shock of a ground pound: flat damage and an upward toss for every
/// live entity within the pound radius.
pub fn ground_pound(state: &mut GameState, kills: &mut KillLog) {
    let (px, py) = (state.player.body.x, state.player.body.y);
    let radius = GameConfig::GROUND_POUND_RADIUS;
    for entity in state.entities.iter_mut() {
        if entity.dead || (entity.body.x - px).abs() >= radius || (entity.body.y - py).abs() >= radius {
            continue;
        }
        if strike(entity, GameConfig::GROUND_POUND_DAMAGE, true, kills).landed() {
            entity.body.vy = -5.0;
        }
    }
    state.events.push(GameEvent::EntitiesChanged);
}
