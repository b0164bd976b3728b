//! Per-entity behavior programs.
//!
//! Every live entity is detached from the entity list while it thinks, so a
//! program can read and mutate the rest of the session (spawn minions, fire
//! projectiles, strike other entities) and is put back at its original
//! position afterwards. Entities spawned during the step first think on the
//! next tick.

pub mod boss;
pub mod villager;
pub mod wildlife;

use crate::combat::{KillLog, hurt_player, strike};
use crate::config::GameConfig;
use crate::state::{EntityId, EntityState, GameState, Temperament, VillagerJob};

/// Runs one AI step for every live entity, in spawn order.
pub fn update(state: &mut GameState, kills: &mut KillLog) {
    for id in state.entities.live_ids() {
        let Some((index, mut entity)) = state.entities.detach(id) else {
            continue;
        };
        if entity.is_alive() {
            tick_timers(&mut entity);
            match entity.kind.temperament() {
                Temperament::Boss => boss::think(&mut entity, state, kills),
                Temperament::Villager => villager::think(&mut entity, state, kills),
                _ => wildlife::think(&mut entity, state),
            }
        }
        state.entities.reattach(index, entity);
    }
}

fn tick_timers(entity: &mut EntityState) {
    entity.state_timer = entity.state_timer.saturating_sub(1);
    entity.damage_cooldown = entity.damage_cooldown.saturating_sub(1);
    if let Some(data) = entity.villager_mut() {
        if data.job == VillagerJob::Librarian {
            data.book_timer = data.book_timer.saturating_add(1);
        }
    }
}

/// Something an entity moves toward.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) enum Goal {
    Player,
    Entity(EntityId, f32, f32),
}

impl Goal {
    pub(crate) fn position(self, state: &GameState) -> (f32, f32) {
        match self {
            Self::Player => (state.player.body.x, state.player.body.y),
            Self::Entity(_, x, y) => (x, y),
        }
    }
}

/// Horizontal distance between the player's and the entity's left edges.
pub(crate) fn player_gap(entity: &EntityState, state: &GameState) -> f32 {
    (state.player.body.x - entity.body.x).abs()
}

fn solid(state: &GameState, x: f32, y: f32) -> bool {
    state.world.is_solid_at(x, y)
}

/// Probe point just ahead of the entity's leading edge.
fn wall_probe(entity: &EntityState, toward_right: bool, gap: f32) -> f32 {
    if toward_right {
        entity.body.x + entity.body.width + gap
    } else {
        entity.body.x - gap
    }
}

/// Hops over a one-tile step in the walking direction when standing.
pub(crate) fn hop_if_blocked(entity: &mut EntityState, state: &GameState, toward_right: bool, foot_offset: f32) {
    if !entity.on_ground {
        return;
    }
    let body = entity.body;
    let head_clear = !solid(state, body.x + body.width / 2.0, body.y - GameConfig::TILE_SIZE);
    let blocked = solid(state, wall_probe(entity, toward_right, 2.0), body.y + body.height - foot_offset);
    if head_clear && blocked {
        entity.body.vy = GameConfig::MOB_JUMP_FORCE;
    }
}

/// Walks or flies toward `goal`. Flyers steer; walkers set their speed and
/// hop obstacles. Party members climb after a player standing above them.
pub(crate) fn pursue(entity: &mut EntityState, state: &GameState, goal: Goal) {
    let (gx, gy) = goal.position(state);
    let dx = gx - entity.body.x;
    let dy = gy - entity.body.y;

    if entity.kind.movement() == crate::state::MovementClass::Flyer {
        let angle = dy.atan2(dx);
        entity.body.vx += angle.cos() * 0.2;
        entity.body.vy += angle.sin() * 0.2;
        entity.body.cap_speed(4.0);
        entity.facing_right = entity.body.vx > 0.0;
        return;
    }

    let speed = entity.kind.walk_speed();
    let right = dx > 0.0;
    entity.body.vx = if right { speed } else { -speed };
    entity.facing_right = right;
    if dx.abs() <= 10.0 || !entity.on_ground {
        return;
    }
    hop_if_blocked(entity, state, right, 2.0);

    let body = entity.body;
    let head_clear = !solid(state, body.x + body.width / 2.0, body.y - GameConfig::TILE_SIZE);
    if entity.in_party() && goal == Goal::Player && head_clear {
        let hitting_wall = solid(state, wall_probe(entity, right, 2.0), body.y + body.height / 2.0);
        let player_above = gy < body.y - 2.0 * GameConfig::TILE_SIZE;
        if hitting_wall && player_above {
            entity.body.vy = GameConfig::MOB_JUMP_FORCE * 1.2;
            entity.body.vx = if right { -4.0 } else { 4.0 };
        }
    }
}

/// Whether two top-left corners are close enough for a contact hit.
pub(crate) fn in_contact(entity: &EntityState, (x, y): (f32, f32)) -> bool {
    (x - entity.body.x).abs() < 30.0 && (y - entity.body.y).abs() < 30.0
}

/// Contact hits land on a fixed cadence rather than every tick.
pub(crate) fn contact_due(state: &GameState) -> bool {
    state.tick % GameConfig::CONTACT_INTERVAL == 0
}

/// Contact damage against the player.
pub(crate) fn touch_player(state: &mut GameState, damage: i32) {
    hurt_player(state, damage);
}

/// Melee hit from one entity on another, with knockback.
pub(crate) fn hit_entity(state: &mut GameState, attacker_x: f32, target: EntityId, damage: i32, credited: bool, kills: &mut KillLog) {
    let Some(victim) = state.entities.get_mut(target) else {
        return;
    };
    if strike(victim, damage, credited, kills).landed() {
        victim.body.vx = if victim.body.x > attacker_x { 5.0 } else { -5.0 };
        victim.body.vy = -3.0;
    }
}

/// Random idle drift.
pub(crate) fn wander(entity: &mut EntityState, state: &mut GameState) {
    if state.rng.chance(0.02) {
        entity.body.vx = state.rng.next_f32() - 0.5;
        if entity.kind.movement() == crate::state::MovementClass::Flyer {
            entity.body.vy = state.rng.next_f32() - 0.5;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{EntityKind, EntityRole, VillagerData};
    use crate::world::{TileGrid, TileKind};

    pub(super) fn arena() -> GameState {
        let mut grid = TileGrid::new(80, 40);
        for x in 0..80 {
            grid.set(x, 30, TileKind::Stone);
        }
        GameState::new(9, grid, (400.0, 30.0 * 16.0 - 24.0))
    }

    #[test]
    fn timers_count_down_and_books_count_up() {
        let mut state = arena();
        let id = state.entities.allocate_id();
        let data = VillagerData::new("Lib".into(), "Quiet".into(), VillagerJob::Librarian, (0.0, 0.0));
        let mut librarian = EntityState::new(id, EntityKind::Villager, 100.0, 456.0, EntityRole::Villager(data));
        librarian.state_timer = 3;
        state.entities.insert(librarian);

        let mut kills = KillLog::new();
        update(&mut state, &mut kills);
        update(&mut state, &mut kills);
        let entity = state.entities.get(id);
        assert_eq!(entity.map(|e| e.state_timer), Some(1));
        assert_eq!(entity.and_then(|e| e.villager()).map(|v| v.book_timer), Some(2));
    }

    #[test]
    fn spawn_order_survives_an_update() {
        let mut state = arena();
        let kinds = [EntityKind::Rabbit, EntityKind::Zombie, EntityKind::Bat];
        for (i, kind) in kinds.iter().enumerate() {
            let id = state.entities.allocate_id();
            state
                .entities
                .insert(EntityState::new(id, *kind, 50.0 + i as f32 * 40.0, 100.0, EntityRole::Creature));
        }
        let mut kills = KillLog::new();
        update(&mut state, &mut kills);
        let order: Vec<_> = state.entities.iter().map(|e| e.kind).collect();
        assert_eq!(order, kinds);
    }

    #[test]
    fn walkers_hop_single_steps() {
        let mut state = arena();
        state.world.set(11, 29, TileKind::Stone);
        let id = state.entities.allocate_id();
        let mut zombie = EntityState::new(id, EntityKind::Zombie, 10.0 * 16.0 + 2.0, 456.0, EntityRole::Creature);
        zombie.on_ground = true;
        pursue(&mut zombie, &state, Goal::Player);
        assert_eq!(zombie.body.vx, EntityKind::Zombie.walk_speed());
        assert_eq!(zombie.body.vy, GameConfig::MOB_JUMP_FORCE);
    }
}
