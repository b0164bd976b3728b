//! Wildlife and hostile mobs.

use crate::state::{AiState, EntityState, GameState, Temperament};

use super::{Goal, contact_due, hop_if_blocked, in_contact, player_gap, pursue, touch_player, wander};

const FLEE_RADIUS: f32 = 120.0;
const FLEE_SPEED: f32 = 2.0;
const AGGRO_RADIUS: f32 = 400.0;

pub fn think(entity: &mut EntityState, state: &mut GameState) {
    let gap = player_gap(entity, state);
    match entity.kind.temperament() {
        Temperament::Passive if gap < FLEE_RADIUS => {
            flee(entity, state);
        }
        Temperament::Aggressive if gap < AGGRO_RADIUS => {
            entity.ai = AiState::Chasing;
            pursue(entity, state, Goal::Player);
            let player = (state.player.body.x, state.player.body.y);
            if in_contact(entity, player) && contact_due(state) {
                touch_player(state, entity.kind.contact_damage());
            }
        }
        _ => {
            if matches!(entity.ai, AiState::Fleeing | AiState::Chasing) {
                entity.ai = AiState::Idle;
            }
            wander(entity, state);
        }
    }
}

fn flee(entity: &mut EntityState, state: &GameState) {
    let away_right = entity.body.x > state.player.body.x;
    entity.ai = AiState::Fleeing;
    entity.body.vx = if away_right { FLEE_SPEED } else { -FLEE_SPEED };
    entity.facing_right = away_right;
    hop_if_blocked(entity, state, away_right, 5.0);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::tests::arena;
    use crate::config::GameConfig;
    use crate::state::{EntityId, EntityKind, EntityRole};

    fn creature(kind: EntityKind, x: f32, y: f32) -> EntityState {
        let mut entity = EntityState::new(EntityId(1), kind, x, y, EntityRole::Creature);
        entity.on_ground = true;
        entity
    }

    #[test]
    fn rabbits_flee_the_player() {
        let mut state = arena();
        let mut rabbit = creature(EntityKind::Rabbit, 350.0, 472.0);
        think(&mut rabbit, &mut state);
        assert_eq!(rabbit.ai, AiState::Fleeing);
        assert_eq!(rabbit.body.vx, -FLEE_SPEED);

        let mut far = creature(EntityKind::Rabbit, 100.0, 472.0);
        think(&mut far, &mut state);
        assert_ne!(far.ai, AiState::Fleeing);
    }

    #[test]
    fn zombies_chase_and_bite_on_the_contact_cadence() {
        let mut state = arena();
        let mut zombie = creature(EntityKind::Zombie, 380.0, 456.0);
        state.tick = 31;
        think(&mut zombie, &mut state);
        assert_eq!(zombie.ai, AiState::Chasing);
        assert!(zombie.body.vx > 0.0);
        assert_eq!(state.player.health, GameConfig::PLAYER_MAX_HEALTH);

        state.tick = 60;
        think(&mut zombie, &mut state);
        assert_eq!(state.player.health, GameConfig::PLAYER_MAX_HEALTH - 5);
    }

    #[test]
    fn drones_steer_with_capped_speed() {
        let mut state = arena();
        let mut drone = creature(EntityKind::Drone, 200.0, 100.0);
        for _ in 0..100 {
            think(&mut drone, &mut state);
        }
        assert!(drone.body.speed() <= 4.001);
        assert!(drone.body.vx > 0.0 && drone.body.vy > 0.0);
    }
}
