//! Villager program: party duty, orders, shelter runs and retaliation.

use crate::combat::KillLog;
use crate::state::{AiState, EntityId, EntityState, GameState, TargetRef};

use super::{Goal, contact_due, hit_entity, hop_if_blocked, in_contact, player_gap, pursue, touch_player, wander};

/// Threat scan radius while a party member stands idle.
const GUARD_RADIUS: f32 = 200.0;
/// Threat scan radius while a party member follows the player.
const ESCORT_RADIUS: f32 = 300.0;
const PARTY_FOLLOW_GAP: f32 = 50.0;
const FOLLOW_GAP: f32 = 40.0;
const HOME_TOLERANCE: f32 = 16.0;

pub fn think(entity: &mut EntityState, state: &mut GameState, kills: &mut KillLog) {
    let shelter = state.clock.shelter_weather();
    if entity.ai == AiState::SeekingShelter && !shelter {
        entity.ai = AiState::Idle;
    }
    let gap = player_gap(entity, state);
    let in_party = entity.in_party();
    let order = entity.villager().and_then(|v| v.target);

    let goal = if entity.is_hostile_villager() {
        entity.ai = AiState::Attacking;
        set_target(entity, Some(TargetRef::Player), Some(false));
        Some(Goal::Player)
    } else if in_party {
        party_duty(entity, state, gap, order)
    } else if entity.ai == AiState::Following {
        (gap >= FOLLOW_GAP).then_some(Goal::Player)
    } else if shelter && entity.ai != AiState::Attacking {
        entity.ai = AiState::SeekingShelter;
        walk_home(entity, state);
        return;
    } else if entity.ai == AiState::Attacking {
        match order.and_then(|t| tracked(state, t)) {
            Some(goal) => Some(goal),
            None => {
                entity.ai = AiState::Idle;
                None
            }
        }
    } else {
        None
    };

    let Some(goal) = goal else {
        wander(entity, state);
        return;
    };
    pursue(entity, state, goal);
    let target = goal.position(state);
    if !in_contact(entity, target) || !contact_due(state) {
        return;
    }
    let damage = entity.villager().map_or(5, |v| v.strike_damage());
    match goal {
        Goal::Player if entity.is_hostile_villager() => touch_player(state, damage),
        Goal::Entity(id, ..) if entity.ai == AiState::Attacking => {
            hit_entity(state, entity.body.x, id, damage, entity.in_party(), kills);
        }
        _ => {}
    }
}

/// Party members guard while idle, escort while following and fight their
/// target until it falls.
fn party_duty(entity: &mut EntityState, state: &GameState, gap: f32, order: Option<TargetRef>) -> Option<Goal> {
    match entity.ai {
        AiState::Idle => {
            if let Some(threat) = nearest_threat(entity, state, GUARD_RADIUS) {
                engage(entity, threat);
            }
            None
        }
        AiState::Following => {
            if let Some(threat) = nearest_threat(entity, state, ESCORT_RADIUS) {
                engage(entity, threat);
            }
            (gap >= PARTY_FOLLOW_GAP).then_some(Goal::Player)
        }
        AiState::Attacking => match order {
            Some(TargetRef::Entity(id)) => match tracked(state, TargetRef::Entity(id)) {
                Some(goal) => Some(goal),
                None => {
                    entity.ai = AiState::Following;
                    set_target(entity, Some(TargetRef::Player), None);
                    Some(Goal::Player)
                }
            },
            _ => {
                entity.ai = AiState::Following;
                None
            }
        },
        _ => None,
    }
}

fn engage(entity: &mut EntityState, threat: EntityId) {
    entity.ai = AiState::Attacking;
    set_target(entity, Some(TargetRef::Entity(threat)), None);
}

fn set_target(entity: &mut EntityState, target: Option<TargetRef>, party: Option<bool>) {
    if let Some(data) = entity.villager_mut() {
        data.target = target;
        if let Some(party) = party {
            data.in_party = party;
        }
    }
}

/// Resolves a target reference to a live goal.
fn tracked(state: &GameState, target: TargetRef) -> Option<Goal> {
    match target {
        TargetRef::Player => Some(Goal::Player),
        TargetRef::Entity(id) => state
            .entities
            .live(id)
            .map(|e| Goal::Entity(id, e.body.x, e.body.y)),
    }
}

fn nearest_threat(entity: &EntityState, state: &GameState, radius: f32) -> Option<EntityId> {
    state
        .entities
        .iter()
        .filter(|e| e.is_alive() && e.kind.is_threat())
        .map(|e| (e.id, (e.body.x - entity.body.x).abs()))
        .filter(|(_, gap)| *gap < radius)
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(id, _)| id)
}

fn walk_home(entity: &mut EntityState, state: &GameState) {
    let Some(home_x) = entity.villager().map(|v| v.home.0) else {
        return;
    };
    let dx = home_x - entity.body.x;
    if dx.abs() <= HOME_TOLERANCE {
        entity.body.vx = 0.0;
        return;
    }
    let right = dx > 0.0;
    entity.body.vx = if right { 1.0 } else { -1.0 };
    entity.facing_right = right;
    hop_if_blocked(entity, state, right, 2.0);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::tests::arena;
    use crate::config::GameConfig;
    use crate::state::{EntityKind, EntityRole, VillagerData, VillagerJob, WorldClock};

    fn villager(state: &mut GameState, x: f32) -> EntityState {
        let id = state.entities.allocate_id();
        let data = VillagerData::new("Kit".into(), "Brave".into(), VillagerJob::Farmer, (x, 456.0));
        let mut entity = EntityState::new(id, EntityKind::Villager, x, 456.0, EntityRole::Villager(data));
        entity.on_ground = true;
        entity
    }

    fn zombie(state: &mut GameState, x: f32) -> EntityId {
        let id = state.entities.allocate_id();
        state
            .entities
            .insert(EntityState::new(id, EntityKind::Zombie, x, 456.0, EntityRole::Creature));
        id
    }

    fn join(entity: &mut EntityState, ai: AiState) {
        entity.ai = ai;
        set_target(entity, Some(TargetRef::Player), Some(true));
    }

    #[test]
    fn idle_party_member_engages_nearby_threats() {
        let mut state = arena();
        let mut kit = villager(&mut state, 300.0);
        join(&mut kit, AiState::Idle);
        let threat = zombie(&mut state, 420.0);
        zombie(&mut state, 900.0);

        let mut kills = KillLog::new();
        think(&mut kit, &mut state, &mut kills);
        assert_eq!(kit.ai, AiState::Attacking);
        assert_eq!(kit.villager().and_then(|v| v.target), Some(TargetRef::Entity(threat)));
    }

    #[test]
    fn party_strikes_are_credited() {
        let mut state = arena();
        let mut kit = villager(&mut state, 300.0);
        join(&mut kit, AiState::Attacking);
        let threat = zombie(&mut state, 310.0);
        if let Some(z) = state.entities.get_mut(threat) {
            z.health = 5;
        }
        set_target(&mut kit, Some(TargetRef::Entity(threat)), None);
        state.tick = 90;

        let mut kills = KillLog::new();
        think(&mut kit, &mut state, &mut kills);
        let credited: Vec<_> = kills.into_kills().into_iter().map(|k| (k.id, k.credited)).collect();
        assert_eq!(credited, vec![(threat, true)]);
    }

    #[test]
    fn fallen_target_returns_the_member_to_following() {
        let mut state = arena();
        let mut kit = villager(&mut state, 300.0);
        join(&mut kit, AiState::Attacking);
        let threat = zombie(&mut state, 330.0);
        set_target(&mut kit, Some(TargetRef::Entity(threat)), None);
        if let Some(z) = state.entities.get_mut(threat) {
            z.dead = true;
        }
        let mut kills = KillLog::new();
        think(&mut kit, &mut state, &mut kills);
        assert_eq!(kit.ai, AiState::Following);
    }

    #[test]
    fn villagers_walk_home_at_night_and_resume_at_dawn() {
        let mut state = arena();
        state.clock = WorldClock::at(GameConfig::NIGHT_START + 100);
        let mut kit = villager(&mut state, 300.0);
        if let Some(data) = kit.villager_mut() {
            data.home = (100.0, 456.0);
        }
        let mut kills = KillLog::new();
        think(&mut kit, &mut state, &mut kills);
        assert_eq!(kit.ai, AiState::SeekingShelter);
        assert_eq!(kit.body.vx, -1.0);

        state.clock = WorldClock::at(GameConfig::DAWN);
        think(&mut kit, &mut state, &mut kills);
        assert_eq!(kit.ai, AiState::Idle);
    }

    #[test]
    fn provoked_villagers_leave_the_party_and_hit_back() {
        let mut state = arena();
        let mut kit = villager(&mut state, 390.0);
        join(&mut kit, AiState::Following);
        kit.damage_taken = GameConfig::VILLAGER_HOSTILITY_THRESHOLD + 1;
        state.tick = 30;

        let mut kills = KillLog::new();
        think(&mut kit, &mut state, &mut kills);
        assert_eq!(kit.ai, AiState::Attacking);
        assert!(!kit.in_party());
        assert_eq!(state.player.health, GameConfig::PLAYER_MAX_HEALTH - 5);
    }
}
