//! Boss programs.
//!
//! Each boss cycles through timed phases. `state_timer` counts down once per
//! tick before the program runs; phase actions key off exact timer values
//! and a phase ends unconditionally when its timer runs out.

use std::f32::consts::PI;

use crate::combat::{KillLog, hurt_player, projectile};
use crate::engine::{GameEvent, spawner};
use crate::state::{AiState, EntityKind, EntityState, GameState, ProjectileKind, ProjectileTarget};

use super::{Goal, contact_due, in_contact, pursue, touch_player};

pub fn think(entity: &mut EntityState, state: &mut GameState, _kills: &mut KillLog) {
    match entity.kind {
        EntityKind::Guardian => guardian(entity, state),
        EntityKind::Sentry => sentry(entity, state),
        EntityKind::Ursus => ursus(entity, state),
        EntityKind::MechaRex => mecha_rex(entity, state),
        EntityKind::VoidStalker => void_stalker(entity, state),
        _ => {}
    }
}

fn toward_player(entity: &EntityState, state: &GameState) -> bool {
    state.player.body.x > entity.body.x
}

/// Angle from the entity's centre to the player's centre.
fn aim(entity: &EntityState, state: &GameState) -> f32 {
    let (ex, ey) = entity.body.center();
    let (px, py) = state.player.body.center();
    (py - ey).atan2(px - ex)
}

fn fire(
    state: &mut GameState,
    kind: ProjectileKind,
    origin: (f32, f32),
    angle: f32,
    speed: f32,
    size: f32,
    damage: i32,
    life: u32,
) {
    let velocity = (angle.cos() * speed, angle.sin() * speed);
    state
        .projectiles
        .push(projectile::hostile(kind, origin, velocity, size, damage, life));
}

/// Landed after a leap that started this phase.
fn landed(entity: &EntityState, leap_at: u32) -> bool {
    entity.on_ground && entity.state_timer < leap_at
}

fn guardian(entity: &mut EntityState, state: &mut GameState) {
    let distance = entity.body.distance_to(&state.player.body);
    match entity.ai {
        AiState::Chasing => {
            let right = toward_player(entity, state);
            entity.body.vx = if right { 1.0 } else { -1.0 };
            entity.facing_right = right;
            if entity.state_timer > 0 {
                return;
            }
            if distance < 80.0 {
                entity.ai = AiState::BossSmash;
                entity.state_timer = 60;
                entity.body.vy = -8.0;
            } else if state.rng.chance(0.01) {
                entity.ai = AiState::BossLaser;
                entity.state_timer = 100;
                entity.body.vx = 0.0;
            }
        }
        AiState::BossSmash => {
            if landed(entity, 60) || entity.state_timer == 0 {
                let origin = (entity.body.x, entity.body.y + entity.body.height - 5.0);
                for vx in [5.0, -5.0] {
                    state.projectiles.push(projectile::hostile(
                        ProjectileKind::Shockwave,
                        origin,
                        (vx, 0.0),
                        10.0,
                        20,
                        20,
                    ));
                }
                entity.ai = AiState::BossRecover;
                entity.state_timer = 40;
            }
        }
        AiState::BossLaser => {
            if entity.state_timer == 30 {
                let angle = aim(entity, state);
                fire(state, ProjectileKind::Laser, entity.body.center(), angle, 8.0, 8.0, 30, 60);
            }
            if entity.state_timer == 0 {
                entity.ai = AiState::Chasing;
            }
        }
        AiState::BossRecover => {
            entity.body.vx = 0.0;
            if entity.state_timer == 0 {
                entity.ai = AiState::Chasing;
            }
        }
        _ => {
            if distance < 400.0 {
                entity.ai = AiState::Chasing;
            }
        }
    }
}

fn sentry(entity: &mut EntityState, state: &mut GameState) {
    let gap = (state.player.body.x - entity.body.x).abs();
    entity.facing_right = toward_player(entity, state);
    match entity.ai {
        AiState::BossLaser => {
            if entity.state_timer == 0 {
                entity.state_timer = 100;
            }
            if entity.state_timer % 10 == 0 {
                let angle = aim(entity, state) + state.rng.jitter(0.1);
                let (cx, _) = entity.body.center();
                fire(state, ProjectileKind::Bullet, (cx, entity.body.y), angle, 6.0, 4.0, 10, 100);
            }
            if state.rng.chance(0.02) {
                entity.ai = AiState::BossMissile;
                entity.state_timer = 60;
            }
        }
        AiState::BossMissile => {
            entity.body.vx = 0.0;
            if entity.state_timer == 10 {
                let (cx, _) = entity.body.center();
                let missile = projectile::hostile(
                    ProjectileKind::Missile,
                    (cx, entity.body.y - 10.0),
                    (0.0, -5.0),
                    8.0,
                    40,
                    200,
                )
                .homing(ProjectileTarget::Player);
                state.projectiles.push(missile);
            }
            if entity.state_timer == 0 {
                entity.ai = AiState::BossLaser;
            }
        }
        _ => {
            if gap < 500.0 {
                entity.ai = AiState::BossLaser;
            }
        }
    }
}

const URSUS_PHASES: [AiState; 5] = [
    AiState::BossSmash,
    AiState::BossMissile,
    AiState::BossCharge,
    AiState::BossLaser,
    AiState::BossSummon,
];

fn ursus(entity: &mut EntityState, state: &mut GameState) {
    match entity.ai {
        AiState::BossSmash => {
            if entity.state_timer == 60 {
                entity.body.vy = -10.0;
            }
            if landed(entity, 60) {
                let origin = (entity.body.x, entity.body.y + entity.body.height);
                for step in [-2.0, -1.0, 1.0, 2.0] {
                    state.projectiles.push(projectile::hostile(
                        ProjectileKind::Shockwave,
                        origin,
                        (step * 4.0, 0.0),
                        16.0,
                        30,
                        30,
                    ));
                }
                entity.ai = AiState::Idle;
            } else if entity.state_timer == 0 {
                entity.ai = AiState::Idle;
            }
        }
        AiState::BossMissile => {
            if entity.state_timer % 20 == 0 && entity.state_timer > 20 {
                let (cx, _) = entity.body.center();
                let vx = state.rng.jitter(2.0);
                let missile = projectile::hostile(
                    ProjectileKind::Missile,
                    (cx, entity.body.y),
                    (vx, -8.0),
                    8.0,
                    25,
                    150,
                )
                .homing(ProjectileTarget::Player);
                state.projectiles.push(missile);
            }
            if entity.state_timer == 0 {
                entity.ai = AiState::Idle;
            }
        }
        AiState::BossCharge => {
            if entity.state_timer == 100 {
                entity.body.vx = if toward_player(entity, state) { 8.0 } else { -8.0 };
            } else if entity.state_timer < 100 {
                entity.body.vx *= 0.98;
            }
            if entity.body.overlaps(&state.player.body) && hurt_player(state, 20) {
                state.player.body.vx = entity.body.vx * 2.0;
            }
            if entity.state_timer == 0 {
                entity.ai = AiState::Idle;
            }
        }
        AiState::BossLaser => {
            entity.body.vx = 0.0;
            if entity.state_timer == 60 {
                let (cx, _) = entity.body.center();
                for a in 0..5 {
                    let angle = -PI / 4.0 - a as f32 * PI / 8.0;
                    fire(state, ProjectileKind::Laser, (cx, entity.body.y + 10.0), angle, 6.0, 6.0, 35, 60);
                }
            }
            if entity.state_timer == 0 {
                entity.ai = AiState::Idle;
            }
        }
        AiState::BossSummon => {
            entity.body.vx = 0.0;
            if entity.state_timer == 60 {
                summon_drones(entity, state);
            }
            if entity.state_timer == 0 {
                entity.ai = AiState::Idle;
            }
        }
        _ => {
            if state.rng.chance(0.05) {
                let roll = state.rng.next_f32();
                let index = ((roll * URSUS_PHASES.len() as f32) as usize).min(URSUS_PHASES.len() - 1);
                entity.ai = URSUS_PHASES[index];
                entity.state_timer = 120;
            } else {
                let dx = state.player.body.x - entity.body.x;
                if dx.abs() > 50.0 {
                    entity.body.vx = if dx > 0.0 { 1.0 } else { -1.0 };
                }
            }
        }
    }
}

/// Two drones flank the boss; the live minion count never exceeds the cap.
fn summon_drones(entity: &mut EntityState, state: &mut GameState) {
    let (x, y) = (entity.body.x, entity.body.y);
    let Some(minions) = entity.boss_mut().map(|boss| &mut boss.minions) else {
        return;
    };
    minions.retain(|id| state.entities.live(*id).is_some());
    for dx in [-30.0, 30.0] {
        if minions.is_full() {
            break;
        }
        let id = spawner::spawn_creature(state, EntityKind::Drone, x + dx, y - 30.0);
        minions.push(id);
    }
    state.events.push(GameEvent::EntitiesChanged);
}

fn mecha_rex(entity: &mut EntityState, state: &mut GameState) {
    match entity.ai {
        AiState::BossCharge => {
            entity.body.vx = if entity.facing_right { 6.0 } else { -6.0 };
            if entity.body.overlaps(&state.player.body) && hurt_player(state, 40) {
                state.player.body.vx = if entity.facing_right { 8.0 } else { -8.0 };
            }
            if entity.state_timer == 0 {
                entity.ai = AiState::BossRecover;
                entity.state_timer = 40;
            }
        }
        AiState::BossRecover => {
            entity.body.vx = 0.0;
            if entity.state_timer == 0 {
                entity.ai = AiState::Chasing;
            }
        }
        _ => {
            entity.ai = AiState::Chasing;
            pursue(entity, state, Goal::Player);
            let player = (state.player.body.x, state.player.body.y);
            if in_contact(entity, player) && contact_due(state) {
                touch_player(state, entity.kind.contact_damage());
            }
            let distance = entity.body.distance_to(&state.player.body);
            if distance < 200.0 && entity.state_timer == 0 && state.rng.chance(0.02) {
                entity.ai = AiState::BossCharge;
                entity.state_timer = 60;
                entity.facing_right = toward_player(entity, state);
            }
        }
    }
}

fn void_stalker(entity: &mut EntityState, state: &mut GameState) {
    match entity.ai {
        AiState::BossLaser => {
            entity.body.vx = 0.0;
            if entity.state_timer > 0 && entity.state_timer % 30 == 0 {
                let angle = aim(entity, state);
                for spread in [-0.15, 0.0, 0.15] {
                    fire(state, ProjectileKind::Laser, entity.body.center(), angle + spread, 7.0, 6.0, 15, 80);
                }
            }
            if entity.state_timer == 0 {
                entity.ai = AiState::Chasing;
                entity.state_timer = 60;
            }
        }
        _ => {
            entity.ai = AiState::Chasing;
            pursue(entity, state, Goal::Player);
            let player = (state.player.body.x, state.player.body.y);
            if in_contact(entity, player) && contact_due(state) {
                touch_player(state, entity.kind.contact_damage());
            }
            if entity.state_timer == 0 && state.rng.chance(0.015) {
                entity.ai = AiState::BossLaser;
                entity.state_timer = 90;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::tests::arena;
    use crate::config::GameConfig;
    use crate::state::{BossData, EntityId, EntityRole};

    fn boss(kind: EntityKind, x: f32, y: f32) -> EntityState {
        EntityState::new(EntityId(100), kind, x, y, EntityRole::Boss(BossData::default()))
    }

    fn run(entity: &mut EntityState, state: &mut GameState) {
        entity.state_timer = entity.state_timer.saturating_sub(1);
        let mut kills = KillLog::new();
        think(entity, state, &mut kills);
    }

    #[test]
    fn guardian_wakes_chases_and_smashes() {
        let mut state = arena();
        let mut guardian = boss(EntityKind::Guardian, 340.0, 448.0);
        run(&mut guardian, &mut state);
        assert_eq!(guardian.ai, AiState::Chasing);
        run(&mut guardian, &mut state);
        assert_eq!(guardian.ai, AiState::BossSmash);
        assert_eq!(guardian.body.vy, -8.0);

        // Airborne, then back on the floor.
        guardian.on_ground = false;
        run(&mut guardian, &mut state);
        assert!(state.projectiles.is_empty());
        guardian.on_ground = true;
        run(&mut guardian, &mut state);
        assert_eq!(guardian.ai, AiState::BossRecover);
        let waves: Vec<_> = state.projectiles.iter().map(|p| (p.kind, p.body.vx)).collect();
        assert_eq!(
            waves,
            vec![(ProjectileKind::Shockwave, 5.0), (ProjectileKind::Shockwave, -5.0)]
        );
    }

    #[test]
    fn guardian_laser_fires_once_mid_phase() {
        let mut state = arena();
        let mut guardian = boss(EntityKind::Guardian, 100.0, 448.0);
        guardian.ai = AiState::BossLaser;
        guardian.state_timer = 100;
        for _ in 0..100 {
            run(&mut guardian, &mut state);
        }
        assert_eq!(state.projectiles.len(), 1);
        assert_eq!(state.projectiles[0].kind, ProjectileKind::Laser);
        assert_eq!(guardian.ai, AiState::Chasing);
    }

    #[test]
    fn sentry_missile_homes_on_the_player() {
        let mut state = arena();
        let mut sentry = boss(EntityKind::Sentry, 300.0, 200.0);
        sentry.ai = AiState::BossMissile;
        sentry.state_timer = 60;
        for _ in 0..60 {
            run(&mut sentry, &mut state);
        }
        let missiles: Vec<_> = state
            .projectiles
            .iter()
            .filter(|p| p.kind == ProjectileKind::Missile)
            .collect();
        assert_eq!(missiles.len(), 1);
        assert_eq!(missiles[0].target, Some(ProjectileTarget::Player));
        assert_eq!(sentry.ai, AiState::BossLaser);
    }

    #[test]
    fn ursus_laser_fans_five_beams() {
        let mut state = arena();
        let mut ursus = boss(EntityKind::Ursus, 200.0, 432.0);
        ursus.ai = AiState::BossLaser;
        ursus.state_timer = 61;
        run(&mut ursus, &mut state);
        assert_eq!(state.projectiles.len(), 5);
        assert!(state.projectiles.iter().all(|p| p.body.vy < 0.0 && p.damage == 35));
    }

    #[test]
    fn ursus_summons_respect_the_minion_cap() {
        let mut state = arena();
        let mut ursus = boss(EntityKind::Ursus, 200.0, 432.0);
        for _ in 0..4 {
            ursus.ai = AiState::BossSummon;
            ursus.state_timer = 61;
            run(&mut ursus, &mut state);
        }
        let drones = state.entities.iter().filter(|e| e.kind == EntityKind::Drone).count();
        assert_eq!(drones, GameConfig::MAX_MINIONS);
    }

    #[test]
    fn ursus_charge_throws_the_player() {
        let mut state = arena();
        let mut ursus = boss(EntityKind::Ursus, 390.0, 432.0);
        ursus.ai = AiState::BossCharge;
        ursus.state_timer = 101;
        run(&mut ursus, &mut state);
        assert_eq!(state.player.health, GameConfig::PLAYER_MAX_HEALTH - 20);
        assert_eq!(state.player.body.vx, 16.0);
    }

    #[test]
    fn mecha_rex_charge_ends_in_recovery() {
        let mut state = arena();
        let mut rex = boss(EntityKind::MechaRex, 100.0, 432.0);
        rex.ai = AiState::BossCharge;
        rex.state_timer = 3;
        rex.facing_right = true;
        for _ in 0..3 {
            run(&mut rex, &mut state);
        }
        assert_eq!(rex.ai, AiState::BossRecover);
        assert_eq!(rex.state_timer, 40);
    }

    #[test]
    fn void_stalker_volleys_three_lasers() {
        let mut state = arena();
        let mut stalker = boss(EntityKind::VoidStalker, 100.0, 448.0);
        stalker.ai = AiState::BossLaser;
        stalker.state_timer = 90;
        for _ in 0..90 {
            run(&mut stalker, &mut state);
        }
        // Volleys at 60 and 30.
        assert_eq!(state.projectiles.len(), 6);
        assert_eq!(stalker.ai, AiState::Chasing);
    }
}
