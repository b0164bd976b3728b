//! Projectile flight, impact, explosions and weapon fire.

use crate::config::GameConfig;
use crate::engine::{GameEvent, interaction};
use crate::env::{ItemDefinition, ShootProfile};
use crate::state::{Body, EntityId, GameState, Projectile, ProjectileKind, ProjectileTarget};
use crate::world::{TileKind, tile_coord};

use super::damage::{KillLog, hurt_player, strike};

/// Centre-to-centre reach of an explosion's splash damage, in pixels.
const SPLASH_RADIUS: f32 = 56.0;

/// Builds an enemy projectile with a square hitbox.
pub fn hostile(kind: ProjectileKind, (x, y): (f32, f32), (vx, vy): (f32, f32), size: f32, damage: i32, life: u32) -> Projectile {
    Projectile::new(kind, Body::new(x, y, size, size).with_velocity(vx, vy), damage, life, true)
}

/// What a projectile struck this tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Impact {
    Player,
    Entity(EntityId),
    Terrain,
}

/// Advances every projectile by one tick.
pub fn step(state: &mut GameState, kills: &mut KillLog) {
    let flying = std::mem::take(&mut state.projectiles);
    let mut survivors = Vec::with_capacity(flying.len());

    for mut projectile in flying {
        if projectile.kind == ProjectileKind::Rail {
            projectile.life = projectile.life.saturating_sub(1);
            if projectile.life > 0 {
                survivors.push(projectile);
            }
            continue;
        }

        projectile.body.x += projectile.body.vx;
        projectile.body.y += projectile.body.vy;
        projectile.life = projectile.life.saturating_sub(1);
        steer(state, &mut projectile);

        let impact = collide(state, &projectile, kills).or_else(|| {
            state
                .world
                .is_solid_at(projectile.body.x, projectile.body.y)
                .then_some(Impact::Terrain)
        });

        if impact.is_some() || projectile.life == 0 {
            if projectile.kind.explodes() {
                let direct = match impact {
                    Some(Impact::Entity(id)) => Some(id),
                    _ => None,
                };
                explode(state, &projectile, direct, kills);
            }
        } else {
            survivors.push(projectile);
        }
    }

    survivors.append(&mut state.projectiles);
    state.projectiles = survivors;
}

/// Bends a homing missile toward its target, capped at the missile speed.
fn steer(state: &GameState, projectile: &mut Projectile) {
    if projectile.kind != ProjectileKind::Missile {
        return;
    }
    let goal = match projectile.target {
        Some(ProjectileTarget::Player) => Some(state.player.body.center()),
        Some(ProjectileTarget::Entity(id)) => state.entities.live(id).map(|e| e.body.center()),
        None => None,
    };
    let Some((tx, ty)) = goal else {
        return;
    };
    let body = &mut projectile.body;
    let angle = (ty - body.y).atan2(tx - body.x);
    body.vx += angle.cos() * GameConfig::MISSILE_STEER;
    body.vy += angle.sin() * GameConfig::MISSILE_STEER;
    body.cap_speed(GameConfig::MISSILE_MAX_SPEED);
}

/// Resolves actor contact. Enemy fire hits the player first, then the first
/// overlapping party member; friendly fire hits the first live outsider.
fn collide(state: &mut GameState, projectile: &Projectile, kills: &mut KillLog) -> Option<Impact> {
    if projectile.hostile {
        if projectile.body.overlaps(&state.player.body) {
            hurt_player(state, projectile.damage);
            return Some(Impact::Player);
        }
        let member = state
            .entities
            .iter_mut()
            .find(|e| e.is_alive() && e.in_party() && e.body.overlaps(&projectile.body))?;
        strike(member, projectile.damage, false, kills);
        return Some(Impact::Entity(member.id));
    }

    let target = state
        .entities
        .iter_mut()
        .find(|e| e.is_alive() && !e.in_party() && e.body.overlaps(&projectile.body))?;
    strike(target, projectile.damage, true, kills);
    target.body.vx += projectile.body.vx * 0.2;
    state.events.push(GameEvent::EntitiesChanged);
    Some(Impact::Entity(target.id))
}

/// Clears a disc of tiles around the projectile and applies splash damage to
/// everything in reach except the entity that took the direct hit.
pub fn explode(state: &mut GameState, projectile: &Projectile, direct: Option<EntityId>, kills: &mut KillLog) {
    let cx = tile_coord(projectile.body.x);
    let cy = tile_coord(projectile.body.y);
    let radius = GameConfig::EXPLOSION_RADIUS;

    for y in cy - radius..=cy + radius {
        for x in cx - radius..=cx + radius {
            let (dx, dy) = (x - cx, y - cy);
            if dx * dx + dy * dy > radius * radius {
                continue;
            }
            let tile = state.world.get(x, y);
            if matches!(tile, TileKind::Air | TileKind::Bedrock) {
                continue;
            }
            if state.world.set(x, y, TileKind::Air) && !projectile.hostile {
                interaction::on_block_broken(state, x, y, tile);
            }
        }
    }

    let splash = (projectile.damage / 2).max(1);
    let (ex, ey) = projectile.body.center();
    let in_reach = |body: &Body| {
        let (bx, by) = body.center();
        (bx - ex).hypot(by - ey) <= SPLASH_RADIUS
    };

    if projectile.hostile {
        if in_reach(&state.player.body) {
            hurt_player(state, splash);
        }
        for member in state.entities.iter_mut() {
            if member.is_alive() && member.in_party() && Some(member.id) != direct && in_reach(&member.body) {
                strike(member, splash, false, kills);
            }
        }
    } else {
        for entity in state.entities.iter_mut() {
            if entity.is_alive() && !entity.in_party() && Some(entity.id) != direct && in_reach(&entity.body) {
                strike(entity, splash, true, kills);
            }
        }
    }
    state.events.push(GameEvent::EntitiesChanged);
}

/// Fires the held weapon from the player's muzzle toward the pointer.
pub fn fire(state: &mut GameState, item: &ItemDefinition, shoot: &ShootProfile, kills: &mut KillLog) {
    let (mx, my) = state.player.muzzle();
    let (px, py) = state.input.pointer;
    let aim = (py - my).atan2(px - mx);

    if shoot.projectile == ProjectileKind::Rail {
        let damage = item.stats.damage.unwrap_or(50);
        rail(state, (mx, my), aim, damage, kills);
        let trace = Body::new(mx, my, 4.0, 4.0).with_velocity(aim.cos() * shoot.speed, aim.sin() * shoot.speed);
        state
            .projectiles
            .push(Projectile::new(ProjectileKind::Rail, trace, damage, 5, false));
    } else {
        let damage = item.stats.damage.unwrap_or(10);
        let size = if shoot.projectile == ProjectileKind::Missile { 6.0 } else { 4.0 };
        let lock = (shoot.projectile == ProjectileKind::Missile)
            .then(|| lock_target(state, (px, py)))
            .flatten();
        for _ in 0..shoot.count.max(1) {
            let angle = aim + state.rng.jitter(shoot.spread / 2.0);
            let (cos, sin) = (angle.cos(), angle.sin());
            let body = Body::new(mx + cos * 20.0, my + sin * 20.0, size, size)
                .with_velocity(cos * shoot.speed, sin * shoot.speed);
            let mut projectile = Projectile::new(shoot.projectile, body, damage, 100, false);
            if let Some(id) = lock {
                projectile = projectile.homing(ProjectileTarget::Entity(id));
            }
            state.projectiles.push(projectile);
        }
    }
    state.action_cooldown = item.attack_cooldown();
}

/// Nearest live threat within lock range of the pointer.
fn lock_target(state: &GameState, (px, py): (f32, f32)) -> Option<EntityId> {
    state
        .entities
        .iter()
        .filter(|e| e.is_alive() && !e.in_party() && (e.kind.is_threat() || e.is_hostile_villager()))
        .map(|e| {
            let (cx, cy) = e.body.center();
            (e.id, (cx - px).hypot(cy - py))
        })
        .filter(|&(_, d)| d <= GameConfig::MISSILE_LOCK_RADIUS)
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(id, _)| id)
}

/// Instant hit-scan line. Every outsider the line passes through is hit
/// once; the line stops at the first solid tile.
fn rail(state: &mut GameState, (ox, oy): (f32, f32), angle: f32, damage: i32, kills: &mut KillLog) {
    let (cos, sin) = (angle.cos(), angle.sin());
    let mut struck: Vec<EntityId> = Vec::new();
    let mut travelled = 0.0;
    while travelled <= GameConfig::RAIL_RANGE {
        let (x, y) = (ox + cos * travelled, oy + sin * travelled);
        if state.world.is_solid_at(x, y) {
            break;
        }
        for entity in state.entities.iter_mut() {
            if entity.is_alive()
                && !entity.in_party()
                && !struck.contains(&entity.id)
                && entity.body.rect().contains(x, y)
            {
                struck.push(entity.id);
                strike(entity, damage, true, kills);
            }
        }
        travelled += GameConfig::RAIL_STEP;
    }
    if !struck.is_empty() {
        state.events.push(GameEvent::EntitiesChanged);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::{ItemKind, ItemStats};
    use crate::state::{EntityKind, EntityRole, EntityState};
    use crate::world::TileGrid;

    fn state() -> GameState {
        GameState::new(9, TileGrid::new(60, 40), (0.0, 0.0))
    }

    fn add(state: &mut GameState, kind: EntityKind, x: f32, y: f32) -> EntityId {
        let id = state.entities.allocate_id();
        state.entities.insert(EntityState::new(id, kind, x, y, EntityRole::Creature));
        id
    }

    fn friendly_missile(x: f32, y: f32, damage: i32, life: u32) -> Projectile {
        Projectile::new(ProjectileKind::Missile, Body::new(x, y, 6.0, 6.0), damage, life, false)
    }

    #[test]
    fn expired_missile_clears_a_disc_but_keeps_bedrock() {
        let mut state = state();
        for y in 0..40 {
            for x in 0..60 {
                state.world.set(x, y, TileKind::Stone);
            }
        }
        state.world.set(20, 12, TileKind::Bedrock);
        let mut kills = KillLog::new();
        explode(&mut state, &friendly_missile(20.0 * 16.0 + 8.0, 10.0 * 16.0 + 8.0, 40, 0), None, &mut kills);

        assert_eq!(state.world.get(20, 10), TileKind::Air);
        assert_eq!(state.world.get(23, 10), TileKind::Air);
        assert_eq!(state.world.get(22, 12), TileKind::Air);
        assert_eq!(state.world.get(23, 12), TileKind::Stone);
        assert_eq!(state.world.get(24, 10), TileKind::Stone);
        assert_eq!(state.world.get(20, 12), TileKind::Bedrock);
    }

    #[test]
    fn splash_hits_each_entity_once_and_skips_the_direct_target() {
        let mut state = state();
        let direct = add(&mut state, EntityKind::Boar, 100.0, 100.0);
        let near = add(&mut state, EntityKind::Boar, 120.0, 100.0);
        let far = add(&mut state, EntityKind::Boar, 400.0, 100.0);
        let mut kills = KillLog::new();
        explode(&mut state, &friendly_missile(105.0, 110.0, 40, 10), Some(direct), &mut kills);

        let health = |id| state.entities.get(id).map(|e| e.health);
        assert_eq!(health(direct), Some(50));
        assert_eq!(health(near), Some(30));
        assert_eq!(health(far), Some(50));
    }

    #[test]
    fn missile_on_impact_damages_and_explodes() {
        let mut state = state();
        let boar = add(&mut state, EntityKind::Boar, 200.0, 100.0);
        let mut missile = friendly_missile(190.0, 105.0, 40, 100);
        missile.body.vx = 6.0;
        state.projectiles.push(missile);
        let mut kills = KillLog::new();
        step(&mut state, &mut kills);
        assert!(state.projectiles.is_empty());
        assert_eq!(state.entities.get(boar).map(|e| e.health), Some(10));
    }

    #[test]
    fn projectile_stops_in_solid_terrain() {
        let mut state = state();
        state.world.set(10, 5, TileKind::Stone);
        let bullet = Projectile::new(
            ProjectileKind::Bullet,
            Body::new(155.0, 85.0, 4.0, 4.0).with_velocity(8.0, 0.0),
            10,
            100,
            false,
        );
        state.projectiles.push(bullet);
        let mut kills = KillLog::new();
        step(&mut state, &mut kills);
        assert!(state.projectiles.is_empty());
        assert_eq!(state.world.get(10, 5), TileKind::Stone);
    }

    #[test]
    fn homing_missile_turns_toward_the_player() {
        let mut state = state();
        state.player.body.x = 300.0;
        state.player.body.y = 100.0;
        let missile = hostile(ProjectileKind::Missile, (100.0, 100.0), (0.0, -5.0), 8.0, 25, 150)
            .homing(ProjectileTarget::Player);
        state.projectiles.push(missile);
        let mut kills = KillLog::new();
        for _ in 0..10 {
            step(&mut state, &mut kills);
        }
        let Some(missile) = state.projectiles.first() else {
            panic!("missile should still be flying");
        };
        assert!(missile.body.vx > 0.0);
        assert!(missile.body.speed() <= GameConfig::MISSILE_MAX_SPEED + 1e-4);
    }

    #[test]
    fn enemy_fire_hurts_the_player() {
        let mut state = state();
        state.player.body.x = 100.0;
        state.player.body.y = 100.0;
        state
            .projectiles
            .push(hostile(ProjectileKind::Laser, (95.0, 110.0), (4.0, 0.0), 6.0, 30, 60));
        let mut kills = KillLog::new();
        step(&mut state, &mut kills);
        assert_eq!(state.player.health, 70);
        assert!(state.projectiles.is_empty());
    }

    #[test]
    fn rail_pierces_every_entity_on_the_line() {
        let mut state = state();
        state.player.body.x = 0.0;
        state.player.body.y = 100.0;
        let (_, my) = state.player.muzzle();
        state.input.pointer = (600.0, my);
        let a = add(&mut state, EntityKind::Boar, 100.0, my - 10.0);
        let b = add(&mut state, EntityKind::Boar, 250.0, my - 10.0);
        let item = ItemDefinition::new("railgun", "Railgun", ItemKind::Weapon).with_stats(ItemStats {
            damage: Some(20),
            ..ItemStats::default()
        });
        let shoot = ShootProfile::single(ProjectileKind::Rail, 20.0);
        let mut kills = KillLog::new();
        fire(&mut state, &item, &shoot, &mut kills);
        assert_eq!(state.entities.get(a).map(|e| e.health), Some(30));
        assert_eq!(state.entities.get(b).map(|e| e.health), Some(30));
        assert_eq!(state.projectiles.len(), 1);
        assert_eq!(state.action_cooldown, 20);
    }

    #[test]
    fn shotgun_fires_every_pellet() {
        let mut state = state();
        state.input.pointer = (500.0, 0.0);
        let item = ItemDefinition::new("shotgun", "Shotgun", ItemKind::Weapon).with_stats(ItemStats {
            damage: Some(8),
            speed: Some(40),
            ..ItemStats::default()
        });
        let shoot = ShootProfile::single(ProjectileKind::Bullet, 10.0).scatter(5, 0.5);
        let mut kills = KillLog::new();
        fire(&mut state, &item, &shoot, &mut kills);
        assert_eq!(state.projectiles.len(), 5);
        assert!(state.projectiles.iter().all(|p| p.damage == 8 && p.life == 100));
        assert_eq!(state.action_cooldown, 40);
    }
}
