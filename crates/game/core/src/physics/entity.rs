//! Entity integration per movement class.

use crate::config::GameConfig;
use crate::state::{EntityState, MovementClass};
use crate::world::TileGrid;

use super::collision::{Contact, Response, edges, face, sweep_x, sweep_y};

/// Applies drag and gravity for the entity's movement class, then moves it
/// through the grid.
pub fn step(entity: &mut EntityState, grid: &TileGrid) {
    let body = &mut entity.body;
    match entity.kind.movement() {
        MovementClass::Walker => {
            body.vx *= GameConfig::FRICTION;
            body.vy = (body.vy + GameConfig::GRAVITY).min(GameConfig::TERMINAL_VELOCITY);
        }
        MovementClass::Flyer => {
            body.vx *= GameConfig::FLYER_DRAG;
            body.vy *= GameConfig::FLYER_DRAG;
        }
        MovementClass::Heavy => {
            body.vx *= GameConfig::HEAVY_DRAG;
            body.vy = (body.vy + GameConfig::GRAVITY).min(GameConfig::TERMINAL_VELOCITY);
        }
    }
    integrate(entity, grid);
}

/// Moves an entity by its current velocity without touching it.
pub fn integrate(entity: &mut EntityState, grid: &TileGrid) {
    let body = &mut entity.body;
    let vertical = match entity.kind.movement() {
        MovementClass::Flyer => {
            sweep_x(grid, body, &face(body.height, 4.0), Response::Reflect);
            let contact = sweep_y(grid, body, &edges(body.width, 4.0), Response::Reflect);
            let ceiling = GameConfig::world_pixel_height();
            if body.y < 0.0 {
                body.y = 0.0;
                body.vy = body.vy.abs();
            } else if body.y > ceiling {
                body.y = ceiling;
                body.vy = -body.vy.abs();
            }
            contact
        }
        MovementClass::Walker | MovementClass::Heavy => {
            sweep_x(grid, body, &face(body.height, 2.0), Response::Stop);
            sweep_y(grid, body, &face(body.width, 2.0), Response::Stop)
        }
    };
    entity.on_ground = vertical == Some(Contact::Positive);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{EntityId, EntityKind, EntityRole};
    use crate::world::TileKind;

    fn floored(row: i32) -> TileGrid {
        let mut grid = TileGrid::new(30, 30);
        for x in 0..30 {
            grid.set(x, row, TileKind::Stone);
        }
        grid
    }

    fn spawn(kind: EntityKind, x: f32, y: f32) -> EntityState {
        EntityState::new(EntityId(1), kind, x, y, EntityRole::Creature)
    }

    #[test]
    fn walker_lands_and_reports_ground() {
        let grid = floored(20);
        let mut zombie = spawn(EntityKind::Zombie, 100.0, 200.0);
        for _ in 0..200 {
            step(&mut zombie, &grid);
        }
        assert!(zombie.on_ground);
        assert_eq!(zombie.body.y, 320.0 - zombie.body.height);
        assert_eq!(zombie.body.vy, 0.0);
    }

    #[test]
    fn walker_fall_speed_is_capped() {
        let grid = TileGrid::new(30, 300);
        let mut wolf = spawn(EntityKind::Wolf, 100.0, 0.0);
        for _ in 0..100 {
            step(&mut wolf, &grid);
        }
        assert_eq!(wolf.body.vy, GameConfig::TERMINAL_VELOCITY);
    }

    #[test]
    fn flyer_hangs_in_the_air_and_bounces() {
        let grid = floored(20);
        let mut bat = spawn(EntityKind::Bat, 100.0, 305.0);
        step(&mut bat, &grid);
        assert_eq!(bat.body.y, 305.0);
        bat.body.vy = 8.0;
        step(&mut bat, &grid);
        assert_eq!(bat.body.y, 320.0 - bat.body.height);
        assert!(bat.body.vy < 0.0);
    }

    #[test]
    fn flyer_is_kept_inside_the_world() {
        let grid = TileGrid::new(30, 30);
        let mut drone = spawn(EntityKind::Drone, 100.0, 2.0);
        drone.body.vy = -6.0;
        integrate(&mut drone, &grid);
        assert_eq!(drone.body.y, 0.0);
        assert!(drone.body.vy > 0.0);
    }

    #[test]
    fn heavy_bosses_keep_gravity_under_drag() {
        let grid = floored(20);
        let mut guardian = spawn(EntityKind::Guardian, 100.0, 100.0);
        guardian.body.vx = 10.0;
        step(&mut guardian, &grid);
        assert!((guardian.body.vx - 9.0).abs() < 1e-5);
        assert!(guardian.body.vy > 0.0);
    }
}
