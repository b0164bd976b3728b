//! Player movement: walking, climbing, wall slides, jumps and no-clip flight.

use crate::config::GameConfig;
use crate::state::{HeldKeys, InputState, MovementFlags, PlayerState};
use crate::world::TileGrid;

use super::collision::{Contact, Response, edges, face, sweep_x, sweep_y};

/// Things that happened during one player step that other systems react to.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PlayerStep {
    /// Landing speed of a fall fast enough to hurt.
    pub hard_landing: Option<f32>,
    /// A ground pound just hit the floor.
    pub pounded: bool,
    /// The player dropped below the world.
    pub fell_out: bool,
}

/// Advances the player by one tick.
pub fn step(player: &mut PlayerState, input: &InputState, grid: &TileGrid) -> PlayerStep {
    if player.creative {
        fly(player, input, grid);
        return PlayerStep::default();
    }
    walk(player, input, grid)
}

fn walk(player: &mut PlayerState, input: &InputState, grid: &TileGrid) -> PlayerStep {
    let mut report = PlayerStep::default();
    let was_grounded = player.is_grounded();
    let crouching = input.held(HeldKeys::DOWN) && was_grounded;
    player.flags.set(MovementFlags::CROUCHING, crouching);

    let rolling = player.is_rolling();
    let speed_bonus = player.speed_bonus();
    let body = &mut player.body;

    if !rolling && player.movement_cooldown == 0 {
        let mut accel = GameConfig::MOVE_SPEED;
        if crouching {
            accel *= 0.4;
        }
        if input.held(HeldKeys::LEFT) {
            body.vx -= accel + speed_bonus * 0.1;
        }
        if input.held(HeldKeys::RIGHT) {
            body.vx += accel + speed_bonus * 0.1;
        }
        let max = GameConfig::MAX_SPEED + speed_bonus * 0.5;
        body.vx = body.vx.clamp(-max, max);
    }
    if !rolling {
        body.vx *= GameConfig::FRICTION;
    }

    let (cx, cy) = body.center();
    let climbing = grid.at_pixel(cx, cy).is_climbable();
    player.flags.set(MovementFlags::CLIMBING, climbing);
    if climbing {
        body.vy = 0.0;
        if input.held(HeldKeys::UP) {
            body.vy = -GameConfig::CLIMB_SPEED;
        }
        if input.held(HeldKeys::DOWN) {
            body.vy = GameConfig::CLIMB_SPEED;
        }
    } else {
        body.vy += GameConfig::GRAVITY;
    }
    body.vy = body.vy.min(GameConfig::TERMINAL_VELOCITY);
    if player.wall_slide != 0 && body.vy > 0.0 && !climbing {
        body.vy *= GameConfig::WALL_SLIDE_DAMPING;
    }

    let side_probes = face(body.height, 4.0);
    player.wall_slide = 0;
    if let Some(contact) = sweep_x(grid, body, &side_probes, Response::Stop) {
        if !was_grounded {
            player.wall_slide = contact.sign();
        }
    }

    let impact = body.vy;
    let foot_probes = edges(body.width, 4.0);
    let mut grounded = climbing;
    if let Some(Contact::Positive) = sweep_y(grid, body, &foot_probes, Response::Stop) {
        let pounding = player.flags.contains(MovementFlags::GROUND_POUNDING);
        if impact > GameConfig::FALL_DAMAGE_THRESHOLD && !pounding && !climbing {
            report.hard_landing = Some(impact);
        }
        if pounding {
            report.pounded = true;
            player.flags.remove(MovementFlags::GROUND_POUNDING);
        }
        grounded = true;
    }
    player.flags.set(MovementFlags::GROUNDED, grounded);

    let body = &mut player.body;
    if grounded && player.jump_buffer > 0 {
        body.vy = if crouching {
            GameConfig::JUMP_FORCE * 1.3
        } else {
            GameConfig::JUMP_FORCE
        };
        player.jump_buffer = 0;
    }
    if input.held(HeldKeys::JUMP) && !grounded && player.wall_slide != 0 {
        body.vy = GameConfig::JUMP_FORCE * 0.9;
        body.vx = -f32::from(player.wall_slide) * 5.0;
        player.wall_slide = 0;
    }

    face_velocity(player);
    if player.body.y > GameConfig::world_pixel_height() + 200.0 {
        report.fell_out = true;
    }
    report
}

/// Creative flight: four-way thrust, collision from a single centre probe,
/// never grounded.
fn fly(player: &mut PlayerState, input: &InputState, grid: &TileGrid) {
    player
        .flags
        .remove(MovementFlags::CROUCHING | MovementFlags::GROUNDED | MovementFlags::GROUND_POUNDING);
    let thrust = GameConfig::MOVE_SPEED * 1.5;
    let body = &mut player.body;
    if input.held(HeldKeys::LEFT) {
        body.vx -= thrust;
    }
    if input.held(HeldKeys::RIGHT) {
        body.vx += thrust;
    }
    if input.held(HeldKeys::UP) {
        body.vy -= thrust;
    }
    if input.held(HeldKeys::DOWN) {
        body.vy += thrust;
    }
    body.vx *= GameConfig::FRICTION;
    body.vy *= GameConfig::FRICTION;
    let max = GameConfig::MAX_SPEED * 2.0;
    body.vx = body.vx.clamp(-max, max);
    body.vy = body.vy.clamp(-max, max);

    let mid_y = [body.height / 2.0];
    let mid_x = [body.width / 2.0];
    let x_before = body.x;
    if sweep_x(grid, body, &mid_y, Response::Stop).is_some() {
        body.x = x_before;
    }
    let y_before = body.y;
    if sweep_y(grid, body, &mid_x, Response::Stop).is_some() {
        body.y = y_before;
    }
    face_velocity(player);
}

fn face_velocity(player: &mut PlayerState) {
    if player.body.vx > 0.0 {
        player.facing_right = true;
    } else if player.body.vx < 0.0 {
        player.facing_right = false;
    }
}

/// Starts a dodge roll if movement is off cooldown. Returns whether it started.
pub fn roll(player: &mut PlayerState, direction: f32) -> bool {
    if player.movement_cooldown > 0 {
        return false;
    }
    player.flags.insert(MovementFlags::ROLLING);
    player.body.vx = direction.signum() * GameConfig::ROLL_SPEED;
    player.damage_cooldown = GameConfig::ROLL_IMMUNITY_TICKS;
    player.movement_cooldown = GameConfig::ROLL_COOLDOWN_TICKS;
    true
}

/// Starts a ground pound when airborne. Returns whether it started.
pub fn ground_pound(player: &mut PlayerState) -> bool {
    if player.is_grounded()
        || player.creative
        || player.flags.contains(MovementFlags::GROUND_POUNDING)
    {
        return false;
    }
    player.flags.insert(MovementFlags::GROUND_POUNDING);
    player.body.vx = 0.0;
    player.body.vy = GameConfig::GROUND_POUND_SPEED;
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::TileKind;

    fn grid_with_floor(row: i32) -> TileGrid {
        let mut grid = TileGrid::new(20, 40);
        for x in 0..20 {
            grid.set(x, row, TileKind::Stone);
        }
        grid
    }

    #[test]
    fn free_fall_never_exceeds_terminal_velocity() {
        let grid = TileGrid::new(20, 400);
        let mut player = PlayerState::new(100.0, 0.0);
        let input = InputState::default();
        for _ in 0..200 {
            step(&mut player, &input, &grid);
            assert!(player.body.vy <= GameConfig::TERMINAL_VELOCITY);
        }
        assert_eq!(player.body.vy, GameConfig::TERMINAL_VELOCITY);
    }

    #[test]
    fn hard_landing_reports_impact_speed() {
        let grid = grid_with_floor(30);
        let mut player = PlayerState::new(100.0, 400.0);
        player.body.vy = 9.75;
        let input = InputState::default();
        let mut landing = None;
        for _ in 0..20 {
            let report = step(&mut player, &input, &grid);
            if report.hard_landing.is_some() {
                landing = report.hard_landing;
                break;
            }
        }
        assert_eq!(landing, Some(GameConfig::TERMINAL_VELOCITY));
        assert!(player.is_grounded());
    }

    #[test]
    fn ground_pound_lands_without_fall_damage() {
        let grid = grid_with_floor(30);
        let mut player = PlayerState::new(100.0, 300.0);
        assert!(ground_pound(&mut player));
        let input = InputState::default();
        let mut pounded = false;
        for _ in 0..40 {
            let report = step(&mut player, &input, &grid);
            assert!(report.hard_landing.is_none());
            pounded |= report.pounded;
        }
        assert!(pounded);
        assert!(!player.flags.contains(MovementFlags::GROUND_POUNDING));
    }

    #[test]
    fn buffered_jump_fires_on_landing() {
        let grid = grid_with_floor(30);
        let mut player = PlayerState::new(100.0, 480.0 - 24.0);
        let input = InputState::default();
        step(&mut player, &input, &grid);
        assert!(player.is_grounded());
        player.jump_buffer = 3;
        step(&mut player, &input, &grid);
        assert_eq!(player.body.vy, GameConfig::JUMP_FORCE);
        assert_eq!(player.jump_buffer, 0);
    }

    #[test]
    fn pole_cancels_gravity() {
        let mut grid = TileGrid::new(20, 40);
        for y in 0..40 {
            grid.set(6, y, TileKind::Pole);
        }
        let mut player = PlayerState::new(90.0, 100.0);
        let mut input = InputState::default();
        step(&mut player, &input, &grid);
        assert_eq!(player.body.vy, 0.0);
        assert!(player.is_grounded());
        input.keys = HeldKeys::UP;
        step(&mut player, &input, &grid);
        assert_eq!(player.body.vy, -GameConfig::CLIMB_SPEED);
    }

    #[test]
    fn roll_respects_cooldown() {
        let mut player = PlayerState::new(0.0, 0.0);
        assert!(roll(&mut player, -1.0));
        assert_eq!(player.body.vx, -GameConfig::ROLL_SPEED);
        assert!(!roll(&mut player, 1.0));
    }

    #[test]
    fn creative_flight_has_no_gravity() {
        let grid = TileGrid::new(20, 40);
        let mut player = PlayerState::new(100.0, 100.0);
        player.creative = true;
        let input = InputState::default();
        step(&mut player, &input, &grid);
        assert_eq!(player.body.vy, 0.0);
        assert!(!player.is_grounded());
    }

    /// Empty air with a full-height wall in tile column 10 (x 160..176).
    fn grid_with_wall() -> TileGrid {
        let mut grid = TileGrid::new(20, 40);
        for y in 0..40 {
            grid.set(10, y, TileKind::Stone);
        }
        grid
    }

    fn held(keys: HeldKeys) -> InputState {
        InputState {
            keys,
            ..InputState::default()
        }
    }

    #[test]
    fn wall_slide_damps_the_fall() {
        let grid = grid_with_wall();
        let mut sliding = PlayerState::new(147.0, 100.0);
        let mut falling = PlayerState::new(40.0, 100.0);
        let input = held(HeldKeys::RIGHT);
        for _ in 0..20 {
            step(&mut sliding, &input, &grid);
            step(&mut falling, &input, &grid);
        }
        assert_eq!(sliding.wall_slide, 1);
        assert!(!sliding.is_grounded());
        assert!(sliding.body.vy > 0.0);
        assert!(sliding.body.vy < falling.body.vy);
    }

    #[test]
    fn wall_jump_launches_away_from_the_wall() {
        let grid = grid_with_wall();
        let mut player = PlayerState::new(147.0, 100.0);
        let push = held(HeldKeys::RIGHT);
        for _ in 0..5 {
            step(&mut player, &push, &grid);
        }
        assert_eq!(player.wall_slide, 1);

        step(&mut player, &held(HeldKeys::RIGHT | HeldKeys::JUMP), &grid);
        assert_eq!(player.body.vy, GameConfig::JUMP_FORCE * 0.9);
        assert_eq!(player.body.vx, -5.0);
        assert_eq!(player.wall_slide, 0);
        assert!(!player.facing_right);
    }

    #[test]
    fn crouched_jump_is_higher() {
        let grid = grid_with_floor(30);
        let mut player = PlayerState::new(100.0, 480.0 - 24.0);
        step(&mut player, &InputState::default(), &grid);
        assert!(player.is_grounded());

        player.jump_buffer = 3;
        step(&mut player, &held(HeldKeys::DOWN), &grid);
        assert!(player.flags.contains(MovementFlags::CROUCHING));
        assert_eq!(player.body.vy, GameConfig::JUMP_FORCE * 1.3);
    }

    #[test]
    fn crouching_lowers_top_speed() {
        let grid = grid_with_floor(30);
        let mut walker = PlayerState::new(20.0, 480.0 - 24.0);
        let mut croucher = PlayerState::new(20.0, 480.0 - 24.0);
        step(&mut walker, &InputState::default(), &grid);
        step(&mut croucher, &InputState::default(), &grid);

        let walk = held(HeldKeys::RIGHT);
        let crouch = held(HeldKeys::RIGHT | HeldKeys::DOWN);
        for _ in 0..40 {
            step(&mut walker, &walk, &grid);
            step(&mut croucher, &crouch, &grid);
        }
        assert!(croucher.is_grounded());
        assert!(croucher.body.vx > 0.0);
        assert!(croucher.body.vx < walker.body.vx * 0.5);
    }
}

