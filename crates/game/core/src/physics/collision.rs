//! Per-axis tile collision with multi-point probes on the leading face.

use crate::config::GameConfig;
use crate::state::Body;
use crate::world::{TileGrid, tile_coord};

/// What happens to velocity on contact.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Response {
    /// Snap to the tile boundary and zero the axis velocity.
    Stop,
    /// Snap to the tile boundary and invert the axis velocity.
    Reflect,
}

/// Side of the body that touched a solid tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Contact {
    /// Left wall or ceiling.
    Negative,
    /// Right wall or floor.
    Positive,
}

impl Contact {
    pub fn sign(self) -> i8 {
        match self {
            Self::Negative => -1,
            Self::Positive => 1,
        }
    }
}

/// Three probe offsets along an extent: both ends pulled in by `inset`, and
/// the middle.
pub fn face(extent: f32, inset: f32) -> [f32; 3] {
    [inset, extent / 2.0, extent - inset]
}

/// Two probe offsets: both ends pulled in by `inset`.
pub fn edges(extent: f32, inset: f32) -> [f32; 2] {
    [inset, extent - inset]
}

fn respond(velocity: &mut f32, response: Response) {
    match response {
        Response::Stop => *velocity = 0.0,
        Response::Reflect => *velocity = -*velocity,
    }
}

fn snap_before(edge: f32, extent: f32) -> f32 {
    tile_coord(edge) as f32 * GameConfig::TILE_SIZE - extent
}

fn snap_after(edge: f32) -> f32 {
    (tile_coord(edge) + 1) as f32 * GameConfig::TILE_SIZE
}

/// Moves `body` horizontally by `vx`, probing the leading face at the given
/// vertical offsets.
pub fn sweep_x(grid: &TileGrid, body: &mut Body, probes: &[f32], response: Response) -> Option<Contact> {
    let next = body.x + body.vx;
    let top = body.y;
    let blocked = |test_x: f32| probes.iter().any(|&dy| grid.is_solid_at(test_x, top + dy));

    let contact = if body.vx > 0.0 {
        let test = next + body.width;
        blocked(test).then(|| {
            body.x = snap_before(test, body.width);
            Contact::Positive
        })
    } else if body.vx < 0.0 {
        blocked(next).then(|| {
            body.x = snap_after(next);
            Contact::Negative
        })
    } else {
        None
    };

    match contact {
        Some(_) => respond(&mut body.vx, response),
        None => body.x = next,
    }
    contact
}

/// Moves `body` vertically by `vy`, probing the leading face at the given
/// horizontal offsets.
pub fn sweep_y(grid: &TileGrid, body: &mut Body, probes: &[f32], response: Response) -> Option<Contact> {
    let next = body.y + body.vy;
    let left = body.x;
    let blocked = |test_y: f32| probes.iter().any(|&dx| grid.is_solid_at(left + dx, test_y));

    let contact = if body.vy > 0.0 {
        let test = next + body.height;
        blocked(test).then(|| {
            body.y = snap_before(test, body.height);
            Contact::Positive
        })
    } else if body.vy < 0.0 {
        blocked(next).then(|| {
            body.y = snap_after(next);
            Contact::Negative
        })
    } else {
        None
    };

    match contact {
        Some(_) => respond(&mut body.vy, response),
        None => body.y = next,
    }
    contact
}
