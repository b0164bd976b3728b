//! Tile-grid kinematics for the player and entities.
//!
//! Both integrate one axis at a time against the solid tiles of the grid.
//! Projectile motion lives with combat since it never collides per-axis.
mod collision;
pub mod entity;
pub mod player;

pub use collision::{Contact, Response, edges, face, sweep_x, sweep_y};
pub use player::PlayerStep;
