//! Combat resolution.
//!
//! Hits are applied immediately; deaths are collected in a [`KillLog`] and
//! resolved once at the end of the tick by [`death::resolve`], so every
//! entity runs the death pipeline at most once no matter how many hits land
//! on it in the same tick.
//!
//! - `damage`: the `max(1, raw - defense)` formula, immunity windows, kill log
//! - `melee`: pointer-centred swings
//! - `projectile`: flight, homing, explosions, weapon fire
//! - `death`: trophies, unlock gate, loot, quest credit, the final win

pub mod damage;
pub mod death;
pub mod melee;
pub mod projectile;

pub use damage::{
    HitOutcome, Kill, KillLog, fall_damage, ground_pound, hurt_entity, hurt_player, mitigate,
    strike,
};
pub use death::ARTIFACT_ITEM;
