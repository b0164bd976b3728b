use super::body::Body;
use super::entity::EntityId;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum ProjectileKind {
    Bullet,
    Laser,
    Missile,
    /// Cosmetic trace of a hit-scan shot; never collides.
    Rail,
    Shockwave,
}

impl ProjectileKind {
    pub fn explodes(self) -> bool {
        matches!(self, Self::Missile)
    }
}

/// Homing target of a missile.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ProjectileTarget {
    Player,
    Entity(EntityId),
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Projectile {
    pub body: Body,
    pub kind: ProjectileKind,
    pub damage: i32,
    pub life: u32,
    /// Fired by an enemy: hits the player and party members only.
    pub hostile: bool,
    pub target: Option<ProjectileTarget>,
}

impl Projectile {
    pub fn new(kind: ProjectileKind, body: Body, damage: i32, life: u32, hostile: bool) -> Self {
        Self {
            body,
            kind,
            damage,
            life,
            hostile,
            target: None,
        }
    }

    pub fn homing(mut self, target: ProjectileTarget) -> Self {
        self.target = Some(target);
        self
    }
}
