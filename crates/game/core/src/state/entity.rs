//! Non-player actors: wildlife, mobs, villagers and bosses.

use arrayvec::ArrayVec;

use crate::config::GameConfig;

use super::body::Body;

/// Unique identifier of an entity within one session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EntityId(pub u32);

impl core::fmt::Display for EntityId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "ent-{}", self.0)
    }
}

#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    strum::EnumIter,
    strum::IntoStaticStr,
    strum::Display,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum EntityKind {
    Zombie,
    Guardian,
    Sentry,
    Ursus,
    Villager,
    Drone,
    ScrapWalker,
    Rabbit,
    Fox,
    RustedRover,
    Deer,
    Boar,
    Duck,
    Owl,
    Rat,
    Bat,
    Wolf,
    ScrapCrab,
    MechaRex,
    VoidStalker,
    Pterosaur,
    MechaBear,
}

/// Spawn-time health and hitbox of a kind.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct KindStats {
    pub health: i32,
    pub width: f32,
    pub height: f32,
}

/// Physics variant used for an entity kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MovementClass {
    /// Gravity, friction, stops on contact.
    Walker,
    /// No gravity, drag on both axes, bounces off solids.
    Flyer,
    /// Heavy bosses: gravity and stronger horizontal drag.
    Heavy,
}

/// Which behavior program drives an entity.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Temperament {
    Passive,
    Aggressive,
    Wanderer,
    Villager,
    Boss,
}

impl EntityKind {
    pub fn stats(self) -> KindStats {
        use EntityKind::*;
        let (health, width, height) = match self {
            MechaRex => (600, 48.0, 48.0),
            VoidStalker => (400, 32.0, 32.0),
            Ursus => (2000, 48.0, 48.0),
            Guardian => (800, 32.0, 32.0),
            Sentry => (600, 32.0, 24.0),
            Boar | Wolf => (50, 16.0, 24.0),
            Rabbit | Rat => (10, 8.0, 8.0),
            Duck | Owl | Bat => (15, 12.0, 12.0),
            Pterosaur => (120, 32.0, 20.0),
            MechaBear => (180, 32.0, 24.0),
            ScrapWalker => (80, 16.0, 24.0),
            _ => (30, 16.0, 24.0),
        };
        KindStats {
            health,
            width,
            height,
        }
    }

    pub fn movement(self) -> MovementClass {
        use EntityKind::*;
        match self {
            Bat | Owl | Drone | Pterosaur | Sentry => MovementClass::Flyer,
            Guardian | Ursus => MovementClass::Heavy,
            _ => MovementClass::Walker,
        }
    }

    pub fn temperament(self) -> Temperament {
        use EntityKind::*;
        match self {
            Rabbit | Fox | Deer | Boar | Duck | Rat | Owl => Temperament::Passive,
            Zombie | Wolf | Pterosaur | MechaBear | Drone | ScrapWalker => Temperament::Aggressive,
            RustedRover | ScrapCrab | Bat => Temperament::Wanderer,
            Villager => Temperament::Villager,
            Guardian | Sentry | Ursus | MechaRex | VoidStalker => Temperament::Boss,
        }
    }

    pub fn is_boss(self) -> bool {
        self.temperament() == Temperament::Boss
    }

    /// Kinds recorded in the defeated-boss set when killed.
    pub fn is_trophy(self) -> bool {
        self.is_boss() || matches!(self, Self::MechaBear | Self::Pterosaur)
    }

    /// Ground chase speed.
    pub fn walk_speed(self) -> f32 {
        match self {
            Self::MechaBear => 2.5,
            Self::Wolf | Self::Villager => 1.5,
            Self::MechaRex => 1.2,
            _ => 0.5,
        }
    }

    /// Damage dealt to the player on contact.
    pub fn contact_damage(self) -> i32 {
        match self {
            Self::MechaBear => 25,
            Self::MechaRex => 40,
            _ => 5,
        }
    }

    /// Whether a villager on guard duty treats this kind as a threat.
    pub fn is_threat(self) -> bool {
        !matches!(self, Self::Villager | Self::Rabbit)
    }

    /// Upper-case label used in notices ("MECHA REX").
    pub fn display_name(self) -> String {
        let raw: &'static str = self.into();
        raw.replace('_', " ").to_uppercase()
    }
}

/// Behavior-program tag driving an entity's per-tick decisions.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, strum::IntoStaticStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum AiState {
    #[default]
    Idle,
    Chasing,
    Fleeing,
    Attacking,
    Patrol,
    SeekingShelter,
    Following,
    BossCharge,
    BossSmash,
    BossLaser,
    BossMissile,
    BossSummon,
    BossRecover,
}

/// What an entity is currently pursuing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TargetRef {
    Player,
    Entity(EntityId),
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::EnumIter, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum VillagerJob {
    #[default]
    Unemployed,
    Farmer,
    Blacksmith,
    Librarian,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Speaker {
    Player,
    Villager,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChatLine {
    pub speaker: Speaker,
    pub text: String,
}

pub type ChatLog = ArrayVec<ChatLine, { GameConfig::CHAT_HISTORY_LEN }>;

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VillagerData {
    pub name: String,
    pub personality: String,
    pub job: VillagerJob,
    pub home: (f32, f32),
    pub has_quest: bool,
    pub in_party: bool,
    pub target: Option<TargetRef>,
    pub book_timer: u32,
    /// Damage of a held weapon; bare hands deal 5.
    pub weapon_damage: Option<i32>,
    pub defense: i32,
    pub chat: ChatLog,
}

impl VillagerData {
    pub fn new(name: String, personality: String, job: VillagerJob, home: (f32, f32)) -> Self {
        Self {
            name,
            personality,
            job,
            home,
            has_quest: false,
            in_party: false,
            target: None,
            book_timer: 0,
            weapon_damage: None,
            defense: 0,
            chat: ChatLog::new(),
        }
    }

    /// Appends a line, dropping the oldest when the log is full.
    pub fn remember(&mut self, line: ChatLine) {
        if self.chat.is_full() {
            self.chat.remove(0);
        }
        self.chat.push(line);
    }

    pub fn strike_damage(&self) -> i32 {
        self.weapon_damage.unwrap_or(5)
    }

    pub fn has_book(&self) -> bool {
        self.job == VillagerJob::Librarian && self.book_timer > GameConfig::BOOK_READY_TICKS
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BossData {
    pub minions: ArrayVec<EntityId, { GameConfig::MAX_MINIONS }>,
}

/// Variant payload selected by entity kind.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EntityRole {
    Creature,
    Villager(VillagerData),
    Boss(BossData),
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EntityState {
    pub id: EntityId,
    pub kind: EntityKind,
    pub body: Body,
    pub health: i32,
    pub max_health: i32,
    pub facing_right: bool,
    pub ai: AiState,
    pub state_timer: u32,
    pub damage_taken: i32,
    pub damage_cooldown: u32,
    pub dead: bool,
    /// Floor contact during the last physics step.
    #[cfg_attr(feature = "serde", serde(default))]
    pub on_ground: bool,
    pub role: EntityRole,
}

impl EntityState {
    pub fn new(id: EntityId, kind: EntityKind, x: f32, y: f32, role: EntityRole) -> Self {
        let stats = kind.stats();
        Self {
            id,
            kind,
            body: Body::new(x, y, stats.width, stats.height),
            health: stats.health,
            max_health: stats.health,
            facing_right: true,
            ai: AiState::Idle,
            state_timer: 0,
            damage_taken: 0,
            damage_cooldown: 0,
            dead: false,
            on_ground: false,
            role,
        }
    }

    pub fn is_alive(&self) -> bool {
        !self.dead
    }

    pub fn villager(&self) -> Option<&VillagerData> {
        match &self.role {
            EntityRole::Villager(data) => Some(data),
            _ => None,
        }
    }

    pub fn villager_mut(&mut self) -> Option<&mut VillagerData> {
        match &mut self.role {
            EntityRole::Villager(data) => Some(data),
            _ => None,
        }
    }

    pub fn boss_mut(&mut self) -> Option<&mut BossData> {
        match &mut self.role {
            EntityRole::Boss(data) => Some(data),
            _ => None,
        }
    }

    pub fn in_party(&self) -> bool {
        self.villager().is_some_and(|v| v.in_party)
    }

    /// A villager pushed past the hostility threshold.
    pub fn is_hostile_villager(&self) -> bool {
        self.villager().is_some()
            && self.damage_taken > GameConfig::VILLAGER_HOSTILITY_THRESHOLD
    }

    /// Defense applied to incoming hits (villager gear only).
    pub fn defense(&self) -> i32 {
        self.villager().map_or(0, |v| v.defense)
    }
}

/// All entities of a session, in spawn order.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EntitiesState {
    next_id: u32,
    entities: Vec<EntityState>,
}

impl EntitiesState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn allocate_id(&mut self) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        id
    }

    pub fn insert(&mut self, entity: EntityState) -> EntityId {
        let id = entity.id;
        self.entities.push(entity);
        id
    }

    pub fn get(&self, id: EntityId) -> Option<&EntityState> {
        self.entities.iter().find(|e| e.id == id)
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut EntityState> {
        self.entities.iter_mut().find(|e| e.id == id)
    }

    /// Live entity lookup; dead entities awaiting removal are skipped.
    pub fn live(&self, id: EntityId) -> Option<&EntityState> {
        self.get(id).filter(|e| e.is_alive())
    }

    pub fn iter(&self) -> impl Iterator<Item = &EntityState> {
        self.entities.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut EntityState> {
        self.entities.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Ids of live entities in spawn order.
    pub fn live_ids(&self) -> Vec<EntityId> {
        self.entities
            .iter()
            .filter(|e| e.is_alive())
            .map(|e| e.id)
            .collect()
    }

    /// Temporarily removes an entity so it can act on the rest of the state.
    /// Pair with [`EntitiesState::reattach`] using the returned index.
    pub fn detach(&mut self, id: EntityId) -> Option<(usize, EntityState)> {
        let index = self.entities.iter().position(|e| e.id == id)?;
        Some((index, self.entities.remove(index)))
    }

    /// Puts a detached entity back at its original position.
    pub fn reattach(&mut self, index: usize, entity: EntityState) {
        let index = index.min(self.entities.len());
        self.entities.insert(index, entity);
    }

    pub fn party_size(&self) -> usize {
        self.entities
            .iter()
            .filter(|e| e.is_alive() && e.in_party())
            .count()
    }

    /// Removes entities flagged dead, returning how many were dropped.
    pub fn remove_dead(&mut self) -> usize {
        let before = self.entities.len();
        self.entities.retain(|e| !e.dead);
        before - self.entities.len()
    }
}
