/// Game configuration constants and tunable parameters.
///
/// Distances are in world pixels unless the name says otherwise; durations are
/// in simulation ticks.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameConfig {
    /// Ambient spawning stops once this many entities are alive.
    pub spawn_cap: usize,
    /// Maximum number of villagers following the player at once.
    pub party_cap: usize,
}

impl GameConfig {
    // ===== world geometry =====
    pub const TILE_SIZE: f32 = 16.0;
    pub const WORLD_WIDTH: usize = 1000;
    pub const WORLD_HEIGHT: usize = 150;
    /// Rows at the bottom of the grid that are always bedrock.
    pub const BEDROCK_ROWS: usize = 3;

    // ===== physics =====
    pub const GRAVITY: f32 = 0.25;
    /// Maximum downward speed; above `FALL_DAMAGE_THRESHOLD`.
    pub const TERMINAL_VELOCITY: f32 = 10.0;
    pub const JUMP_FORCE: f32 = -4.5;
    pub const MOB_JUMP_FORCE: f32 = -4.2;
    pub const MOVE_SPEED: f32 = 0.5;
    pub const MAX_SPEED: f32 = 2.5;
    pub const FRICTION: f32 = 0.82;
    pub const FLYER_DRAG: f32 = 0.95;
    pub const HEAVY_DRAG: f32 = 0.9;
    pub const CLIMB_SPEED: f32 = 3.0;
    pub const WALL_SLIDE_DAMPING: f32 = 0.8;
    pub const FALL_DAMAGE_THRESHOLD: f32 = 8.0;
    pub const FALL_DAMAGE_MULTIPLIER: f32 = 5.0;

    // ===== player =====
    pub const PLAYER_WIDTH: f32 = 12.0;
    pub const PLAYER_HEIGHT: f32 = 24.0;
    pub const PLAYER_MAX_HEALTH: i32 = 100;
    pub const PLAYER_SPAWN_COLUMN: i32 = 50;
    pub const REACH: f32 = 800.0;
    pub const DAMAGE_IMMUNITY_TICKS: u32 = 60;
    pub const ROLL_SPEED: f32 = 6.0;
    pub const ROLL_IMMUNITY_TICKS: u32 = 20;
    pub const ROLL_COOLDOWN_TICKS: u32 = 60;
    pub const JUMP_BUFFER_TICKS: u32 = 6;
    pub const DOUBLE_TAP_TICKS: u64 = 18;
    pub const GROUND_POUND_SPEED: f32 = 10.0;
    pub const GROUND_POUND_RADIUS: f32 = 50.0;
    pub const GROUND_POUND_DAMAGE: i32 = 20;
    pub const REGEN_INTERVAL: u32 = 300;

    // ===== inventory =====
    pub const INVENTORY_SLOTS: usize = 27;
    pub const HOTBAR_SLOTS: usize = 9;
    pub const MAX_STACK: u16 = 64;
    pub const CRAFT_STATION_RADIUS: f32 = 100.0;

    // ===== clock =====
    pub const DAY_LENGTH: u32 = 24_000;
    pub const DAWN: u32 = 6_000;
    pub const NIGHT_START: u32 = 14_000;
    pub const NIGHT_END: u32 = 22_000;
    pub const RAIN_START: u32 = 15_000;
    pub const RAIN_RAMP: f32 = 8_000.0;
    pub const HEAVY_RAIN: f32 = 0.4;
    pub const CLOCK_EVENT_INTERVAL: u32 = 100;

    // ===== entities =====
    pub const SPAWN_CHANCE: f32 = 0.02;
    pub const CONTACT_INTERVAL: u64 = 30;
    pub const VILLAGER_HOSTILITY_THRESHOLD: i32 = 15;
    pub const CHAT_HISTORY_LEN: usize = 16;
    pub const BOOK_READY_TICKS: u32 = 3_000;
    pub const MAX_MINIONS: usize = 4;

    // ===== projectiles =====
    pub const EXPLOSION_RADIUS: i32 = 3;
    pub const MISSILE_MAX_SPEED: f32 = 6.0;
    pub const MISSILE_STEER: f32 = 0.5;
    pub const MISSILE_LOCK_RADIUS: f32 = 160.0;
    pub const RAIL_RANGE: f32 = 1_000.0;
    pub const RAIL_STEP: f32 = 4.0;

    // ===== generation =====
    pub const SURFACE_LEVEL: f32 = 50.0;
    pub const RUIN_COUNT: usize = 4;
    pub const FACTORY_COUNT: usize = 5;
    pub const LAB_COUNT: usize = 4;
    pub const OBSERVATORY_ATTEMPTS: usize = 3;
    pub const VILLAGE_COUNT: usize = 3;
    pub const VAULT_COLUMN: i32 = 700;
    /// Structures keep their lowest row at least this far above the grid bottom.
    pub const STRUCTURE_FLOOR_MARGIN: i32 = 10;

    // ===== sky island =====
    pub const SKY_ISLAND_COLUMN: i32 = 500;
    pub const SKY_ISLAND_ROW: i32 = 15;
    pub const SKY_ISLAND_WIDTH: i32 = 30;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_SPAWN_CAP: usize = 25;
    pub const DEFAULT_PARTY_CAP: usize = 2;

    pub fn new() -> Self {
        Self {
            spawn_cap: Self::DEFAULT_SPAWN_CAP,
            party_cap: Self::DEFAULT_PARTY_CAP,
        }
    }

    pub fn with_caps(spawn_cap: usize, party_cap: usize) -> Self {
        Self {
            spawn_cap,
            party_cap,
        }
    }

    /// Pixel height of the whole world.
    pub const fn world_pixel_height() -> f32 {
        Self::WORLD_HEIGHT as f32 * Self::TILE_SIZE
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}
