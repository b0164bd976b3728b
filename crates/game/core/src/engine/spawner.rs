//! Entity creation: explicit spawns, generated-world spawns and the ambient
//! spawner.

use crate::config::GameConfig;
use crate::env::{FALLBACK_NAME, FALLBACK_PERSONALITY, GameEnv};
use crate::state::{
    BossData, EntityId, EntityKind, EntityRole, EntityState, GameState, Temperament, VillagerData,
    VillagerJob,
};
use crate::world::{Biome, tile_coord};
use crate::worldgen::SpawnRequest;

use super::GameEvent;

/// Spawns `kind` with its top-left corner at `(x, y)`.
pub fn spawn(state: &mut GameState, env: &GameEnv<'_>, kind: EntityKind, x: f32, y: f32) -> EntityId {
    if kind == EntityKind::Villager {
        return spawn_villager(state, env, VillagerJob::Unemployed, x, y);
    }
    spawn_creature(state, kind, x, y)
}

/// Spawns a non-villager. Needs no roster, so world triggers that run
/// without content (explosions, altars) use it directly.
pub fn spawn_creature(state: &mut GameState, kind: EntityKind, x: f32, y: f32) -> EntityId {
    let role = match kind.temperament() {
        Temperament::Boss => EntityRole::Boss(BossData::default()),
        _ => EntityRole::Creature,
    };
    insert(state, kind, x, y, role)
}

/// Spawns a villager whose home is the spawn point. Name and personality are
/// drawn from the roster.
pub fn spawn_villager(state: &mut GameState, env: &GameEnv<'_>, job: VillagerJob, x: f32, y: f32) -> EntityId {
    let (names, personalities) = env
        .npcs()
        .map(|npcs| (npcs.names(), npcs.personalities()))
        .unwrap_or_default();
    let name = state
        .rng
        .pick(&names)
        .cloned()
        .unwrap_or_else(|| FALLBACK_NAME.to_owned());
    let personality = state
        .rng
        .pick(&personalities)
        .cloned()
        .unwrap_or_else(|| FALLBACK_PERSONALITY.to_owned());

    let mut data = VillagerData::new(name, personality, job, (x, y));
    data.has_quest = state.rng.chance(0.3);
    if job == VillagerJob::Librarian {
        data.book_timer = state.rng.range_i32(0, 2_000) as u32;
    }
    insert(state, EntityKind::Villager, x, y, EntityRole::Villager(data))
}

fn insert(state: &mut GameState, kind: EntityKind, x: f32, y: f32, role: EntityRole) -> EntityId {
    let id = state.entities.allocate_id();
    let mut entity = EntityState::new(id, kind, x, y, role);
    entity.facing_right = state.rng.coin();
    state.entities.insert(entity);
    state.events.push(GameEvent::EntitiesChanged);
    id
}

/// Places the entities a freshly generated world asked for.
pub fn place_generated(state: &mut GameState, env: &GameEnv<'_>, spawns: &[SpawnRequest]) {
    for request in spawns {
        match request.job {
            Some(job) => {
                spawn_villager(state, env, job, request.x, request.y);
            }
            None => {
                spawn(state, env, request.kind, request.x, request.y);
            }
        }
    }
}

/// Spawn table for one ambient roll: cumulative thresholds against a uniform draw.
fn ambient_kind(biome: Biome, night: bool, roll: f32) -> Option<EntityKind> {
    use EntityKind::*;
    let table: &[(f32, EntityKind)] = match biome {
        Biome::Industrial => &[(0.05, Drone), (0.10, ScrapWalker), (0.12, MechaBear), (0.4, Zombie)],
        _ if night => &[
            (0.3, Zombie),
            (0.45, Bat),
            (0.55, Wolf),
            (0.6, Rat),
            (0.61, VoidStalker),
        ],
        _ => &[
            (0.1, Rabbit),
            (0.2, Fox),
            (0.3, Deer),
            (0.35, Boar),
            (0.4, Duck),
            (0.45, ScrapCrab),
            (0.47, RustedRover),
            (0.475, MechaRex),
        ],
    };
    table
        .iter()
        .find(|(threshold, _)| roll < *threshold)
        .map(|&(_, kind)| kind)
}

/// One ambient spawner roll. Spawns land on the surface 15 to 25 columns to
/// either side of the player while the population is under the cap.
pub fn ambient(state: &mut GameState, env: &GameEnv<'_>) -> Option<EntityId> {
    if !state.rng.chance(GameConfig::SPAWN_CHANCE) || state.entities.len() >= state.config.spawn_cap {
        return None;
    }
    let player_column = tile_coord(state.player.body.x);
    let roll = state.rng.next_f32();
    let kind = ambient_kind(Biome::at(player_column), state.clock.is_night(), roll)?;

    let offset = 15 + state.rng.range_i32(0, 10);
    let column = if state.rng.coin() {
        player_column + offset
    } else {
        player_column - offset
    };
    if column < 2 || column >= GameConfig::WORLD_WIDTH as i32 - 2 {
        return None;
    }
    let row = state.world.surface_row(column)?;
    let size = GameConfig::TILE_SIZE;
    Some(spawn(state, env, kind, column as f32 * size, (row - 2) as f32 * size))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::{ContentSnapshot, RosterSnapshot};
    use crate::state::AiState;
    use crate::world::{TileGrid, TileKind};

    fn flat_state() -> GameState {
        let mut grid = TileGrid::world();
        for x in 0..GameConfig::WORLD_WIDTH as i32 {
            grid.set(x, 60, TileKind::Grass);
        }
        GameState::new(11, grid, (200.0 * 16.0, 58.0 * 16.0))
    }

    #[test]
    fn villagers_draw_from_the_roster() {
        let content = ContentSnapshot {
            roster: RosterSnapshot {
                names: vec!["Oren".into()],
                personalities: vec!["Grumpy".into()],
            },
            ..ContentSnapshot::default()
        };
        let mut state = flat_state();
        let id = spawn_villager(&mut state, &content.env(), VillagerJob::Librarian, 10.0, 20.0);
        let Some(data) = state.entities.get(id).and_then(|e| e.villager()) else {
            panic!("villager missing");
        };
        assert_eq!(data.name, "Oren");
        assert_eq!(data.personality, "Grumpy");
        assert_eq!(data.home, (10.0, 20.0));
        assert!(data.book_timer < 2_000);
    }

    #[test]
    fn empty_roster_falls_back() {
        let content = ContentSnapshot::default();
        let mut state = flat_state();
        let id = spawn(&mut state, &content.env(), EntityKind::Villager, 0.0, 0.0);
        let name = state.entities.get(id).and_then(|e| e.villager()).map(|v| v.name.clone());
        assert_eq!(name.as_deref(), Some(FALLBACK_NAME));
    }

    #[test]
    fn bosses_get_a_boss_role() {
        let content = ContentSnapshot::default();
        let mut state = flat_state();
        let id = spawn(&mut state, &content.env(), EntityKind::Guardian, 0.0, 0.0);
        let entity = state.entities.get(id);
        assert!(matches!(entity.map(|e| &e.role), Some(EntityRole::Boss(_))));
        assert_eq!(entity.map(|e| e.ai), Some(AiState::Idle));
    }

    #[test]
    fn ambient_spawns_land_on_the_surface_and_respect_the_cap() {
        let content = ContentSnapshot::default();
        let env = content.env();
        let mut state = flat_state();
        for _ in 0..5_000 {
            ambient(&mut state, &env);
        }
        assert!(state.entities.len() <= state.config.spawn_cap);
        assert!(!state.entities.is_empty());
        for entity in state.entities.iter() {
            assert_eq!(entity.body.y, 58.0 * 16.0);
            let column = tile_coord(entity.body.x);
            let distance = (column - 200).abs();
            assert!((15..25).contains(&distance), "column {column}");
        }
    }

    #[test]
    fn ambient_tables_follow_biome_and_night() {
        assert_eq!(ambient_kind(Biome::Industrial, false, 0.01), Some(EntityKind::Drone));
        assert_eq!(ambient_kind(Biome::Outskirts, true, 0.605), Some(EntityKind::VoidStalker));
        assert_eq!(ambient_kind(Biome::Wastes, false, 0.472), Some(EntityKind::MechaRex));
        assert_eq!(ambient_kind(Biome::Outskirts, false, 0.9), None);
    }
}
