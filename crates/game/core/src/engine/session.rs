//! Session lifecycle: new games, the sky island, creative tooling.

use crate::config::GameConfig;
use crate::env::GameEnv;
use crate::state::{EntityKind, GameState, ItemKey};
use crate::world::{TileKind, tile_coord};
use crate::worldgen::WorldGenerator;

use super::command::CommandError;
use super::{GameEvent, inventory, spawner};

/// Catalog id of the tool every new game starts with.
pub const STARTER_TOOL: &str = "iron_pickaxe";

/// Generates a world from `seed` and builds a fresh session on it.
///
/// The player starts above the first solid tile of the spawn column with a
/// pickaxe and ten torches; generated guards and villagers are placed.
pub fn new_game(seed: u64, env: &GameEnv<'_>) -> GameState {
    let generated = WorldGenerator::new(seed).generate();
    let column = GameConfig::PLAYER_SPAWN_COLUMN;
    let ground = (0..generated.grid.height() as i32)
        .find(|&y| {
            !matches!(
                generated.grid.get(column, y),
                TileKind::Air | TileKind::TreeLeaves | TileKind::TreeLog
            )
        })
        .unwrap_or(0);
    let size = GameConfig::TILE_SIZE;
    let spawn = (column as f32 * size, (ground - 4) as f32 * size);

    let mut state = GameState::new(seed, generated.grid, spawn);
    state.structures = generated.structures;
    state.inventory.add(ItemKey::item(STARTER_TOOL), 1);
    state.inventory.add(ItemKey::Tile(TileKind::Torch), 10);
    spawner::place_generated(&mut state, env, &generated.spawns);
    state.events.push(GameEvent::PlayerChanged);
    state.events.push(GameEvent::InventoryChanged);
    state
}

/// Builds the sky island and wakes its boss. Runs at most once per session.
pub fn spawn_sky_island(state: &mut GameState, env: &GameEnv<'_>) {
    if state.progress.sky_island_spawned {
        return;
    }
    state.progress.sky_island_spawned = true;

    let cx = GameConfig::SKY_ISLAND_COLUMN;
    let floor = GameConfig::SKY_ISLAND_ROW;
    let half = GameConfig::SKY_ISLAND_WIDTH / 2;
    let world = &mut state.world;
    for x in cx - half..=cx + half {
        world.set(x, floor, TileKind::AncientBrick);
        world.set(x, floor + 1, TileKind::AncientBrick);
    }
    for y in floor - 7..floor {
        world.set(cx - half, y, TileKind::LabWall);
        world.set(cx + half, y, TileKind::LabWall);
    }
    for dx in (-half + 2..=half - 2).step_by(5) {
        world.set(cx + dx, floor - 1, TileKind::Torch);
    }
    world.set(cx, floor - 1, TileKind::TeddyBear);

    let size = GameConfig::TILE_SIZE;
    spawner::spawn(state, env, EntityKind::Ursus, cx as f32 * size, (floor - 5) as f32 * size);
    state
        .events
        .notice("WARNING: SKY ISLAND DETECTED! PROJECT URSUS ONLINE.");
    state.events.push(GameEvent::BossSpawned {
        kind: EntityKind::Ursus,
        name: "PROJECT URSUS".into(),
    });
}

/// Flips creative mode. Entering it heals the player and swaps in the
/// creative kit.
pub fn toggle_creative(state: &mut GameState, env: &GameEnv<'_>) {
    state.player.creative = !state.player.creative;
    if state.player.creative {
        state.player.health = state.player.max_health;
        inventory::fill_creative(state, env);
        state.events.notice("CREATIVE MODE ENABLED");
    } else {
        state.events.notice("SURVIVAL MODE ENABLED");
    }
    state.events.push(GameEvent::PlayerChanged);
}

/// Warps the player to where `kind` lives. Creative mode only.
pub fn teleport(state: &mut GameState, kind: EntityKind) -> Result<String, CommandError> {
    if !state.player.creative {
        return Err(CommandError::CreativeOnly);
    }
    let player_column = tile_coord(state.player.body.x);
    let (column, row, place) = match kind {
        EntityKind::Guardian => {
            let column = closest(player_column, &state.structures.ruins)
                .ok_or(CommandError::StructureNotFound(kind))?;
            let row = state.world.find_in_column(column, TileKind::Altar).unwrap_or(50);
            (column, row, "Ancient Ruins")
        }
        EntityKind::Sentry => {
            let sites: Vec<i32> = state
                .structures
                .factories
                .iter()
                .chain(&state.structures.labs)
                .copied()
                .collect();
            let column = closest(player_column, &sites).ok_or(CommandError::StructureNotFound(kind))?;
            let row = state
                .world
                .find_in_column(column, TileKind::ServerTerminal)
                .unwrap_or(60);
            (column, row, "Industrial Facility")
        }
        EntityKind::Ursus => {
            if !state.progress.sky_island_spawned {
                return Err(CommandError::StructureNotSpawned);
            }
            (GameConfig::SKY_ISLAND_COLUMN, GameConfig::SKY_ISLAND_ROW - 2, "Sky Fortress")
        }
        EntityKind::MechaRex => (850, surface(state, 850), "Garbage Wastes"),
        EntityKind::MechaBear => (500, surface(state, 500), "Industrial Complex"),
        EntityKind::Pterosaur => (player_column, 20, "Upper Atmosphere"),
        EntityKind::VoidStalker => (
            player_column,
            surface(state, player_column),
            "Current Location (Night)",
        ),
        _ => return Err(CommandError::NoTeleportTarget(kind)),
    };

    let size = GameConfig::TILE_SIZE;
    let body = &mut state.player.body;
    body.x = column as f32 * size;
    body.y = (row - 2) as f32 * size;
    body.vx = 0.0;
    body.vy = 0.0;
    let message = format!("Warped to {place}");
    state.events.notice(message.clone());
    state.events.push(GameEvent::PlayerChanged);
    Ok(message)
}

fn closest(from: i32, columns: &[i32]) -> Option<i32> {
    columns.iter().copied().min_by_key(|c| (c - from).abs())
}

fn surface(state: &GameState, column: i32) -> i32 {
    state.world.surface_row(column).unwrap_or(50)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::ContentSnapshot;
    use crate::world::TileGrid;

    #[test]
    fn new_game_is_reproducible_from_the_seed() {
        let content = ContentSnapshot::default();
        let env = content.env();
        let a = new_game(42, &env);
        let b = new_game(42, &env);
        assert_eq!(a.world, b.world);
        assert_eq!(a.player.body, b.player.body);
        assert_eq!(a.entities.len(), b.entities.len());
        assert_eq!(a.inventory.count_of(&ItemKey::Tile(TileKind::Torch)), 10);
        assert!(a.entities.iter().any(|e| e.kind == EntityKind::Villager));
    }

    #[test]
    fn sky_island_builds_once() {
        let content = ContentSnapshot::default();
        let env = content.env();
        let mut state = GameState::new(1, TileGrid::world(), (0.0, 0.0));
        spawn_sky_island(&mut state, &env);
        spawn_sky_island(&mut state, &env);

        assert_eq!(state.world.get(500, 15), TileKind::AncientBrick);
        assert_eq!(state.world.get(485, 16), TileKind::AncientBrick);
        assert_eq!(state.world.get(500, 14), TileKind::TeddyBear);
        assert_eq!(state.world.get(487, 14), TileKind::Torch);
        assert_eq!(state.world.get(500, 10), TileKind::Air);
        let bosses = state.entities.iter().filter(|e| e.kind == EntityKind::Ursus).count();
        assert_eq!(bosses, 1);
    }

    #[test]
    fn teleport_requires_creative_and_a_target() {
        let content = ContentSnapshot::default();
        let env = content.env();
        let mut state = GameState::new(1, TileGrid::world(), (0.0, 0.0));
        assert_eq!(teleport(&mut state, EntityKind::Pterosaur), Err(CommandError::CreativeOnly));

        toggle_creative(&mut state, &env);
        assert_eq!(
            teleport(&mut state, EntityKind::Ursus),
            Err(CommandError::StructureNotSpawned)
        );
        assert_eq!(
            teleport(&mut state, EntityKind::Guardian),
            Err(CommandError::StructureNotFound(EntityKind::Guardian))
        );

        state.structures.ruins = vec![100, 300];
        state.world.set(300, 40, TileKind::Altar);
        state.player.body.x = 250.0 * 16.0;
        assert!(teleport(&mut state, EntityKind::Guardian).is_ok());
        assert_eq!((state.player.body.x, state.player.body.y), (300.0 * 16.0, 38.0 * 16.0));
    }

    #[test]
    fn creative_kit_replaces_inventory() {
        let content = ContentSnapshot::default();
        let env = content.env();
        let mut state = GameState::new(1, TileGrid::world(), (0.0, 0.0));
        state.player.health = 10;
        toggle_creative(&mut state, &env);
        assert!(state.player.creative);
        assert_eq!(state.player.health, state.player.max_health);
        assert_eq!(state.inventory.count_of(&ItemKey::Tile(TileKind::Stone)), 999);
        toggle_creative(&mut state, &env);
        assert!(!state.player.creative);
    }
}
