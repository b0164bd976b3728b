//! Procedural world generation.
//!
//! One pass per world: height map, column fill, decoration, structures,
//! villages, and a final bedrock floor. Every random draw comes from the
//! generator's own [`GameRng`], so a seed fully determines the result.
mod noise;
mod structures;
mod terrain;
mod village;

pub use noise::NoiseField;
pub use structures::{Site, safe_bottom};

use crate::config::GameConfig;
use crate::env::GameRng;
use crate::state::{EntityKind, StructureLocations, VillagerJob};
use crate::world::{Biome, TileGrid};

use terrain::CaveMasks;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum StructureKind {
    Ruin,
    Factory,
    Lab,
    Vault,
    Observatory,
    VillageBuilding,
}

/// Inclusive tile rectangle a template wrote into.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Footprint {
    pub kind: StructureKind,
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

/// An entity a template wants placed once the session exists.
#[derive(Clone, Debug, PartialEq)]
pub struct SpawnRequest {
    pub kind: EntityKind,
    pub x: f32,
    pub y: f32,
    /// Set for villagers; their home is the spawn point.
    pub job: Option<VillagerJob>,
}

impl SpawnRequest {
    pub fn at_tile(kind: EntityKind, tx: i32, ty: i32) -> Self {
        Self {
            kind,
            x: tx as f32 * GameConfig::TILE_SIZE,
            y: ty as f32 * GameConfig::TILE_SIZE,
            job: None,
        }
    }

    pub fn with_job(mut self, job: VillagerJob) -> Self {
        self.job = Some(job);
        self
    }
}

/// Output of [`WorldGenerator::generate`].
#[derive(Clone, Debug)]
pub struct GeneratedWorld {
    pub grid: TileGrid,
    /// Surface row per column as computed before structures were placed.
    pub surface: Vec<i32>,
    pub structures: StructureLocations,
    pub footprints: Vec<Footprint>,
    pub spawns: Vec<SpawnRequest>,
}

pub struct WorldGenerator {
    rng: GameRng,
    terrain: NoiseField,
    worms: NoiseField,
    caverns: NoiseField,
}

impl WorldGenerator {
    pub fn new(seed: u64) -> Self {
        let mut rng = GameRng::new(seed);
        let base = rng.next_f64();
        Self {
            terrain: NoiseField::new(base),
            worms: NoiseField::new(base + 100.0),
            caverns: NoiseField::new(base + 200.0),
            rng,
        }
    }

    pub fn generate(mut self) -> GeneratedWorld {
        let mut grid = TileGrid::world();
        let surface = terrain::height_map(&self.terrain, grid.width());
        let caves = CaveMasks {
            worms: &self.worms,
            caverns: &self.caverns,
        };
        terrain::fill_columns(&mut grid, &surface, &caves, &mut self.rng);
        terrain::decorate(&mut grid, &mut self.rng);

        let mut spawns = Vec::new();
        let mut footprints = Vec::new();
        let mut structures = StructureLocations::default();
        {
            let mut site = Site {
                grid: &mut grid,
                spawns: &mut spawns,
                footprints: &mut footprints,
            };
            place_structures(&mut site, &surface, &mut structures, &mut self.rng);
            place_villages(&mut site, &surface, &mut structures, &mut self.rng);
        }
        terrain::lay_bedrock(&mut grid);

        GeneratedWorld {
            grid,
            surface,
            structures,
            footprints,
            spawns,
        }
    }
}

/// Picks a row in `[min, bottom - height)`, where `bottom` is the safe floor.
fn safe_row(rng: &mut GameRng, min: i32, height: i32) -> i32 {
    let max = safe_bottom(GameConfig::WORLD_HEIGHT) - height;
    rng.range_i32(min, max.max(min + 1))
}

fn place_structures(
    site: &mut Site<'_>,
    surface: &[i32],
    locations: &mut StructureLocations,
    rng: &mut GameRng,
) {
    let wastes = Biome::Wastes.columns();
    for _ in 0..GameConfig::RUIN_COUNT {
        let x = rng.range_i32(wastes.start, wastes.end - 20);
        let y = safe_row(rng, 50, 12);
        structures::ruin(site, x, y);
        locations.ruins.push(x);
    }

    let industrial = Biome::Industrial.columns();
    for _ in 0..GameConfig::FACTORY_COUNT {
        let x = rng.range_i32(industrial.start + 20, industrial.end - 20);
        let y = safe_row(rng, 60, 15);
        structures::factory(site, x, y);
        locations.factories.push(x);
    }

    let width = GameConfig::WORLD_WIDTH as i32;
    for _ in 0..GameConfig::LAB_COUNT {
        let x = rng.range_i32(20, width - 20);
        let y = safe_row(rng, 40, 10);
        structures::lab(site, x, y);
        locations.labs.push(x);
    }

    let outskirts = Biome::Outskirts.columns();
    for _ in 0..GameConfig::OBSERVATORY_ATTEMPTS {
        let x = rng.range_i32(outskirts.start + 20, outskirts.end - 20);
        let ground = surface.get(x as usize).copied().unwrap_or(0);
        // Only on high ground.
        if ground < GameConfig::WORLD_HEIGHT as i32 / 3 {
            site.flatten(x - 4, 8, ground);
            structures::observatory(site, x, ground);
            locations.observatories.push(x);
        }
    }

    let vault_row = GameConfig::WORLD_HEIGHT as i32 - 15;
    structures::vault(site, GameConfig::VAULT_COLUMN, vault_row);
    locations.vault = Some(GameConfig::VAULT_COLUMN);
}

fn place_villages(
    site: &mut Site<'_>,
    surface: &[i32],
    locations: &mut StructureLocations,
    rng: &mut GameRng,
) {
    let outskirts = Biome::Outskirts.columns();
    for _ in 0..GameConfig::VILLAGE_COUNT {
        let site_x = rng.range_i32(outskirts.start + 20, outskirts.end - 80);
        village::build(site, surface, site_x, rng);
        locations.villages.push(site_x);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::TileKind;

    #[test]
    fn bottom_rows_are_bedrock() {
        let world = WorldGenerator::new(11).generate();
        let height = world.grid.height();
        for y in height - GameConfig::BEDROCK_ROWS..height {
            assert!(world.grid.row(y).iter().all(|&t| t == TileKind::Bedrock));
        }
    }

    #[test]
    fn footprints_stay_clear_of_the_bedrock_band() {
        for seed in [1, 2, 3] {
            let world = WorldGenerator::new(seed).generate();
            let floor = (GameConfig::WORLD_HEIGHT - GameConfig::BEDROCK_ROWS) as i32;
            for fp in &world.footprints {
                assert!(fp.bottom < floor, "{:?} reaches the bedrock band", fp);
            }
        }
    }

    #[test]
    fn same_seed_same_world() {
        let a = WorldGenerator::new(2024).generate();
        let b = WorldGenerator::new(2024).generate();
        assert_eq!(a.grid, b.grid);
        assert_eq!(a.structures, b.structures);
        assert_eq!(a.spawns, b.spawns);

        let c = WorldGenerator::new(2025).generate();
        assert_ne!(a.grid, c.grid);
    }

    #[test]
    fn structure_counts_are_fixed() {
        let world = WorldGenerator::new(5).generate();
        assert_eq!(world.structures.ruins.len(), GameConfig::RUIN_COUNT);
        assert_eq!(world.structures.factories.len(), GameConfig::FACTORY_COUNT);
        assert_eq!(world.structures.labs.len(), GameConfig::LAB_COUNT);
        assert_eq!(world.structures.villages.len(), GameConfig::VILLAGE_COUNT);
        assert_eq!(world.structures.vault, Some(GameConfig::VAULT_COLUMN));
        assert_eq!(world.grid.get(GameConfig::VAULT_COLUMN, 143), TileKind::TeddyBear);
        assert!(world.structures.ruins.iter().all(|&x| Biome::at(x) == Biome::Wastes));
    }

    #[test]
    fn every_factory_brings_two_guards() {
        let world = WorldGenerator::new(9).generate();
        let drones = world.spawns.iter().filter(|s| s.kind == EntityKind::Drone).count();
        assert_eq!(drones, GameConfig::FACTORY_COUNT);
        let villagers = world.spawns.iter().filter(|s| s.kind == EntityKind::Villager).count();
        assert!(villagers >= GameConfig::VILLAGE_COUNT * 3);
    }
}
