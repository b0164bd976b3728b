//! Height map, column fill, surface props and the decoration pass.

use crate::config::GameConfig;
use crate::env::GameRng;
use crate::world::{Biome, TileGrid, TileKind};

use super::noise::NoiseField;

const MIN_SURFACE: f64 = 10.0;
const SURFACE_AMPLITUDE: f64 = 15.0;
const HEIGHT_FREQUENCY: f64 = 150.0;

/// Surface row per column.
pub fn height_map(noise: &NoiseField, width: usize) -> Vec<i32> {
    let max_surface = (GameConfig::WORLD_HEIGHT - 20) as f64;
    (0..width as i32)
        .map(|x| {
            let biome = Biome::at(x);
            let sample = noise.octave(f64::from(x) / HEIGHT_FREQUENCY, 3, f64::from(biome.roughness()));
            let h = f64::from(GameConfig::SURFACE_LEVEL)
                + f64::from(biome.height_offset())
                + sample * SURFACE_AMPLITUDE;
            h.clamp(MIN_SURFACE, max_surface).floor() as i32
        })
        .collect()
}

/// Cave masks applied below the sub-surface band.
pub struct CaveMasks<'n> {
    pub worms: &'n NoiseField,
    pub caverns: &'n NoiseField,
}

impl CaveMasks<'_> {
    fn carves(&self, x: i32, y: i32, surface: i32) -> bool {
        let (fx, fy) = (f64::from(x), f64::from(y));
        let worm = self.worms.octave(fx / 15.0 + fy / 10.0, 2, 0.4);
        let cavern = self.caverns.octave(fx / 50.0 + fy / 40.0, 2, 0.5);
        (worm > 0.45 && y > surface + 5) || (cavern > 0.6 && y > surface + 15)
    }
}

/// Fills every column from its surface row down and places surface props
/// (trees, poles, debris).
pub fn fill_columns(grid: &mut TileGrid, surface: &[i32], caves: &CaveMasks<'_>, rng: &mut GameRng) {
    let width = grid.width() as i32;
    let height = grid.height() as i32;

    for x in 0..width {
        let s = surface[x as usize];
        let biome = Biome::at(x);

        match biome {
            Biome::Outskirts => {
                if rng.chance(0.05) && x > 5 && x < width - 5 {
                    let next = surface.get(x as usize + 1).copied().unwrap_or(s);
                    if (s - next).abs() < 2 {
                        grow_tree(grid, x, s - 1, rng);
                    }
                }
            }
            Biome::Industrial => {
                if rng.chance(0.03) {
                    for i in 1..6 {
                        grid.set(x, s - i, TileKind::Pole);
                    }
                }
            }
            Biome::Wastes => {
                if rng.chance(0.05) {
                    grid.set(x, s - 1, TileKind::Debris);
                }
            }
        }

        for y in s..height {
            let tile = if y == s {
                surface_tile(biome, rng)
            } else if (y as f32) < s as f32 + rng.next_f32() * 4.0 + 2.0 {
                match biome {
                    Biome::Industrial => TileKind::FactoryMetal,
                    _ => TileKind::Dirt,
                }
            } else if y >= height - 2 {
                TileKind::Bedrock
            } else if caves.carves(x, y, s) {
                TileKind::Air
            } else {
                rock(biome, y, s, rng)
            };
            grid.set(x, y, tile);
        }
    }
}

fn surface_tile(biome: Biome, rng: &mut GameRng) -> TileKind {
    match biome {
        Biome::Industrial => TileKind::Concrete,
        Biome::Wastes if rng.coin() => TileKind::Dirt,
        Biome::Wastes => TileKind::Debris,
        Biome::Outskirts => TileKind::Grass,
    }
}

fn rock(biome: Biome, y: i32, surface: i32, rng: &mut GameRng) -> TileKind {
    if biome == Biome::Industrial && rng.chance(0.3) {
        return TileKind::FactoryMetal;
    }
    let roll = rng.next_f32();
    if roll < 0.02 {
        TileKind::GoldOre
    } else if roll < 0.06 {
        TileKind::IronOre
    } else if roll < 0.08 && y > surface + 20 {
        TileKind::Debris
    } else {
        TileKind::Stone
    }
}

fn grow_tree(grid: &mut TileGrid, x: i32, root: i32, rng: &mut GameRng) {
    let trunk = rng.range_i32(6, 10);
    for i in 0..trunk {
        if root - i >= 0 {
            grid.set(x, root - i, TileKind::TreeLog);
        }
    }
    let crown_base = root - trunk + 1;
    for ly in (crown_base - 4 + 1..=crown_base).rev() {
        for lx in x - 2..=x + 2 {
            if ly >= 0 && grid.get(lx, ly) == TileKind::Air {
                grid.set(lx, ly, TileKind::TreeLeaves);
            }
        }
    }
}

/// Single-tile props on air cells next to the ground.
pub fn decorate(grid: &mut TileGrid, rng: &mut GameRng) {
    let width = grid.width() as i32;
    let height = grid.height() as i32;
    for x in 0..width {
        let industrial = Biome::at(x) == Biome::Industrial;
        for y in 0..height {
            if grid.get(x, y) == TileKind::Air
                && y + 1 < height
                && grid.get(x, y + 1) == TileKind::Grass
                && rng.chance(0.2)
            {
                grid.set(x, y, TileKind::DeadBush);
            }
            if grid.get(x, y) == TileKind::Air
                && y >= 1
                && matches!(grid.get(x, y - 1), TileKind::FactoryMetal | TileKind::Concrete)
                && industrial
                && rng.chance(0.05)
            {
                grid.set(x, y, TileKind::HangingWires);
                if rng.coin() && y + 1 < height {
                    grid.set(x, y + 1, TileKind::HangingWires);
                }
            }
        }
    }
}

/// Unconditional overwrite of the lowest rows with bedrock.
pub fn lay_bedrock(grid: &mut TileGrid) {
    let height = grid.height() as i32;
    for y in height - GameConfig::BEDROCK_ROWS as i32..height {
        for x in 0..grid.width() as i32 {
            grid.set(x, y, TileKind::Bedrock);
        }
    }
}
