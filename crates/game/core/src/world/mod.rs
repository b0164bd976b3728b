//! The tile world: tile kinds, the grid, and biome partitioning.
mod biome;
mod grid;
mod tile;

pub use biome::Biome;
pub use grid::{TileGrid, tile_coord};
pub use tile::{Hardness, TileKind};
