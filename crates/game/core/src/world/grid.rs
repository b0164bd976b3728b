//! Fixed-size tile grid with bounds-checked access.

use crate::config::GameConfig;

use super::tile::TileKind;

/// Row-major 2-D tile storage.
///
/// Reads outside the grid return [`TileKind::Air`]; writes outside the grid are
/// silently ignored. No coordinate ever raises an error.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(into = "GridRecord", try_from = "GridRecord")
)]
pub struct TileGrid {
    width: usize,
    height: usize,
    tiles: Vec<TileKind>,
}

impl TileGrid {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            tiles: vec![TileKind::Air; width * height],
        }
    }

    /// Grid with the standard world dimensions, filled with air.
    pub fn world() -> Self {
        Self::new(GameConfig::WORLD_WIDTH, GameConfig::WORLD_HEIGHT)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 {
            return None;
        }
        let (x, y) = (x as usize, y as usize);
        (x < self.width && y < self.height).then(|| y * self.width + x)
    }

    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        self.index(x, y).is_some()
    }

    pub fn get(&self, x: i32, y: i32) -> TileKind {
        self.index(x, y)
            .and_then(|i| self.tiles.get(i).copied())
            .unwrap_or(TileKind::Air)
    }

    /// Writes a tile; returns false when the coordinate is outside the grid.
    pub fn set(&mut self, x: i32, y: i32, tile: TileKind) -> bool {
        match self.index(x, y).and_then(|i| self.tiles.get_mut(i)) {
            Some(slot) => {
                *slot = tile;
                true
            }
            None => false,
        }
    }

    /// Tile under a world-pixel coordinate.
    pub fn at_pixel(&self, px: f32, py: f32) -> TileKind {
        self.get(tile_coord(px), tile_coord(py))
    }

    pub fn is_solid_at(&self, px: f32, py: f32) -> bool {
        self.at_pixel(px, py).is_solid()
    }

    /// First row from the top holding ground (anything but air or leaves).
    pub fn surface_row(&self, x: i32) -> Option<i32> {
        (0..self.height as i32).find(|&y| self.get(x, y).is_surface())
    }

    /// First row from the top holding `tile`.
    pub fn find_in_column(&self, x: i32, tile: TileKind) -> Option<i32> {
        (0..self.height as i32).find(|&y| self.get(x, y) == tile)
    }

    /// Whether `tile` occurs in the square of `radius` tiles around `(cx, cy)`.
    pub fn contains_near(&self, cx: i32, cy: i32, radius: i32, tile: TileKind) -> bool {
        (cy - radius..=cy + radius)
            .any(|y| (cx - radius..=cx + radius).any(|x| self.get(x, y) == tile))
    }

    pub fn count(&self, tile: TileKind) -> usize {
        self.tiles.iter().filter(|&&t| t == tile).count()
    }

    pub fn row(&self, y: usize) -> &[TileKind] {
        let start = (y * self.width).min(self.tiles.len());
        let end = (start + self.width).min(self.tiles.len());
        &self.tiles[start..end]
    }
}

/// Tile coordinate containing a pixel coordinate.
pub fn tile_coord(pixel: f32) -> i32 {
    (pixel / GameConfig::TILE_SIZE).floor() as i32
}

/// Compact persisted form: tiles as their `u8` discriminants.
#[cfg(feature = "serde")]
#[derive(serde::Serialize, serde::Deserialize)]
struct GridRecord {
    width: usize,
    height: usize,
    tiles: Vec<u8>,
}

#[cfg(feature = "serde")]
impl From<TileGrid> for GridRecord {
    fn from(grid: TileGrid) -> Self {
        Self {
            width: grid.width,
            height: grid.height,
            tiles: grid.tiles.into_iter().map(|t| t as u8).collect(),
        }
    }
}

#[cfg(feature = "serde")]
impl TryFrom<GridRecord> for TileGrid {
    type Error = String;

    fn try_from(record: GridRecord) -> Result<Self, Self::Error> {
        if record.tiles.len() != record.width * record.height {
            return Err(format!(
                "grid has {} tiles, expected {}x{}",
                record.tiles.len(),
                record.width,
                record.height
            ));
        }
        let tiles = record
            .tiles
            .into_iter()
            .map(|raw| TileKind::from_repr(raw).ok_or_else(|| format!("unknown tile id {raw}")))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            width: record.width,
            height: record.height,
            tiles,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_of_bounds_reads_are_air() {
        let mut grid = TileGrid::new(4, 4);
        grid.set(0, 0, TileKind::Stone);
        assert_eq!(grid.get(0, 0), TileKind::Stone);
        assert_eq!(grid.get(-1, 0), TileKind::Air);
        assert_eq!(grid.get(4, 0), TileKind::Air);
        assert_eq!(grid.get(0, 99), TileKind::Air);
    }

    #[test]
    fn out_of_bounds_writes_are_ignored() {
        let mut grid = TileGrid::new(4, 4);
        assert!(!grid.set(-1, 2, TileKind::Stone));
        assert!(!grid.set(2, 4, TileKind::Stone));
        assert_eq!(grid.count(TileKind::Stone), 0);
    }

    #[test]
    fn pixel_lookup_floors_negative_coordinates() {
        let mut grid = TileGrid::new(4, 4);
        grid.set(1, 1, TileKind::Dirt);
        assert!(grid.is_solid_at(20.0, 31.9));
        assert_eq!(tile_coord(-0.5), -1);
        assert!(!grid.is_solid_at(-0.5, 20.0));
    }

    #[test]
    fn surface_skips_foliage() {
        let mut grid = TileGrid::new(2, 10);
        grid.set(0, 3, TileKind::TreeLeaves);
        grid.set(0, 6, TileKind::Grass);
        assert_eq!(grid.surface_row(0), Some(6));
        assert_eq!(grid.surface_row(1), None);
    }

    #[test]
    fn station_search_covers_square() {
        let mut grid = TileGrid::new(20, 20);
        grid.set(12, 10, TileKind::Workbench);
        assert!(grid.contains_near(10, 10, 2, TileKind::Workbench));
        assert!(!grid.contains_near(5, 10, 2, TileKind::Workbench));
    }
}
