use core::ops::Range;

use crate::config::GameConfig;

/// Horizontal world segment with its own generation and spawn rules.
///
/// The three ranges tile `[0, WORLD_WIDTH)` left to right with no gaps.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::EnumIter, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Biome {
    Outskirts,
    Industrial,
    Wastes,
}

impl Biome {
    pub const OUTSKIRTS_END: i32 = 350;
    pub const INDUSTRIAL_END: i32 = 700;

    /// Biome owning column `x`. Columns past either edge belong to the
    /// nearest edge biome.
    pub fn at(x: i32) -> Self {
        if x < Self::OUTSKIRTS_END {
            Self::Outskirts
        } else if x < Self::INDUSTRIAL_END {
            Self::Industrial
        } else {
            Self::Wastes
        }
    }

    /// Biome under a world-pixel x coordinate.
    pub fn at_pixel(px: f32) -> Self {
        Self::at(crate::world::tile_coord(px))
    }

    pub fn columns(self) -> Range<i32> {
        match self {
            Self::Outskirts => 0..Self::OUTSKIRTS_END,
            Self::Industrial => Self::OUTSKIRTS_END..Self::INDUSTRIAL_END,
            Self::Wastes => Self::INDUSTRIAL_END..GameConfig::WORLD_WIDTH as i32,
        }
    }

    /// Surface offset in rows applied before noise.
    pub fn height_offset(self) -> f32 {
        match self {
            Self::Outskirts => 0.0,
            Self::Industrial => 5.0,
            Self::Wastes => -5.0,
        }
    }

    /// Octave persistence of the height noise.
    pub fn roughness(self) -> f32 {
        match self {
            Self::Outskirts => 0.5,
            Self::Industrial => 0.2,
            Self::Wastes => 0.8,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn ranges_cover_world_without_overlap() {
        let mut next = 0;
        for biome in Biome::iter() {
            let cols = biome.columns();
            assert_eq!(cols.start, next);
            next = cols.end;
        }
        assert_eq!(next, GameConfig::WORLD_WIDTH as i32);

        for x in 0..GameConfig::WORLD_WIDTH as i32 {
            let owners = Biome::iter().filter(|b| b.columns().contains(&x)).count();
            assert_eq!(owners, 1);
            assert!(Biome::at(x).columns().contains(&x));
        }
    }
}
