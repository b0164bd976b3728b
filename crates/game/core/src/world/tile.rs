//! Tile kinds and their static properties.

/// Mining cost of a tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Hardness {
    /// Number of mining-progress points needed to break the tile.
    Finite(u32),
    /// Never breaks (bedrock, and air which is never a mining target).
    Infinite,
}

impl Hardness {
    pub fn is_breakable(self) -> bool {
        matches!(self, Self::Finite(_))
    }

    /// Ticks needed with the given per-tick mining power (`ceil(hardness / power)`).
    pub fn ticks_to_break(self, power: u32) -> Option<u32> {
        match self {
            Self::Finite(h) => Some(h.div_ceil(power.max(1)).max(1)),
            Self::Infinite => None,
        }
    }
}

/// One cell value of the world grid.
///
/// The discriminants are stable and used as the compact save encoding.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    strum::EnumIter,
    strum::FromRepr,
    strum::IntoStaticStr,
    strum::Display,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[repr(u8)]
pub enum TileKind {
    #[default]
    Air = 0,
    Dirt = 1,
    Grass = 2,
    Stone = 3,
    Wood = 4,
    Leaves = 5,
    Bedrock = 6,
    AncientBrick = 7,
    IronOre = 8,
    GoldOre = 9,
    Torch = 10,
    Altar = 11,
    Plank = 12,
    Workbench = 13,
    DoorClosed = 14,
    DoorOpen = 15,
    ServerTerminal = 16,
    LabWall = 17,
    Debris = 18,
    FactoryMetal = 19,
    Wheat = 20,
    Anvil = 21,
    TreeLog = 22,
    TreeLeaves = 23,
    Concrete = 24,
    Telescope = 25,
    TeddyBear = 26,
    Pole = 27,
    DeadBush = 28,
    HangingWires = 29,
    Bookshelf = 30,
    Lectern = 31,
}

impl TileKind {
    pub fn hardness(self) -> Hardness {
        use TileKind::*;
        let points = match self {
            Air | Bedrock => return Hardness::Infinite,
            Dirt | Grass => 30,
            Stone => 90,
            Wood => 60,
            Leaves | TreeLeaves | Wheat => 10,
            AncientBrick => 120,
            IronOre | GoldOre | Telescope => 100,
            Torch | DeadBush | HangingWires => 1,
            Altar | ServerTerminal | LabWall | Anvil | Concrete => 150,
            Plank | Bookshelf | Lectern => 45,
            Workbench | DoorClosed | DoorOpen => 60,
            Debris => 80,
            FactoryMetal => 180,
            TreeLog => 50,
            TeddyBear => 200,
            Pole => 40,
        };
        Hardness::Finite(points)
    }

    /// Whether the tile blocks movement.
    pub fn is_solid(self) -> bool {
        use TileKind::*;
        !matches!(
            self,
            Air | Torch
                | Wheat
                | DoorOpen
                | Pole
                | DeadBush
                | HangingWires
                | TreeLeaves
                | Leaves
                | TreeLog
                | Bookshelf
                | Lectern
        )
    }

    /// Tiles a block may be placed over.
    pub fn is_replaceable(self) -> bool {
        matches!(
            self,
            Self::Air | Self::Wheat | Self::DeadBush | Self::HangingWires
        )
    }

    /// Tiles the player can climb while overlapping them.
    pub fn is_climbable(self) -> bool {
        matches!(self, Self::Pole | Self::HangingWires)
    }

    /// Counts as ground when scanning a column from the top (foliage does not).
    pub fn is_surface(self) -> bool {
        !matches!(self, Self::Air | Self::TreeLeaves)
    }

    /// Breaking this tile emits a lore fragment.
    pub fn carries_lore(self) -> bool {
        matches!(
            self,
            Self::Debris | Self::ServerTerminal | Self::Telescope
        )
    }

    pub fn name(self) -> &'static str {
        self.into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn hardness_is_positive_or_infinite() {
        for tile in TileKind::iter() {
            match tile.hardness() {
                Hardness::Finite(points) => assert!(points > 0, "{tile} has zero hardness"),
                Hardness::Infinite => {
                    assert!(matches!(tile, TileKind::Bedrock | TileKind::Air))
                }
            }
        }
    }

    #[test]
    fn discriminants_round_trip() {
        for tile in TileKind::iter() {
            assert_eq!(TileKind::from_repr(tile as u8), Some(tile));
        }
        assert_eq!(TileKind::from_repr(32), None);
    }

    #[test]
    fn stone_with_power_two_takes_forty_five_ticks() {
        assert_eq!(TileKind::Stone.hardness().ticks_to_break(2), Some(45));
        assert_eq!(TileKind::Bedrock.hardness().ticks_to_break(100), None);
    }

    #[test]
    fn furniture_and_foliage_are_passable() {
        for tile in [
            TileKind::Bookshelf,
            TileKind::Lectern,
            TileKind::TreeLog,
            TileKind::DoorOpen,
            TileKind::Pole,
        ] {
            assert!(!tile.is_solid());
        }
        assert!(TileKind::DoorClosed.is_solid());
        assert!(TileKind::Bedrock.is_solid());
    }

    #[test]
    fn names_are_screaming_snake_case() {
        assert_eq!(TileKind::IronOre.name(), "IRON_ORE");
        assert_eq!(TileKind::Air.to_string(), "AIR");
    }
}
