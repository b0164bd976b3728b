//! Villages: rows of buildings laid out along an advancing cursor.

use crate::config::GameConfig;
use crate::env::GameRng;
use crate::state::VillagerJob;
use crate::world::{Biome, TileKind};

use super::StructureKind;
use super::structures::Site;

/// Gap in columns between neighbouring buildings.
const BUILDING_GAP: i32 = 4;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Building {
    Farm,
    Smithy,
    Library,
    House,
}

impl Building {
    fn roll(rng: &mut GameRng) -> Self {
        let roll = rng.next_f32();
        if roll < 0.25 {
            Self::Farm
        } else if roll < 0.5 {
            Self::Smithy
        } else if roll < 0.7 {
            Self::Library
        } else {
            Self::House
        }
    }

    fn width(self) -> i32 {
        match self {
            Self::Farm => 12,
            Self::Smithy => 10,
            Self::Library => 14,
            Self::House => 8,
        }
    }

    fn height(self) -> i32 {
        match self {
            Self::Farm => 1,
            Self::Smithy | Self::House => 6,
            Self::Library => 7,
        }
    }
}

/// Places one village starting at `site_x`. The floor of each building is
/// taken from the pre-structure height map at the building's centre.
pub fn build(site: &mut Site<'_>, surface: &[i32], site_x: i32, rng: &mut GameRng) {
    let limit = Biome::OUTSKIRTS_END - 20;
    let count = rng.range_i32(3, 6);
    let mut cursor = site_x;

    for _ in 0..count {
        if cursor >= limit {
            continue;
        }
        let building = Building::roll(rng);
        let width = building.width();
        let centre = (cursor + width / 2).clamp(0, GameConfig::WORLD_WIDTH as i32 - 1);
        let floor = surface.get(centre as usize).copied().unwrap_or(0);

        site.flatten(cursor, width, floor);
        match building {
            Building::Farm => farm(site, cursor, floor),
            Building::Smithy => smithy(site, cursor, floor),
            Building::Library => library(site, cursor, floor),
            Building::House => house(site, cursor, floor),
        }
        site.record(
            StructureKind::VillageBuilding,
            cursor - 1,
            floor - building.height() - 1,
            cursor + width,
            floor,
        );
        cursor += width + BUILDING_GAP;
    }
}

/// Walls of `wall` from the floor up, a roof of `roof` overhanging one tile.
fn frame(site: &mut Site<'_>, x: i32, floor: i32, (w, h): (i32, i32), wall: TileKind, roof: TileKind) {
    for dy in 1..=h {
        site.grid.set(x, floor - dy, wall);
        site.grid.set(x + w - 1, floor - dy, wall);
    }
    for dx in -1..=w {
        site.grid.set(x + dx, floor - h - 1, roof);
    }
}

fn floor_row(site: &mut Site<'_>, x: i32, floor: i32, w: i32, tile: TileKind) {
    for dx in 0..w {
        site.grid.set(x + dx, floor, tile);
    }
}

fn door(site: &mut Site<'_>, x: i32, floor: i32) {
    site.grid.set(x, floor - 1, TileKind::DoorClosed);
    site.grid.set(x, floor - 2, TileKind::DoorClosed);
}

fn house(site: &mut Site<'_>, x: i32, floor: i32) {
    let (w, h) = (Building::House.width(), Building::House.height());
    floor_row(site, x, floor, w, TileKind::Plank);
    frame(site, x, floor, (w, h), TileKind::Wood, TileKind::Plank);
    site.grid.set(x + 2, floor - 1, TileKind::Workbench);
    site.grid.set(x + w - 2, floor - 2, TileKind::Torch);
    door(site, x, floor);
    site.spawn_villager(VillagerJob::Unemployed, x + 4, floor - 2);
}

fn farm(site: &mut Site<'_>, x: i32, floor: i32) {
    let w = Building::Farm.width();
    for dx in 0..w {
        site.grid.set(x + dx, floor, TileKind::Dirt);
        site.grid.set(x + dx, floor - 1, TileKind::Wheat);
    }
    // irrigation ditch
    site.grid.set(x + 6, floor, TileKind::Air);
    site.spawn_villager(VillagerJob::Farmer, x + 2, floor - 2);
}

fn smithy(site: &mut Site<'_>, x: i32, floor: i32) {
    let (w, h) = (Building::Smithy.width(), Building::Smithy.height());
    floor_row(site, x, floor, w, TileKind::Stone);
    frame(site, x, floor, (w, h), TileKind::Stone, TileKind::AncientBrick);
    site.grid.set(x + 2, floor - 1, TileKind::Anvil);
    site.grid.set(x + w - 2, floor - 1, TileKind::IronOre);
    site.grid.set(x + w - 2, floor - 2, TileKind::Torch);
    site.spawn_villager(VillagerJob::Blacksmith, x + 5, floor - 2);
}

fn library(site: &mut Site<'_>, x: i32, floor: i32) {
    let (w, h) = (Building::Library.width(), Building::Library.height());
    floor_row(site, x, floor, w, TileKind::Stone);
    frame(site, x, floor, (w, h), TileKind::Wood, TileKind::Plank);
    for (dx, dy) in [(2, 1), (2, 2), (3, 1), (w - 3, 1), (w - 3, 2)] {
        site.grid.set(x + dx, floor - dy, TileKind::Bookshelf);
    }
    site.grid.set(x + w / 2, floor - 1, TileKind::Lectern);
    site.grid.set(x + w / 2, floor - 2, TileKind::Torch);
    door(site, x, floor);
    site.spawn_villager(VillagerJob::Librarian, x + w / 2, floor - 2);
}
