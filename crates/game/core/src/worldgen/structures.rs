//! Hand-authored structure templates stamped into the grid.
//!
//! Enclosed templates (ruin, lab, factory, vault) clear their footprint plus a
//! one-tile margin before building, so terrain never cuts into a room. Land
//! structures call [`Site::flatten`] first instead.

use crate::config::GameConfig;
use crate::state::{EntityKind, VillagerJob};
use crate::world::{TileGrid, TileKind};

use super::{Footprint, SpawnRequest, StructureKind};

/// Mutable view over the parts of a world under construction that templates
/// write to.
pub struct Site<'w> {
    pub grid: &'w mut TileGrid,
    pub spawns: &'w mut Vec<SpawnRequest>,
    pub footprints: &'w mut Vec<Footprint>,
}

impl Site<'_> {
    fn set(&mut self, x: i32, y: i32, tile: TileKind) {
        self.grid.set(x, y, tile);
    }

    fn hline(&mut self, x0: i32, x1: i32, y: i32, tile: TileKind) {
        for x in x0..=x1 {
            self.set(x, y, tile);
        }
    }

    fn vline(&mut self, x: i32, y0: i32, y1: i32, tile: TileKind) {
        for y in y0..=y1 {
            self.set(x, y, tile);
        }
    }

    fn spawn(&mut self, kind: EntityKind, tx: i32, ty: i32) {
        self.spawns.push(SpawnRequest::at_tile(kind, tx, ty));
    }

    pub(super) fn spawn_villager(&mut self, job: VillagerJob, tx: i32, ty: i32) {
        self.spawns.push(SpawnRequest::at_tile(EntityKind::Villager, tx, ty).with_job(job));
    }

    pub(super) fn record(&mut self, kind: StructureKind, left: i32, top: i32, right: i32, bottom: i32) {
        self.footprints.push(Footprint {
            kind,
            left,
            top,
            right,
            bottom,
        });
    }

    /// Levels `[x, x + width)` (plus a two-column pad) to `floor_y`: the floor
    /// row becomes dirt (concrete is kept), 30 rows above are cleared and the
    /// nine rows below are back-filled wherever they are open.
    pub fn flatten(&mut self, x: i32, width: i32, floor_y: i32) {
        const PAD: i32 = 2;
        const CLEARANCE: i32 = 30;
        const FOUNDATION: i32 = 10;

        for ix in x - PAD..x + width + PAD {
            if !self.grid.in_bounds(ix, floor_y) {
                continue;
            }
            let floor = match self.grid.get(ix, floor_y) {
                TileKind::Concrete => TileKind::Concrete,
                _ => TileKind::Dirt,
            };
            self.set(ix, floor_y, floor);
            for iy in 0..CLEARANCE {
                if floor_y - iy - 1 >= 0 {
                    self.set(ix, floor_y - iy - 1, TileKind::Air);
                }
            }
            for iy in 1..FOUNDATION {
                if matches!(
                    self.grid.get(ix, floor_y + iy),
                    TileKind::Air | TileKind::Grass | TileKind::DeadBush
                ) {
                    self.set(ix, floor_y + iy, TileKind::Dirt);
                }
            }
        }
    }

    /// Clears the room plus margin, then draws a shell of `wall` with the
    /// floor row set to `floor`.
    fn shell(
        &mut self,
        kind: StructureKind,
        x: i32,
        y: i32,
        (w, h): (i32, i32),
        wall: TileKind,
        floor: TileKind,
    ) {
        let half = w / 2;
        for dy in -1..=h {
            self.hline(x - half - 1, x + half + 1, y + dy, TileKind::Air);
        }
        self.hline(x - half, x + half, y + h, floor);
        self.hline(x - half, x + half, y, wall);
        self.vline(x - half, y, y + h, wall);
        self.vline(x + half, y, y + h, wall);
        self.record(kind, x - half - 1, y - 1, x + half + 1, y + h);
    }
}

/// Lowest row a structure floor may occupy.
pub fn safe_bottom(height: usize) -> i32 {
    height as i32 - GameConfig::STRUCTURE_FLOOR_MARGIN
}

pub fn ruin(site: &mut Site<'_>, x: i32, y: i32) {
    let (w, h) = (14, 10);
    site.shell(StructureKind::Ruin, x, y, (w, h), TileKind::AncientBrick, TileKind::AncientBrick);
    site.set(x, y + h - 1, TileKind::Altar);
    site.set(x - 4, y + h - 1, TileKind::Torch);
    site.set(x + 4, y + h - 1, TileKind::Torch);
}

pub fn lab(site: &mut Site<'_>, x: i32, y: i32) {
    let (w, h) = (16, 8);
    site.shell(StructureKind::Lab, x, y, (w, h), TileKind::LabWall, TileKind::LabWall);
    site.set(x, y + h - 1, TileKind::ServerTerminal);
}

/// Two-level hall guarded by a drone and a scrap walker.
pub fn factory(site: &mut Site<'_>, x: i32, y: i32) {
    let (w, h) = (24, 12);
    site.shell(StructureKind::Factory, x, y, (w, h), TileKind::FactoryMetal, TileKind::FactoryMetal);
    site.hline(x - w / 4, x + w / 4, y + h - 4, TileKind::FactoryMetal);
    site.spawn(EntityKind::Drone, x - 4, y + 4);
    site.spawn(EntityKind::ScrapWalker, x + 4, y + h - 2);
    site.set(x, y + h - 2, TileKind::ServerTerminal);
}

/// Sealed vault on a bedrock slab holding the artifact.
pub fn vault(site: &mut Site<'_>, x: i32, y: i32) {
    let (w, h) = (20, 10);
    site.shell(StructureKind::Vault, x, y, (w, h), TileKind::FactoryMetal, TileKind::Bedrock);
    site.set(x, y + h - 1, TileKind::Concrete);
    site.set(x, y + h - 2, TileKind::TeddyBear);
    site.set(x - 5, y + h - 1, TileKind::ServerTerminal);
    site.set(x + 5, y + h - 1, TileKind::ServerTerminal);
}

/// Plank tower rising from `ground`, topped with a telescope and a stargazer.
pub fn observatory(site: &mut Site<'_>, x: i32, ground: i32) {
    let (w, h) = (8, 15);
    let half = w / 2;
    for dy in 0..h {
        site.set(x - half, ground - dy, TileKind::Plank);
        site.set(x + half, ground - dy, TileKind::Plank);
        if dy % 5 == 0 {
            site.hline(x - half + 1, x + half - 1, ground - dy, TileKind::Plank);
        }
    }
    site.hline(x - half, x + half, ground, TileKind::Plank);
    site.hline(x - half - 1, x + half + 1, ground - h, TileKind::AncientBrick);
    site.set(x, ground - h - 1, TileKind::Telescope);
    site.spawn_villager(VillagerJob::Unemployed, x, ground - h - 2);
    site.record(StructureKind::Observatory, x - half - 1, ground - h - 1, x + half + 1, ground);
}
