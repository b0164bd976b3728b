use std::collections::BTreeSet;

use crate::world::TileKind;

use super::entity::EntityKind;

/// Column indices of generated structures.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct StructureLocations {
    pub ruins: Vec<i32>,
    pub factories: Vec<i32>,
    pub labs: Vec<i32>,
    pub observatories: Vec<i32>,
    pub villages: Vec<i32>,
    pub vault: Option<i32>,
}

/// Long-lived progression record.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ProgressState {
    pub defeated: BTreeSet<EntityKind>,
    pub sky_island_spawned: bool,
}

impl ProgressState {
    /// Boss kills that open the sky island.
    pub const UNLOCK_REQUIREMENTS: [EntityKind; 3] = [
        EntityKind::Guardian,
        EntityKind::Sentry,
        EntityKind::MechaRex,
    ];

    /// Records a defeat; returns true the first time a kind is recorded.
    pub fn record_defeat(&mut self, kind: EntityKind) -> bool {
        self.defeated.insert(kind)
    }

    pub fn unlock_ready(&self) -> bool {
        !self.sky_island_spawned
            && Self::UNLOCK_REQUIREMENTS
                .iter()
                .all(|kind| self.defeated.contains(kind))
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SessionStatus {
    #[default]
    Running,
    GameOver,
    GameWon,
}

impl SessionStatus {
    pub fn is_over(self) -> bool {
        self != Self::Running
    }
}

/// Progress against the tile currently under the pointer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MiningState {
    pub x: i32,
    pub y: i32,
    /// Kind of the tile when mining started.
    pub tile: TileKind,
    pub progress: u32,
    pub required: u32,
}

impl MiningState {
    /// `None` for unbreakable tiles. Creative mining breaks anything else in
    /// one tick.
    pub fn new(x: i32, y: i32, tile: TileKind, creative: bool) -> Option<Self> {
        let points = tile.hardness().ticks_to_break(1)?;
        Some(Self {
            x,
            y,
            tile,
            progress: 0,
            required: if creative { 1 } else { points },
        })
    }

    pub fn targets(&self, x: i32, y: i32, tile: TileKind) -> bool {
        self.x == x && self.y == y && self.tile == tile
    }

    /// Adds one tick of mining; returns true when the tile breaks.
    pub fn advance(&mut self, power: u32) -> bool {
        self.progress = self.progress.saturating_add(power.max(1));
        self.progress >= self.required
    }
}

/// Keeps the mining target in sync with the pointer: progress carries over
/// only while the same tile, unchanged, stays targeted.
pub fn retarget(current: Option<MiningState>, x: i32, y: i32, tile: TileKind, creative: bool) -> Option<MiningState> {
    match current {
        Some(state) if state.targets(x, y, tile) => Some(state),
        _ => MiningState::new(x, y, tile, creative),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unlock_needs_all_three_kills() {
        let mut progress = ProgressState::default();
        progress.record_defeat(EntityKind::Guardian);
        progress.record_defeat(EntityKind::Sentry);
        progress.record_defeat(EntityKind::MechaBear);
        assert!(!progress.unlock_ready());
        progress.record_defeat(EntityKind::MechaRex);
        assert!(progress.unlock_ready());
        progress.sky_island_spawned = true;
        assert!(!progress.unlock_ready());
    }

    #[test]
    fn defeats_are_recorded_once() {
        let mut progress = ProgressState::default();
        assert!(progress.record_defeat(EntityKind::Pterosaur));
        assert!(!progress.record_defeat(EntityKind::Pterosaur));
    }

    #[test]
    fn stone_breaks_after_exactly_forty_five_ticks_at_power_two() {
        let mut mining = retarget(None, 3, 4, TileKind::Stone, false);
        let mut ticks = 0;
        loop {
            ticks += 1;
            mining = retarget(mining, 3, 4, TileKind::Stone, false);
            let Some(state) = mining.as_mut() else {
                panic!("stone should be mineable");
            };
            if state.advance(2) {
                break;
            }
        }
        assert_eq!(ticks, 45);
    }

    #[test]
    fn progress_is_monotonic_and_resets_on_retarget() {
        let dirt = TileKind::Dirt;
        let mut mining = retarget(None, 0, 0, dirt, false);
        let mut last = 0;
        for _ in 0..10 {
            mining = retarget(mining, 0, 0, dirt, false);
            if let Some(state) = mining.as_mut() {
                state.advance(1);
                assert!(state.progress > last);
                last = state.progress;
            }
        }
        mining = retarget(mining, 1, 0, dirt, false);
        assert_eq!(mining.map(|m| m.progress), Some(0));
    }

    #[test]
    fn bedrock_is_never_a_target() {
        assert!(MiningState::new(0, 0, TileKind::Bedrock, true).is_none());
    }

    #[test]
    fn replaced_tile_restarts_progress() {
        let mut mining = retarget(None, 2, 2, TileKind::Stone, false);
        for _ in 0..30 {
            mining = retarget(mining, 2, 2, TileKind::Stone, false);
            if let Some(state) = mining.as_mut() {
                state.advance(1);
            }
        }
        assert_eq!(mining.map(|m| m.progress), Some(30));

        // Blasted away and rebuilt with a softer block in the same cell.
        mining = retarget(mining, 2, 2, TileKind::Dirt, false);
        let Some(state) = mining else {
            panic!("dirt should be mineable");
        };
        assert_eq!(state.progress, 0);
        assert_eq!(state.tile, TileKind::Dirt);
        assert_eq!(Some(state.required), TileKind::Dirt.hardness().ticks_to_break(1));
    }
}
