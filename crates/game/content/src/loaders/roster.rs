//! Villager roster loader.

use std::path::Path;

use game_core::env::RosterSnapshot;

use crate::loaders::{LoadResult, parse_ron, read_file};

/// Loader for villager names and personalities (`roster.ron`).
pub struct RosterLoader;

impl RosterLoader {
    pub fn load(path: &Path) -> LoadResult<RosterSnapshot> {
        let content = read_file(path)?;
        parse_ron(&content, "roster")
    }
}
