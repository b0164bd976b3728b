//! Item catalog loader.

use std::path::Path;

use game_core::env::ItemsSnapshot;

use crate::loaders::{LoadResult, parse_ron, read_file};

/// Loader for the item catalog (`items.ron`).
pub struct ItemLoader;

impl ItemLoader {
    pub fn load(path: &Path) -> LoadResult<ItemsSnapshot> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    /// Parses a catalog, rejecting duplicate ids.
    pub fn parse(source: &str) -> LoadResult<ItemsSnapshot> {
        let catalog: ItemsSnapshot = parse_ron(source, "item catalog")?;
        let mut seen = std::collections::HashSet::new();
        for item in &catalog.items {
            anyhow::ensure!(seen.insert(&item.id), "duplicate item id '{}'", item.id);
        }
        Ok(catalog)
    }
}
