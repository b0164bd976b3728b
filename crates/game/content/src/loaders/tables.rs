//! Loot table and recipe loader.

use std::path::Path;

use game_core::env::TablesSnapshot;

use crate::loaders::{LoadResult, parse_ron, read_file};

/// Loader for loot tables and recipes (`tables.ron`).
pub struct TablesLoader;

impl TablesLoader {
    pub fn load(path: &Path) -> LoadResult<TablesSnapshot> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    /// Parses the tables. Drop chances must lie in `[0, 1]`.
    pub fn parse(source: &str) -> LoadResult<TablesSnapshot> {
        let tables: TablesSnapshot = parse_ron(source, "tables")?;
        for table in &tables.loot {
            for drop in &table.drops {
                anyhow::ensure!(
                    (0.0..=1.0).contains(&drop.chance),
                    "loot chance {} for {} out of range",
                    drop.chance,
                    table.kind
                );
            }
        }
        Ok(tables)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_core::env::{RecipeId, TablesOracle};
    use game_core::{EntityKind, TileKind};

    #[test]
    fn recipes_and_loot_resolve() {
        let source = r#"(
            loot: [(kind: Deer, drops: [(item: Tile(Wood), count: 1, chance: 0.3)])],
            recipes: [(id: "planks", result: (key: Tile(Plank), count: 4),
                       ingredients: [(key: Tile(Wood), count: 1)])],
        )"#;
        let tables = TablesLoader::parse(source).expect("tables parse");
        assert_eq!(tables.loot(EntityKind::Deer).len(), 1);
        assert!(tables.loot(EntityKind::Villager).is_empty());
        let planks = tables.recipe(&RecipeId::new("planks")).expect("recipe present");
        assert_eq!(planks.station, None);
        assert_eq!(planks.result.key.as_tile(), Some(TileKind::Plank));
    }

    #[test]
    fn impossible_chances_are_rejected() {
        let source = r#"(loot: [(kind: Rat, drops: [(item: Tile(Dirt), count: 1, chance: 1.5)])])"#;
        assert!(TablesLoader::parse(source).is_err());
    }
}
