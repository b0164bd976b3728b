//! Content factory for building oracles from data files.

use std::path::{Path, PathBuf};

use game_core::ContentSnapshot;
use game_core::env::{ItemsSnapshot, QuestsSnapshot, RosterSnapshot, TablesSnapshot};

use crate::dialogue::DialogueLines;
use crate::loaders::{
    DialogueLoader, ItemLoader, LoadResult, QuestLoader, RosterLoader, TablesLoader, builtin,
};

/// Content factory that loads all game content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── items.ron
/// ├── tables.ron
/// ├── quests.ron
/// ├── roster.ron
/// └── dialogue.ron
/// ```
///
/// Files missing from the directory fall back to the built-in catalogs.
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    fn file(&self, name: &str) -> Option<PathBuf> {
        let path = self.data_dir.join(name);
        path.is_file().then_some(path)
    }

    pub fn load_items(&self) -> LoadResult<ItemsSnapshot> {
        match self.file("items.ron") {
            Some(path) => ItemLoader::load(&path),
            None => Ok(builtin::snapshot()?.items),
        }
    }

    pub fn load_tables(&self) -> LoadResult<TablesSnapshot> {
        match self.file("tables.ron") {
            Some(path) => TablesLoader::load(&path),
            None => Ok(builtin::snapshot()?.tables),
        }
    }

    pub fn load_quests(&self) -> LoadResult<QuestsSnapshot> {
        match self.file("quests.ron") {
            Some(path) => QuestLoader::load(&path),
            None => Ok(builtin::snapshot()?.quests),
        }
    }

    pub fn load_roster(&self) -> LoadResult<RosterSnapshot> {
        match self.file("roster.ron") {
            Some(path) => RosterLoader::load(&path),
            None => Ok(builtin::snapshot()?.roster),
        }
    }

    pub fn load_dialogue(&self) -> LoadResult<DialogueLines> {
        match self.file("dialogue.ron") {
            Some(path) => DialogueLoader::load(&path),
            None => builtin::dialogue(),
        }
    }

    /// Loads every catalog the engine reads.
    pub fn load_snapshot(&self) -> LoadResult<ContentSnapshot> {
        Ok(ContentSnapshot::new(
            self.load_items()?,
            self.load_tables()?,
            self.load_quests()?,
            self.load_roster()?,
        ))
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factory_paths() {
        let factory = ContentFactory::new("/tmp/data");
        assert_eq!(factory.data_dir(), Path::new("/tmp/data"));
    }

    #[test]
    fn missing_directory_falls_back_to_builtin() {
        let factory = ContentFactory::new("/nonexistent/wasteland-data");
        let snapshot = factory.load_snapshot().expect("builtin content loads");
        assert!(!snapshot.items.items.is_empty());
        assert!(!factory.load_dialogue().expect("builtin dialogue").day.is_empty());
    }
}
