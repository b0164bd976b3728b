//! Scripted dialogue loader.

use std::path::Path;

use crate::dialogue::DialogueLines;
use crate::loaders::{LoadResult, parse_ron, read_file};

/// Loader for scripted dialogue lines (`dialogue.ron`).
pub struct DialogueLoader;

impl DialogueLoader {
    pub fn load(path: &Path) -> LoadResult<DialogueLines> {
        let content = read_file(path)?;
        parse_ron(&content, "dialogue")
    }
}
