//! File-backed [`SaveRepository`].

use std::fs;
use std::path::{Path, PathBuf};

use super::SaveRepository;
use super::error::{RepositoryError, Result};

const EXTENSION: &str = "save.json";

/// Stores each key as `{key}.save.json` under a base directory.
///
/// Writes go to a temporary sibling first and are renamed over the target,
/// so a crash mid-write never leaves a truncated save behind.
pub struct FileSaveRepository {
    base_dir: PathBuf,
}

impl FileSaveRepository {
    /// Creates the repository, creating `base_dir` if needed.
    pub fn new(base_dir: impl AsRef<Path>) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        fs::create_dir_all(&base_dir)?;
        Ok(Self { base_dir })
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    fn path(&self, key: &str) -> Result<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(RepositoryError::InvalidKey(key.to_owned()));
        }
        Ok(self.base_dir.join(format!("{key}.{EXTENSION}")))
    }
}

impl SaveRepository for FileSaveRepository {
    fn put(&self, key: &str, value: &str) -> Result<()> {
        let path = self.path(key)?;
        let temp_path = path.with_extension("tmp");

        fs::write(&temp_path, value)?;
        fs::rename(&temp_path, &path)?;

        tracing::debug!("Saved '{}' to {}", key, path.display());
        Ok(())
    }

    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.path(key)?;
        if !path.exists() {
            return Ok(None);
        }
        let value = fs::read_to_string(&path)?;
        tracing::debug!("Loaded '{}' from {}", key, path.display());
        Ok(Some(value))
    }

    fn delete(&self, key: &str) -> Result<()> {
        let path = self.path(key)?;
        if path.exists() {
            fs::remove_file(&path)?;
            tracing::debug!("Deleted '{}'", key);
        }
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>> {
        let suffix = format!(".{EXTENSION}");
        let mut keys = Vec::new();
        for entry in fs::read_dir(&self.base_dir)? {
            let path = entry?.path();
            if let Some(key) = path
                .file_name()
                .and_then(|s| s.to_str())
                .and_then(|name| name.strip_suffix(&suffix))
            {
                keys.push(key.to_owned());
            }
        }
        keys.sort_unstable();
        Ok(keys)
    }
}
