use std::collections::BTreeMap;
use std::sync::RwLock;

use super::SaveRepository;
use super::error::{RepositoryError, Result};

/// In-memory implementation of [`SaveRepository`].
#[derive(Default)]
pub struct InMemorySaveRepository {
    entries: RwLock<BTreeMap<String, String>>,
}

impl InMemorySaveRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SaveRepository for InMemorySaveRepository {
    fn put(&self, key: &str, value: &str) -> Result<()> {
        let mut entries = self
            .entries
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        entries.insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn get(&self, key: &str) -> Result<Option<String>> {
        let entries = self
            .entries
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(entries.get(key).cloned())
    }

    fn delete(&self, key: &str) -> Result<()> {
        let mut entries = self
            .entries
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        entries.remove(key);
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>> {
        let entries = self
            .entries
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(entries.keys().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn put_replaces_previous_value() {
        let repo = InMemorySaveRepository::new();
        repo.put("slot", "one").unwrap();
        repo.put("slot", "two").unwrap();
        assert_eq!(repo.get("slot").unwrap().as_deref(), Some("two"));
        assert_eq!(repo.keys().unwrap(), vec!["slot".to_string()]);

        repo.delete("slot").unwrap();
        assert!(!repo.contains("slot").unwrap());
    }
}
