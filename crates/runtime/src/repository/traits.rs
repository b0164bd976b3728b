use super::error::Result;

/// Key-value string store holding whole save records.
///
/// Keys are save slot names; values are opaque encoded records. Writes
/// replace the previous value wholesale.
pub trait SaveRepository: Send + Sync {
    fn put(&self, key: &str, value: &str) -> Result<()>;

    /// Returns `None` when nothing is stored under `key`.
    fn get(&self, key: &str) -> Result<Option<String>>;

    fn delete(&self, key: &str) -> Result<()>;

    fn keys(&self) -> Result<Vec<String>>;

    fn contains(&self, key: &str) -> Result<bool> {
        Ok(self.get(key)?.is_some())
    }
}
