/// Names and personalities drawn when a villager spawns.
pub trait NpcOracle: Send + Sync {
    fn names(&self) -> Vec<String>;

    fn personalities(&self) -> Vec<String>;
}

/// Fallbacks used when a roster list is empty.
pub const FALLBACK_NAME: &str = "Stranger";
pub const FALLBACK_PERSONALITY: &str = "Stoic and brief";
