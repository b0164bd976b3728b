//! Client configuration loaded from the process environment.
use std::env;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use runtime::RuntimeConfig;

/// Settings for a headless session.
#[derive(Clone, Debug)]
pub struct ClientConfig {
    /// World seed; random when unset.
    pub seed: Option<u64>,
    /// Stop after this many ticks; run until the session ends when unset.
    pub ticks: Option<u64>,
    pub tick_rate: u32,
    pub save_data_dir: PathBuf,
    pub log_dir: PathBuf,
    pub session_id: String,
    /// Ticks between autosaves; 0 disables autosave.
    pub autosave_interval: u64,
    /// Directory with content overrides; built-in catalogs otherwise.
    pub content_dir: Option<PathBuf>,
    pub creative: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            seed: None,
            ticks: None,
            tick_rate: 60,
            save_data_dir: data_dir(),
            log_dir: log_dir(),
            session_id: "default".to_owned(),
            autosave_interval: 60 * 60,
            content_dir: None,
            creative: false,
        }
    }
}

impl ClientConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `WASTELAND_SEED` - World seed (default: random)
    /// - `WASTELAND_TICKS` - Ticks to simulate before exiting (default: unlimited)
    /// - `WASTELAND_TICK_RATE` - Ticks per second (default: 60)
    /// - `SAVE_DATA_DIR` - Directory for save files (default: platform data dir)
    /// - `GAME_SESSION_ID` - Save slot and log folder name (default: `session_<unix time>`)
    /// - `AUTOSAVE_INTERVAL` - Ticks between autosaves, 0 to disable (default: 3600)
    /// - `CONTENT_DIR` - Directory with RON content overrides
    /// - `CREATIVE_MODE` - Start in creative mode (default: false)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`ClientConfig::from_env`] with an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let read = |key: &str| lookup(key).map(|v| v.trim().to_owned()).filter(|v| !v.is_empty());
        let mut config = Self::default();

        config.seed = read("WASTELAND_SEED").and_then(|v| v.parse().ok());
        config.ticks = read("WASTELAND_TICKS").and_then(|v| v.parse().ok());
        if let Some(rate) = read("WASTELAND_TICK_RATE").and_then(|v| v.parse::<u32>().ok()) {
            config.tick_rate = rate.max(1);
        }
        if let Some(dir) = read("SAVE_DATA_DIR") {
            config.save_data_dir = PathBuf::from(dir);
        }
        config.session_id = read("GAME_SESSION_ID").unwrap_or_else(|| {
            let timestamp = SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_secs())
                .unwrap_or_default();
            format!("session_{timestamp}")
        });
        if let Some(interval) = read("AUTOSAVE_INTERVAL").and_then(|v| v.parse().ok()) {
            config.autosave_interval = interval;
        }
        config.content_dir = read("CONTENT_DIR").map(PathBuf::from);
        // Setting the variable without a value also counts as enabled.
        config.creative = match lookup("CREATIVE_MODE") {
            Some(value) => value.trim().is_empty() || parse_flag(&value),
            None => false,
        };

        config
    }

    /// Runtime settings for this session. The session id doubles as the
    /// save slot, so restarting with the same id resumes.
    pub fn runtime_config(&self) -> RuntimeConfig {
        RuntimeConfig {
            seed: self.seed,
            tick_rate: self.tick_rate,
            autosave_interval: (self.autosave_interval > 0).then_some(self.autosave_interval),
            save_slot: self
                .session_id
                .chars()
                .map(|c| if c.is_ascii_alphanumeric() || c == '-' { c } else { '_' })
                .collect(),
            resume: true,
            ..RuntimeConfig::default()
        }
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

/// Platform data directory for save files.
///
/// - Linux: `~/.local/share/wasteland`
/// - macOS: `~/Library/Application Support/wasteland`
/// - Windows: `%APPDATA%\wasteland`
/// - Fallback: `./save_data`
pub fn data_dir() -> PathBuf {
    directories::ProjectDirs::from("", "", "wasteland")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("./save_data"))
}

/// Platform cache directory for session logs.
pub fn log_dir() -> PathBuf {
    directories::ProjectDirs::from("", "", "wasteland")
        .map(|dirs| dirs.cache_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("/tmp/wasteland"))
        .join("logs")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> ClientConfig {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ClientConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn variables_override_defaults() {
        let config = config(&[
            ("WASTELAND_SEED", "42"),
            ("WASTELAND_TICKS", "600"),
            ("WASTELAND_TICK_RATE", "0"),
            ("SAVE_DATA_DIR", "/srv/saves"),
            ("GAME_SESSION_ID", "run-7 b"),
            ("AUTOSAVE_INTERVAL", "0"),
            ("CREATIVE_MODE", "yes"),
        ]);
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.ticks, Some(600));
        assert_eq!(config.tick_rate, 1);
        assert_eq!(config.save_data_dir, PathBuf::from("/srv/saves"));
        assert!(config.creative);

        let runtime = config.runtime_config();
        assert_eq!(runtime.save_slot, "run-7_b");
        assert_eq!(runtime.autosave_interval, None);
        assert!(runtime.resume);
    }

    #[test]
    fn unset_and_garbage_values_keep_defaults() {
        let config = config(&[("WASTELAND_SEED", "not-a-number"), ("CREATIVE_MODE", "off")]);
        assert_eq!(config.seed, None);
        assert_eq!(config.tick_rate, 60);
        assert!(!config.creative);
        assert!(config.session_id.starts_with("session_"));
        assert_eq!(config.runtime_config().autosave_interval, Some(3600));
    }
}
