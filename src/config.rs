use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::game::{FailurePolicy, GameConfig};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    /// Cards per round (2 for the easy tier, 3 for standard)
    pub choice_count: usize,
    /// Round clock budget in whole seconds
    pub round_secs: u32,
    pub failure_policy: FailurePolicy,
    /// Keep the target visible during the round (practice aid)
    pub peek: bool,
    pub sound: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            choice_count: 3,
            round_secs: 10,
            failure_policy: FailurePolicy::Terminal,
            peek: false,
            sound: true,
        }
    }
}

impl From<&Config> for GameConfig {
    fn from(cfg: &Config) -> Self {
        Self {
            choice_count: cfg.choice_count,
            round_secs: cfg.round_secs,
            failure_policy: cfg.failure_policy,
            peek: cfg.peek,
        }
    }
}

pub trait ConfigStore {
    fn load(&self) -> Config;
    fn save(&self, cfg: &Config) -> std::io::Result<()>;
}

#[derive(Debug, Clone)]
pub struct FileConfigStore {
    path: PathBuf,
}

impl FileConfigStore {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        let path = if let Some(pd) = ProjectDirs::from("", "", "intuit") {
            pd.config_dir().join("config.json")
        } else {
            PathBuf::from("intuit_config.json")
        };
        Self { path }
    }

    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
        }
    }
}

impl Default for FileConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigStore for FileConfigStore {
    fn load(&self) -> Config {
        if let Ok(bytes) = fs::read(&self.path) {
            if let Ok(cfg) = serde_json::from_slice::<Config>(&bytes) {
                return cfg;
            }
        }
        Config::default()
    }

    fn save(&self, cfg: &Config) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_vec_pretty(cfg).unwrap_or_default();
        fs::write(&self.path, data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn roundtrip_default_config() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        let store = FileConfigStore::with_path(&path);
        let cfg = Config::default();
        store.save(&cfg).unwrap();
        let loaded = store.load();
        assert_eq!(cfg, loaded);
    }

    #[test]
    fn save_and_load_custom_config() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        let store = FileConfigStore::with_path(&path);
        let cfg = Config {
            choice_count: 2,
            round_secs: 15,
            failure_policy: FailurePolicy::Recoverable,
            peek: true,
            sound: false,
        };
        store.save(&cfg).unwrap();
        let loaded = store.load();
        assert_eq!(cfg, loaded);
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempdir().unwrap();
        let store = FileConfigStore::with_path(dir.path().join("nope.json"));
        assert_eq!(store.load(), Config::default());
    }

    #[test]
    fn policy_serializes_lowercase() {
        let cfg = Config {
            failure_policy: FailurePolicy::Recoverable,
            ..Config::default()
        };
        let json = serde_json::to_string(&cfg).unwrap();
        assert!(json.contains("\"recoverable\""));
    }

    #[test]
    fn game_config_mirrors_settings() {
        let cfg = Config {
            choice_count: 2,
            round_secs: 8,
            failure_policy: FailurePolicy::Recoverable,
            peek: true,
            sound: true,
        };
        let game_cfg = GameConfig::from(&cfg);
        assert_eq!(game_cfg.choice_count, 2);
        assert_eq!(game_cfg.round_secs, 8);
        assert_eq!(game_cfg.failure_policy, FailurePolicy::Recoverable);
        assert!(game_cfg.peek);
    }
}
