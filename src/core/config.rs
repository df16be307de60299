//! Configuration management with layered hierarchy

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Project-level config file, relative to the working directory
pub const PROJECT_CONFIG: &str = ".rtk/config.yaml";

/// RTK configuration with layered hierarchy
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Template data file used when `--file` is not given
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_file: Option<PathBuf>,

    /// Default output format
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_format: Option<String>,

    /// Treat lint warnings as errors in `rtk validate`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strict: Option<bool>,
}

impl Config {
    /// Load configuration from all sources, merging in priority order
    pub fn load() -> Self {
        let mut config = Config::default();

        // 1. Built-in defaults (already in Default impl)

        // 2. Global user config (~/.config/rtk/config.yaml)
        if let Some(global_path) = Self::global_config_path() {
            if let Some(global) = Self::read_file(&global_path) {
                config.merge(global);
            }
        }

        // 3. Project config (.rtk/config.yaml)
        if let Some(project) = Self::read_file(&Self::project_config_path()) {
            config.merge(project);
        }

        // 4. Environment variables
        config.apply_env(|key| std::env::var(key).ok());

        config
    }

    /// Read one config file; missing files are skipped silently, broken ones
    /// with a warning
    pub fn read_file(path: &Path) -> Option<Config> {
        if !path.exists() {
            return None;
        }
        let contents = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "skipping unreadable config file");
                return None;
            }
        };
        match serde_yml::from_str::<Config>(&contents) {
            Ok(config) => {
                debug!(path = %path.display(), "loaded config file");
                Some(config)
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "skipping malformed config file");
                None
            }
        }
    }

    /// Apply `RTK_*` environment overrides through a lookup function
    fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(file) = lookup("RTK_DATA_FILE") {
            self.data_file = Some(PathBuf::from(file));
        }
        if let Some(format) = lookup("RTK_FORMAT") {
            self.default_format = Some(format);
        }
        if let Some(strict) = lookup("RTK_STRICT") {
            match strict.to_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => self.strict = Some(true),
                "0" | "false" | "no" | "off" => self.strict = Some(false),
                other => warn!(value = other, "ignoring unrecognized RTK_STRICT value"),
            }
        }
    }

    /// Get the path to the global config file
    pub fn global_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "rtk")
            .map(|dirs| dirs.config_dir().join("config.yaml"))
    }

    /// Get the path to the project config file
    pub fn project_config_path() -> PathBuf {
        PathBuf::from(PROJECT_CONFIG)
    }

    /// Merge another config into this one (other takes precedence)
    fn merge(&mut self, other: Config) {
        if other.data_file.is_some() {
            self.data_file = other.data_file;
        }
        if other.default_format.is_some() {
            self.default_format = other.default_format;
        }
        if other.strict.is_some() {
            self.strict = other.strict;
        }
    }

    pub fn strict(&self) -> bool {
        self.strict.unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::tempdir;

    #[test]
    fn test_merge_prefers_other() {
        let mut base = Config {
            data_file: Some(PathBuf::from("a.json")),
            default_format: Some("json".into()),
            strict: None,
        };
        base.merge(Config {
            data_file: Some(PathBuf::from("b.json")),
            default_format: None,
            strict: Some(true),
        });
        assert_eq!(base.data_file, Some(PathBuf::from("b.json")));
        assert_eq!(base.default_format.as_deref(), Some("json"));
        assert!(base.strict());
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = [
            ("RTK_DATA_FILE", "/tmp/t.json"),
            ("RTK_FORMAT", "yaml"),
            ("RTK_STRICT", "Yes"),
        ]
        .into_iter()
        .collect();

        let mut config = Config::default();
        config.apply_env(|k| env.get(k).map(|v| v.to_string()));
        assert_eq!(config.data_file, Some(PathBuf::from("/tmp/t.json")));
        assert_eq!(config.default_format.as_deref(), Some("yaml"));
        assert_eq!(config.strict, Some(true));
    }

    #[test]
    fn test_bad_strict_value_ignored() {
        let mut config = Config::default();
        config.apply_env(|k| (k == "RTK_STRICT").then(|| "maybe".to_string()));
        assert_eq!(config.strict, None);
    }

    #[test]
    fn test_read_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "data_file: data/mine.json\nstrict: true\n").unwrap();
        let config = Config::read_file(&path).unwrap();
        assert_eq!(config.data_file, Some(PathBuf::from("data/mine.json")));
        assert_eq!(config.strict, Some(true));

        std::fs::write(&path, "strict: [not, a, bool]\n").unwrap();
        assert!(Config::read_file(&path).is_none());

        assert!(Config::read_file(&dir.path().join("absent.yaml")).is_none());
    }
}
