//! Configuration management with layered hierarchy

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::core::project::{Project, DEFAULT_DATA_DIR};

/// Configuration with layered hierarchy
#[derive(Debug, Default, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Directory holding collection files, relative to the project root
    pub data_dir: Option<PathBuf>,

    /// Default output format
    pub default_format: Option<String>,

    /// Ask for confirmation before deleting records
    pub confirm_delete: Option<bool>,
}

/// Keys accepted in config files, with a short description
pub const CONFIG_KEYS: &[(&str, &str)] = &[
    ("data_dir", "Directory holding collection JSON files (default: data)"),
    ("default_format", "Default output format (auto, json, yaml, tsv, csv, md, id)"),
    ("confirm_delete", "Ask before deleting records (default: true)"),
];

impl Config {
    /// Load configuration from all sources, merging in priority order
    pub fn load(project: Option<&Project>) -> Self {
        let mut config = Config::default();

        // 1. Global user config (~/.config/wrec/config.yaml)
        if let Some(global_path) = Self::global_config_path() {
            if let Some(global) = Self::read_file(&global_path) {
                config.merge(global);
            }
        }

        // 2. Project config (.wrec/config.yaml)
        if let Some(project) = project {
            if let Some(project_config) = Self::read_file(&Self::project_config_path(project)) {
                config.merge(project_config);
            }
        }

        // 3. Environment variables
        if let Ok(data_dir) = std::env::var("WREC_DATA_DIR") {
            config.data_dir = Some(PathBuf::from(data_dir));
        }
        if let Ok(format) = std::env::var("WREC_FORMAT") {
            config.default_format = Some(format);
        }

        config
    }

    fn read_file(path: &std::path::Path) -> Option<Config> {
        if !path.exists() {
            return None;
        }
        let contents = std::fs::read_to_string(path).ok()?;
        let has_content = contents
            .lines()
            .map(str::trim)
            .any(|l| !l.is_empty() && !l.starts_with('#'));
        if !has_content {
            return Some(Config::default());
        }
        match serde_yml::from_str::<Config>(&contents) {
            Ok(config) => Some(config),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "ignoring unreadable config file");
                None
            }
        }
    }

    /// Get the path to the global config file
    pub fn global_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "wrec")
            .map(|dirs| dirs.config_dir().join("config.yaml"))
    }

    /// Get the path to a project's config file
    pub fn project_config_path(project: &Project) -> PathBuf {
        project.config_dir().join("config.yaml")
    }

    /// Merge another config into this one (other takes precedence)
    fn merge(&mut self, other: Config) {
        if other.data_dir.is_some() {
            self.data_dir = other.data_dir;
        }
        if other.default_format.is_some() {
            self.default_format = other.default_format;
        }
        if other.confirm_delete.is_some() {
            self.confirm_delete = other.confirm_delete;
        }
    }

    /// Data directory, falling back to the default
    pub fn data_dir(&self) -> PathBuf {
        self.data_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR))
    }

    pub fn confirm_delete(&self) -> bool {
        self.confirm_delete.unwrap_or(true)
    }

    /// Value of a config key as display text
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "data_dir" => Some(self.data_dir().display().to_string()),
            "default_format" => Some(
                self.default_format
                    .clone()
                    .unwrap_or_else(|| "auto".to_string()),
            ),
            "confirm_delete" => Some(self.confirm_delete().to_string()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.data_dir(), PathBuf::from("data"));
        assert!(config.confirm_delete());
        assert_eq!(config.get("default_format").as_deref(), Some("auto"));
        assert!(config.get("editor").is_none());
    }

    #[test]
    fn test_merge_prefers_other() {
        let mut base = Config {
            data_dir: Some(PathBuf::from("a")),
            default_format: Some("json".to_string()),
            confirm_delete: None,
        };
        base.merge(Config {
            data_dir: Some(PathBuf::from("b")),
            default_format: None,
            confirm_delete: Some(false),
        });
        assert_eq!(base.data_dir(), PathBuf::from("b"));
        assert_eq!(base.default_format.as_deref(), Some("json"));
        assert!(!base.confirm_delete());
    }

    #[test]
    fn test_project_config_is_read() {
        let tmp = tempdir().unwrap();
        let project = Project::init(tmp.path()).unwrap();
        std::fs::write(
            Config::project_config_path(&project),
            "data_dir: records\nconfirm_delete: false\n",
        )
        .unwrap();

        let config = Config::read_file(&Config::project_config_path(&project)).unwrap();
        assert_eq!(config.data_dir(), PathBuf::from("records"));
        assert!(!config.confirm_delete());
    }

    #[test]
    fn test_commented_default_config_parses() {
        let tmp = tempdir().unwrap();
        let project = Project::init(tmp.path()).unwrap();
        let parsed = Config::read_file(&Config::project_config_path(&project)).unwrap();
        assert!(parsed.data_dir.is_none());
        assert!(parsed.default_format.is_none());
    }
}
