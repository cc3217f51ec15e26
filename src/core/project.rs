//! Project discovery and structure

use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::core::identity::RecordKind;

/// Name of the project marker directory
pub const PROJECT_DIR: &str = ".wrec";

/// Default directory holding collection files, relative to the root
pub const DEFAULT_DATA_DIR: &str = "data";

/// Represents a waste records project
#[derive(Debug, Clone)]
pub struct Project {
    /// Root directory of the project (parent of .wrec/)
    root: PathBuf,
}

impl Project {
    /// Find project root by walking up from the current directory
    pub fn discover() -> Result<Self, ProjectError> {
        let current = std::env::current_dir()
            .map_err(|e| ProjectError::IoError(e.to_string()))?;
        Self::discover_from(&current)
    }

    /// Find project root by walking up from the given directory
    pub fn discover_from(start: &Path) -> Result<Self, ProjectError> {
        let mut current = start
            .canonicalize()
            .map_err(|e| ProjectError::IoError(e.to_string()))?;

        loop {
            if current.join(PROJECT_DIR).is_dir() {
                return Ok(Self { root: current });
            }

            if !current.pop() {
                return Err(ProjectError::NotFound {
                    searched_from: start.to_path_buf(),
                });
            }
        }
    }

    /// Use `--project` if given, otherwise discover from the current directory
    pub fn locate(explicit: Option<&Path>) -> Result<Self, ProjectError> {
        match explicit {
            Some(path) => Self::discover_from(path),
            None => Self::discover(),
        }
    }

    /// Create a new project structure at the given path
    pub fn init(path: &Path) -> Result<Self, ProjectError> {
        let root = path
            .canonicalize()
            .unwrap_or_else(|_| path.to_path_buf());

        if root.join(PROJECT_DIR).exists() {
            return Err(ProjectError::AlreadyExists(root.clone()));
        }

        Self::write_structure(&root)?;
        Ok(Self { root })
    }

    /// Initialize even if .wrec/ exists, resetting its config
    ///
    /// Collection files are never touched.
    pub fn init_force(path: &Path) -> Result<Self, ProjectError> {
        let root = path
            .canonicalize()
            .unwrap_or_else(|_| path.to_path_buf());

        Self::write_structure(&root)?;
        Ok(Self { root })
    }

    fn write_structure(root: &Path) -> Result<(), ProjectError> {
        let project_dir = root.join(PROJECT_DIR);
        std::fs::create_dir_all(&project_dir)
            .map_err(|e| ProjectError::IoError(e.to_string()))?;

        std::fs::write(project_dir.join("config.yaml"), Self::default_config())
            .map_err(|e| ProjectError::IoError(e.to_string()))?;

        std::fs::create_dir_all(root.join(DEFAULT_DATA_DIR))
            .map_err(|e| ProjectError::IoError(e.to_string()))?;

        Ok(())
    }

    fn default_config() -> &'static str {
        r#"# Waste Records Project Configuration

# Directory holding the collection JSON files, relative to the project root
# data_dir: data

# Default output format (auto, json, yaml, tsv, csv, md, id)
# default_format: auto

# Ask before deleting records (pass --yes to skip)
# confirm_delete: true
"#
    }

    /// Get the project root directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Get the .wrec configuration directory
    pub fn config_dir(&self) -> PathBuf {
        self.root.join(PROJECT_DIR)
    }

    /// Default collection file for `kind` under `data_dir`
    ///
    /// `data_dir` may be absolute; relative paths resolve against the root.
    pub fn default_collection_path(&self, data_dir: &Path, kind: RecordKind) -> PathBuf {
        self.root.join(data_dir).join(kind.file_name())
    }
}

/// Errors that can occur during project operations
#[derive(Debug, Error)]
pub enum ProjectError {
    #[error("not a waste records project (searched from {searched_from:?}). Run 'wrec init' to create one.")]
    NotFound { searched_from: PathBuf },

    #[error("waste records project already exists at {0:?}")]
    AlreadyExists(PathBuf),

    #[error("IO error: {0}")]
    IoError(String),
}
