//! Project discovery and structure

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Name of the per-project directory
pub const PROJECT_DIR: &str = ".mcfg";

/// Represents a configurator project
#[derive(Debug)]
pub struct Project {
    /// Root directory of the project (parent of .mcfg/)
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

    /// Create a new project at the given path
    pub fn init(path: &Path) -> Result<Self, ProjectError> {
        let root = Self::prepare_root(path)?;
        if root.join(PROJECT_DIR).exists() {
            return Err(ProjectError::AlreadyExists(root));
        }
        Self::write_skeleton(root)
    }

    /// Initialize even if .mcfg/ exists, rewriting the default config
    ///
    /// An existing catalog database is left alone.
    pub fn init_force(path: &Path) -> Result<Self, ProjectError> {
        let root = Self::prepare_root(path)?;
        Self::write_skeleton(root)
    }

    fn prepare_root(path: &Path) -> Result<PathBuf, ProjectError> {
        std::fs::create_dir_all(path).map_err(|e| ProjectError::IoError(e.to_string()))?;
        Ok(path.canonicalize().unwrap_or_else(|_| path.to_path_buf()))
    }

    fn write_skeleton(root: PathBuf) -> Result<Self, ProjectError> {
        let dir = root.join(PROJECT_DIR);
        std::fs::create_dir_all(&dir).map_err(|e| ProjectError::IoError(e.to_string()))?;

        std::fs::write(dir.join("config.yaml"), Self::default_config())
            .map_err(|e| ProjectError::IoError(e.to_string()))?;

        Ok(Self { root })
    }

    fn default_config() -> &'static str {
        r#"# mcfg project configuration

# Catalog database, relative to the project root
# database: .mcfg/catalog.db

# How repeated option ids are counted (additive, distinct)
# selection_policy: additive

# Default output format for `mcfg bom` (auto, md, csv, html, json, yaml, tsv)
# default_format: auto

# Currency symbol for terminal and HTML output
# currency_symbol: "$"
"#
    }

    /// Get the project root directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Get the .mcfg configuration directory
    pub fn config_dir(&self) -> PathBuf {
        self.root.join(PROJECT_DIR)
    }

    /// Path of the project config file
    pub fn config_file(&self) -> PathBuf {
        self.config_dir().join("config.yaml")
    }
}

/// Errors that can occur during project operations
#[derive(Debug, Error)]
pub enum ProjectError {
    #[error("not an mcfg project (searched from {searched_from:?}). Run 'mcfg init' to create one.")]
    NotFound { searched_from: PathBuf },

    #[error("mcfg project already exists at {0:?}")]
    AlreadyExists(PathBuf),

    #[error("IO error: {0}")]
    IoError(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_project_init_creates_structure() {
        let tmp = tempdir().unwrap();
        let project = Project::init(tmp.path()).unwrap();

        assert!(project.config_dir().is_dir());
        assert!(project.config_file().exists());
    }

    #[test]
    fn test_project_init_creates_missing_directory() {
        let tmp = tempdir().unwrap();
        let target = tmp.path().join("new/project");
        let project = Project::init(&target).unwrap();
        assert!(project.config_dir().is_dir());
    }

    #[test]
    fn test_project_init_fails_if_exists() {
        let tmp = tempdir().unwrap();
        Project::init(tmp.path()).unwrap();

        let err = Project::init(tmp.path()).unwrap_err();
        assert!(matches!(err, ProjectError::AlreadyExists(_)));
    }

    #[test]
    fn test_project_init_force_keeps_other_files() {
        let tmp = tempdir().unwrap();
        let project = Project::init(tmp.path()).unwrap();
        let db = project.config_dir().join("catalog.db");
        std::fs::write(&db, b"data").unwrap();

        Project::init_force(tmp.path()).unwrap();
        assert_eq!(std::fs::read(&db).unwrap(), b"data");
    }

    #[test]
    fn test_project_discover_finds_mcfg_dir() {
        let tmp = tempdir().unwrap();
        Project::init(tmp.path()).unwrap();

        let subdir = tmp.path().join("some/nested/dir");
        std::fs::create_dir_all(&subdir).unwrap();

        let project = Project::discover_from(&subdir).unwrap();
        assert_eq!(
            project.root().canonicalize().unwrap(),
            tmp.path().canonicalize().unwrap()
        );
    }

    #[test]
    fn test_project_discover_fails_without_mcfg_dir() {
        let tmp = tempdir().unwrap();
        let err = Project::discover_from(tmp.path()).unwrap_err();
        assert!(matches!(err, ProjectError::NotFound { .. }));
    }
}
