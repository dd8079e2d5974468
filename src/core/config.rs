//! Configuration management with layered hierarchy

use serde::Deserialize;
use std::path::PathBuf;

use crate::core::engine::SelectionPolicy;
use crate::core::Project;

/// mcfg configuration with layered hierarchy
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Catalog database path; relative paths resolve against the project root
    pub database: Option<PathBuf>,

    /// Treatment of repeated option ids
    pub selection_policy: Option<SelectionPolicy>,

    /// Default output format for `mcfg bom`
    pub default_format: Option<String>,

    /// Currency symbol for human-readable output
    pub currency_symbol: Option<String>,
}

impl Config {
    /// Load configuration from all sources, merging in priority order
    pub fn load_for(project: Option<&Project>) -> Self {
        let mut config = Config::default();

        // 1. Built-in defaults (already in Default impl)

        // 2. Global user config (~/.config/mcfg/config.yaml)
        if let Some(global_path) = Self::global_config_path() {
            if let Some(global) = Self::read_file(&global_path) {
                config.merge(global);
            }
        }

        // 3. Project config (.mcfg/config.yaml)
        if let Some(project) = project {
            if let Some(project_config) = Self::read_file(&project.config_file()) {
                config.merge(project_config);
            }
        }

        // 4. Environment variables
        config.apply_env(|key| std::env::var(key).ok());

        config
    }

    fn read_file(path: &std::path::Path) -> Option<Config> {
        if !path.exists() {
            return None;
        }
        let contents = std::fs::read_to_string(path).ok()?;
        match serde_yml::from_str::<Config>(&contents) {
            Ok(config) => Some(config),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "ignoring unreadable config");
                None
            }
        }
    }

    fn apply_env(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(database) = var("MCFG_DATABASE").filter(|v| !v.is_empty()) {
            self.database = Some(PathBuf::from(database));
        }
        if let Some(policy) = var("MCFG_SELECTION_POLICY") {
            match policy.parse() {
                Ok(policy) => self.selection_policy = Some(policy),
                Err(e) => tracing::warn!("MCFG_SELECTION_POLICY ignored: {}", e),
            }
        }
    }

    /// Get the path to the global config file
    fn global_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "mcfg")
            .map(|dirs| dirs.config_dir().join("config.yaml"))
    }

    /// Merge another config into this one (other takes precedence)
    fn merge(&mut self, other: Config) {
        if other.database.is_some() {
            self.database = other.database;
        }
        if other.selection_policy.is_some() {
            self.selection_policy = other.selection_policy;
        }
        if other.default_format.is_some() {
            self.default_format = other.default_format;
        }
        if other.currency_symbol.is_some() {
            self.currency_symbol = other.currency_symbol;
        }
    }

    pub fn selection_policy(&self) -> SelectionPolicy {
        self.selection_policy.unwrap_or_default()
    }

    pub fn currency_symbol(&self) -> &str {
        self.currency_symbol.as_deref().unwrap_or("$")
    }
}
