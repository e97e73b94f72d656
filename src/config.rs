use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::database::DEFAULT_DATABASE_PATH;

pub const DEFAULT_CONFIG_FILE: &str = "taskboard.yaml";

/// Settings read from `taskboard.yaml`; command line flags take precedence.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    /// SQLite file path, or `:memory:`
    pub database: String,
    pub log_level: String,
    /// Slug of the workspace commands act on when none is given.
    pub default_workspace: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database: DEFAULT_DATABASE_PATH.to_string(),
            log_level: "info".to_string(),
            default_workspace: None,
        }
    }
}

impl AppConfig {
    /// Load `path`, or `taskboard.yaml` from the working directory when it exists.
    ///
    /// An explicitly named file must exist; a missing default file yields the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    Self::from_file(default_path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: AppConfig = serde_yaml::from_str(&content)
            .with_context(|| format!("Invalid config file {}", path.display()))?;
        Ok(config)
    }

    pub fn with_overrides(
        mut self,
        database: Option<String>,
        log_level: Option<String>,
        workspace: Option<String>,
    ) -> Self {
        if let Some(database) = database {
            self.database = database;
        }
        if let Some(log_level) = log_level {
            self.log_level = log_level;
        }
        if workspace.is_some() {
            self.default_workspace = workspace;
        }
        self
    }
}
