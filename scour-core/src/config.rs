//! Cleaner definitions loaded from TOML.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::{Result, ScourError};

/// Built-in definitions shipped with the crate
pub const DEFAULT_CLEANERS: &str = include_str!("../default_cleaners.toml");

/// Set of cleaner definitions
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CleanerConfig {
    #[serde(default, rename = "cleaner")]
    pub cleaners: Vec<CleanerDef>,
}

/// One cleaner (operation) and its options
#[derive(Debug, Clone, Deserialize)]
pub struct CleanerDef {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Process names that must not be alive while deleting
    #[serde(default)]
    pub running: Vec<String>,
    #[serde(default, rename = "option")]
    pub options: Vec<OptionDef>,
}

/// A toggleable part of a cleaner
#[derive(Debug, Clone, Deserialize)]
pub struct OptionDef {
    pub id: String,
    pub label: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Enabled unless the caller says otherwise
    #[serde(default)]
    pub default: bool,
    /// Glob patterns of files or directories to clean
    #[serde(default)]
    pub paths: Vec<String>,
    /// Also remove directories emptied by the walk
    #[serde(default)]
    pub remove_dirs: bool,
    /// Glob patterns of SQLite databases to compact
    #[serde(default)]
    pub vacuum: Vec<String>,
}

impl CleanerConfig {
    /// Parse and validate definitions from TOML text
    pub fn parse(text: &str) -> Result<Self> {
        let config: CleanerConfig =
            toml::from_str(text).map_err(|e| ScourError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// The definitions embedded in the crate
    pub fn builtin() -> Result<Self> {
        Self::parse(DEFAULT_CLEANERS)
    }

    /// Load definitions from a file
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Self::parse(&text).map_err(|e| match e {
            ScourError::Config(msg) => ScourError::Config(format!("{}: {}", path.display(), msg)),
            other => other,
        })
    }

    /// Default user file: <config_dir>/scour/cleaners.toml
    pub fn user_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("scour").join("cleaners.toml"))
    }

    /// Explicit file if given, else the user file if present, else built-ins
    pub fn resolve(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        match Self::user_path() {
            Some(path) if path.exists() => Self::load(&path),
            _ => Self::builtin(),
        }
    }

    pub fn get(&self, id: &str) -> Option<&CleanerDef> {
        self.cleaners.iter().find(|c| c.id == id)
    }

    fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for cleaner in &self.cleaners {
            if cleaner.id.trim().is_empty() {
                return Err(ScourError::Config("cleaner with empty id".to_string()));
            }
            if !seen.insert(cleaner.id.as_str()) {
                return Err(ScourError::Config(format!(
                    "duplicate cleaner id '{}'",
                    cleaner.id
                )));
            }

            let mut options = HashSet::new();
            for option in &cleaner.options {
                if option.id.trim().is_empty() {
                    return Err(ScourError::Config(format!(
                        "cleaner '{}' has an option with empty id",
                        cleaner.id
                    )));
                }
                if !options.insert(option.id.as_str()) {
                    return Err(ScourError::Config(format!(
                        "cleaner '{}' has duplicate option '{}'",
                        cleaner.id, option.id
                    )));
                }
            }
        }
        Ok(())
    }
}

impl CleanerDef {
    /// (option, enabled) pairs as declared
    pub fn default_options(&self) -> Vec<(String, bool)> {
        self.options
            .iter()
            .map(|o| (o.id.clone(), o.default))
            .collect()
    }
}
