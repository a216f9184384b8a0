// configuration - optional toml file plus environment overrides

use std::env;
use std::fs;

use anyhow::{Context, Result};
use serde::Deserialize;

/// read from the working directory when present
pub const CONFIG_FILE: &str = "refactor-wizard.toml";

/// seed shown in the input box when nothing else is configured
const DEFAULT_QUERY: &str = "ge";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// initial text of the pair prompt
    pub default_query: Option<String>,
    /// ask before walking a directory with uncommitted git changes
    pub confirm_directory: Option<bool>,
}

impl Config {
    /// load `refactor-wizard.toml` from the working directory, if present
    pub fn load() -> Result<Config> {
        Self::load_from(CONFIG_FILE)
    }

    pub fn load_from(path: &str) -> Result<Config> {
        match fs::read_to_string(path) {
            Ok(raw) => toml::from_str(&raw).with_context(|| format!("failed to parse {path}")),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Config::default()),
            Err(err) => Err(err).with_context(|| format!("failed to read {path}")),
        }
    }

    /// input-box seed: env override, then config file, then the built-in seed
    pub fn default_query(&self) -> String {
        self.resolve_default_query(env::var("REFACTOR_WIZARD_DEFAULT_QUERY").ok())
    }

    fn resolve_default_query(&self, env_value: Option<String>) -> String {
        env_value
            .filter(|value| !value.is_empty())
            .or_else(|| self.default_query.clone())
            .unwrap_or_else(|| DEFAULT_QUERY.to_string())
    }

    pub fn confirm_directory(&self) -> bool {
        self.confirm_directory.unwrap_or(true)
    }
}
