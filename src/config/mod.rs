mod types;

pub use types::*;

use crate::{Error, Result};
use std::{env, io::ErrorKind, path::Path};
use tracing::debug;

pub const API_KEY_ENV: &str = "OPENAI_API_KEY";
pub const BASE_URL_ENV: &str = "OPENAI_BASE_URL";
pub const HOST_ENV: &str = "RELAY_HOST";
pub const PORT_ENV: &str = "RELAY_PORT";

/// Loads `.env`, then the optional YAML file at `$CONFIG_PATH`, then applies
/// environment overrides.
pub async fn load() -> Result<Config> {
    if let Ok(path) = dotenvy::dotenv() {
        debug!("Loaded environment from: {}", path.display());
    }

    let config_path = env::var("CONFIG_PATH").unwrap_or_else(|_| "config.yaml".to_string());

    let mut config = load_file(&config_path).await?;
    config.apply_overrides(|key| env::var(key).ok())?;

    Ok(config)
}

/// Reads a YAML config file. A missing or empty file yields the defaults.
pub async fn load_file(path: impl AsRef<Path>) -> Result<Config> {
    let path = path.as_ref();
    debug!("Loading configuration from: {}", path.display());

    let config_str = match tokio::fs::read_to_string(path).await {
        Ok(contents) => contents,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!("No configuration file at {}, using defaults", path.display());
            return Ok(Config::default());
        }
        Err(e) => return Err(e.into()),
    };

    if config_str.trim().is_empty() {
        return Ok(Config::default());
    }

    Ok(serde_yaml::from_str(&config_str)?)
}

impl Config {
    /// Applies environment overrides, looked up through `lookup` so callers
    /// can substitute the process environment.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(api_key) = lookup(API_KEY_ENV) {
            self.llm.api_key = Some(api_key);
        }
        if let Some(base_url) = lookup(BASE_URL_ENV) {
            self.llm.base_url = base_url;
        }
        if let Some(host) = lookup(HOST_ENV) {
            self.server.host = host;
        }
        if let Some(port) = lookup(PORT_ENV) {
            self.server.port = port
                .trim()
                .parse()
                .map_err(|_| Error::config(format!("Invalid {PORT_ENV}: '{port}'")))?;
        }
        Ok(())
    }
}
