mod types;

pub use types::*;

use crate::{Error, Result};
use std::{env, path::Path};
use tracing::debug;

pub const CONFIG_PATH_ENV: &str = "CONFIG_PATH";
pub const API_KEY_ENV: &str = "API_KEY";
const DEFAULT_CONFIG_PATH: &str = "config.yaml";

/// Loads the configuration and resolves the API credential from the process
/// environment. A missing credential is fatal.
pub async fn load() -> Result<Config> {
    let explicit_path = env::var(CONFIG_PATH_ENV).ok();
    let mut config = load_from(explicit_path.as_deref()).await?;
    apply_api_key(&mut config, env::var(API_KEY_ENV).ok())?;
    Ok(config)
}

/// Reads the YAML file at `path`, or at `config.yaml` when no path is given.
/// Only the implicit default file may be absent; defaults are used then.
pub async fn load_from(path: Option<&str>) -> Result<Config> {
    let config_path = path.unwrap_or(DEFAULT_CONFIG_PATH);

    if path.is_none() && !Path::new(config_path).exists() {
        debug!("No {} found, using built-in defaults", config_path);
        return Ok(Config::default());
    }

    debug!("Loading configuration from: {}", config_path);

    let config_str = tokio::fs::read_to_string(config_path).await?;
    let config: Config = serde_yaml::from_str(&config_str)?;

    Ok(config)
}

/// Environment value wins over the file; a blank result is a configuration error.
pub fn apply_api_key(config: &mut Config, env_value: Option<String>) -> Result<()> {
    if let Some(key) = env_value.filter(|k| !k.trim().is_empty()) {
        config.llm.api_key = key;
    }

    if config.llm.api_key.trim().is_empty() {
        return Err(Error::config(format!(
            "{} environment variable not set",
            API_KEY_ENV
        )));
    }

    Ok(())
}
