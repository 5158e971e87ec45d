//! Configuration utilities - loading and access helpers
//!
//! Settings come from three layers, later ones winning:
//! 1. Defaults embedded in the schemas
//! 2. `config.toml` (data directory, or `--settings <PATH>`)
//! 3. Environment variables, after loading an optional `.env`
use super::schemas::Config;
use crate::logger::{self, LogTag};
use once_cell::sync::OnceCell;
use std::path::Path;
use std::sync::RwLock;

/// Global configuration instance
pub static CONFIG: OnceCell<RwLock<Config>> = OnceCell::new();

/// Overrides `gateway.url`
pub const ENV_GATEWAY_URL: &str = "POOLTOOLS_GATEWAY_URL";
/// Overrides `gateway.timeout_secs`
pub const ENV_GATEWAY_TIMEOUT: &str = "POOLTOOLS_GATEWAY_TIMEOUT_SECS";
/// Overrides `network.default_network`
pub const ENV_NETWORK: &str = "POOLTOOLS_NETWORK";

/// Load configuration from a specific file and initialize the global CONFIG
///
/// A missing file is not an error: defaults are used and a warning is logged.
pub fn load_config_from_path(path: &Path) -> Result<(), String> {
    let mut config = if path.is_file() {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config file '{}': {}", path.display(), e))?;
        parse_config(&contents)
            .map_err(|e| format!("Failed to parse config file '{}': {}", path.display(), e))?
    } else {
        logger::warning(
            LogTag::Config,
            &format!("Config file '{}' not found, using default values", path.display()),
        );
        Config::default()
    };

    // A missing .env is the normal case.
    let _ = dotenv::dotenv();
    apply_env_overrides(&mut config, |key| std::env::var(key).ok());

    logger::debug(
        LogTag::Config,
        &format!(
            "Settings loaded: gateway={} timeout={}s default_network={}",
            config.gateway.url, config.gateway.timeout_secs, config.network.default_network
        ),
    );

    CONFIG
        .set(RwLock::new(config))
        .map_err(|_| "Config already initialized".to_string())
}

/// Parse a TOML settings document
pub fn parse_config(contents: &str) -> Result<Config, toml::de::Error> {
    toml::from_str::<Config>(contents)
}

/// Apply environment overrides through `lookup` (usually `std::env::var`)
pub fn apply_env_overrides<F>(config: &mut Config, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

    if let Some(url) = non_empty(ENV_GATEWAY_URL) {
        config.gateway.url = url.trim().to_string();
    }

    if let Some(raw) = non_empty(ENV_GATEWAY_TIMEOUT) {
        match raw.trim().parse::<u64>() {
            Ok(secs) => config.gateway.timeout_secs = secs,
            Err(_) => logger::warning(
                LogTag::Config,
                &format!("Ignoring {}='{}': not a whole number of seconds", ENV_GATEWAY_TIMEOUT, raw),
            ),
        }
    }

    if let Some(network) = non_empty(ENV_NETWORK) {
        config.network.default_network = network.trim().to_string();
    }
}

/// Execute a function with read access to the configuration
///
/// Falls back to defaults when `load_config_from_path()` was never called (library use, tests).
pub fn with_config<F, R>(f: F) -> R
where
    F: FnOnce(&Config) -> R,
{
    let lock = CONFIG.get_or_init(|| RwLock::new(Config::default()));
    match lock.read() {
        Ok(config) => f(&config),
        Err(poisoned) => f(&poisoned.into_inner()),
    }
}

/// Get a clone of the entire configuration, for use across await points
pub fn get_config_clone() -> Config {
    with_config(|cfg| cfg.clone())
}
