/// Logger configuration derived from command-line flags
///
/// Held in a process-wide RwLock; `init()` replaces it once the arguments are known.
use super::levels::LogLevel;
use super::tags::LogTag;
use crate::arguments::get_cmd_args;
use once_cell::sync::Lazy;
use parking_lot::RwLock;
use std::collections::HashSet;

#[derive(Debug, Clone)]
pub struct LoggerConfig {
    /// Highest level that is printed (Error is always printed)
    pub min_level: LogLevel,
    /// Tags with `--debug-<key>` enabled
    pub debug_tags: HashSet<String>,
    /// Tags with `--verbose-<key>` enabled
    pub verbose_tags: HashSet<String>,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            min_level: LogLevel::Info,
            debug_tags: HashSet::new(),
            verbose_tags: HashSet::new(),
        }
    }
}

static LOGGER_CONFIG: Lazy<RwLock<LoggerConfig>> =
    Lazy::new(|| RwLock::new(LoggerConfig::default()));

/// Snapshot of the current logger configuration
pub fn get_logger_config() -> LoggerConfig {
    LOGGER_CONFIG.read().clone()
}

/// Replace the logger configuration
pub fn set_logger_config(config: LoggerConfig) {
    *LOGGER_CONFIG.write() = config;
}

/// Build a configuration from an explicit argument list
pub fn config_from_args(args: &[String]) -> LoggerConfig {
    let mut config = LoggerConfig::default();

    for (i, arg) in args.iter().enumerate() {
        if let Some(key) = arg.strip_prefix("--debug-") {
            config.debug_tags.insert(key.to_lowercase());
        } else if let Some(key) = arg.strip_prefix("--verbose-") {
            config.verbose_tags.insert(key.to_lowercase());
        } else if let Some(level) = arg.strip_prefix("--log-level=") {
            if let Some(level) = LogLevel::from_str(level) {
                config.min_level = level;
            }
        } else if arg == "--log-level" {
            if let Some(level) = args.get(i + 1).and_then(|l| LogLevel::from_str(l)) {
                config.min_level = level;
            }
        }
    }

    let has = |flag: &str| args.iter().any(|a| a == flag);

    if has("--verbose") {
        config.min_level = LogLevel::Verbose;
    } else if !config.debug_tags.is_empty() && config.min_level < LogLevel::Debug {
        config.min_level = LogLevel::Debug;
    }

    if has("--quiet") || has("-q") {
        config.min_level = LogLevel::Warning;
    }

    config
}

/// Initialize the global configuration from the process arguments
pub fn init_from_args() {
    let args = get_cmd_args();
    set_logger_config(config_from_args(&args));
}

pub fn is_debug_enabled_for_tag(tag: &LogTag) -> bool {
    LOGGER_CONFIG.read().debug_tags.contains(&tag.to_debug_key())
}

pub fn is_verbose_enabled_for_tag(tag: &LogTag) -> bool {
    LOGGER_CONFIG.read().verbose_tags.contains(&tag.to_debug_key())
}
