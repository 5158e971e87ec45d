//! Centralized path resolution for the pool tools
//!
//! All file and directory paths are resolved through this module so that every
//! binary reads settings from, and writes logs to, the same place.
//!
//! ## Path Strategy
//!
//! `POOLTOOLS_HOME` wins when set. Otherwise the platform data directory is used:
//! - **macOS**: `~/Library/Application Support/PoolTools/`
//! - **Windows**: `%LOCALAPPDATA%\PoolTools\`
//! - **Linux**: `$XDG_DATA_HOME/PoolTools/` (fallback `~/.local/share/PoolTools/`)
//!
//! ## Directory Structure
//!
//! ```text
//! PoolTools/
//! ├── data/
//! │ ├── config.toml
//! │ └── deployments.toml
//! └── logs/
//!   └── pooltools_*.log
//! ```

use once_cell::sync::Lazy;
use std::path::PathBuf;

/// Environment variable that pins the base directory
pub const HOME_ENV_VAR: &str = "POOLTOOLS_HOME";

const APP_DIR: &str = "PoolTools";

static BASE_DIRECTORY: Lazy<PathBuf> = Lazy::new(resolve_base_directory);

fn resolve_base_directory() -> PathBuf {
  if let Ok(home) = std::env::var(HOME_ENV_VAR) {
    if !home.trim().is_empty() {
      return PathBuf::from(home);
    }
  }

  if let Some(dir) = dirs::data_local_dir() {
    return dir.join(APP_DIR);
  }

  if let Some(dir) = dirs::data_dir() {
    return dir.join(APP_DIR);
  }

  if let Some(home) = dirs::home_dir() {
    return home.join(APP_DIR);
  }

  PathBuf::from(APP_DIR)
}

// =============================================================================
// DIRECTORY ACCESSORS
// =============================================================================

/// Returns the base directory for all tool data
pub fn get_base_directory() -> PathBuf {
  BASE_DIRECTORY.clone()
}

/// Returns the data directory path (settings and deployment table)
pub fn get_data_directory() -> PathBuf {
  BASE_DIRECTORY.join("data")
}

/// Returns the logs directory path
pub fn get_logs_directory() -> PathBuf {
  BASE_DIRECTORY.join("logs")
}

// =============================================================================
// FILE PATHS
// =============================================================================

/// Returns the tool settings file path
pub fn get_config_path() -> PathBuf {
  get_data_directory().join("config.toml")
}

/// Returns the optional deployment table file path
pub fn get_deployments_path() -> PathBuf {
  get_data_directory().join("deployments.toml")
}

/// Returns today's log file path
pub fn get_log_file_path() -> PathBuf {
  let date = chrono::Local::now().format("%Y-%m-%d");
  get_logs_directory().join(format!("pooltools_{}.log", date))
}

// =============================================================================
// DIRECTORY CREATION
// =============================================================================

/// Ensures the base, data and logs directories exist
///
/// Must run before `logger::init()`, which opens the log file.
pub fn ensure_all_directories() -> Result<(), String> {
  let dirs_to_create = [
    ("base", get_base_directory()),
    ("data", get_data_directory()),
    ("logs", get_logs_directory()),
  ];

  for (name, dir) in dirs_to_create {
    if !dir.exists() {
      std::fs::create_dir_all(&dir).map_err(|e| {
        format!(
          "Failed to create {} directory at {}: {}",
          name,
          dir.display(),
          e
        )
      })?;
    }
  }

  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_base_directory_not_empty() {
    let base = get_base_directory();
    assert!(!base.as_os_str().is_empty());
  }

  #[test]
  fn test_subdirectories_under_base() {
    let base = get_base_directory();
    assert!(get_data_directory().starts_with(&base));
    assert!(get_logs_directory().starts_with(&base));
  }

  #[test]
  fn test_files_in_expected_directories() {
    let data = get_data_directory();
    assert!(get_config_path().starts_with(&data));
    assert!(get_deployments_path().starts_with(&data));
    assert_eq!(get_config_path().file_name().unwrap(), "config.toml");

    let log = get_log_file_path();
    assert!(log.starts_with(get_logs_directory()));
    let name = log.file_name().unwrap().to_string_lossy().to_string();
    assert!(name.starts_with("pooltools_"));
    assert!(name.ends_with(".log"));
  }
}
