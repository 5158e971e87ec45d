//! Structured logging for the pool tools
//!
//! - Standard levels (Error/Warning/Info/Debug/Verbose)
//! - Per-module control via `--debug-<module>` / `--verbose-<module>` flags,
//!   plus `--verbose`, `--quiet` and `--log-level <LEVEL>`
//! - Colored console output mirrored into a daily log file
//!
//! ## Usage
//!
//! ```rust,no_run
//! use pooltools::logger::{self, LogTag};
//!
//! logger::init();
//! logger::info(LogTag::Join, "Joining pool");
//! logger::debug(LogTag::Gateway, "Request body: ..."); // Only with --debug-gateway
//! ```
//!
//! `init()` must run after `paths::ensure_all_directories()`.

mod config;
mod core;
mod file;
mod format;
mod levels;
mod tags;

pub use levels::LogLevel;
pub use tags::LogTag;

/// Initialize the logger from the process arguments and open the log file
pub fn init() {
    config::init_from_args();
    file::init_file_logging();
}

/// Log at ERROR level (always shown)
pub fn error(tag: LogTag, message: &str) {
    core::log_internal(tag, LogLevel::Error, message);
}

/// Log at WARNING level
pub fn warning(tag: LogTag, message: &str) {
    core::log_internal(tag, LogLevel::Warning, message);
}

/// Log at INFO level
pub fn info(tag: LogTag, message: &str) {
    core::log_internal(tag, LogLevel::Info, message);
}

/// Log at DEBUG level, shown only with `--debug-<tag>`
pub fn debug(tag: LogTag, message: &str) {
    core::log_internal(tag, LogLevel::Debug, message);
}

/// Log at VERBOSE level, shown only with `--verbose` or `--verbose-<tag>`
pub fn verbose(tag: LogTag, message: &str) {
    core::log_internal(tag, LogLevel::Verbose, message);
}

/// Check whether a message would be printed, to skip building expensive payloads
pub fn is_enabled(tag: &LogTag, level: LogLevel) -> bool {
    core::should_log(tag, level)
}

/// Force flush pending file writes
pub fn flush() {
    file::flush_file_logging();
}
