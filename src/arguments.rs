/// Centralized argument handling for the pool tools
///
/// Every binary in this crate shares the same process-wide view of the command line:
/// - Global CMD_ARGS snapshot taken on first use
/// - `--debug-<module>` / `--verbose-<module>` / `--log-level` / `--quiet` flags read by
///   the logger, and their clap definitions so every binary accepts them
///
/// Positional arguments and subcommands are parsed by clap in each binary; this module
/// only answers "is this flag present" questions so that logging can be configured
/// before clap runs.
use clap::{Arg, ArgAction};
use once_cell::sync::Lazy;
use std::env;

/// Global command-line arguments storage
pub static CMD_ARGS: Lazy<Vec<String>> = Lazy::new(|| env::args().collect());

/// Per-module debug flags understood by every binary, with their help text
pub const DEBUG_FLAGS: &[(&str, &str)] = &[
    ("debug-config", "Debug configuration loading"),
    ("debug-join", "Debug the pool join invoker"),
    ("debug-verify", "Debug the pool verify invoker"),
    ("debug-gateway", "Debug gateway requests and responses"),
    ("debug-deployments", "Debug deployment table resolution"),
    ("debug-system", "Debug startup and shutdown"),
];

/// Per-module verbose flags, one for every debug flag
pub const VERBOSE_FLAGS: &[(&str, &str)] = &[
    ("verbose-config", "Verbose configuration logs"),
    ("verbose-join", "Verbose pool join logs"),
    ("verbose-verify", "Verbose pool verify logs"),
    ("verbose-gateway", "Verbose gateway logs, including request and response bodies"),
    ("verbose-deployments", "Verbose deployment table logs"),
    ("verbose-system", "Verbose startup and shutdown logs"),
];

/// Gets a copy of the current command-line arguments
pub fn get_cmd_args() -> Vec<String> {
    CMD_ARGS.to_vec()
}

/// Checks if a specific argument is present in the command line
pub fn has_arg(arg: &str) -> bool {
    CMD_ARGS.iter().any(|a| a == arg)
}

/// clap definitions for the shared logging flags, hidden from `--help` except verbose/quiet
pub fn logging_args() -> Vec<Arg> {
    let mut args: Vec<Arg> = DEBUG_FLAGS
        .iter()
        .chain(VERBOSE_FLAGS.iter())
        .map(|(name, help)| {
            Arg::new(*name)
                .long(*name)
                .help(*help)
                .action(ArgAction::SetTrue)
                .hide(true)
        })
        .collect();

    args.push(
        Arg::new("log-level")
            .long("log-level")
            .value_name("LEVEL")
            .help("Highest level to print (error, warning, info, debug, verbose)")
            .value_parser(["error", "warning", "warn", "info", "debug", "verbose", "trace"])
            .ignore_case(true)
            .hide(true),
    );
    args.push(
        Arg::new("verbose")
            .long("verbose")
            .help("Show verbose logs for every module")
            .action(ArgAction::SetTrue),
    );
    args.push(
        Arg::new("quiet")
            .short('q')
            .long("quiet")
            .help("Only show warnings and errors")
            .action(ArgAction::SetTrue),
    );
    args
}

/// Module names (without the `debug-` prefix) whose debug flag is present
pub fn get_enabled_debug_modes() -> Vec<&'static str> {
    debug_modes_in(&CMD_ARGS)
}

/// Module names whose `--debug-<module>` flag appears in `args`
pub fn debug_modes_in(args: &[String]) -> Vec<&'static str> {
    DEBUG_FLAGS
        .iter()
        .filter(|(name, _)| {
            let flag = format!("--{}", name);
            args.iter().any(|a| *a == flag)
        })
        .filter_map(|(name, _)| name.strip_prefix("debug-"))
        .collect()
}

/// Prints the active debug modes, if any
pub fn print_debug_info() {
    let modes = get_enabled_debug_modes();
    if modes.is_empty() {
        return;
    }
    crate::logger::info(
        crate::logger::LogTag::System,
        &format!("Debug modes enabled: {}", modes.join(", ")),
    );
}

/// Common argument parsing patterns used across binaries
pub mod patterns {
    use super::*;

    /// Help requested via `--help` or `-h`
    pub fn is_help_requested() -> bool {
        has_arg("--help") || has_arg("-h")
    }
}
