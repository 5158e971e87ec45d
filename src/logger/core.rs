/// Filtering rules for log output
///
/// 1. Errors are always shown
/// 2. Debug requires `--debug-<tag>`
/// 3. Verbose requires `--verbose` or `--verbose-<tag>`
/// 4. Anything above the minimum level is dropped
use super::config::{get_logger_config, is_debug_enabled_for_tag, is_verbose_enabled_for_tag};
use super::levels::LogLevel;
use super::tags::LogTag;

pub fn should_log(tag: &LogTag, level: LogLevel) -> bool {
    let config = get_logger_config();

    if level == LogLevel::Error {
        return true;
    }

    // Per-tag flags still lose to --quiet
    if level == LogLevel::Debug {
        return config.min_level >= LogLevel::Info && is_debug_enabled_for_tag(tag);
    }

    if level == LogLevel::Verbose {
        return config.min_level == LogLevel::Verbose
            || (config.min_level >= LogLevel::Info && is_verbose_enabled_for_tag(tag));
    }

    level <= config.min_level
}

pub fn log_internal(tag: LogTag, level: LogLevel, message: &str) {
    if !should_log(&tag, level) {
        return;
    }

    super::format::format_and_log(tag, level, message);
}

#[cfg(test)]
mod tests {
    use super::super::config::{config_from_args, set_logger_config};
    use super::*;

    // LOGGER_CONFIG is process-global; this is the only test that replaces it.
    #[test]
    fn test_per_tag_flags_and_quiet() {
        let args = |list: &[&str]| list.iter().map(|s| s.to_string()).collect::<Vec<_>>();

        set_logger_config(config_from_args(&args(&["tool", "--verbose-gateway", "--debug-join"])));
        assert!(should_log(&LogTag::Gateway, LogLevel::Verbose));
        assert!(!should_log(&LogTag::Join, LogLevel::Verbose));
        assert!(should_log(&LogTag::Join, LogLevel::Debug));
        assert!(!should_log(&LogTag::Gateway, LogLevel::Debug));
        assert!(should_log(&LogTag::Config, LogLevel::Info));

        set_logger_config(config_from_args(&args(&["tool", "--verbose-gateway", "-q"])));
        assert!(!should_log(&LogTag::Gateway, LogLevel::Verbose));
        assert!(!should_log(&LogTag::Config, LogLevel::Info));
        assert!(should_log(&LogTag::Config, LogLevel::Warning));
        assert!(should_log(&LogTag::Config, LogLevel::Error));

        set_logger_config(config_from_args(&args(&["tool"])));
    }
}
