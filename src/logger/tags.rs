/// Log tags identify the subsystem a message comes from
///
/// The debug key of a tag is what `--debug-<key>` and `--verbose-<key>` match against.
use colored::*;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum LogTag {
    System,
    Config,
    Deployments,
    Join,
    Verify,
    Gateway,
}

impl LogTag {
    /// Key used by `--debug-<key>` flags
    pub fn to_debug_key(&self) -> String {
        match self {
            LogTag::System => "system".to_string(),
            LogTag::Config => "config".to_string(),
            LogTag::Deployments => "deployments".to_string(),
            LogTag::Join => "join".to_string(),
            LogTag::Verify => "verify".to_string(),
            LogTag::Gateway => "gateway".to_string(),
        }
    }

    /// Uncolored label used in log files
    pub fn to_plain_string(&self) -> String {
        match self {
            LogTag::System => "SYSTEM".to_string(),
            LogTag::Config => "CONFIG".to_string(),
            LogTag::Deployments => "DEPLOY".to_string(),
            LogTag::Join => "JOIN".to_string(),
            LogTag::Verify => "VERIFY".to_string(),
            LogTag::Gateway => "GATEWAY".to_string(),
        }
    }

    /// Padded, colored label for console output
    pub fn colored(&self, width: usize) -> ColoredString {
        let label = format!("{:<width$}", self.to_plain_string(), width = width);
        match self {
            LogTag::System => label.bright_yellow().bold(),
            LogTag::Config => label.bright_white().bold(),
            LogTag::Deployments => label.bright_cyan().bold(),
            LogTag::Join => label.bright_green().bold(),
            LogTag::Verify => label.bright_magenta().bold(),
            LogTag::Gateway => label.bright_blue().bold(),
        }
    }
}

impl std::fmt::Display for LogTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_plain_string())
    }
}
