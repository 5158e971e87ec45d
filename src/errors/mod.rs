/// Error types for the pool tools
///
/// `PoolToolError` covers everything the invokers can report. Gateway failures are kept
/// structured in `GatewayError` and wrapped as `DelegatedCall`.
use std::path::PathBuf;
use thiserror::Error;

pub mod gateway;
pub use gateway::GatewayError;

#[derive(Error, Debug)]
pub enum PoolToolError {
    #[error("{usage}")]
    Usage { usage: String },

    #[error("Path does not exist or is not a file: {}", path.display())]
    ConfigNotFound { path: PathBuf },

    #[error("Failed to parse {}: {reason}", path.display())]
    ConfigParse { path: PathBuf, reason: String },

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Unknown deployment '{name}' (known: {known})")]
    UnknownDeployment { name: String, known: String },

    #[error(transparent)]
    DelegatedCall(#[from] GatewayError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl PoolToolError {
    pub fn usage(usage: impl Into<String>) -> Self {
        PoolToolError::Usage { usage: usage.into() }
    }

    pub fn config_parse(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        PoolToolError::ConfigParse {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Process exit status used by the binaries for errors they do not swallow
    pub fn exit_code(&self) -> i32 {
        match self {
            PoolToolError::Usage { .. } => 2,
            _ => 1,
        }
    }
}
