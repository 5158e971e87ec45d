/// Errors surfaced by the pool-protocol collaborator
///
/// Everything the gateway or the transport reports ends up here, so the join invoker
/// can catch a single type and the verify invoker can propagate it unchanged.
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum GatewayError {
    #[error("Request to {endpoint} failed: {reason}")]
    Request { endpoint: String, reason: String },

    #[error("Gateway returned HTTP {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Malformed gateway response from {endpoint}: {reason}")]
    MalformedResponse { endpoint: String, reason: String },

    #[error("Gateway did not answer within {seconds} seconds")]
    Timeout { seconds: u64 },

    #[error("Invalid gateway URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },
}

impl GatewayError {
    /// Transport-level failures that might succeed on a later run.
    /// The tools never retry; this only changes the wording of the diagnostic.
    pub fn is_recoverable(&self) -> bool {
        match self {
            GatewayError::Request { .. } | GatewayError::Timeout { .. } => true,
            GatewayError::Status { status, .. } => *status >= 500 || *status == 429,
            GatewayError::MalformedResponse { .. } | GatewayError::InvalidUrl { .. } => false,
        }
    }

    /// Rejections by the protocol itself (revert, permission) rather than transport issues
    pub fn is_rejection(&self) -> bool {
        matches!(self, GatewayError::Status { status, .. } if (400..500).contains(status) && *status != 429)
    }
}
