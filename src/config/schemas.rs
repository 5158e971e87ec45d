/// Configuration schemas - every settings section defined once with its defaults
use crate::config_struct;

/// Documentation shown after a generated verification command
pub const DEFAULT_VERIFY_HELP_URL: &str =
    "https://github.com/balancer-labs/balancer-v2-monorepo/tree/master/pkg/deployments";

// ============================================================================
// GATEWAY CONFIGURATION
// ============================================================================

config_struct! {
    /// Pool-protocol gateway the delegated calls are sent to
    pub struct GatewayConfig {
        /// Base URL of the gateway service
        url: String = "http://127.0.0.1:8547".to_string(),
        /// Upper bound on a single delegated call (seconds)
        timeout_secs: u64 = 120,
        /// User-Agent header sent with every request
        user_agent: String = format!("pooltools/{}", env!("CARGO_PKG_VERSION")),
    }
}

// ============================================================================
// NETWORK CONFIGURATION
// ============================================================================

config_struct! {
    /// Network selection and verification help
    pub struct NetworkConfig {
        /// Network used when neither the pool file nor the deployment names one
        default_network: String = "kovan".to_string(),
        /// Link printed after the verification command
        help_url: String = DEFAULT_VERIFY_HELP_URL.to_string(),
    }
}

// ============================================================================
// ROOT
// ============================================================================

config_struct! {
    /// Root settings document (`config.toml`)
    pub struct Config {
        gateway: GatewayConfig = GatewayConfig::default(),
        network: NetworkConfig = NetworkConfig::default(),
    }
}
