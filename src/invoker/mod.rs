//! Invokers: one delegated protocol call per tool run
//!
//! - `join`: load a pool definition and join the pool with its initial tokens.
//!   Delegated failures are reported and swallowed.
//! - `verify`: print the verification command for a deployed pool.
//!   Delegated failures propagate to the caller.

use crate::config::{self, Config};
use crate::deployments::{Deployment, DeploymentTable};
use crate::errors::PoolToolError;
use crate::logger::{self, LogTag};
use crate::paths;
use crate::protocol::GatewayClient;
use std::path::Path;

pub mod join;
pub mod verify;

#[cfg(test)]
pub(crate) mod testing;

/// Settings and deployment table shared by every invoker
#[derive(Debug, Clone)]
pub struct ToolContext {
    pub settings: Config,
    pub deployments: DeploymentTable,
}

impl ToolContext {
    /// Load settings (explicit path or the data directory) and the deployment table
    pub fn load(settings_path: Option<&Path>) -> Result<Self, PoolToolError> {
        let settings_path = settings_path
            .map(Path::to_path_buf)
            .unwrap_or_else(paths::get_config_path);
        config::load_config_from_path(&settings_path).map_err(PoolToolError::Configuration)?;

        let deployments = DeploymentTable::load(&paths::get_deployments_path())?;
        logger::debug(
            LogTag::Deployments,
            &format!("Known deployments: {}", deployments.names().join(", ")),
        );

        Ok(ToolContext {
            settings: config::get_config_clone(),
            deployments,
        })
    }

    /// HTTP client for the configured gateway
    pub fn gateway(&self) -> Result<GatewayClient, PoolToolError> {
        GatewayClient::new(&self.settings.gateway)
            .map_err(|e| PoolToolError::Configuration(e.to_string()))
    }

    /// Resolve `name` (or the default entry) and warn about odd-looking literals
    pub fn deployment(&self, name: Option<&str>) -> Result<&Deployment, PoolToolError> {
        let deployment = self.deployments.resolve(name)?;
        deployment.warn_if_malformed();
        Ok(deployment)
    }
}

/// First non-empty network name, in order of precedence
pub fn resolve_network(candidates: &[Option<&str>], default_network: &str) -> String {
    candidates
        .iter()
        .flatten()
        .map(|n| n.trim())
        .find(|n| !n.is_empty())
        .unwrap_or(default_network)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_network_precedence() {
        assert_eq!(
            resolve_network(&[Some("goerli"), Some("kovan")], "mainnet"),
            "goerli"
        );
        assert_eq!(resolve_network(&[None, Some(" kovan ")], "mainnet"), "kovan");
        assert_eq!(resolve_network(&[Some(""), None], "mainnet"), "mainnet");
        assert_eq!(resolve_network(&[], "mainnet"), "mainnet");
    }

    #[test]
    fn test_gateway_from_bad_settings_is_configuration_error() {
        let mut settings = Config::default();
        settings.gateway.url = "::not a url::".to_string();
        let ctx = ToolContext {
            settings,
            deployments: DeploymentTable::builtin(),
        };
        assert!(matches!(ctx.gateway(), Err(PoolToolError::Configuration(_))));
    }
}
