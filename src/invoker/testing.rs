//! In-memory `PoolProtocol` used by the invoker tests

use super::ToolContext;
use crate::config::Config;
use crate::deployments::{CreationHash, DeploymentTable, PoolId};
use crate::errors::GatewayError;
use crate::pool_config::{GasPriceOverride, PoolConfig};
use crate::protocol::{JoinReceipt, PoolProtocol};
use async_trait::async_trait;
use parking_lot::Mutex;

#[derive(Debug, Clone, PartialEq)]
pub enum RecordedCall {
    Join {
        network: String,
        pool_id: String,
        gas_price_override: f64,
    },
    CreationArguments {
        network: String,
        pool_id: String,
        creation_hash: Option<String>,
    },
}

/// Records every call; fails them all when built with `failing`
#[derive(Default)]
pub struct RecordingProtocol {
    pub calls: Mutex<Vec<RecordedCall>>,
    failure: Option<GatewayError>,
}

impl RecordingProtocol {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing(error: GatewayError) -> Self {
        RecordingProtocol {
            calls: Mutex::new(Vec::new()),
            failure: Some(error),
        }
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().clone()
    }
}

#[async_trait]
impl PoolProtocol for RecordingProtocol {
    async fn join_pool_initial_tokens(
        &self,
        network: &str,
        _pool: &PoolConfig,
        pool_id: &PoolId,
        gas_price_override: GasPriceOverride,
    ) -> Result<JoinReceipt, GatewayError> {
        self.calls.lock().push(RecordedCall::Join {
            network: network.to_string(),
            pool_id: pool_id.to_string(),
            gas_price_override: gas_price_override.value(),
        });
        match &self.failure {
            Some(err) => Err(err.clone()),
            None => Ok(JoinReceipt {
                tx_hash: "0xjoin".to_string(),
                explorer_url: Some(format!("https://{}.etherscan.io/tx/0xjoin", network)),
            }),
        }
    }

    async fn generate_pool_creation_arguments(
        &self,
        network: &str,
        pool_id: &PoolId,
        creation_hash: Option<&CreationHash>,
    ) -> Result<String, GatewayError> {
        self.calls.lock().push(RecordedCall::CreationArguments {
            network: network.to_string(),
            pool_id: pool_id.to_string(),
            creation_hash: creation_hash.map(|h| h.to_string()),
        });
        if let Some(err) = &self.failure {
            return Err(err.clone());
        }
        let mut command = format!(
            "yarn hardhat verify-contract --network {} --pool-id {}",
            network, pool_id
        );
        if let Some(hash) = creation_hash {
            command.push_str(&format!(" --creation-tx {}", hash));
        }
        Ok(command)
    }
}

pub fn test_context() -> ToolContext {
    ToolContext {
        settings: Config::default(),
        deployments: DeploymentTable::builtin(),
    }
}
