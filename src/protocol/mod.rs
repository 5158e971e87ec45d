//! The pool-protocol collaborator
//!
//! Everything that touches the chain (transaction building, signing, gas pricing,
//! ABI encoding) happens behind `PoolProtocol`. The tools only pass inputs in and
//! print what comes back.

use crate::deployments::{CreationHash, PoolId};
use crate::errors::GatewayError;
use crate::pool_config::{GasPriceOverride, PoolConfig};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub mod gateway;
pub use gateway::GatewayClient;

/// Handle for the transaction submitted by a join
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinReceipt {
    pub tx_hash: String,
    #[serde(default)]
    pub explorer_url: Option<String>,
}

#[async_trait]
pub trait PoolProtocol: Send + Sync {
    /// Join `pool_id` with the initial token balances described by `pool`
    async fn join_pool_initial_tokens(
        &self,
        network: &str,
        pool: &PoolConfig,
        pool_id: &PoolId,
        gas_price_override: GasPriceOverride,
    ) -> Result<JoinReceipt, GatewayError>;

    /// Build the ready-to-run contract verification command for `pool_id`.
    /// Without `creation_hash` the protocol has to locate the creation transaction itself.
    async fn generate_pool_creation_arguments(
        &self,
        network: &str,
        pool_id: &PoolId,
        creation_hash: Option<&CreationHash>,
    ) -> Result<String, GatewayError>;
}
