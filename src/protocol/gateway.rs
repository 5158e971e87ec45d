/// HTTP client for the pool-protocol gateway
///
/// The gateway is a service wrapping the protocol SDK. Two endpoints are used:
///
/// - `POST {base}/v1/{network}/pools/{poolId}/join-initial`
///   body `{"pool": <document>, "gasPriceOverride": <f64>}` → `{"txHash", "explorerUrl"?}`
/// - `GET {base}/v1/{network}/pools/{poolId}/creation-arguments[?creationHash=...]`
///   → `{"command"}`
///
/// Non-2xx responses carry `{"error": "..."}`.
use super::{JoinReceipt, PoolProtocol};
use crate::config::GatewayConfig;
use crate::deployments::{CreationHash, PoolId};
use crate::errors::GatewayError;
use crate::logger::{self, LogLevel, LogTag};
use crate::pool_config::{GasPriceOverride, PoolConfig};
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;
use url::Url;

/// Longest error body echoed back to the user
const MAX_ERROR_BODY_CHARS: usize = 300;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JoinRequest<'a> {
    pool: &'a Value,
    gas_price_override: f64,
}

#[derive(Deserialize)]
struct CreationArgumentsResponse {
    command: String,
}

#[derive(Deserialize)]
struct ErrorResponse {
    error: String,
}

pub struct GatewayClient {
    client: Client,
    base_url: Url,
    timeout_secs: u64,
}

impl GatewayClient {
    pub fn new(config: &GatewayConfig) -> Result<Self, GatewayError> {
        let base_url = Url::parse(&config.url).map_err(|e| GatewayError::InvalidUrl {
            url: config.url.clone(),
            reason: e.to_string(),
        })?;
        if base_url.cannot_be_a_base() {
            return Err(GatewayError::InvalidUrl {
                url: config.url.clone(),
                reason: "URL cannot carry a path".to_string(),
            });
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| GatewayError::Request {
                endpoint: config.url.clone(),
                reason: format!("failed to build HTTP client: {}", e),
            })?;

        Ok(GatewayClient {
            client,
            base_url,
            timeout_secs: config.timeout_secs,
        })
    }

    /// `{base}/v1/{network}/pools/{pool_id}/{action}`
    pub(crate) fn endpoint(&self, network: &str, pool_id: &PoolId, action: &str) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .extend(["v1", network, "pools", pool_id.as_str(), action]);
        }
        url
    }

    fn map_transport_error(&self, endpoint: &Url, err: reqwest::Error) -> GatewayError {
        if err.is_timeout() {
            GatewayError::Timeout {
                seconds: self.timeout_secs,
            }
        } else {
            GatewayError::Request {
                endpoint: endpoint.to_string(),
                reason: err.to_string(),
            }
        }
    }

    async fn read_response<T: DeserializeOwned>(
        &self,
        endpoint: &Url,
        response: reqwest::Response,
    ) -> Result<T, GatewayError> {
        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| self.map_transport_error(endpoint, e))?;

        logger::debug(
            LogTag::Gateway,
            &format!("{} -> HTTP {} ({} bytes)", endpoint, status, body.len()),
        );
        logger::verbose(LogTag::Gateway, &format!("Response body: {}", body));

        decode_response(endpoint.as_str(), status, &body)
    }
}

/// Turn a gateway reply into `T` or a structured error
pub(crate) fn decode_response<T: DeserializeOwned>(
    endpoint: &str,
    status: u16,
    body: &str,
) -> Result<T, GatewayError> {
    if !(200..300).contains(&status) {
        let message = match serde_json::from_str::<ErrorResponse>(body) {
            Ok(err) => err.error,
            Err(_) if body.trim().is_empty() => "no response body".to_string(),
            Err(_) => body.trim().chars().take(MAX_ERROR_BODY_CHARS).collect(),
        };
        return Err(GatewayError::Status { status, message });
    }

    serde_json::from_str::<T>(body).map_err(|e| GatewayError::MalformedResponse {
        endpoint: endpoint.to_string(),
        reason: e.to_string(),
    })
}

#[async_trait]
impl PoolProtocol for GatewayClient {
    async fn join_pool_initial_tokens(
        &self,
        network: &str,
        pool: &PoolConfig,
        pool_id: &PoolId,
        gas_price_override: GasPriceOverride,
    ) -> Result<JoinReceipt, GatewayError> {
        let endpoint = self.endpoint(network, pool_id, "join-initial");
        let request = JoinRequest {
            pool: pool.document(),
            gas_price_override: gas_price_override.value(),
        };

        logger::debug(
            LogTag::Gateway,
            &format!("POST {} (gas override: {})", endpoint, gas_price_override),
        );
        if logger::is_enabled(&LogTag::Gateway, LogLevel::Verbose) {
            if let Ok(body) = serde_json::to_string(&request) {
                logger::verbose(LogTag::Gateway, &format!("Request body: {}", body));
            }
        }

        let response = self
            .client
            .post(endpoint.clone())
            .json(&request)
            .send()
            .await
            .map_err(|e| self.map_transport_error(&endpoint, e))?;

        self.read_response(&endpoint, response).await
    }

    async fn generate_pool_creation_arguments(
        &self,
        network: &str,
        pool_id: &PoolId,
        creation_hash: Option<&CreationHash>,
    ) -> Result<String, GatewayError> {
        let mut endpoint = self.endpoint(network, pool_id, "creation-arguments");
        if let Some(hash) = creation_hash {
            endpoint
                .query_pairs_mut()
                .append_pair("creationHash", hash.as_str());
        }

        logger::debug(LogTag::Gateway, &format!("GET {}", endpoint));

        let response = self
            .client
            .get(endpoint.clone())
            .send()
            .await
            .map_err(|e| self.map_transport_error(&endpoint, e))?;

        let reply: CreationArgumentsResponse = self.read_response(&endpoint, response).await?;
        Ok(reply.command)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(url: &str) -> GatewayClient {
        GatewayClient::new(&GatewayConfig {
            url: url.to_string(),
            ..GatewayConfig::default()
        })
        .unwrap()
    }

    #[test]
    fn test_endpoint_building() {
        let pool_id = PoolId::new("0xabc");
        let url = client("http://127.0.0.1:8547").endpoint("kovan", &pool_id, "join-initial");
        assert_eq!(
            url.as_str(),
            "http://127.0.0.1:8547/v1/kovan/pools/0xabc/join-initial"
        );
    }

    #[test]
    fn test_endpoint_keeps_base_path() {
        let pool_id = PoolId::new("0xabc");
        let url = client("https://gw.example/api/").endpoint("goerli", &pool_id, "creation-arguments");
        assert_eq!(
            url.as_str(),
            "https://gw.example/api/v1/goerli/pools/0xabc/creation-arguments"
        );
    }

    #[test]
    fn test_invalid_urls_rejected() {
        for url in ["not a url", "mailto:ops@example.org"] {
            let result = GatewayClient::new(&GatewayConfig {
                url: url.to_string(),
                ..GatewayConfig::default()
            });
            assert!(matches!(result, Err(GatewayError::InvalidUrl { .. })), "{}", url);
        }
    }

    #[test]
    fn test_decode_join_receipt() {
        let receipt: JoinReceipt = decode_response(
            "e",
            200,
            r#"{"txHash":"0xfeed","explorerUrl":"https://kovan.etherscan.io/tx/0xfeed"}"#,
        )
        .unwrap();
        assert_eq!(receipt.tx_hash, "0xfeed");
        assert!(receipt.explorer_url.unwrap().ends_with("0xfeed"));

        let bare: JoinReceipt = decode_response("e", 201, r#"{"txHash":"0x1"}"#).unwrap();
        assert_eq!(bare.explorer_url, None);
    }

    #[test]
    fn test_decode_error_body() {
        let err = decode_response::<JoinReceipt>("e", 403, r#"{"error":"caller is not the owner"}"#)
            .unwrap_err();
        assert_eq!(
            err,
            GatewayError::Status {
                status: 403,
                message: "caller is not the owner".to_string()
            }
        );

        let plain = decode_response::<JoinReceipt>("e", 502, "  Bad Gateway \n").unwrap_err();
        assert_eq!(
            plain,
            GatewayError::Status {
                status: 502,
                message: "Bad Gateway".to_string()
            }
        );

        let empty = decode_response::<JoinReceipt>("e", 500, "").unwrap_err();
        assert!(empty.to_string().contains("no response body"));
    }

    #[test]
    fn test_decode_malformed_success() {
        let err = decode_response::<CreationArgumentsResponse>("e", 200, r#"{"cmd":"x"}"#)
            .err()
            .unwrap();
        assert!(matches!(err, GatewayError::MalformedResponse { .. }));
    }

    #[test]
    fn test_join_request_shape() {
        let document = serde_json::json!({ "gasPriceOverride": "" });
        let request = JoinRequest {
            pool: &document,
            gas_price_override: GasPriceOverride::none().value(),
        };
        let body = serde_json::to_value(&request).unwrap();
        assert_eq!(body["gasPriceOverride"], -1.0);
        assert_eq!(body["pool"]["gasPriceOverride"], "");
    }
}
