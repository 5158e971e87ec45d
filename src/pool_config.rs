//! Pool-definition files
//!
//! A pool definition is a JSON document that may contain `//` and `/* */` comments.
//! The tools read two keys from it (`gasPriceOverride`, and optionally `network`);
//! the whole document is handed to the gateway untouched.

use crate::errors::PoolToolError;
use crate::logger::{self, LogTag};
use json_comments::CommentSettings;
use serde::Serialize;
use serde_json::Value;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

/// Key holding the gas price override (Gwei, as a string)
pub const GAS_PRICE_OVERRIDE_KEY: &str = "gasPriceOverride";
/// Optional key naming the network the pool lives on
pub const NETWORK_KEY: &str = "network";

/// Gas price override in Gwei; `-1.0` means "let the protocol decide"
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(transparent)]
pub struct GasPriceOverride(f64);

impl GasPriceOverride {
    /// Value sent when no override is configured
    pub const NO_OVERRIDE: f64 = -1.0;

    pub fn none() -> Self {
        GasPriceOverride(Self::NO_OVERRIDE)
    }

    /// Coerce the raw field: empty (after trimming) is "no override",
    /// anything else must be a finite decimal number.
    pub fn parse(raw: &str) -> Result<Self, String> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Ok(Self::none());
        }
        match trimmed.parse::<f64>() {
            Ok(value) if value.is_finite() => Ok(GasPriceOverride(value)),
            Ok(_) => Err(format!("{} must be finite, got '{}'", GAS_PRICE_OVERRIDE_KEY, raw)),
            Err(_) => Err(format!(
                "{} must be a number of Gwei or empty, got '{}'",
                GAS_PRICE_OVERRIDE_KEY, raw
            )),
        }
    }

    /// Raw value as passed to the gateway, sentinel included
    pub fn value(self) -> f64 {
        self.0
    }

    /// Override in Gwei, or None for the sentinel
    pub fn gwei(self) -> Option<f64> {
        if self.0 == Self::NO_OVERRIDE {
            None
        } else {
            Some(self.0)
        }
    }
}

impl std::fmt::Display for GasPriceOverride {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.gwei() {
            Some(gwei) => write!(f, "{} Gwei", gwei),
            None => write!(f, "none"),
        }
    }
}

/// A loaded pool-definition file
#[derive(Debug, Clone)]
pub struct PoolConfig {
    path: PathBuf,
    document: Value,
    gas_price_override: GasPriceOverride,
    network: Option<String>,
}

impl PoolConfig {
    /// Load and parse a pool-definition file.
    ///
    /// Fails with `ConfigNotFound` when `path` is not a regular file and with
    /// `ConfigParse` for malformed JSON or an unusable `gasPriceOverride`.
    pub fn load(path: &Path) -> Result<Self, PoolToolError> {
        if !path.is_file() {
            return Err(PoolToolError::ConfigNotFound {
                path: path.to_path_buf(),
            });
        }

        let file = File::open(path)?;
        let config = Self::from_reader(BufReader::new(file), path)?;

        logger::debug(
            LogTag::Config,
            &format!(
                "Loaded pool config {} (gas override: {}, network: {})",
                path.display(),
                config.gas_price_override,
                config.network.as_deref().unwrap_or("-")
            ),
        );
        Ok(config)
    }

    /// Parse a pool definition from any reader; `origin` is used in error messages
    pub fn from_reader<R: Read>(reader: R, origin: &Path) -> Result<Self, PoolToolError> {
        let stripped = CommentSettings::c_style().strip_comments(reader);
        let document: Value = serde_json::from_reader(stripped)
            .map_err(|e| PoolToolError::config_parse(origin, e.to_string()))?;
        Self::from_document(document, origin)
    }

    /// Parse a pool definition held in memory
    pub fn from_str(text: &str, origin: &Path) -> Result<Self, PoolToolError> {
        Self::from_reader(text.as_bytes(), origin)
    }

    fn from_document(document: Value, origin: &Path) -> Result<Self, PoolToolError> {
        let object = document.as_object().ok_or_else(|| {
            PoolToolError::config_parse(origin, "top-level value must be a JSON object")
        })?;

        let gas_price_override = match object.get(GAS_PRICE_OVERRIDE_KEY) {
            None | Some(Value::Null) => {
                logger::warning(
                    LogTag::Config,
                    &format!(
                        "{} has no {}; no gas price override will be used",
                        origin.display(),
                        GAS_PRICE_OVERRIDE_KEY
                    ),
                );
                GasPriceOverride::none()
            }
            Some(Value::String(raw)) => GasPriceOverride::parse(raw)
                .map_err(|reason| PoolToolError::config_parse(origin, reason))?,
            Some(Value::Number(n)) => n
                .as_f64()
                .map(GasPriceOverride)
                .ok_or_else(|| PoolToolError::config_parse(origin, "gas price out of range"))?,
            Some(other) => {
                return Err(PoolToolError::config_parse(
                    origin,
                    format!("{} must be a string, got {}", GAS_PRICE_OVERRIDE_KEY, other),
                ))
            }
        };

        let network = object
            .get(NETWORK_KEY)
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .map(str::to_string);

        Ok(PoolConfig {
            path: origin.to_path_buf(),
            document,
            gas_price_override,
            network,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The full parsed document, comments removed
    pub fn document(&self) -> &Value {
        &self.document
    }

    pub fn gas_price_override(&self) -> GasPriceOverride {
        self.gas_price_override
    }

    /// Network named by the file itself, if any
    pub fn network(&self) -> Option<&str> {
        self.network.as_deref()
    }
}
