//! Deployment table
//!
//! Each deployment pins the literals a tool invocation works against: the pool
//! identifier, the hash of the transaction that created the pool, and the network.
//! A small table is compiled in; `deployments.toml` in the data directory can add
//! entries or replace built-in ones by name:
//!
//! ```toml
//! [[deployment]]
//! name = "kovan-weighted-50-50"
//! network = "kovan"
//! pool_id = "0x..."
//! creation_hash = "0x..."
//! ```

use crate::errors::PoolToolError;
use crate::logger::{self, LogTag};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Protocol-wide pool identifier (hex string)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PoolId(String);

/// Hash of the transaction that deployed a pool contract (hex string)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CreationHash(String);

fn is_prefixed_hex(value: &str, hex_len: usize) -> bool {
    value
        .strip_prefix("0x")
        .map(|hex| hex.len() == hex_len && hex.chars().all(|c| c.is_ascii_hexdigit()))
        .unwrap_or(false)
}

impl PoolId {
    pub fn new(value: impl Into<String>) -> Self {
        PoolId(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `0x` followed by 32 bytes of hex. Advisory only: ids are used as given.
    pub fn looks_valid(&self) -> bool {
        is_prefixed_hex(&self.0, 64)
    }
}

impl CreationHash {
    pub fn new(value: impl Into<String>) -> Self {
        CreationHash(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `0x` followed by 32 bytes of hex. Advisory only.
    pub fn looks_valid(&self) -> bool {
        is_prefixed_hex(&self.0, 64)
    }
}

impl std::fmt::Display for PoolId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::fmt::Display for CreationHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Deployment {
    pub name: String,
    #[serde(default)]
    pub network: Option<String>,
    pub pool_id: PoolId,
    #[serde(default)]
    pub creation_hash: Option<CreationHash>,
}

impl Deployment {
    /// Log a warning for literals that do not look like protocol identifiers
    pub fn warn_if_malformed(&self) {
        if !self.pool_id.looks_valid() {
            logger::warning(
                LogTag::Deployments,
                &format!("Deployment '{}' has an unusual pool id: {}", self.name, self.pool_id),
            );
        }
        if let Some(hash) = &self.creation_hash {
            if !hash.looks_valid() {
                logger::warning(
                    LogTag::Deployments,
                    &format!("Deployment '{}' has an unusual creation hash: {}", self.name, hash),
                );
            }
        }
    }
}

/// Compiled-in deployments: (name, network, pool id, creation hash)
const BUILTIN_DEPLOYMENTS: &[(&str, &str, &str, &str)] = &[
    (
        "kovan-weighted-50-50",
        "kovan",
        "0x9028748bda7f3d5b3c3237596859c1a4f70c09fc00020000000000000000001a",
        "0x233cccf1c8d62f1c79e52bc076ce0b46c69f23fc2b7588b98194d6a8410f4fbb",
    ),
    (
        "kovan-weighted-80-20",
        "kovan",
        "0xbadba5a33d10da850bcf4d47c39ae0e727dc2e8800020000000000000000001b",
        "0x30f9f2d7cfdf2fc8dc36da81a359e3f58ee5466de7a858615e5a3bd86d2d2cc0",
    ),
];

#[derive(Debug, Default, Deserialize)]
struct DeploymentFile {
    #[serde(default)]
    deployment: Vec<Deployment>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DeploymentTable {
    entries: Vec<Deployment>,
}

impl DeploymentTable {
    pub fn builtin() -> Self {
        let entries = BUILTIN_DEPLOYMENTS
            .iter()
            .map(|(name, network, pool_id, hash)| Deployment {
                name: name.to_string(),
                network: Some(network.to_string()),
                pool_id: PoolId::new(*pool_id),
                creation_hash: Some(CreationHash::new(*hash)),
            })
            .collect();
        DeploymentTable { entries }
    }

    pub fn from_entries(entries: Vec<Deployment>) -> Self {
        DeploymentTable { entries }
    }

    /// Built-in table merged with `path`, when that file exists
    pub fn load(path: &Path) -> Result<Self, PoolToolError> {
        let mut table = Self::builtin();
        if !path.is_file() {
            logger::debug(
                LogTag::Deployments,
                &format!("No deployment file at {}, using built-in table", path.display()),
            );
            return Ok(table);
        }

        let contents = std::fs::read_to_string(path)?;
        let file: DeploymentFile = toml::from_str(&contents)
            .map_err(|e| PoolToolError::config_parse(path, e.to_string()))?;

        logger::debug(
            LogTag::Deployments,
            &format!("Merging {} deployment(s) from {}", file.deployment.len(), path.display()),
        );
        table.merge(file.deployment);
        Ok(table)
    }

    /// Add entries, replacing existing ones with the same name in place
    pub fn merge(&mut self, entries: Vec<Deployment>) {
        for entry in entries {
            match self.entries.iter_mut().find(|e| e.name == entry.name) {
                Some(existing) => *existing = entry,
                None => self.entries.push(entry),
            }
        }
    }

    /// Look up a deployment by name; `None` selects the first entry
    pub fn resolve(&self, name: Option<&str>) -> Result<&Deployment, PoolToolError> {
        let found = match name {
            Some(name) => self.entries.iter().find(|e| e.name == name),
            None => self.entries.first(),
        };

        found.ok_or_else(|| match name {
            Some(name) => PoolToolError::UnknownDeployment {
                name: name.to_string(),
                known: self.names().join(", "),
            },
            None => PoolToolError::Configuration("deployment table is empty".to_string()),
        })
    }

    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.name.as_str()).collect()
    }

    pub fn entries(&self) -> &[Deployment] {
        &self.entries
    }
}
