//! Runtime configuration from environment variables (optionally via `.env`).

use crate::error::ConfigError;
use crate::store::{DynamoDbConfig, DEFAULT_TABLE_NAME};
use std::collections::HashMap;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
pub const DEFAULT_MAX_BODY_BYTES: usize = 1024 * 1024;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StoreBackend {
    Memory,
    DynamoDb,
}

impl std::str::FromStr for StoreBackend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "memory" => Ok(StoreBackend::Memory),
            "dynamodb" => Ok(StoreBackend::DynamoDb),
            _ => Err(ConfigError::UnknownStore(s.to_string())),
        }
    }
}

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub bind_addr: String,
    pub max_body_bytes: usize,
    pub backend: StoreBackend,
    pub table_name: String,
    pub region: Option<String>,
    pub dynamodb_endpoint: Option<String>,
    pub dynamodb_timeout_ms: Option<u64>,
}

impl AppConfig {
    /// Read from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(&std::env::vars().collect())
    }

    /// Read from an explicit variable map. Unset and empty values fall back to defaults.
    pub fn from_vars(vars: &HashMap<String, String>) -> Result<Self, ConfigError> {
        let get = |k: &str| vars.get(k).map(|v| v.trim()).filter(|v| !v.is_empty());

        let backend = match get("PRODUCT_STORE") {
            Some(s) => s.parse()?,
            None => StoreBackend::Memory,
        };
        let max_body_bytes = match get("MAX_BODY_BYTES") {
            Some(s) => s.parse::<usize>().map_err(|e| ConfigError::Invalid {
                var: "MAX_BODY_BYTES",
                message: e.to_string(),
            })?,
            None => DEFAULT_MAX_BODY_BYTES,
        };
        let dynamodb_timeout_ms = get("DYNAMODB_TIMEOUT_MS")
            .map(|s| {
                s.parse::<u64>().map_err(|e| ConfigError::Invalid {
                    var: "DYNAMODB_TIMEOUT_MS",
                    message: e.to_string(),
                })
            })
            .transpose()?;

        Ok(AppConfig {
            bind_addr: get("BIND_ADDR").unwrap_or(DEFAULT_BIND_ADDR).to_string(),
            max_body_bytes,
            backend,
            table_name: get("PRODUCTS_TABLE").unwrap_or(DEFAULT_TABLE_NAME).to_string(),
            region: get("AWS_REGION").map(str::to_string),
            dynamodb_endpoint: get("DYNAMODB_ENDPOINT").map(str::to_string),
            dynamodb_timeout_ms,
        })
    }

    pub fn dynamodb(&self) -> DynamoDbConfig {
        DynamoDbConfig {
            table_name: self.table_name.clone(),
            region: self.region.clone(),
            endpoint: self.dynamodb_endpoint.clone(),
            timeout_ms: self.dynamodb_timeout_ms,
        }
    }
}
