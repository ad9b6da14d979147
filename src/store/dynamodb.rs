//! DynamoDB-backed product store.
//!
//! Items are flat: `productID` (S, partition key), `name` (S), `description` (S),
//! `price` (N), `available` (BOOL).
//!
//! DynamoDB numbers have a magnitude between 1E-130 and 1E+126. Prices outside that
//! range are refused with `StoreError::Unrepresentable` before any request is sent.

use super::ProductStore;
use crate::error::StoreError;
use crate::model::{Product, AVAILABLE, DESCRIPTION, NAME, PRICE, PRODUCT_ID};
use async_trait::async_trait;
use aws_config::timeout::TimeoutConfig;
use aws_sdk_dynamodb::error::DisplayErrorContext;
use aws_sdk_dynamodb::types::AttributeValue;
use aws_sdk_dynamodb::Client;
use std::collections::HashMap;
use std::time::Duration;

type Item = HashMap<String, AttributeValue>;

#[derive(Debug, Clone)]
pub struct DynamoDbConfig {
    pub table_name: String,
    /// Overrides the SDK region when set.
    pub region: Option<String>,
    /// Endpoint override, e.g. LocalStack.
    pub endpoint: Option<String>,
    pub timeout_ms: Option<u64>,
}

#[derive(Clone)]
pub struct DynamoDbStore {
    client: Client,
    table_name: String,
}

impl std::fmt::Debug for DynamoDbStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DynamoDbStore")
            .field("table_name", &self.table_name)
            .finish()
    }
}

impl DynamoDbStore {
    /// Build a client from shared SDK config, applying region, endpoint and timeout overrides.
    pub fn new(sdk_config: &aws_config::SdkConfig, config: DynamoDbConfig) -> Self {
        let mut builder = aws_sdk_dynamodb::config::Builder::from(sdk_config);
        if let Some(region) = config.region {
            builder = builder.region(aws_sdk_dynamodb::config::Region::new(region));
        }
        if let Some(endpoint) = config.endpoint {
            builder = builder.endpoint_url(endpoint);
        }
        if let Some(timeout_ms) = config.timeout_ms {
            let timeouts = TimeoutConfig::builder()
                .operation_timeout(Duration::from_millis(timeout_ms))
                .build();
            builder = builder.timeout_config(timeouts);
        }
        Self {
            client: Client::from_conf(builder.build()),
            table_name: config.table_name,
        }
    }

    pub fn from_client(client: Client, table_name: String) -> Self {
        Self { client, table_name }
    }

    pub fn table_name(&self) -> &str {
        &self.table_name
    }
}

fn backend<E>(op: &str, err: E) -> StoreError
where
    E: std::error::Error,
{
    StoreError::Backend(format!("DynamoDB {} failed: {}", op, DisplayErrorContext(err)))
}

/// Exclusive upper bound on the magnitude of a DynamoDB number.
const MAX_NUMBER_MAGNITUDE: f64 = 1e126;
/// Smallest non-zero magnitude DynamoDB accepts.
const MIN_NUMBER_MAGNITUDE: f64 = 1e-130;

fn number_attribute(id: &str, attr: &str, n: f64) -> Result<AttributeValue, StoreError> {
    let magnitude = n.abs();
    if !n.is_finite() || magnitude >= MAX_NUMBER_MAGNITUDE || (n != 0.0 && magnitude < MIN_NUMBER_MAGNITUDE) {
        return Err(StoreError::Unrepresentable {
            id: id.to_string(),
            message: format!("{} {} is outside the DynamoDB number range", attr, n),
        });
    }
    Ok(AttributeValue::N(n.to_string()))
}

pub(crate) fn product_to_item(product: &Product) -> Result<Item, StoreError> {
    let price = number_attribute(&product.product_id, PRICE, product.price)?;
    let mut item = HashMap::with_capacity(5);
    item.insert(PRODUCT_ID.to_string(), AttributeValue::S(product.product_id.clone()));
    item.insert(NAME.to_string(), AttributeValue::S(product.name.clone()));
    item.insert(DESCRIPTION.to_string(), AttributeValue::S(product.description.clone()));
    item.insert(PRICE.to_string(), price);
    item.insert(AVAILABLE.to_string(), AttributeValue::Bool(product.available));
    Ok(item)
}

pub(crate) fn item_to_product(item: &Item) -> Result<Product, StoreError> {
    let id = item
        .get(PRODUCT_ID)
        .and_then(|v| v.as_s().ok())
        .cloned()
        .unwrap_or_default();
    let corrupt = |message: String| StoreError::Corrupt {
        id: id.clone(),
        message,
    };
    if id.is_empty() {
        return Err(corrupt(format!("missing {}", PRODUCT_ID)));
    }
    let string = |attr: &str| {
        item.get(attr)
            .and_then(|v| v.as_s().ok())
            .cloned()
            .ok_or_else(|| corrupt(format!("{} is not a string attribute", attr)))
    };
    let name = string(NAME)?;
    let description = string(DESCRIPTION)?;
    let price = item
        .get(PRICE)
        .and_then(|v| v.as_n().ok())
        .and_then(|n| n.parse::<f64>().ok())
        .ok_or_else(|| corrupt(format!("{} is not a number attribute", PRICE)))?;
    let available = item
        .get(AVAILABLE)
        .and_then(|v| v.as_bool().ok())
        .copied()
        .ok_or_else(|| corrupt(format!("{} is not a boolean attribute", AVAILABLE)))?;
    Ok(Product {
        product_id: id.clone(),
        name,
        description,
        price,
        available,
    })
}

#[async_trait]
impl ProductStore for DynamoDbStore {
    async fn put(&self, product: &Product) -> Result<(), StoreError> {
        self.client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(product_to_item(product)?))
            .send()
            .await
            .map_err(|e| backend("PutItem", e))?;
        tracing::debug!(table = %self.table_name, id = %product.product_id, "put product");
        Ok(())
    }

    async fn get(&self, id: &str) -> Result<Option<Product>, StoreError> {
        let output = self
            .client
            .get_item()
            .table_name(&self.table_name)
            .key(PRODUCT_ID, AttributeValue::S(id.to_string()))
            .consistent_read(true)
            .send()
            .await
            .map_err(|e| backend("GetItem", e))?;
        output.item().map(item_to_product).transpose()
    }

    async fn delete(&self, id: &str) -> Result<(), StoreError> {
        self.client
            .delete_item()
            .table_name(&self.table_name)
            .key(PRODUCT_ID, AttributeValue::S(id.to_string()))
            .send()
            .await
            .map_err(|e| backend("DeleteItem", e))?;
        tracing::debug!(table = %self.table_name, id = %id, "deleted product");
        Ok(())
    }

    async fn scan(&self) -> Result<Vec<Product>, StoreError> {
        let mut products = Vec::new();
        let mut last_evaluated_key: Option<Item> = None;

        loop {
            let mut request = self.client.scan().table_name(&self.table_name);
            if let Some(key) = last_evaluated_key.take() {
                request = request.set_exclusive_start_key(Some(key));
            }
            let response = request.send().await.map_err(|e| backend("Scan", e))?;
            for item in response.items() {
                products.push(item_to_product(item)?);
            }
            match response.last_evaluated_key() {
                Some(key) if !key.is_empty() => last_evaluated_key = Some(key.clone()),
                _ => break,
            }
        }

        tracing::debug!(table = %self.table_name, count = products.len(), "scanned products");
        Ok(products)
    }
}
