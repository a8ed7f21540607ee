//! Key-value store seam and its DynamoDB implementation
//!
//! The handlers only need four things from the store: build a client once,
//! get an item by key, delete an item by key and query every item sharing a
//! partition key. `KeyValueStore` is that contract; `DynamoStore` fulfils it
//! against DynamoDB.

use crate::config::MovieConfig;
use crate::error::StoreError;
use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_dynamodb::config::Region;
use aws_sdk_dynamodb::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use aws_sdk_dynamodb::types::AttributeValue;
use aws_sdk_dynamodb::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashMap;

/// A raw DynamoDB item
pub type Item = HashMap<String, AttributeValue>;

#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Point lookup. `None` when no item exists at `key`.
    async fn get_item(&self, table: &str, key: Item) -> Result<Option<Item>, StoreError>;

    /// Unconditional delete. Succeeds whether or not the item existed.
    async fn delete_item(&self, table: &str, key: Item) -> Result<(), StoreError>;

    /// Every item whose `partition_attribute` equals `value`, in sort-key order.
    async fn query_partition(
        &self,
        table: &str,
        partition_attribute: &str,
        value: AttributeValue,
    ) -> Result<Vec<Item>, StoreError>;
}

/// Builds the DynamoDB client shared by every invocation in this process.
///
/// Inherits the default SDK configuration (credentials, retry, HTTP client)
/// and applies the configured region on top.
pub async fn build_client(config: &MovieConfig) -> Client {
    let sdk_config = aws_config::load_defaults(BehaviorVersion::latest()).await;
    let mut builder = aws_sdk_dynamodb::config::Builder::from(&sdk_config);

    if let Some(region) = &config.region {
        builder = builder.region(Region::new(region.clone()));
    }

    Client::from_conf(builder.build())
}

/// Marshals a key or record into an item.
///
/// Fields skipped by the value's `Serialize` impl are left out, empty strings
/// and lists are kept, and nested structs become plain maps.
pub fn to_item<T: Serialize>(value: &T) -> Result<Item, serde_dynamo::Error> {
    serde_dynamo::to_item(value)
}

/// Unmarshals an item. Numbers come back as native numbers, never as strings.
pub fn from_item<T: DeserializeOwned>(item: Item) -> Result<T, serde_dynamo::Error> {
    serde_dynamo::from_item(item)
}

#[derive(Clone, Debug)]
pub struct DynamoStore {
    client: Client,
}

impl DynamoStore {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    pub async fn from_config(config: &MovieConfig) -> Self {
        Self::new(build_client(config).await)
    }
}

fn backend_error<E, R>(operation: &'static str, table: &str, error: SdkError<E, R>) -> StoreError
where
    E: ProvideErrorMetadata + std::error::Error + 'static,
    R: std::fmt::Debug,
{
    // Service errors carry a human readable message; transport errors only have their chain
    let message = error
        .message()
        .map(str::to_owned)
        .unwrap_or_else(|| DisplayErrorContext(&error).to_string());
    StoreError::backend(operation, table, message)
}

#[async_trait]
impl KeyValueStore for DynamoStore {
    async fn get_item(&self, table: &str, key: Item) -> Result<Option<Item>, StoreError> {
        let response = self
            .client
            .get_item()
            .table_name(table)
            .set_key(Some(key))
            .send()
            .await
            .map_err(|e| backend_error("GetItem", table, e))?;

        Ok(response.item().cloned())
    }

    async fn delete_item(&self, table: &str, key: Item) -> Result<(), StoreError> {
        self.client
            .delete_item()
            .table_name(table)
            .set_key(Some(key))
            .send()
            .await
            .map_err(|e| backend_error("DeleteItem", table, e))?;

        Ok(())
    }

    async fn query_partition(
        &self,
        table: &str,
        partition_attribute: &str,
        value: AttributeValue,
    ) -> Result<Vec<Item>, StoreError> {
        let response = self
            .client
            .query()
            .table_name(table)
            .key_condition_expression("#pk = :pk")
            .expression_attribute_names("#pk", partition_attribute)
            .expression_attribute_values(":pk", value)
            .send()
            .await
            .map_err(|e| backend_error("Query", table, e))?;

        Ok(response.items().to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    #[test]
    fn numbers_unmarshal_as_native_numbers() {
        let item: Item = HashMap::from([
            ("movieId".to_string(), AttributeValue::N("42".to_string())),
            ("actor".to_string(), AttributeValue::S("A".to_string())),
            ("rating".to_string(), AttributeValue::N("7.5".to_string())),
        ]);

        let value: Value = from_item(item).unwrap();

        assert_eq!(value, json!({ "movieId": 42, "actor": "A", "rating": 7.5 }));
    }

    #[test]
    fn keys_marshal_to_number_attributes() {
        #[derive(Serialize)]
        struct Key {
            id: i64,
        }

        let item = to_item(&Key { id: 42 }).unwrap();

        assert_eq!(item.get("id"), Some(&AttributeValue::N("42".to_string())));
        assert_eq!(item.len(), 1);
    }

    #[test]
    fn skipped_fields_are_stripped_and_empty_values_kept() {
        #[derive(Serialize)]
        struct Record {
            title: String,
            #[serde(skip_serializing_if = "Option::is_none")]
            tagline: Option<String>,
            genre_ids: Vec<i64>,
        }

        let item = to_item(&Record {
            title: String::new(),
            tagline: None,
            genre_ids: Vec::new(),
        })
        .unwrap();

        assert_eq!(item.get("title"), Some(&AttributeValue::S(String::new())));
        assert_eq!(item.get("genre_ids"), Some(&AttributeValue::L(Vec::new())));
        assert!(!item.contains_key("tagline"));
    }
}
