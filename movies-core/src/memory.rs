//! In-memory key-value store for handler tests
//!
//! Records every call it receives and can be told to fail specific
//! operations, so tests can assert on exactly which store calls a request made.

use crate::error::StoreError;
use crate::store::{to_item, Item, KeyValueStore};
use async_trait::async_trait;
use aws_sdk_dynamodb::types::AttributeValue;
use std::collections::HashMap;
use std::sync::Mutex;

#[derive(Debug, Clone, PartialEq)]
pub enum StoreCall {
    Get {
        table: String,
        key: Item,
    },
    Delete {
        table: String,
        key: Item,
    },
    Query {
        table: String,
        partition_attribute: String,
        value: AttributeValue,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Get,
    Delete,
    Query,
}

impl Operation {
    fn name(self) -> &'static str {
        match self {
            Self::Get => "GetItem",
            Self::Delete => "DeleteItem",
            Self::Query => "Query",
        }
    }
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: Mutex<HashMap<String, Vec<Item>>>,
    calls: Mutex<Vec<StoreCall>>,
    failures: Mutex<HashMap<Operation, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, table: &str, item: Item) {
        self.tables
            .lock()
            .unwrap()
            .entry(table.to_string())
            .or_default()
            .push(item);
    }

    /// Inserts a JSON object, marshalled the same way real records are.
    pub fn insert_json(&self, table: &str, record: serde_json::Value) {
        let item = to_item(&record).expect("record should marshal into an item");
        self.insert(table, item);
    }

    /// Makes every following `operation` fail with `message`.
    pub fn fail(&self, operation: Operation, message: &str) {
        self.failures
            .lock()
            .unwrap()
            .insert(operation, message.to_string());
    }

    pub fn calls(&self) -> Vec<StoreCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn items(&self, table: &str) -> Vec<Item> {
        self.tables
            .lock()
            .unwrap()
            .get(table)
            .cloned()
            .unwrap_or_default()
    }

    fn record(&self, call: StoreCall) {
        self.calls.lock().unwrap().push(call);
    }

    fn check(&self, operation: Operation, table: &str) -> Result<(), StoreError> {
        match self.failures.lock().unwrap().get(&operation) {
            Some(message) => Err(StoreError::backend(operation.name(), table, message.clone())),
            None => Ok(()),
        }
    }
}

fn matches_key(item: &Item, key: &Item) -> bool {
    key.iter().all(|(name, value)| item.get(name) == Some(value))
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get_item(&self, table: &str, key: Item) -> Result<Option<Item>, StoreError> {
        self.record(StoreCall::Get {
            table: table.to_string(),
            key: key.clone(),
        });
        self.check(Operation::Get, table)?;

        Ok(self
            .items(table)
            .into_iter()
            .find(|item| matches_key(item, &key)))
    }

    async fn delete_item(&self, table: &str, key: Item) -> Result<(), StoreError> {
        self.record(StoreCall::Delete {
            table: table.to_string(),
            key: key.clone(),
        });
        self.check(Operation::Delete, table)?;

        if let Some(items) = self.tables.lock().unwrap().get_mut(table) {
            items.retain(|item| !matches_key(item, &key));
        }
        Ok(())
    }

    async fn query_partition(
        &self,
        table: &str,
        partition_attribute: &str,
        value: AttributeValue,
    ) -> Result<Vec<Item>, StoreError> {
        self.record(StoreCall::Query {
            table: table.to_string(),
            partition_attribute: partition_attribute.to_string(),
            value: value.clone(),
        });
        self.check(Operation::Query, table)?;

        Ok(self
            .items(table)
            .into_iter()
            .filter(|item| item.get(partition_attribute) == Some(&value))
            .collect())
    }
}
