//! Remote Store Access
//!
//! Read and delete access to collections held in a Firebase Realtime Database,
//! addressed through its REST dialect (`{base_url}/{collection}.json`). Every call
//! returns an explicit `Result` so callers can branch on failures without aborting.

use crate::error::StoreError;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::Value;
use std::collections::{HashMap, HashSet};
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;
use tracing::debug;

/// Status code the REST API answers with when a delete succeeds.
pub const DELETE_SUCCESS_STATUS: StatusCode = StatusCode::OK;

/// Remote document store client trait
#[async_trait]
pub trait RemoteStore: Send + Sync {
    /// Fetch the full contents of a collection.
    ///
    /// `Ok(None)` means the store holds no data at that address.
    async fn fetch(&self, collection: &str) -> Result<Option<Value>, StoreError>;

    /// Remove everything stored under a collection.
    async fn delete(&self, collection: &str) -> Result<(), StoreError>;
}

// Helper function to map HTTP errors to StoreError
fn map_http_error(error: reqwest::Error) -> StoreError {
    if error.is_timeout() {
        StoreError::Timeout(error.to_string())
    } else if error.is_connect() {
        StoreError::Connect(error.to_string())
    } else if error.is_decode() || error.is_body() {
        StoreError::InvalidBody(error.to_string())
    } else {
        StoreError::Transport(error.to_string())
    }
}

/// Firebase Realtime Database REST client
pub struct FirebaseRestStore {
    client: Client,
    base_url: String,
}

impl FirebaseRestStore {
    pub fn new(
        base_url: &str,
        connect_timeout: Duration,
        request_timeout: Duration,
    ) -> Result<Self, StoreError> {
        let client = Client::builder()
            .connect_timeout(connect_timeout)
            .timeout(request_timeout)
            .build()
            .map_err(|e| StoreError::Transport(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// REST address of a collection.
    pub fn collection_url(&self, collection: &str) -> String {
        format!("{}/{}.json", self.base_url, collection)
    }
}

/// Parse a read response body. An empty body and JSON `null` both mean "no data".
pub fn parse_collection_body(body: &str) -> Result<Option<Value>, StoreError> {
    if body.trim().is_empty() {
        return Ok(None);
    }
    match serde_json::from_str::<Value>(body) {
        Ok(Value::Null) => Ok(None),
        Ok(value) => Ok(Some(value)),
        Err(e) => Err(StoreError::InvalidBody(e.to_string())),
    }
}

#[async_trait]
impl RemoteStore for FirebaseRestStore {
    async fn fetch(&self, collection: &str) -> Result<Option<Value>, StoreError> {
        let url = self.collection_url(collection);
        debug!(url = %url, "Fetching collection");

        let response = self.client.get(&url).send().await.map_err(map_http_error)?;
        let status = response.status();
        if !status.is_success() {
            return Err(StoreError::Status {
                status: status.as_u16(),
                url,
            });
        }

        let body = response.text().await.map_err(map_http_error)?;
        parse_collection_body(&body)
    }

    async fn delete(&self, collection: &str) -> Result<(), StoreError> {
        let url = self.collection_url(collection);
        debug!(url = %url, "Deleting collection");

        let response = self
            .client
            .delete(&url)
            .send()
            .await
            .map_err(map_http_error)?;
        let status = response.status();
        if status != DELETE_SUCCESS_STATUS {
            return Err(StoreError::Status {
                status: status.as_u16(),
                url,
            });
        }
        Ok(())
    }
}

/// A call recorded by [`FakeStore`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreCall {
    Fetch(String),
    Delete(String),
}

/// In-memory store with scripted failures and a call log, used in tests.
#[derive(Debug, Default)]
pub struct FakeStore {
    data: Mutex<HashMap<String, Value>>,
    failing_reads: HashSet<String>,
    failing_deletes: HashSet<String>,
    calls: Mutex<Vec<StoreCall>>,
}

impl FakeStore {
    /// Seed each collection with `count` push-key entries; zero leaves it absent.
    pub fn with_counts(counts: &[(&str, usize)]) -> Self {
        let store = Self::default();
        {
            let mut data = lock(&store.data);
            for (name, count) in counts.iter().filter(|(_, count)| *count > 0) {
                let entries: serde_json::Map<String, Value> = (0..*count)
                    .map(|i| (format!("-N{:06}", i), serde_json::json!({ "row": i })))
                    .collect();
                data.insert(name.to_string(), Value::Object(entries));
            }
        }
        store
    }

    pub fn fail_read(mut self, collection: &str) -> Self {
        self.failing_reads.insert(collection.to_string());
        self
    }

    pub fn fail_delete(mut self, collection: &str) -> Self {
        self.failing_deletes.insert(collection.to_string());
        self
    }

    pub fn calls(&self) -> Vec<StoreCall> {
        lock(&self.calls).clone()
    }

    pub fn delete_calls(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                StoreCall::Delete(name) => Some(name),
                StoreCall::Fetch(_) => None,
            })
            .collect()
    }

    /// Whether the collection still holds data.
    pub fn holds(&self, collection: &str) -> bool {
        lock(&self.data).contains_key(collection)
    }
}

// A poisoned lock only means another test thread panicked; the data is still usable.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|e| e.into_inner())
}

#[async_trait]
impl RemoteStore for FakeStore {
    async fn fetch(&self, collection: &str) -> Result<Option<Value>, StoreError> {
        lock(&self.calls).push(StoreCall::Fetch(collection.to_string()));
        if self.failing_reads.contains(collection) {
            return Err(StoreError::Timeout("operation timed out".to_string()));
        }
        Ok(lock(&self.data).get(collection).cloned())
    }

    async fn delete(&self, collection: &str) -> Result<(), StoreError> {
        lock(&self.calls).push(StoreCall::Delete(collection.to_string()));
        if self.failing_deletes.contains(collection) {
            return Err(StoreError::Status {
                status: 503,
                url: format!("fake://{}.json", collection),
            });
        }
        lock(&self.data).remove(collection);
        Ok(())
    }
}
