//! Inventory: per-collection size snapshot taken before anything is deleted.
//!
//! Reads never fail the run. An unreadable collection is counted as zero and the
//! read error is kept on the entry so the operator can be warned about it.

use crate::error::StoreError;
use crate::store::RemoteStore;
use serde::Serialize;
use serde_json::Value;
use tracing::{info, warn};

/// Count and read status of one collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CollectionCount {
    pub name: String,
    pub count: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub read_error: Option<StoreError>,
}

impl CollectionCount {
    pub fn has_data(&self) -> bool {
        self.count > 0
    }
}

/// Ordered inventory, in configured collection order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Inventory {
    entries: Vec<CollectionCount>,
}

impl Inventory {
    pub fn new(entries: Vec<CollectionCount>) -> Self {
        Self { entries }
    }

    /// Build from plain counts, with no read errors recorded.
    pub fn from_counts<S: AsRef<str>>(counts: &[(S, u64)]) -> Self {
        Self {
            entries: counts
                .iter()
                .map(|(name, count)| CollectionCount {
                    name: name.as_ref().to_string(),
                    count: *count,
                    read_error: None,
                })
                .collect(),
        }
    }

    pub fn entries(&self) -> &[CollectionCount] {
        &self.entries
    }

    pub fn total(&self) -> u64 {
        self.entries.iter().map(|e| e.count).sum()
    }

    pub fn is_empty_store(&self) -> bool {
        self.total() == 0
    }

    pub fn count_of(&self, name: &str) -> Option<u64> {
        self.entries.iter().find(|e| e.name == name).map(|e| e.count)
    }

    /// Entries whose read failed and were counted as zero.
    pub fn read_failures(&self) -> impl Iterator<Item = &CollectionCount> {
        self.entries.iter().filter(|e| e.read_error.is_some())
    }
}

/// Number of top-level entries in a collection payload.
///
/// Objects count their keys. Arrays (sparse Firebase lists) count non-null
/// elements. Any other scalar is a single entry.
pub fn count_entries(payload: Option<&Value>) -> u64 {
    match payload {
        None | Some(Value::Null) => 0,
        Some(Value::Object(map)) => map.len() as u64,
        Some(Value::Array(items)) => items.iter().filter(|v| !v.is_null()).count() as u64,
        Some(_) => 1,
    }
}

/// Query every collection, one after another, and count its entries.
pub async fn take_inventory(store: &dyn RemoteStore, collections: &[String]) -> Inventory {
    let mut entries = Vec::with_capacity(collections.len());

    for name in collections {
        let entry = match store.fetch(name).await {
            Ok(payload) => {
                let count = count_entries(payload.as_ref());
                info!(collection = %name, count, "Collection inventoried");
                CollectionCount {
                    name: name.clone(),
                    count,
                    read_error: None,
                }
            }
            Err(e) => {
                warn!(collection = %name, error = %e, "Could not count collection, treating as empty");
                CollectionCount {
                    name: name.clone(),
                    count: 0,
                    read_error: Some(e),
                }
            }
        };
        entries.push(entry);
    }

    Inventory::new(entries)
}
