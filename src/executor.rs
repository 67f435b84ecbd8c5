//! Destructive executor: deletes every non-empty collection from an inventory.
//!
//! Collections are processed strictly in inventory order. A failed delete is
//! recorded and the batch moves on; nothing here aborts early.

use crate::error::StoreError;
use crate::inventory::Inventory;
use crate::store::RemoteStore;
use serde::Serialize;
use tracing::{error, info};

/// Terminal status of one collection's deletion attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DeletionOutcome {
    SkippedEmpty,
    /// Items found by the inventory before the delete succeeded.
    Deleted { count: u64 },
    Failed { error: StoreError },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CollectionOutcome {
    pub name: String,
    #[serde(flatten)]
    pub outcome: DeletionOutcome,
}

/// Per-collection outcomes of one reset, in processing order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ResetReport {
    outcomes: Vec<CollectionOutcome>,
}

impl ResetReport {
    pub fn new(outcomes: Vec<CollectionOutcome>) -> Self {
        Self { outcomes }
    }

    pub fn outcomes(&self) -> &[CollectionOutcome] {
        &self.outcomes
    }

    pub fn outcome_of(&self, name: &str) -> Option<&DeletionOutcome> {
        self.outcomes
            .iter()
            .find(|o| o.name == name)
            .map(|o| &o.outcome)
    }

    /// Collections that were actually deleted, with their pre-deletion counts.
    pub fn deleted(&self) -> impl Iterator<Item = (&str, u64)> {
        self.outcomes.iter().filter_map(|o| match o.outcome {
            DeletionOutcome::Deleted { count } => Some((o.name.as_str(), count)),
            _ => None,
        })
    }

    pub fn failed(&self) -> impl Iterator<Item = &CollectionOutcome> {
        self.outcomes
            .iter()
            .filter(|o| matches!(o.outcome, DeletionOutcome::Failed { .. }))
    }

    /// Sum of inventoried counts over successful deletes only.
    pub fn total_deleted(&self) -> u64 {
        self.deleted().map(|(_, count)| count).sum()
    }
}

/// Delete all non-empty collections of `inventory`.
///
/// Counts come from the inventory; nothing is re-queried. `on_outcome` is called
/// once per collection as soon as its outcome is known.
pub async fn execute_reset(
    store: &dyn RemoteStore,
    inventory: &Inventory,
    on_outcome: &mut dyn FnMut(&CollectionOutcome),
) -> ResetReport {
    let mut outcomes = Vec::with_capacity(inventory.entries().len());

    for entry in inventory.entries() {
        let outcome = if !entry.has_data() {
            info!(collection = %entry.name, "Skipping empty collection");
            DeletionOutcome::SkippedEmpty
        } else {
            match store.delete(&entry.name).await {
                Ok(()) => {
                    info!(collection = %entry.name, count = entry.count, "Collection deleted");
                    DeletionOutcome::Deleted { count: entry.count }
                }
                Err(e) => {
                    error!(collection = %entry.name, error = %e, "Collection delete failed");
                    DeletionOutcome::Failed { error: e }
                }
            }
        };

        let record = CollectionOutcome {
            name: entry.name.clone(),
            outcome,
        };
        on_outcome(&record);
        outcomes.push(record);
    }

    ResetReport::new(outcomes)
}
