//! demo-reset: interactive reset of demo data in a remote document store.
//!
//! A run takes an inventory of the configured collections, asks the operator to
//! type `DELETE`, deletes every non-empty collection one after another, and
//! reports what was actually removed. Individual read or delete failures are
//! recorded per collection and never abort the run.

pub mod cli;
pub mod config;
pub mod confirm;
pub mod error;
pub mod executor;
pub mod interrupt;
pub mod inventory;
pub mod logging;
pub mod report;
pub mod store;
pub mod workflow;
