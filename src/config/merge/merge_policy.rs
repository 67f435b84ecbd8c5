//! Merge rules: defaults, override order, conflict handling.

use config::Config;
use config::ConfigBuilder;
use config::ConfigError;

/// Collections cleared by a reset of the reference demo deployment.
pub const DEFAULT_COLLECTIONS: [&str; 4] = [
    "tailoring_customers",
    "tailoring_sales",
    "tailoring_masters",
    "tailoring_work_entries",
];

pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Create a Config builder with merge policy defaults applied.
///
/// Later sources replace whole values; `store.collections` is never merged
/// element-wise.
pub fn builder_with_defaults() -> Result<ConfigBuilder<config::builder::DefaultState>, ConfigError>
{
    Config::builder()
        .set_default("store.collections", DEFAULT_COLLECTIONS.to_vec())?
        .set_default("store.timeout_secs", DEFAULT_TIMEOUT_SECS)?
        .set_default("store.connect_timeout_secs", DEFAULT_TIMEOUT_SECS)
}
