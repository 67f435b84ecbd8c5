//! Environment source: DEMO_RESET__STORE__BASE_URL, DEMO_RESET__STORE__COLLECTIONS, ...

use config::builder::DefaultState;
use config::ConfigBuilder;
use config::ConfigError;
use config::Environment;
use std::collections::HashMap;

pub const ENV_PREFIX: &str = "DEMO_RESET";

/// Add environment overrides. `vars` replaces the process environment when given.
///
/// `DEMO_RESET__STORE__COLLECTIONS` is a comma-separated list.
pub fn add_to_builder(
    builder: ConfigBuilder<DefaultState>,
    vars: Option<HashMap<String, String>>,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    let env = Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
        .list_separator(",")
        .with_list_parse_key("store.collections")
        .source(vars);
    Ok(builder.add_source(env))
}
