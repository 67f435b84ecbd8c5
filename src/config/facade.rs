//! Config loader facade: assembles sources in precedence order and deserializes.

use super::merge::builder_with_defaults;
use super::sources::{environment, global_file, local_file};
use super::ResetConfig;
use crate::error::ResetError;
use config::File;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Loads `ResetConfig` from defaults, files and environment.
///
/// Precedence (highest last): defaults, global file, `demo-reset.toml` in the
/// working directory, environment. An explicit file replaces both file layers.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load using the global and local config files.
    pub fn load(working_dir: &Path) -> Result<ResetConfig, ResetError> {
        Self::load_with_env(working_dir, None)
    }

    /// Load from an explicit file plus environment overrides.
    pub fn load_from_file(path: &Path) -> Result<ResetConfig, ResetError> {
        Self::load_from_file_with_env(path, None)
    }

    /// Like [`ConfigLoader::load`], with an injected environment instead of the process one.
    pub fn load_with_env(
        working_dir: &Path,
        env: Option<HashMap<String, String>>,
    ) -> Result<ResetConfig, ResetError> {
        let builder = builder_with_defaults()?;
        let builder = global_file::add_to_builder(builder)?;
        let builder = local_file::add_to_builder(builder, working_dir)?;
        let builder = environment::add_to_builder(builder, env)?;
        Ok(builder.build()?.try_deserialize()?)
    }

    pub fn load_from_file_with_env(
        path: &Path,
        env: Option<HashMap<String, String>>,
    ) -> Result<ResetConfig, ResetError> {
        if !path.exists() {
            return Err(ResetError::ConfigError(format!(
                "Config file not found: {}",
                path.display()
            )));
        }
        let builder = builder_with_defaults()?.add_source(File::from(path.to_path_buf()));
        let builder = environment::add_to_builder(builder, env)?;
        Ok(builder.build()?.try_deserialize()?)
    }

    /// Global config file location, if a home directory is known.
    pub fn global_config_path() -> Option<PathBuf> {
        global_file::global_config_path()
    }
}
