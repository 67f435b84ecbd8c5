//! CLI route: run context. Loads configuration, builds the store client and runs
//! the reset workflow on the terminal.

use crate::cli::parse::Cli;
use crate::config::{ConfigLoader, ResetConfig};
use crate::confirm::TerminalPrompt;
use crate::error::ResetError;
use crate::interrupt::CtrlC;
use crate::logging::LoggingConfig;
use crate::report::{self, Theme};
use crate::store::FirebaseRestStore;
use crate::workflow::{ResetWorkflow, RunOutcome};
use std::io::{IsTerminal, Write};
use std::path::Path;
use tracing::info;

/// Runtime context for one invocation: validated config and the store client.
pub struct RunContext {
    config: ResetConfig,
    store: FirebaseRestStore,
    theme: Theme,
}

impl RunContext {
    /// Load configuration from files and environment, then apply CLI overrides.
    pub fn load_config(cli: &Cli, working_dir: &Path) -> Result<ResetConfig, ResetError> {
        let mut config = if let Some(ref cfg_path) = cli.config {
            ConfigLoader::load_from_file(cfg_path)?
        } else {
            ConfigLoader::load(working_dir)?
        };

        if let Some(ref url) = cli.database_url {
            config.store.base_url = Some(url.clone());
        }
        config.logging = build_logging_config(cli, config.logging);
        Ok(config)
    }

    /// Validate configuration and create the store client.
    pub fn new(config: ResetConfig) -> Result<Self, ResetError> {
        config.validate().map_err(|errors| {
            ResetError::ConfigError(format!(
                "Configuration validation failed:\n  {}",
                errors.join("\n  ")
            ))
        })?;

        let base_url = config.store.base_url.as_deref().unwrap_or_default().trim();
        let store = FirebaseRestStore::new(
            base_url,
            config.store.connect_timeout(),
            config.store.request_timeout(),
        )
        .map_err(|e| ResetError::ConfigError(e.to_string()))?;

        Ok(Self {
            config,
            store,
            theme: Theme {
                color: std::io::stdout().is_terminal(),
            },
        })
    }

    pub fn config(&self) -> &ResetConfig {
        &self.config
    }

    /// Run the interactive reset against stdout.
    pub fn execute(&self) -> Result<RunOutcome, ResetError> {
        let stdout = std::io::stdout();
        let mut out = stdout.lock();
        writeln!(out, "{}", report::banner())?;
        writeln!(out, "{}", report::connecting_line(self.store.base_url()))?;

        let rt = tokio::runtime::Runtime::new()
            .map_err(|e| ResetError::RuntimeError(format!("Failed to create runtime: {}", e)))?;
        let prompt = TerminalPrompt;
        let interrupt = CtrlC;
        let workflow = ResetWorkflow::new(&self.store, &prompt, &self.config.store.collections)
            .with_interrupt(&interrupt)
            .with_theme(self.theme);

        let result = rt.block_on(workflow.run(&mut out));
        // The prompt thread may still be blocked on stdin after an interrupt.
        rt.shutdown_background();

        let outcome = result?;
        info!(outcome = outcome.label(), "Reset run ended");
        Ok(outcome)
    }
}

/// Fold CLI logging flags into the configured logging settings.
/// Precedence: CLI flags override config file override defaults.
fn build_logging_config(cli: &Cli, mut config: LoggingConfig) -> LoggingConfig {
    if cli.verbose {
        config.enabled = true;
        config.level = "debug".to_string();
    }
    if let Some(ref level) = cli.log_level {
        config.enabled = true;
        config.level = level.clone();
    }
    if let Some(ref format) = cli.log_format {
        config.format = format.clone();
    }
    if let Some(ref output) = cli.log_output {
        config.output = output.clone();
    }
    if let Some(ref file) = cli.log_file {
        config.file = Some(file.clone());
    }
    config
}
