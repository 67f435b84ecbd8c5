//! demo-reset CLI Binary
//!
//! Interactive reset of the demo collections in a Firebase Realtime Database.

use clap::Parser;
use demo_reset::cli::{exit_code, map_error, Cli, RunContext};
use demo_reset::logging::init_logging;
use std::process;
use tracing::{error, info};

fn main() {
    let cli = Cli::parse();

    let working_dir = std::env::current_dir().unwrap_or_else(|_| ".".into());
    let config = match RunContext::load_config(&cli, &working_dir) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", map_error(&e));
            process::exit(1);
        }
    };

    // Initialize logging early
    if let Err(e) = init_logging(Some(&config.logging)) {
        eprintln!("Failed to initialize logging: {}", e);
        process::exit(1);
    }

    info!("demo-reset starting");

    let context = match RunContext::new(config) {
        Ok(ctx) => {
            info!(
                collections = ctx.config().store.collections.len(),
                "Run context initialized"
            );
            ctx
        }
        Err(e) => {
            error!("Error initializing run context: {}", e);
            eprintln!("{}", map_error(&e));
            process::exit(1);
        }
    };

    let result = context.execute();
    if let Err(ref e) = result {
        error!("Reset failed: {}", e);
        eprintln!("{}", map_error(e));
    }
    process::exit(exit_code(&result));
}
