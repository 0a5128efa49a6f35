//! Hunter headless client binary.
//!
//! Composition root that assembles:
//! 1. Content (config + catalogs) via `ContentFactory`
//! 2. One engine `Session` tuned by that content
//! 3. An event observer that logs everything the engine announces
//! 4. A scenario replay standing in for the interactive game loop
//!
//! # Examples
//!
//! ```bash
//! # Replay the bundled scenario
//! cargo run -p hunter-client
//!
//! # Custom content and scenario, debug logging
//! RUST_LOG=debug cargo run -p hunter-client -- --data-dir ./data --scenario boss.ron
//! ```

mod logging;
mod observer;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use hunter_content::ContentFactory;
use hunter_runtime::{RuntimeConfig, Scenario, Session};

#[derive(Debug, Parser)]
#[command(name = "hunter")]
#[command(about = "Replay host scenarios through the MFU resource engine", long_about = None)]
#[command(version)]
struct Cli {
    /// Content directory (overrides HUNTER_DATA_DIR)
    #[arg(short, long, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    /// Scenario file to replay (overrides HUNTER_SCENARIO)
    #[arg(short, long, value_name = "FILE")]
    scenario: Option<PathBuf>,

    /// Log only the replay summary, not every engine event
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    let mut config = RuntimeConfig::from_env();
    if let Some(data_dir) = cli.data_dir {
        config = config.with_data_dir(data_dir);
    }
    if let Some(scenario) = cli.scenario {
        config = config.with_scenario(scenario);
    }

    let _guard = logging::setup_logging(&config)?;
    tracing::info!("Starting hunter session {}", config.session_id);

    let factory = ContentFactory::new(&config.data_dir);
    let catalog = factory
        .load_catalog()
        .with_context(|| format!("loading content from {}", config.data_dir.display()))?;
    let session = Session::from_catalog(&catalog)?;

    if !cli.quiet {
        observer::log_all_events(&session);
    }

    let scenario_path = config
        .scenario
        .clone()
        .unwrap_or_else(|| factory.scenario_path("mfu_eviction"));
    let scenario = Scenario::load(&scenario_path)?;
    let report = scenario.replay(&session, &catalog)?;

    observer::log_summary(&session, &report);
    Ok(())
}
