//! Storage inspection entry point.
//!
//! Loads a data directory and a scenario, then reports every storage in the
//! resulting world together with its capacity and crafting eligibility.
mod config;
mod report;

use anyhow::{Context, Result};
use storage_content::ContentFactory;
use storage_core::ContainerFactory;
use storage_runtime::{OracleManager, Scenario};

use config::{CliConfig, OutputFormat};

fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    setup_logging();

    let config = CliConfig::from_env();
    tracing::info!(data_dir = %config.data_dir.display(), scenario = %config.scenario, "starting inspection");

    let content = ContentFactory::new(&config.data_dir);
    let storage_config = content.load_config().context("loading storage config")?;
    let oracles = OracleManager::from_content(
        content.load_data().context("loading data catalog")?,
        content.load_translations().context("loading translations")?,
    );

    let scenario_path = content.scenario_path(&config.scenario);
    let world = Scenario::load_from_file(&scenario_path)
        .with_context(|| format!("loading scenario {}", scenario_path.display()))?
        .build_world()
        .context("building world")?;

    let factory = ContainerFactory::new(oracles.as_storage_env(), &storage_config);
    let env = oracles.as_storage_env();
    let report = report::build(&world, &factory, &env, config.farmer.as_deref())?;

    match config.format {
        OutputFormat::Text => print!("{}", report),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
    }
    Ok(())
}

/// Logs to stderr, `info` unless `RUST_LOG` says otherwise.
fn setup_logging() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
}
