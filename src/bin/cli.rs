//! radio-curator CLI
//!
//! Local execution entry point. Writes snapshots under `--storage-dir`, or to
//! S3 with `--s3` when built with the `s3` feature.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use radio_curator::{
    error::{AppError, Result},
    models::Config,
    pipeline,
    services::{EndpointProber, StationApi},
    storage::{LocalStorage, SnapshotStorage},
    utils::url::mirror_host,
};

/// radio-curator - Radio Browser station curator
#[derive(Parser, Debug)]
#[command(
    name = "radio-curator",
    version,
    about = "Curated, region-sharded radio station snapshots"
)]
struct Cli {
    /// Directory holding config.toml and the output documents
    #[arg(short, long, default_value = "data", global = true)]
    storage_dir: PathBuf,

    /// Path to config file (default: {storage_dir}/config.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Write to and read from S3 instead of the storage directory
    #[cfg(feature = "s3")]
    #[arg(long, global = true)]
    s3: bool,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fetch, curate and publish all snapshots
    Run,

    /// Check which mirrors are reachable
    Probe,

    /// Re-shard an existing curated-stations.json into region documents
    Split,

    /// Check that every published document exists and parses
    Verify,

    /// Validate the configuration file
    Validate,
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

#[cfg(feature = "s3")]
async fn open_storage(cli: &Cli) -> Result<Box<dyn SnapshotStorage>> {
    if cli.s3 {
        let storage = radio_curator::storage::S3Storage::from_env().await?;
        return Ok(Box::new(storage));
    }
    Ok(Box::new(LocalStorage::new(&cli.storage_dir)))
}

#[cfg(not(feature = "s3"))]
async fn open_storage(cli: &Cli) -> Result<Box<dyn SnapshotStorage>> {
    Ok(Box::new(LocalStorage::new(&cli.storage_dir)))
}

/// Main entry point for the CLI application.
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(|| cli.storage_dir.join("config.toml"));

    match &cli.command {
        Command::Run => {
            let config = Config::load_or_default(&config_path);
            config.validate()?;

            let storage = open_storage(&cli).await?;
            log::info!("radio-curator starting, output: {}", storage.location());

            let stats = pipeline::run_pipeline(&config, storage.as_ref()).await?;
            log::info!("Run complete: {} curated stations", stats.curated);
        }

        Command::Probe => {
            let config = Config::load_or_default(&config_path);
            let api = StationApi::new(&config.fetch)?;
            let prober = EndpointProber::new(&api, config.fetch.probe_timeout());

            let results = prober.probe_all(&config.mirrors.endpoints).await;
            let reachable = results.iter().filter(|r| r.reachable).count();
            log::info!("{}/{} mirrors reachable", reachable, results.len());
            if reachable == 0 {
                log::warn!(
                    "A run would fall back to {}",
                    mirror_host(&config.mirrors.fallback)
                );
            }
        }

        Command::Split => {
            let storage = open_storage(&cli).await?;
            let regions = pipeline::run_split(storage.as_ref()).await?;
            let placed: usize = regions.iter().map(|r| r.total_stations).sum();
            log::info!("Split complete: {} placements across {} regions", placed, regions.len());
        }

        Command::Verify => {
            let storage = open_storage(&cli).await?;
            let report = pipeline::run_verify(storage.as_ref()).await?;
            if !report.is_valid() {
                return Err(AppError::validation(
                    "one or more documents are missing or invalid",
                ));
            }
            log::info!("All documents verified");
        }

        Command::Validate => {
            log::info!("Validating {}", config_path.display());
            let config = if config_path.exists() {
                Config::load(&config_path)?
            } else {
                log::warn!("No config file found, validating defaults");
                Config::default()
            };

            if let Err(e) = config.validate() {
                log::error!("Config validation failed: {}", e);
                return Err(e);
            }
            log::info!("Config OK");
        }
    }

    Ok(())
}
