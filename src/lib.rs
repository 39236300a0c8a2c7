pub mod cli;
pub mod core;
pub mod providers;
pub mod store;

use crate::cli::Outcome;
use crate::core::config::AppConfig;
use crate::providers::OpenErApiFetcher;
use crate::store::FileRateStore;
use anyhow::Result;
use std::io::Write;
use tracing::{debug, info};

/// Runs a conversion for the positional `args`, printing to stdout.
pub async fn run_command(args: &[String], config_path: Option<&str>) -> Result<Outcome> {
    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");

    run_with_config(args, &config, &mut std::io::stdout()).await
}

/// Runs a conversion against the rate service and cache file named in `config`.
pub async fn run_with_config<W: Write>(
    args: &[String],
    config: &AppConfig,
    out: &mut W,
) -> Result<Outcome> {
    let fetcher = OpenErApiFetcher::from_config(&config.provider)?;
    let store = FileRateStore::new(&config.cache_path);
    info!(
        endpoint = fetcher.endpoint(),
        cache = %store.path().display(),
        "Starting conversion"
    );

    let progress = cli::ui::new_spinner(console::Term::stderr().is_term());
    cli::run(args, &fetcher, &store, progress, out).await
}
