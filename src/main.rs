mod browser;
mod cli;
mod client;
mod config;
mod error;
mod extract;
mod jobs;
mod logging;
mod utils;

use crate::cli::Cli;
use crate::config::{Config, ConfigSource};
use crate::error::Result;
use crate::jobs::{run_jobs, RunOptions};
use crate::logging::{init_logging, LoggerConfig};
use clap::Parser;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let (mut config, source) = Config::load(&cli.config)?;
    if let Some(backend) = cli.backend {
        config.browser.backend = backend;
    }
    config.retain(&cli.leagues, &cli.seasons);

    init_logging(LoggerConfig::from_config(&config.logging)?)?;
    log_info!("[main] Starting scraper...");
    match source {
        ConfigSource::File(path) => {
            log_info!("[config] Configuration loaded from {}", path.display());
        }
        ConfigSource::Defaults => {
            log_warn!(
                "[config] {} not found, using built-in defaults",
                cli.config.display()
            );
        }
    }

    let jobs = jobs::plan(&config, &cli.command.kinds())?;
    log_info!(
        "[main] {} jobs planned for {} leagues x {} seasons",
        jobs.len(),
        config.leagues.len(),
        config.seasons.len()
    );

    let mut browser = browser::open(&config).await?;
    log_info!("[main] Using {} backend", browser.name());

    let options = RunOptions::from_config(&config.browser);
    let summary = run_jobs(browser.as_mut(), &jobs, &options).await;

    if let Err(e) = browser.close().await {
        log_warn!("[main] Failed to close browser: {}", e);
    }

    summary.print_report();
    log_info!("[main] Done");
    Ok(())
}
