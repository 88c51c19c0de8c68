use crate::config::Backend;
use crate::jobs::JobKind;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "football-scraper",
    version,
    about = "Scrapes league standings, transfer balances and UEFA coefficients into CSV files"
)]
pub struct Cli {
    /// Configuration file; built-in defaults are used when it does not exist
    #[arg(short, long, default_value = "config.toml")]
    pub config: PathBuf,

    /// Override the configured page backend
    #[arg(short, long, value_enum)]
    pub backend: Option<Backend>,

    /// Only scrape these leagues (by name, e.g. super-lig)
    #[arg(short, long = "league")]
    pub leagues: Vec<String>,

    /// Only scrape these seasons (start year)
    #[arg(short, long = "season")]
    pub seasons: Vec<u32>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// League standings per league and season
    League,
    /// Transfer balance per league and season
    Transfer,
    /// UEFA five-year country coefficients
    Uefa,
    /// Everything above
    All,
}

impl Command {
    pub fn kinds(&self) -> Vec<JobKind> {
        match self {
            Command::League => vec![JobKind::Standings],
            Command::Transfer => vec![JobKind::Transfers],
            Command::Uefa => vec![JobKind::Uefa],
            Command::All => vec![JobKind::Standings, JobKind::Transfers, JobKind::Uefa],
        }
    }
}
