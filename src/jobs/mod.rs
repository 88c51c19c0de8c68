mod runner;
mod standings;
mod transfers;
mod uefa;

pub use runner::{run_jobs, RunOptions};

use crate::browser::Browser;
use crate::config::{render_url, Config};
use crate::error::Result;
use crate::extract::FieldRecord;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobKind {
    Standings,
    Transfers,
    Uefa,
}

impl JobKind {
    /// Sub-directory under the data and screenshot roots.
    pub fn dir(&self) -> &'static str {
        match self {
            JobKind::Standings => "league",
            JobKind::Transfers => "transfer",
            JobKind::Uefa => "uefa",
        }
    }

    pub fn header(&self) -> &'static [&'static str] {
        match self {
            JobKind::Standings => standings::HEADER,
            JobKind::Transfers => transfers::HEADER,
            JobKind::Uefa => uefa::HEADER,
        }
    }

    /// Selector whose presence means the page content has loaded.
    pub fn anchor(&self) -> &'static str {
        match self {
            JobKind::Standings => standings::ANCHOR,
            JobKind::Transfers => transfers::ANCHOR,
            JobKind::Uefa => uefa::ANCHOR,
        }
    }

    pub async fn extract(&self, browser: &dyn Browser) -> Result<Vec<FieldRecord>> {
        match self {
            JobKind::Standings => standings::extract(browser).await,
            JobKind::Transfers => transfers::extract(browser).await,
            JobKind::Uefa => uefa::extract(browser).await,
        }
    }
}

/// One page to scrape and where its output goes.
#[derive(Debug, Clone)]
pub struct ScrapeJob {
    pub kind: JobKind,
    pub label: String,
    pub url: String,
    pub data_path: PathBuf,
    pub screenshot_path: PathBuf,
    pub error_screenshot_path: PathBuf,
}

/// Jobs for `kinds`, leagues outermost and seasons inner, in configuration order.
///
/// League and season filters only matter to per-league kinds, so an empty
/// selection fails those and leaves the UEFA job alone.
pub fn plan(config: &Config, kinds: &[JobKind]) -> Result<Vec<ScrapeJob>> {
    let mut jobs = Vec::new();
    for &kind in kinds {
        let template = match kind {
            JobKind::Standings => &config.urls.standings,
            JobKind::Transfers => &config.urls.transfers,
            JobKind::Uefa => {
                jobs.push(uefa::job(config));
                continue;
            }
        };
        config.ensure_selection()?;
        jobs.extend(league_season_jobs(config, kind, template));
    }
    Ok(jobs)
}

fn league_season_jobs(config: &Config, kind: JobKind, template: &str) -> Vec<ScrapeJob> {
    let data_dir = config.output.data_dir.join(kind.dir());
    let screenshot_dir = config.output.screenshot_dir.join(kind.dir());

    config
        .leagues
        .iter()
        .flat_map(|league| {
            let data_dir = &data_dir;
            let screenshot_dir = &screenshot_dir;
            config.seasons.iter().map(move |&season| {
                let stem = format!("{}_{}_{}", league.name, season, season + 1);
                ScrapeJob {
                    kind,
                    label: format!("{} {} {}/{}", kind.dir(), league.name, season, season + 1),
                    url: render_url(template, Some(league), season),
                    data_path: data_dir.join(format!("{}.csv", stem)),
                    screenshot_path: screenshot_dir.join(format!("{}.png", stem)),
                    error_screenshot_path: screenshot_dir
                        .join(format!("error_{}_{}.png", league.name, season)),
                }
            })
        })
        .collect()
}
