use super::ScrapeJob;
use crate::browser::{dismiss_consent, Browser};
use crate::config::BrowserConfig;
use crate::error::{Result, ScraperError};
use crate::utils;
pub use crate::{log_debug, log_error, log_info, log_warn};
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct RunOptions {
    pub wait_timeout: Duration,
    pub consent_selectors: Vec<String>,
}

impl RunOptions {
    pub fn from_config(config: &BrowserConfig) -> Self {
        Self {
            wait_timeout: Duration::from_secs(config.wait_timeout),
            consent_selectors: config.consent_selectors.clone(),
        }
    }
}

#[derive(Debug, Default)]
pub struct RunSummary {
    pub succeeded: Vec<(String, usize)>,
    pub failed: Vec<(String, String)>, // (job, reason)
}

impl RunSummary {
    pub fn record_success(&mut self, job: String, records: usize) {
        self.succeeded.push((job, records));
    }

    pub fn record_failure(&mut self, job: String, reason: String) {
        self.failed.push((job, reason));
    }

    pub fn total(&self) -> usize {
        self.succeeded.len() + self.failed.len()
    }

    pub fn print_report(&self) {
        log_info!(
            "[runner] Finished {} jobs: {} succeeded, {} failed",
            self.total(),
            self.succeeded.len(),
            self.failed.len()
        );
        for (job, records) in &self.succeeded {
            log_info!("[runner]   ok      {} ({} rows)", job, records);
        }
        for (job, reason) in &self.failed {
            log_warn!("[runner]   failed  {}: {}", job, reason);
        }
    }
}

/// Scrapes one page end to end and returns the number of rows written.
pub async fn run_job(
    browser: &mut dyn Browser,
    job: &ScrapeJob,
    options: &RunOptions,
) -> Result<usize> {
    log_info!("[runner] Scraping {}...", job.label);
    log_info!("[runner] URL: {}", job.url);

    browser.navigate(&job.url).await?;
    dismiss_consent(&*browser, &options.consent_selectors).await;
    browser
        .wait_for_selector(job.kind.anchor(), options.wait_timeout)
        .await?;

    if let Ok(Some(heading)) = browser.get_text("h1").await {
        log_debug!("[runner] Page heading: {}", heading);
    }

    let records = job.kind.extract(&*browser).await?;
    if records.is_empty() {
        return Err(ScraperError::NoFields(job.label.clone()).into());
    }

    let header = job.kind.header();
    for record in &records {
        let missing = record.missing(header);
        if !missing.is_empty() {
            log_warn!(
                "[runner] {} is missing {:?}, writing 0",
                job.label,
                missing
            );
        }
    }

    utils::write_csv(&job.data_path, header, &records)?;
    log_info!("[runner] Data saved to {}", job.data_path.display());

    utils::ensure_parent(&job.screenshot_path)?;
    let shot = browser.screenshot(&job.screenshot_path).await?;
    log_info!("[runner] Screenshot saved to {}", shot.display());

    Ok(records.len())
}

/// Runs every job in order. A failing job is logged, gets an error
/// screenshot when possible, and never stops the jobs after it.
pub async fn run_jobs(
    browser: &mut dyn Browser,
    jobs: &[ScrapeJob],
    options: &RunOptions,
) -> RunSummary {
    let mut summary = RunSummary::default();

    for job in jobs {
        match run_job(browser, job, options).await {
            Ok(records) => summary.record_success(job.label.clone(), records),
            Err(e) => {
                log_error!(e => "[runner] Error scraping {}", job.label);
                capture_error_screenshot(&*browser, job).await;
                summary.record_failure(job.label.clone(), e.to_string());
            }
        }
    }

    summary
}

async fn capture_error_screenshot(browser: &dyn Browser, job: &ScrapeJob) {
    let path = &job.error_screenshot_path;
    if let Err(e) = utils::ensure_parent(path) {
        log_warn!("[runner] Cannot create error screenshot directory: {}", e);
        return;
    }
    match browser.screenshot(path).await {
        Ok(written) => {
            log_info!("[runner] Error screenshot saved as {}", written.display());
        }
        Err(e) => {
            log_warn!("[runner] Error screenshot failed: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::browser::fake::FakeBrowser;
    use crate::config::{Config, League};
    use crate::jobs::{plan, JobKind};

    fn standings_page(teams: &[&str]) -> String {
        let rows: String = teams
            .iter()
            .enumerate()
            .map(|(i, team)| {
                format!(
                    "<tr><td>{}</td><td></td><td>{}</td><td>34</td><td>20</td><td>8</td>\
                     <td>6</td><td>60:30</td><td>30</td><td>68</td></tr>",
                    i + 1,
                    team
                )
            })
            .collect();
        format!(
            "<h1>Süper Lig</h1><table class='items'><tbody>{}</tbody></table>",
            rows
        )
    }

    fn config(root: &std::path::Path) -> Config {
        let mut config = Config::default();
        config.leagues = vec![League::new("TR1", "super-lig")];
        config.seasons = vec![2023, 2022];
        config.output.data_dir = root.join("data");
        config.output.screenshot_dir = root.join("screenshots");
        config
    }

    fn options() -> RunOptions {
        RunOptions::from_config(&Default::default())
    }

    #[tokio::test]
    async fn writes_csv_and_screenshot_for_each_job() {
        let dir = tempfile::tempdir().unwrap();
        let config = config(dir.path());
        let jobs = plan(&config, &[JobKind::Standings]).unwrap();

        let first = standings_page(&["Galatasaray", "Fenerbahçe", "Trabzonspor"]);
        let mut browser = FakeBrowser::new()
            .with_page(&jobs[0].url, &first)
            .with_page(&jobs[1].url, &standings_page(&["Galatasaray"]));

        let summary = run_jobs(&mut browser, &jobs, &options()).await;
        assert_eq!(summary.succeeded.len(), 2);
        assert!(summary.failed.is_empty());
        assert_eq!(summary.succeeded[0].1, 3);

        let csv = std::fs::read_to_string(&jobs[0].data_path).unwrap();
        let lines: Vec<_> = csv.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(
            lines[0],
            "Siralama,Takim,Mac,Galibiyet,Beraberlik,Maglubiyet,Attigi_Gol,Yedigi_Gol,Averaj,Puan"
        );
        assert_eq!(lines[1], "1,Galatasaray,34,20,8,6,60,30,30,68");
        assert!(lines[3].starts_with("3,Trabzonspor,"));

        assert_eq!(
            browser.screenshots(),
            vec![jobs[0].screenshot_path.clone(), jobs[1].screenshot_path.clone()]
        );
    }

    #[tokio::test]
    async fn failed_season_does_not_stop_the_next() {
        let dir = tempfile::tempdir().unwrap();
        let config = config(dir.path());
        let jobs = plan(&config, &[JobKind::Standings]).unwrap();

        let mut browser = FakeBrowser::new()
            .with_page(&jobs[0].url, &standings_page(&["Galatasaray"]))
            .with_failing(&jobs[0].url)
            .with_page(&jobs[1].url, &standings_page(&["Fenerbahçe"]));

        let summary = run_jobs(&mut browser, &jobs, &options()).await;
        assert_eq!(summary.failed.len(), 1);
        assert_eq!(summary.failed[0].0, jobs[0].label);
        assert_eq!(summary.succeeded, vec![(jobs[1].label.clone(), 1)]);

        assert!(!jobs[0].data_path.exists());
        assert!(jobs[1].data_path.exists());
        assert_eq!(browser.visited(), vec![jobs[0].url.clone(), jobs[1].url.clone()]);
        assert_eq!(
            browser.screenshots(),
            vec![
                jobs[0].error_screenshot_path.clone(),
                jobs[1].screenshot_path.clone()
            ]
        );
    }

    #[tokio::test]
    async fn missing_anchor_is_a_failure() {
        let dir = tempfile::tempdir().unwrap();
        let config = config(dir.path());
        let jobs = plan(&config, &[JobKind::Standings]).unwrap();

        let mut browser = FakeBrowser::new().with_page(&jobs[0].url, "<p>Bakımdayız</p>");
        let result = run_job(&mut browser, &jobs[0], &options()).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn empty_transfer_page_fails_without_writing() {
        let dir = tempfile::tempdir().unwrap();
        let config = config(dir.path());
        let jobs = plan(&config, &[JobKind::Transfers]).unwrap();

        let mut browser = FakeBrowser::new()
            .with_page(&jobs[0].url, "<div class='large-8 columns'></div>");
        let summary = run_jobs(&mut browser, &jobs[..1], &options()).await;
        assert_eq!(summary.failed.len(), 1);
        assert!(!jobs[0].data_path.exists());
    }

    #[tokio::test]
    async fn consent_is_dismissed_before_waiting() {
        let dir = tempfile::tempdir().unwrap();
        let config = config(dir.path());
        let jobs = plan(&config, &[JobKind::Uefa]).unwrap();

        let mut browser = FakeBrowser::new()
            .with_page(&jobs[0].url, "<table class='items'><tbody></tbody></table>")
            .with_visible(&["button#onetrust-accept-btn-handler"]);
        // Table without rows still fails, but only after the dialog is handled
        assert!(run_job(&mut browser, &jobs[0], &options()).await.is_err());
        assert_eq!(browser.clicks(), vec!["button#onetrust-accept-btn-handler"]);
    }
}
