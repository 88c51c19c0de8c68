use super::{dom, Browser};
use crate::client::Client;
use crate::config::BrowserConfig;
use crate::error::{BrowserError, Result};
pub use crate::{log_debug, log_info, log_warn};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

/// Static backend: fetches pages over HTTP and queries the parsed HTML.
///
/// There is no rendering here, so screenshots are HTML snapshots and nothing
/// can be clicked. Waiting re-fetches the page until the selector shows up.
pub struct HttpBrowser {
    client: Client,
    poll_interval: Duration,
    url: Option<String>,
    source: Option<String>,
}

impl HttpBrowser {
    pub fn new(config: &BrowserConfig, poll_interval: Duration) -> Result<Self> {
        let client = Client::builder()
            .header("user-agent", &config.user_agent)?
            .header("accept-language", &config.accept_language)?
            .proxy(config.proxy.clone())
            .timeout(Duration::from_secs(config.wait_timeout))
            .chrome_impersonation(true)
            .build()?;

        Ok(Self::with_client(client, poll_interval))
    }

    pub fn with_client(client: Client, poll_interval: Duration) -> Self {
        Self {
            client,
            poll_interval,
            url: None,
            source: None,
        }
    }

    fn source(&self) -> Result<&str> {
        self.source
            .as_deref()
            .ok_or_else(|| BrowserError::NoPage.into())
    }

    async fn fetch(&mut self, url: &str) -> Result<()> {
        let response = self.client.get(url).await.map_err(|e| BrowserError::NavigationFailed {
            url: url.to_string(),
            reason: e.to_string(),
        })?;
        log_debug!(
            "[http] {} answered {} with {} bytes",
            url,
            response.status,
            response.content.len()
        );
        self.url = Some(url.to_string());
        self.source = Some(response.content);
        Ok(())
    }
}

#[async_trait]
impl Browser for HttpBrowser {
    fn name(&self) -> &'static str {
        "http"
    }

    fn is_interactive(&self) -> bool {
        false
    }

    async fn navigate(&mut self, url: &str) -> Result<()> {
        self.source = None;
        self.fetch(url).await
    }

    async fn wait_for_selector(&mut self, selector: &str, timeout: Duration) -> Result<()> {
        let url = self.url.clone().ok_or(BrowserError::NoPage)?;
        let deadline = Instant::now() + timeout;

        loop {
            if dom::contains(self.source()?, selector)? {
                return Ok(());
            }

            let now = Instant::now();
            if now >= deadline {
                return Err(BrowserError::Timeout {
                    selector: selector.to_string(),
                    seconds: timeout.as_secs(),
                }
                .into());
            }

            tokio::time::sleep(self.poll_interval.min(deadline - now)).await;
            log_info!("[http] `{}` not found yet, re-fetching {}", selector, url);
            if let Err(e) = self.fetch(&url).await {
                log_warn!("[http] Re-fetch failed: {}", e);
            }
        }
    }

    async fn get_text(&self, selector: &str) -> Result<Option<String>> {
        dom::first_text(self.source()?, selector)
    }

    async fn get_all_text(&self, selector: &str) -> Result<Vec<String>> {
        dom::all_text(self.source()?, selector)
    }

    async fn get_rows(&self, row_selector: &str, cell_selector: &str) -> Result<Vec<Vec<String>>> {
        dom::rows(self.source()?, row_selector, cell_selector)
    }

    async fn is_visible(&self, selector: &str) -> Result<bool> {
        dom::contains(self.source()?, selector)
    }

    async fn click(&self, _selector: &str) -> Result<()> {
        Err(BrowserError::Unsupported("click").into())
    }

    async fn click_in_frame(&self, _frame_selector: &str, _selector: &str) -> Result<()> {
        Err(BrowserError::Unsupported("click_in_frame").into())
    }

    async fn screenshot(&self, path: &Path) -> Result<PathBuf> {
        let snapshot = path.with_extension("html");
        tokio::fs::write(&snapshot, self.source()?)
            .await
            .map_err(|e| BrowserError::Screenshot {
                path: snapshot.display().to_string(),
                reason: e.to_string(),
            })?;
        Ok(snapshot)
    }

    async fn close(&mut self) -> Result<()> {
        self.url = None;
        self.source = None;
        Ok(())
    }
}
