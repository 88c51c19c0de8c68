use super::Browser;
use crate::config::BrowserConfig;
use crate::error::{BrowserError, Result};
pub use crate::{log_debug, log_info};
use async_trait::async_trait;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thirtyfour::prelude::*;

const POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Headless Chrome driven over WebDriver (chromedriver must be running).
pub struct WebDriverBrowser {
    driver: Option<WebDriver>,
    navigation_timeout: Duration,
}

impl WebDriverBrowser {
    pub async fn connect(config: &BrowserConfig) -> Result<Self> {
        let mut caps = DesiredCapabilities::chrome();

        let mut args = vec![
            format!(
                "--window-size={},{}",
                config.viewport_width, config.viewport_height
            ),
            format!("--user-agent={}", config.user_agent),
        ];
        if config.headless {
            args.push("--headless=new".to_string());
        }
        if let Some(lang) = config.accept_language.split(',').next() {
            args.push(format!("--lang={}", lang));
        }
        if let Some(proxy) = &config.proxy {
            args.push(format!("--proxy-server={}", proxy));
        }
        for arg in &args {
            caps.add_arg(arg)?;
        }

        let prefs = HashMap::from([("intl.accept_languages", config.accept_language.as_str())]);
        caps.add_experimental_option("prefs", prefs)?;

        log_info!(
            "[webdriver] Connecting to {} (headless: {})",
            config.webdriver_url,
            config.headless
        );
        let driver = WebDriver::new(config.webdriver_url.as_str(), caps).await?;

        Ok(Self {
            driver: Some(driver),
            navigation_timeout: Duration::from_secs(config.wait_timeout),
        })
    }

    fn driver(&self) -> Result<&WebDriver> {
        self.driver
            .as_ref()
            .ok_or_else(|| BrowserError::NoPage.into())
    }
}

#[async_trait]
impl Browser for WebDriverBrowser {
    fn name(&self) -> &'static str {
        "webdriver"
    }

    fn is_interactive(&self) -> bool {
        true
    }

    async fn navigate(&mut self, url: &str) -> Result<()> {
        let driver = self.driver()?;
        match tokio::time::timeout(self.navigation_timeout, driver.goto(url)).await {
            Ok(Ok(())) => Ok(()),
            Ok(Err(e)) => Err(BrowserError::NavigationFailed {
                url: url.to_string(),
                reason: e.to_string(),
            }
            .into()),
            Err(_) => Err(BrowserError::NavigationFailed {
                url: url.to_string(),
                reason: format!("no response within {:?}", self.navigation_timeout),
            }
            .into()),
        }
    }

    async fn wait_for_selector(&mut self, selector: &str, timeout: Duration) -> Result<()> {
        self.driver()?
            .query(By::Css(selector))
            .wait(timeout, POLL_INTERVAL)
            .first()
            .await
            .map_err(|_| BrowserError::Timeout {
                selector: selector.to_string(),
                seconds: timeout.as_secs(),
            })?;
        Ok(())
    }

    async fn get_text(&self, selector: &str) -> Result<Option<String>> {
        let elements = self.driver()?.find_all(By::Css(selector)).await?;
        match elements.first() {
            Some(element) => Ok(Some(element.text().await?.trim().to_string())),
            None => Ok(None),
        }
    }

    async fn get_all_text(&self, selector: &str) -> Result<Vec<String>> {
        let elements = self.driver()?.find_all(By::Css(selector)).await?;
        let mut texts = Vec::with_capacity(elements.len());
        for element in elements {
            texts.push(element.text().await?.trim().to_string());
        }
        Ok(texts)
    }

    async fn get_rows(&self, row_selector: &str, cell_selector: &str) -> Result<Vec<Vec<String>>> {
        let rows = self.driver()?.find_all(By::Css(row_selector)).await?;
        log_debug!("[webdriver] {} rows match `{}`", rows.len(), row_selector);

        let mut table = Vec::with_capacity(rows.len());
        for row in rows {
            let cells = row.find_all(By::Css(cell_selector)).await?;
            let mut texts = Vec::with_capacity(cells.len());
            for cell in cells {
                texts.push(cell.text().await?.trim().to_string());
            }
            table.push(texts);
        }
        Ok(table)
    }

    async fn is_visible(&self, selector: &str) -> Result<bool> {
        let elements = self.driver()?.find_all(By::Css(selector)).await?;
        match elements.first() {
            Some(element) => Ok(element.is_displayed().await.unwrap_or(false)),
            None => Ok(false),
        }
    }

    async fn click(&self, selector: &str) -> Result<()> {
        self.driver()?.find(By::Css(selector)).await?.click().await?;
        Ok(())
    }

    async fn click_in_frame(&self, frame_selector: &str, selector: &str) -> Result<()> {
        let driver = self.driver()?;
        driver.find(By::Css(frame_selector)).await?.enter_frame().await?;

        let clicked = match driver.find(By::Css(selector)).await {
            Ok(button) => button.click().await,
            Err(e) => Err(e),
        };

        driver.enter_default_frame().await?;
        clicked?;
        Ok(())
    }

    async fn screenshot(&self, path: &Path) -> Result<PathBuf> {
        self.driver()?
            .screenshot(path)
            .await
            .map_err(|e| BrowserError::Screenshot {
                path: path.display().to_string(),
                reason: e.to_string(),
            })?;
        Ok(path.to_path_buf())
    }

    async fn close(&mut self) -> Result<()> {
        if let Some(driver) = self.driver.take() {
            log_info!("[webdriver] Closing session");
            driver.quit().await?;
        }
        Ok(())
    }
}
