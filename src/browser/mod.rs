//! Page source abstraction: anything that can load a URL, wait for content and
//! hand back text for CSS selectors.

mod consent;
mod dom;
mod http;
mod webdriver;

#[cfg(test)]
pub(crate) mod fake;

pub use consent::dismiss_consent;
pub use http::HttpBrowser;
pub use webdriver::WebDriverBrowser;

use crate::config::{Backend, Config};
use crate::error::Result;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::time::Duration;

#[async_trait]
pub trait Browser: Send + Sync {
    fn name(&self) -> &'static str;

    /// Whether the backend can click elements (consent dialogs).
    fn is_interactive(&self) -> bool;

    async fn navigate(&mut self, url: &str) -> Result<()>;

    /// Fails with a timeout error if `selector` never appears.
    async fn wait_for_selector(&mut self, selector: &str, timeout: Duration) -> Result<()>;

    /// Text of the first element matching `selector`.
    async fn get_text(&self, selector: &str) -> Result<Option<String>>;

    /// Text of every element matching `selector`, in document order.
    async fn get_all_text(&self, selector: &str) -> Result<Vec<String>>;

    /// Cell texts of every row matching `row_selector`.
    async fn get_rows(&self, row_selector: &str, cell_selector: &str) -> Result<Vec<Vec<String>>>;

    /// Whether `selector` is displayed right now. Does not wait for it.
    async fn is_visible(&self, selector: &str) -> Result<bool>;

    async fn click(&self, selector: &str) -> Result<()>;

    async fn click_in_frame(&self, frame_selector: &str, selector: &str) -> Result<()>;

    /// Saves a capture of the current page and returns the path written,
    /// which may differ from `path` in its extension.
    async fn screenshot(&self, path: &Path) -> Result<PathBuf>;

    async fn close(&mut self) -> Result<()>;
}

/// Opens the backend selected in the configuration.
pub async fn open(config: &Config) -> Result<Box<dyn Browser>> {
    match config.browser.backend {
        Backend::WebDriver => {
            let browser = WebDriverBrowser::connect(&config.browser).await?;
            Ok(Box::new(browser))
        }
        Backend::Http => {
            let browser =
                HttpBrowser::new(&config.browser, Duration::from_secs(config.retry_delay))?;
            Ok(Box::new(browser))
        }
    }
}
