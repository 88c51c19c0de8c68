//! In-memory [`Browser`] serving fixture HTML by URL.

use super::{dom, Browser};
use crate::error::{BrowserError, Result};
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

#[derive(Default)]
pub struct FakeBrowser {
    pages: HashMap<String, String>,
    failing: HashSet<String>,
    visible: HashSet<String>,
    broken_clicks: HashSet<String>,
    non_interactive: bool,
    current: Option<String>,
    visited: Mutex<Vec<String>>,
    clicks: Mutex<Vec<String>>,
    visibility_checks: Mutex<Vec<String>>,
    screenshots: Mutex<Vec<PathBuf>>,
}

impl FakeBrowser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(mut self, url: &str, html: &str) -> Self {
        self.pages.insert(url.to_string(), html.to_string());
        self
    }

    pub fn with_failing(mut self, url: &str) -> Self {
        self.failing.insert(url.to_string());
        self
    }

    pub fn with_visible(mut self, selectors: &[&str]) -> Self {
        self.visible
            .extend(selectors.iter().map(|s| s.to_string()));
        self
    }

    pub fn with_broken_click(mut self, selector: &str) -> Self {
        self.broken_clicks.insert(selector.to_string());
        self
    }

    pub fn non_interactive(mut self) -> Self {
        self.non_interactive = true;
        self
    }

    pub fn visited(&self) -> Vec<String> {
        self.visited.lock().unwrap().clone()
    }

    pub fn clicks(&self) -> Vec<String> {
        self.clicks.lock().unwrap().clone()
    }

    pub fn visibility_checks(&self) -> Vec<String> {
        self.visibility_checks.lock().unwrap().clone()
    }

    pub fn screenshots(&self) -> Vec<PathBuf> {
        self.screenshots.lock().unwrap().clone()
    }

    fn source(&self) -> Result<&str> {
        self.current
            .as_ref()
            .and_then(|url| self.pages.get(url))
            .map(String::as_str)
            .ok_or_else(|| BrowserError::NoPage.into())
    }

    fn record_click(&self, selector: String) -> Result<()> {
        if self.broken_clicks.contains(&selector) {
            return Err(BrowserError::Unsupported("click").into());
        }
        self.clicks.lock().unwrap().push(selector);
        Ok(())
    }
}

#[async_trait]
impl Browser for FakeBrowser {
    fn name(&self) -> &'static str {
        "fake"
    }

    fn is_interactive(&self) -> bool {
        !self.non_interactive
    }

    async fn navigate(&mut self, url: &str) -> Result<()> {
        self.visited.lock().unwrap().push(url.to_string());
        if self.failing.contains(url) || !self.pages.contains_key(url) {
            self.current = None;
            return Err(BrowserError::NavigationFailed {
                url: url.to_string(),
                reason: "unreachable".to_string(),
            }
            .into());
        }
        self.current = Some(url.to_string());
        Ok(())
    }

    async fn wait_for_selector(&mut self, selector: &str, timeout: Duration) -> Result<()> {
        if dom::contains(self.source()?, selector)? {
            Ok(())
        } else {
            Err(BrowserError::Timeout {
                selector: selector.to_string(),
                seconds: timeout.as_secs(),
            }
            .into())
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
        self.visibility_checks
            .lock()
            .unwrap()
            .push(selector.to_string());
        Ok(self.visible.contains(selector))
    }

    async fn click(&self, selector: &str) -> Result<()> {
        self.record_click(selector.to_string())
    }

    async fn click_in_frame(&self, frame_selector: &str, selector: &str) -> Result<()> {
        self.record_click(format!("{} >> {}", frame_selector, selector))
    }

    async fn screenshot(&self, path: &Path) -> Result<PathBuf> {
        self.screenshots.lock().unwrap().push(path.to_path_buf());
        Ok(path.to_path_buf())
    }

    async fn close(&mut self) -> Result<()> {
        self.current = None;
        Ok(())
    }
}
