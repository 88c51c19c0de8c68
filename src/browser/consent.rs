use super::Browser;
pub use crate::{log_debug, log_info, log_warn};

/// Accept button looked up inside a consent iframe.
pub const FRAME_ACCEPT_BUTTON: &str = "button[title='Accept']";

/// Clicks the first visible consent control from `selectors`.
///
/// Selectors naming an iframe are entered and their accept button clicked.
/// Each selector is checked once, without waiting, so pages that no longer
/// show a dialog cost one lookup per selector. Never fails: a missing or
/// stubborn dialog only gets logged. Returns the selector that was clicked.
pub async fn dismiss_consent(browser: &dyn Browser, selectors: &[String]) -> Option<String> {
    if !browser.is_interactive() {
        log_debug!(
            "[consent] {} backend cannot click, skipping consent dialog",
            browser.name()
        );
        return None;
    }

    for selector in selectors {
        if !matches!(browser.is_visible(selector).await, Ok(true)) {
            continue;
        }
        log_info!("[consent] Found consent button with selector: {}", selector);

        let clicked = if selector.contains("iframe") {
            browser.click_in_frame(selector, FRAME_ACCEPT_BUTTON).await
        } else {
            browser.click(selector).await
        };

        match clicked {
            Ok(()) => return Some(selector.clone()),
            Err(e) => {
                log_warn!("[consent] Clicking {} failed: {}", selector, e);
            }
        }
    }

    None
}
