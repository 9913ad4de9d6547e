//! Common page functionality shared by all page objects.

use std::time::Duration;

use chromiumoxide::element::Element;
use chromiumoxide::page::ScreenshotParams;
use chromiumoxide::Page;
use tokio::time::{sleep, Instant};
use tracing::{debug, info};

use crate::config::Config;
use crate::error::{is_transport_error, BrowserError};
use crate::pages::resolver::{self, Resolution, SelectorSet};

/// Interval between visibility probes while waiting on one candidate.
const POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Delay after a navigation settles, letting late DOM writes land.
const SETTLE_DELAY: Duration = Duration::from_millis(500);

/// Visibility predicate evaluated against a candidate element.
const VISIBILITY_FN: &str = r#"function() {
    const rect = this.getBoundingClientRect();
    const style = window.getComputedStyle(this);
    return rect.width > 0 && rect.height > 0
        && style.visibility !== 'hidden' && style.display !== 'none';
}"#;

/// Wrapper around a CDP page with paced, timeout-bounded interactions.
pub struct BasePage {
    page: Page,
    element_timeout: Duration,
    nav_timeout: Duration,
    slowmo: Duration,
}

impl BasePage {
    pub fn new(page: Page, config: &Config) -> Self {
        Self {
            page,
            element_timeout: Duration::from_millis(config.element_timeout_ms),
            nav_timeout: Duration::from_millis(config.browser_timeout_ms),
            slowmo: Duration::from_millis(config.slowmo_ms),
        }
    }

    /// The raw CDP page, for callers that need to go below the page object.
    pub fn inner(&self) -> &Page {
        &self.page
    }

    /// Navigate and wait for the page to settle.
    pub async fn navigate_to(&self, url: &str) -> Result<(), BrowserError> {
        info!("Navigating to: {url}");
        self.pace().await;
        self.page
            .goto(url)
            .await
            .map_err(|source| BrowserError::Navigation { url: url.to_string(), source })?;
        self.wait_for_load().await;
        Ok(())
    }

    /// Wait for the current navigation to finish, bounded by the navigation
    /// timeout. A timeout here is not an error: single-page updates may
    /// never emit another load event.
    pub async fn wait_for_load(&self) {
        if tokio::time::timeout(self.nav_timeout, self.page.wait_for_navigation())
            .await
            .is_err()
        {
            debug!("load state not reached within {:?}, continuing", self.nav_timeout);
        }
        sleep(SETTLE_DELAY).await;
    }

    pub async fn title(&self) -> Result<String, BrowserError> {
        self.page
            .get_title()
            .await
            .map(Option::unwrap_or_default)
            .map_err(|source| BrowserError::Query { what: "title", source })
    }

    pub async fn url(&self) -> Result<String, BrowserError> {
        self.page
            .url()
            .await
            .map(Option::unwrap_or_default)
            .map_err(|source| BrowserError::Query { what: "url", source })
    }

    /// Resolve a logical element with the default per-candidate timeout.
    pub async fn resolve(&self, set: &SelectorSet) -> Result<Resolution<Element>, BrowserError> {
        self.resolve_with_timeout(set, self.element_timeout).await
    }

    /// Resolve a logical element with an explicit per-candidate timeout.
    pub async fn resolve_with_timeout(
        &self,
        set: &SelectorSet,
        timeout: Duration,
    ) -> Result<Resolution<Element>, BrowserError> {
        self.pace().await;
        resolver::first_visible(set, |selector| self.probe_visible(selector, timeout)).await
    }

    /// Whether a logical element is currently visible.
    pub async fn is_visible(&self, set: &SelectorSet) -> Result<bool, BrowserError> {
        Ok(self.resolve(set).await?.is_found())
    }

    /// Text content of a logical element, or `None` when it is absent.
    pub async fn text_of(&self, set: &SelectorSet) -> Result<Option<String>, BrowserError> {
        match self.resolve(set).await? {
            Resolution::Found { handle, .. } => {
                let text = handle
                    .inner_text()
                    .await
                    .map_err(|source| BrowserError::Query { what: "element text", source })?;
                Ok(Some(text.unwrap_or_default().trim().to_string()))
            }
            Resolution::Absent => Ok(None),
        }
    }

    /// Click a logical element. Returns whether anything was there to click.
    pub async fn click(&self, set: &SelectorSet) -> Result<bool, BrowserError> {
        match self.resolve(set).await? {
            Resolution::Found { handle, .. } => {
                handle.click().await.map_err(|source| BrowserError::Interaction {
                    action: "click",
                    element: set.name,
                    source,
                })?;
                debug!("clicked '{}'", set.name);
                Ok(true)
            }
            Resolution::Absent => Ok(false),
        }
    }

    /// Capture a full-page screenshot to `path`.
    pub async fn save_screenshot(&self, path: &str) -> Result<(), BrowserError> {
        self.page
            .save_screenshot(
                ScreenshotParams::builder().full_page(true).build(),
                path,
            )
            .await
            .map_err(|source| BrowserError::Screenshot { path: path.to_string(), source })?;
        info!("Screenshot saved: {path}");
        Ok(())
    }

    /// Probe one candidate: first match in document order, visible, within
    /// the bounded wait. Protocol-level failures (malformed selector, stale
    /// node, javascript exception) count as "no match"; only a broken CDP
    /// channel aborts the probe.
    async fn probe_visible(
        &self,
        selector: String,
        timeout: Duration,
    ) -> Result<Option<Element>, BrowserError> {
        let deadline = Instant::now() + timeout;
        loop {
            match self.page.find_elements(selector.as_str()).await {
                Ok(matches) => {
                    if let Some(element) = matches.into_iter().next() {
                        match self.element_visible(&element).await {
                            Ok(true) => return Ok(Some(element)),
                            Ok(false) => {}
                            Err(source) if is_transport_error(&source) => {
                                return Err(BrowserError::ConnectionLost { selector, source });
                            }
                            Err(_) => {}
                        }
                    }
                }
                Err(source) if is_transport_error(&source) => {
                    return Err(BrowserError::ConnectionLost { selector, source });
                }
                Err(_) => {}
            }

            if Instant::now() >= deadline {
                return Ok(None);
            }
            sleep(POLL_INTERVAL).await;
        }
    }

    async fn element_visible(
        &self,
        element: &Element,
    ) -> Result<bool, chromiumoxide::error::CdpError> {
        let returns = element.call_js_fn(VISIBILITY_FN, false).await?;
        Ok(returns.result.value.and_then(|v| v.as_bool()).unwrap_or(false))
    }

    /// Slow-mo pacing before an interaction, when configured.
    async fn pace(&self) {
        if !self.slowmo.is_zero() {
            sleep(self.slowmo).await;
        }
    }
}
