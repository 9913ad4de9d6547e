//! Session-scoped browser ownership.

use chromiumoxide::{Browser, Page};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::browser::launch;
use crate::config::Config;
use crate::error::{BrowserError, HarnessError};

/// Owns the browser process and its event-handler task for one run.
///
/// At most one session exists per run. Pages are handed out per check and
/// must be closed before the session itself closes.
pub struct BrowserSession {
    browser: Browser,
    handler: JoinHandle<()>,
}

impl BrowserSession {
    /// Launch the browser described by the configuration.
    pub async fn launch(config: &Config) -> Result<Self, HarnessError> {
        let (browser, handler) = launch::launch(config).await?;
        Ok(Self { browser, handler })
    }

    /// Open a fresh blank page.
    pub async fn new_page(&self) -> Result<Page, BrowserError> {
        let page = self
            .browser
            .new_page("about:blank")
            .await
            .map_err(|source| BrowserError::PageCreation { source })?;
        debug!("opened new page");
        Ok(page)
    }

    /// Shut the browser down. Best effort: a browser that is already gone
    /// is not worth failing the run over.
    pub async fn close(mut self) {
        if let Err(error) = self.browser.close().await {
            warn!("browser did not close cleanly: {error}");
        }
        self.handler.abort();
        debug!("browser session closed");
    }
}
