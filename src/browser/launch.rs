//! Browser launch.

use chromiumoxide::{Browser, BrowserConfig};
use futures::StreamExt;
use tokio::task::JoinHandle;
use tokio::time::sleep;
use tracing::{debug, info};

use crate::config::{BrowserKind, Config};
use crate::error::{BrowserError, ConfigError, HarnessError};

/// Hardening flags the target site is known to tolerate.
const BROWSER_ARGS: &[&str] = &[
    "--disable-blink-features=AutomationControlled",
    "--disable-extensions",
    "--disable-plugins",
    "--disable-dev-shm-usage",
    "--no-sandbox",
];

/// Launch the configured browser and spawn its event-handler loop.
///
/// The CLI accepts chromium, firefox and webkit, but only chromium can be
/// driven over CDP; the others are rejected here rather than at parse time
/// so the error carries the full configuration context.
pub async fn launch(config: &Config) -> Result<(Browser, JoinHandle<()>), HarnessError> {
    if config.browser != BrowserKind::Chromium {
        return Err(ConfigError::UnsupportedBrowser {
            requested: config.browser.as_str().to_string(),
        }
        .into());
    }

    info!(
        "🚀 Launching {} ({})",
        config.browser.as_str(),
        if config.headless { "headless" } else { "headed" }
    );

    let mut builder = BrowserConfig::builder()
        .window_size(1920, 1080)
        .args(BROWSER_ARGS.to_vec());
    builder = if config.headless {
        builder.new_headless_mode()
    } else {
        builder.with_head()
    };

    let browser_config = builder
        .build()
        .map_err(|message| BrowserError::Configuration { message })?;

    let (browser, mut handler) = Browser::launch(browser_config)
        .await
        .map_err(|source| BrowserError::Launch { source })?;
    debug!("browser launched");

    // Drain CDP events in the background for the life of the session.
    let handle = tokio::spawn(async move {
        while let Some(event) = handler.next().await {
            if event.is_err() {
                break;
            }
        }
    });

    // Give the browser a moment to finish settling its initial state.
    sleep(tokio::time::Duration::from_millis(300)).await;

    Ok((browser, handle))
}
