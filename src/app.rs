//! The harness runner.
//!
//! Owns the session-scoped resources (one browser, one API client), hands
//! each check a fresh fixture context, and turns the per-check outcomes
//! into an aggregate summary and exit code.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context as _, Result};
use chromiumoxide::page::ScreenshotParams;
use tracing::{error, info, warn};

use crate::api::WeatherApiClient;
use crate::browser::{BrowserSession, TraceRecorder};
use crate::config::{CaptureMode, Config};
use crate::suites::{
    registry, Check, CheckReport, CheckStatus, RunSummary, SuiteFilter, TestContext,
};
use crate::utils::helpers::artifact_stem;

/// Application root: configuration plus the session-scoped resources.
pub struct App {
    config: Arc<Config>,
    api: WeatherApiClient,
    session: Option<BrowserSession>,
    filter: SuiteFilter,
}

impl App {
    /// Prepare artifact directories, build the API client, and launch the
    /// browser when the selected suites need one.
    pub async fn initialize(config: Config, filter: SuiteFilter) -> Result<Self> {
        let config = Arc::new(config);
        std::fs::create_dir_all(config.screenshots_dir())?;
        std::fs::create_dir_all(config.trace_dir())?;

        log_startup(&config, filter);

        if config.api_key.is_empty() {
            warn!("⚠️ OPENWEATHER_API_KEY not set; API-backed checks will be skipped");
        }

        let api = WeatherApiClient::new(&config)?;

        let needs_browser = registry()
            .iter()
            .any(|check| filter.includes(check.suite) && check.needs_browser);
        let session = if needs_browser {
            Some(BrowserSession::launch(&config).await?)
        } else {
            None
        };

        Ok(Self { config, api, session, filter })
    }

    /// Run every selected check and return the aggregate summary.
    pub async fn run(mut self) -> Result<RunSummary> {
        let checks: Vec<Check> = registry()
            .into_iter()
            .filter(|check| self.filter.includes(check.suite))
            .collect();
        info!("📋 {} checks selected", checks.len());

        let mut summary = RunSummary::default();
        for check in &checks {
            let report = self.run_check(check).await;
            log_check_result(&report);
            summary.reports.push(report);
        }

        if let Some(session) = self.session.take() {
            session.close().await;
        }

        print_final_stats(&summary, &self.config);
        Ok(summary)
    }

    /// Run one check with runner-level retries. The wrappers below never
    /// retry; this is the only layer that re-runs anything.
    async fn run_check(&self, check: &Check) -> CheckReport {
        let started = Instant::now();

        if check.needs_api_key && self.config.api_key.is_empty() {
            return CheckReport {
                name: check.name,
                suite: check.suite,
                status: CheckStatus::Skipped("OPENWEATHER_API_KEY not set"),
                duration: started.elapsed(),
            };
        }

        let attempts = self.config.retry_count.saturating_add(1);
        let mut last_error = String::new();
        for attempt in 1..=attempts {
            match self.run_attempt(check, attempt == attempts).await {
                Ok(()) => {
                    return CheckReport {
                        name: check.name,
                        suite: check.suite,
                        status: CheckStatus::Passed,
                        duration: started.elapsed(),
                    };
                }
                Err(err) => {
                    last_error = format!("{err:#}");
                    if attempt < attempts {
                        warn!(
                            "'{}' failed on attempt {attempt}/{attempts}: {last_error}",
                            check.name
                        );
                    }
                }
            }
        }

        CheckReport {
            name: check.name,
            suite: check.suite,
            status: CheckStatus::Failed(last_error),
            duration: started.elapsed(),
        }
    }

    /// One attempt: fresh fixtures in, guaranteed teardown out.
    async fn run_attempt(&self, check: &Check, final_attempt: bool) -> anyhow::Result<()> {
        let mut ctx = self.build_context(check).await?;
        let outcome = (check.run)(&mut ctx).await;
        self.teardown(ctx, check, outcome.is_err() && final_attempt).await;
        outcome
    }

    async fn build_context(&self, check: &Check) -> anyhow::Result<TestContext> {
        if !check.needs_browser {
            return Ok(TestContext::new(self.config.clone(), self.api.clone()));
        }

        let session = self
            .session
            .as_ref()
            .context("browser session was not initialized")?;
        let page = session.new_page().await?;

        let (trace, trace_path) = if self.config.trace_mode != CaptureMode::Off {
            let path = PathBuf::from(format!(
                "{}/{}.jsonl",
                self.config.trace_dir(),
                artifact_stem(check.name)
            ));
            match TraceRecorder::attach(&page, &path).await {
                Ok(recorder) => (Some(recorder), Some(path)),
                Err(err) => {
                    warn!("trace capture unavailable: {err}");
                    (None, None)
                }
            }
        } else {
            (None, None)
        };

        let mut ctx = TestContext::with_page(self.config.clone(), self.api.clone(), page);
        ctx.trace = trace;
        ctx.trace_path = trace_path;
        Ok(ctx)
    }

    /// Release fixture resources on every exit path: screenshot the failure
    /// first, then stop tracing, then close the page.
    async fn teardown(&self, ctx: TestContext, check: &Check, failed: bool) {
        let TestContext { page, trace, trace_path, .. } = ctx;

        if let Some(page) = page {
            if failed && self.config.screenshot_mode.applies(true) {
                let path = format!(
                    "{}/{}-{}.png",
                    self.config.screenshots_dir(),
                    artifact_stem(check.name),
                    chrono::Local::now().format("%Y%m%d-%H%M%S")
                );
                match page
                    .save_screenshot(ScreenshotParams::builder().full_page(true).build(), &path)
                    .await
                {
                    Ok(_) => error!("Check failed. Screenshot saved: {path}"),
                    Err(err) => warn!("failed to capture failure screenshot: {err}"),
                }
            }
            if let Err(err) = page.close().await {
                warn!("page did not close cleanly: {err}");
            }
        }

        if let Some(trace) = trace {
            trace.stop();
        }
        // In on-failure mode a passing check's trace is noise; drop it.
        if let Some(path) = trace_path {
            if !self.config.trace_mode.applies(failed) {
                let _ = std::fs::remove_file(path);
            }
        }
    }
}

// ========== log helpers ==========

fn log_startup(config: &Config, filter: SuiteFilter) {
    info!("{}", "=".repeat(60));
    info!("🚀 OpenWeather QA harness");
    info!(
        "🌐 browser: {} ({}), suites: {:?}",
        config.browser.as_str(),
        if config.headless { "headless" } else { "headed" },
        filter
    );
    info!("📁 artifacts: {}", config.results_dir);
    info!("{}", "=".repeat(60));
}

fn log_check_result(report: &CheckReport) {
    match &report.status {
        CheckStatus::Passed => {
            info!("✓ {} ({} ms)", report.name, report.duration.as_millis());
        }
        CheckStatus::Failed(reason) => {
            error!("❌ {} ({} ms): {}", report.name, report.duration.as_millis(), reason);
        }
        CheckStatus::Skipped(reason) => {
            info!("⏭️ {} (skipped: {})", report.name, reason);
        }
    }
}

fn print_final_stats(summary: &RunSummary, config: &Config) {
    info!("{}", "=".repeat(60));
    info!(
        "📊 run finished at {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("✅ passed: {}/{}", summary.passed(), summary.reports.len());
    info!("❌ failed: {}", summary.failed());
    info!("⏭️ skipped: {}", summary.skipped());
    info!("{}", "=".repeat(60));
    info!("artifacts saved under: {}", config.results_dir);
}
