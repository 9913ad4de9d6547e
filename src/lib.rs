//! # OpenWeather QA
//!
//! A QA harness that drives a browser and the OpenWeatherMap HTTP API,
//! asserting on UI elements and JSON responses and reporting an aggregate
//! result.
//!
//! ## Layers
//!
//! - `config`: typed configuration from environment + CLI, built once and
//!   passed by reference; no global state.
//! - `browser/`: chromiumoxide launch, session ownership, and console
//!   trace capture.
//! - `pages/`: page objects over the site under test. The markup is
//!   external, so element lookup goes through `pages::resolver`: an ordered
//!   fallback chain of selector candidates with per-candidate bounded
//!   waits, returning found/absent as a value.
//! - `api/`: one GET per weather operation, normalized into a
//!   `{status, headers, data}` envelope, plus shape validators.
//! - `suites/`: the API / UI / E2E checks themselves.
//! - `app`: the runner: fixtures per check, retries, failure screenshots,
//!   final stats, exit code.

pub mod api;
pub mod app;
pub mod browser;
pub mod cli;
pub mod config;
pub mod error;
pub mod pages;
pub mod suites;
pub mod utils;

pub use api::{ApiEnvelope, Payload, Units, WeatherApiClient};
pub use app::App;
pub use browser::BrowserSession;
pub use cli::CliArgs;
pub use config::{BrowserKind, CaptureMode, Config};
pub use error::{ApiError, BrowserError, ConfigError, HarnessError, Result};
pub use pages::{BasePage, Resolution, SelectorSet, WeatherPage};
pub use suites::{RunSummary, SuiteFilter};
