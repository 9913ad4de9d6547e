//! Check registry and result model.
//!
//! A check is one named assertion flow over the wrappers. The registry is
//! explicit (no discovery), and the runner in [`crate::app`] provides each
//! check with a fresh fixture context.

pub mod api;
pub mod e2e;
pub mod ui;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context as _;
use chromiumoxide::Page;
use futures::future::BoxFuture;

use crate::api::WeatherApiClient;
use crate::browser::TraceRecorder;
use crate::config::Config;
use crate::pages::WeatherPage;

/// Which suite a check belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Suite {
    Api,
    Ui,
    E2e,
}

impl Suite {
    pub fn label(self) -> &'static str {
        match self {
            Suite::Api => "api",
            Suite::Ui => "ui",
            Suite::E2e => "e2e",
        }
    }
}

/// Suite selection from the command line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum SuiteFilter {
    All,
    Api,
    Ui,
    E2e,
}

impl SuiteFilter {
    pub fn includes(self, suite: Suite) -> bool {
        match self {
            SuiteFilter::All => true,
            SuiteFilter::Api => suite == Suite::Api,
            SuiteFilter::Ui => suite == Suite::Ui,
            SuiteFilter::E2e => suite == Suite::E2e,
        }
    }
}

/// Per-check fixture context: the API client always, a page when the check
/// drives the browser.
pub struct TestContext {
    pub config: Arc<Config>,
    pub api: WeatherApiClient,
    pub(crate) page: Option<Page>,
    pub(crate) trace: Option<TraceRecorder>,
    pub(crate) trace_path: Option<PathBuf>,
    pub(crate) weather: Option<WeatherPage>,
}

impl TestContext {
    /// Context for checks that never touch the browser.
    pub fn new(config: Arc<Config>, api: WeatherApiClient) -> Self {
        Self { config, api, page: None, trace: None, trace_path: None, weather: None }
    }

    /// Context with a live page and its page object.
    pub fn with_page(config: Arc<Config>, api: WeatherApiClient, page: Page) -> Self {
        let weather = WeatherPage::new(page.clone(), &config);
        Self {
            config,
            api,
            page: Some(page),
            trace: None,
            trace_path: None,
            weather: Some(weather),
        }
    }

    /// The weather page object. Errors when the check was registered
    /// without `needs_browser`.
    pub fn ui(&self) -> anyhow::Result<&WeatherPage> {
        self.weather.as_ref().context("this check requires a browser page")
    }
}

pub type CheckFn = for<'a> fn(&'a mut TestContext) -> BoxFuture<'a, anyhow::Result<()>>;

/// One registered check.
pub struct Check {
    pub name: &'static str,
    pub suite: Suite,
    /// Whether the runner must provision a page for this check.
    pub needs_browser: bool,
    /// Whether the check is skipped when no API key is configured.
    pub needs_api_key: bool,
    pub run: CheckFn,
}

/// The full, explicit check registry, in execution order.
pub fn registry() -> Vec<Check> {
    vec![
        Check {
            name: "api: current weather for valid cities",
            suite: Suite::Api,
            needs_browser: false,
            needs_api_key: true,
            run: |ctx| Box::pin(api::current_weather_valid_cities(ctx)),
        },
        Check {
            name: "api: invalid city returns 404",
            suite: Suite::Api,
            needs_browser: false,
            needs_api_key: true,
            run: |ctx| Box::pin(api::invalid_city_returns_not_found(ctx)),
        },
        Check {
            name: "api: weather by coordinates",
            suite: Suite::Api,
            needs_browser: false,
            needs_api_key: true,
            run: |ctx| Box::pin(api::weather_by_coordinates_round_trip(ctx)),
        },
        Check {
            name: "api: weather by city id",
            suite: Suite::Api,
            needs_browser: false,
            needs_api_key: true,
            run: |ctx| Box::pin(api::weather_by_city_id(ctx)),
        },
        Check {
            name: "api: 5-day forecast",
            suite: Suite::Api,
            needs_browser: false,
            needs_api_key: true,
            run: |ctx| Box::pin(api::five_day_forecast(ctx)),
        },
        Check {
            name: "api: geocoding city search",
            suite: Suite::Api,
            needs_browser: false,
            needs_api_key: true,
            run: |ctx| Box::pin(api::geocoding_city_search(ctx)),
        },
        Check {
            name: "api: response time",
            suite: Suite::Api,
            needs_browser: false,
            needs_api_key: true,
            run: |ctx| Box::pin(api::response_time_within_threshold(ctx)),
        },
        Check {
            name: "api: unit systems sanity",
            suite: Suite::Api,
            needs_browser: false,
            needs_api_key: true,
            run: |ctx| Box::pin(api::unit_systems_sanity(ctx)),
        },
        Check {
            name: "ui: weather page loads",
            suite: Suite::Ui,
            needs_browser: true,
            needs_api_key: false,
            run: |ctx| Box::pin(ui::weather_page_loads(ctx)),
        },
        Check {
            name: "ui: city search stays on site",
            suite: Suite::Ui,
            needs_browser: true,
            needs_api_key: false,
            run: |ctx| Box::pin(ui::city_search_stays_on_site(ctx)),
        },
        Check {
            name: "ui: invalid city is handled",
            suite: Suite::Ui,
            needs_browser: true,
            needs_api_key: false,
            run: |ctx| Box::pin(ui::invalid_city_is_handled(ctx)),
        },
        Check {
            name: "ui: accessibility basics",
            suite: Suite::Ui,
            needs_browser: true,
            needs_api_key: false,
            run: |ctx| Box::pin(ui::accessibility_basics(ctx)),
        },
        Check {
            name: "e2e: weather search journey",
            suite: Suite::E2e,
            needs_browser: true,
            needs_api_key: true,
            run: |ctx| Box::pin(e2e::weather_search_journey(ctx)),
        },
        Check {
            name: "e2e: error handling journey",
            suite: Suite::E2e,
            needs_browser: true,
            needs_api_key: true,
            run: |ctx| Box::pin(e2e::error_handling_journey(ctx)),
        },
    ]
}

/// Outcome of one check after retries.
#[derive(Debug)]
pub enum CheckStatus {
    Passed,
    Failed(String),
    Skipped(&'static str),
}

/// Record of one executed (or skipped) check.
#[derive(Debug)]
pub struct CheckReport {
    pub name: &'static str,
    pub suite: Suite,
    pub status: CheckStatus,
    pub duration: Duration,
}

/// Aggregate outcome of a run.
#[derive(Debug, Default)]
pub struct RunSummary {
    pub reports: Vec<CheckReport>,
}

impl RunSummary {
    pub fn passed(&self) -> usize {
        self.count(|s| matches!(s, CheckStatus::Passed))
    }

    pub fn failed(&self) -> usize {
        self.count(|s| matches!(s, CheckStatus::Failed(_)))
    }

    pub fn skipped(&self) -> usize {
        self.count(|s| matches!(s, CheckStatus::Skipped(_)))
    }

    /// Skips do not fail a run; failures do.
    pub fn is_all_green(&self) -> bool {
        self.failed() == 0
    }

    fn count(&self, predicate: impl Fn(&CheckStatus) -> bool) -> usize {
        self.reports.iter().filter(|r| predicate(&r.status)).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_names_are_unique_and_prefixed_by_suite() {
        let checks = registry();
        let mut names = std::collections::HashSet::new();
        for check in &checks {
            assert!(names.insert(check.name), "duplicate check name: {}", check.name);
            assert!(
                check.name.starts_with(check.suite.label()),
                "'{}' should be prefixed with its suite label",
                check.name
            );
        }
    }

    #[test]
    fn e2e_checks_need_both_browser_and_key() {
        for check in registry() {
            match check.suite {
                Suite::Api => assert!(!check.needs_browser && check.needs_api_key),
                Suite::Ui => assert!(check.needs_browser && !check.needs_api_key),
                Suite::E2e => assert!(check.needs_browser && check.needs_api_key),
            }
        }
    }

    #[test]
    fn filters_select_their_suite() {
        assert!(SuiteFilter::All.includes(Suite::Api));
        assert!(SuiteFilter::All.includes(Suite::E2e));
        assert!(SuiteFilter::Api.includes(Suite::Api));
        assert!(!SuiteFilter::Api.includes(Suite::Ui));
        assert!(!SuiteFilter::E2e.includes(Suite::Ui));
    }

    #[test]
    fn summary_counts_and_exit_condition() {
        let summary = RunSummary {
            reports: vec![
                CheckReport {
                    name: "a",
                    suite: Suite::Api,
                    status: CheckStatus::Passed,
                    duration: Duration::from_millis(1),
                },
                CheckReport {
                    name: "b",
                    suite: Suite::Ui,
                    status: CheckStatus::Skipped("no key"),
                    duration: Duration::ZERO,
                },
                CheckReport {
                    name: "c",
                    suite: Suite::E2e,
                    status: CheckStatus::Failed("boom".to_string()),
                    duration: Duration::from_millis(2),
                },
            ],
        };
        assert_eq!(summary.passed(), 1);
        assert_eq!(summary.skipped(), 1);
        assert_eq!(summary.failed(), 1);
        assert!(!summary.is_all_green());

        let clean = RunSummary {
            reports: vec![CheckReport {
                name: "a",
                suite: Suite::Api,
                status: CheckStatus::Skipped("no key"),
                duration: Duration::ZERO,
            }],
        };
        assert!(clean.is_all_green());
    }
}
