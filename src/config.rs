use std::str::FromStr;

use crate::cli::CliArgs;

/// Browser engine requested on the command line or via `BROWSER`.
///
/// All three engines are accepted at the surface; only chromium can actually
/// be launched by the CDP backend, and the others are rejected at launch.
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum BrowserKind {
    Chromium,
    Firefox,
    Webkit,
}

impl BrowserKind {
    pub fn as_str(self) -> &'static str {
        match self {
            BrowserKind::Chromium => "chromium",
            BrowserKind::Firefox => "firefox",
            BrowserKind::Webkit => "webkit",
        }
    }
}

impl FromStr for BrowserKind {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "chromium" | "chrome" => Ok(BrowserKind::Chromium),
            "firefox" => Ok(BrowserKind::Firefox),
            "webkit" => Ok(BrowserKind::Webkit),
            _ => Err(()),
        }
    }
}

/// When to capture a diagnostic artifact.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CaptureMode {
    Off,
    On,
    OnFailure,
}

impl CaptureMode {
    /// Whether an artifact should be written given the check outcome.
    pub fn applies(self, failed: bool) -> bool {
        match self {
            CaptureMode::Off => false,
            CaptureMode::On => true,
            CaptureMode::OnFailure => failed,
        }
    }
}

impl FromStr for CaptureMode {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "off" => Ok(CaptureMode::Off),
            "on" => Ok(CaptureMode::On),
            "on-failure" | "only-on-failure" => Ok(CaptureMode::OnFailure),
            _ => Err(()),
        }
    }
}

/// Harness configuration.
///
/// Built once at process start from environment variables, optionally
/// overridden by CLI flags, and passed by reference everywhere after that.
/// Immutable for the rest of the run.
#[derive(Clone, Debug)]
pub struct Config {
    /// OpenWeatherMap API key. Empty means API-backed checks are skipped.
    pub api_key: String,
    /// Base URL for the data API (`/weather`, `/forecast`).
    pub api_base_url: String,
    /// Geocoding endpoint for city search.
    pub geocoding_url: String,
    /// Base URL of the site under test.
    pub ui_base_url: String,
    /// Browser engine to drive.
    pub browser: BrowserKind,
    /// Run the browser without a visible window.
    pub headless: bool,
    /// Delay injected before each page interaction, in milliseconds.
    pub slowmo_ms: u64,
    /// Navigation / page-load timeout, in milliseconds.
    pub browser_timeout_ms: u64,
    /// Per-candidate visibility timeout for selector resolution.
    pub element_timeout_ms: u64,
    /// Runner-level re-runs of a failed check. Wrappers never retry.
    pub retry_count: u32,
    /// When to capture failure screenshots.
    pub screenshot_mode: CaptureMode,
    /// When to record console/page-error traces.
    pub trace_mode: CaptureMode,
    /// Root directory for screenshots and traces.
    pub results_dir: String,
    /// Optional TOML overlay with extra city fixtures.
    pub testdata_file: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            api_base_url: "https://api.openweathermap.org/data/2.5".to_string(),
            geocoding_url: "http://api.openweathermap.org/geo/1.0/direct".to_string(),
            ui_base_url: "https://openweathermap.org".to_string(),
            browser: BrowserKind::Chromium,
            headless: true,
            slowmo_ms: 0,
            browser_timeout_ms: 30_000,
            element_timeout_ms: 5_000,
            retry_count: 2,
            screenshot_mode: CaptureMode::OnFailure,
            trace_mode: CaptureMode::On,
            results_dir: "test-results".to_string(),
            testdata_file: None,
        }
    }
}

impl Config {
    /// Load configuration from environment variables, falling back to the
    /// defaults above for anything missing or unparsable.
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            api_key: std::env::var("OPENWEATHER_API_KEY").unwrap_or(default.api_key),
            api_base_url: std::env::var("OPENWEATHER_BASE_URL").unwrap_or(default.api_base_url),
            geocoding_url: std::env::var("OPENWEATHER_GEO_URL").unwrap_or(default.geocoding_url),
            ui_base_url: std::env::var("UI_BASE_URL").unwrap_or(default.ui_base_url),
            browser: env_parsed("BROWSER").unwrap_or(default.browser),
            headless: env_parsed("HEADLESS").unwrap_or(default.headless),
            slowmo_ms: env_parsed("SLOWMO_MS").unwrap_or(default.slowmo_ms),
            browser_timeout_ms: env_parsed("BROWSER_TIMEOUT_MS").unwrap_or(default.browser_timeout_ms),
            element_timeout_ms: env_parsed("ELEMENT_TIMEOUT_MS").unwrap_or(default.element_timeout_ms),
            retry_count: env_parsed("RETRY_COUNT").unwrap_or(default.retry_count),
            screenshot_mode: env_parsed("SCREENSHOT_MODE").unwrap_or(default.screenshot_mode),
            trace_mode: env_parsed("TRACE_MODE").unwrap_or(default.trace_mode),
            results_dir: std::env::var("RESULTS_DIR").unwrap_or(default.results_dir),
            testdata_file: std::env::var("TESTDATA_FILE").ok().filter(|v| !v.is_empty()),
        }
    }

    /// Apply command-line overrides on top of the environment configuration.
    pub fn with_cli(mut self, args: &CliArgs) -> Self {
        if let Some(browser) = args.browser {
            self.browser = browser;
        }
        if args.headed {
            self.headless = false;
        }
        if let Some(slowmo) = args.slowmo {
            self.slowmo_ms = slowmo;
        }
        self
    }

    /// Directory for failure screenshots.
    pub fn screenshots_dir(&self) -> String {
        format!("{}/screenshots", self.results_dir)
    }

    /// Directory for console/page-error traces.
    pub fn trace_dir(&self) -> String {
        format!("{}/trace", self.results_dir)
    }
}

fn env_parsed<T: FromStr>(name: &str) -> Option<T> {
    std::env::var(name).ok().and_then(|v| v.parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_upstream_endpoints() {
        let config = Config::default();
        assert_eq!(config.api_base_url, "https://api.openweathermap.org/data/2.5");
        assert_eq!(config.ui_base_url, "https://openweathermap.org");
        assert_eq!(config.element_timeout_ms, 5_000);
        assert_eq!(config.retry_count, 2);
        assert!(config.headless);
        assert!(config.api_key.is_empty());
    }

    #[test]
    fn browser_kind_parses_known_engines() {
        assert_eq!("chromium".parse(), Ok(BrowserKind::Chromium));
        assert_eq!("FIREFOX".parse(), Ok(BrowserKind::Firefox));
        assert_eq!("webkit".parse(), Ok(BrowserKind::Webkit));
        assert!("opera".parse::<BrowserKind>().is_err());
    }

    #[test]
    fn capture_mode_gates_on_outcome() {
        assert!(CaptureMode::On.applies(false));
        assert!(CaptureMode::OnFailure.applies(true));
        assert!(!CaptureMode::OnFailure.applies(false));
        assert!(!CaptureMode::Off.applies(true));

        assert_eq!("only-on-failure".parse(), Ok(CaptureMode::OnFailure));
        assert_eq!("off".parse(), Ok(CaptureMode::Off));
    }

    #[test]
    fn cli_overrides_take_precedence() {
        let args = CliArgs {
            browser: Some(BrowserKind::Firefox),
            headed: true,
            slowmo: Some(250),
            suite: crate::suites::SuiteFilter::All,
        };
        let config = Config::default().with_cli(&args);
        assert_eq!(config.browser, BrowserKind::Firefox);
        assert!(!config.headless);
        assert_eq!(config.slowmo_ms, 250);
    }

    #[test]
    fn artifact_dirs_nest_under_results() {
        let config = Config::default();
        assert_eq!(config.screenshots_dir(), "test-results/screenshots");
        assert_eq!(config.trace_dir(), "test-results/trace");
    }
}
