use clap::Parser;

use crate::config::BrowserKind;
use crate::suites::SuiteFilter;

/// Command-line surface of the harness binary.
///
/// Flags override the corresponding environment variables; everything else is
/// configured through [`crate::config::Config::from_env`].
#[derive(Debug, Parser)]
#[command(name = "openweather-qa", about = "QA harness for the OpenWeatherMap site and API", version)]
pub struct CliArgs {
    /// Browser engine to drive.
    #[arg(long, value_enum)]
    pub browser: Option<BrowserKind>,

    /// Run the browser with a visible window.
    #[arg(long)]
    pub headed: bool,

    /// Slow down every page interaction by this many milliseconds.
    #[arg(long, value_name = "MS")]
    pub slowmo: Option<u64>,

    /// Which suite to run.
    #[arg(long, value_enum, default_value = "all")]
    pub suite: SuiteFilter,
}
