//! Page object for the OpenWeatherMap site.
//!
//! The markup is external and shifts without notice, so every logical
//! element is described by a fallback chain of selector candidates rather
//! than a single locator.

use std::time::Duration;

use tracing::{info, warn};

use crate::config::Config;
use crate::error::BrowserError;
use crate::pages::base::BasePage;
use crate::pages::resolver::{Resolution, SelectorSet};

pub const SEARCH_INPUT: SelectorSet = SelectorSet {
    name: "search input",
    candidates: &[
        "[data-testid='search-input']",
        "input[placeholder*='city']",
        "#search_str",
        "input[name='q']",
        "input[placeholder*='Search']",
    ],
};

pub const SEARCH_SUBMIT: SelectorSet = SelectorSet {
    name: "search submit",
    candidates: &[
        "[data-testid='search-button']",
        "button[type='submit']",
        ".search-btn",
    ],
};

pub const WEATHER_INFO: SelectorSet = SelectorSet {
    name: "weather info",
    candidates: &[
        "[data-testid='weather-info']",
        ".weather-widget",
        ".current-weather",
        "[class*='weather']",
    ],
};

pub const TEMPERATURE: SelectorSet = SelectorSet {
    name: "temperature",
    candidates: &[
        "[data-testid='temperature']",
        ".temperature",
        ".temp",
        "[class*='temperature']",
    ],
};

pub const CITY_NAME: SelectorSet = SelectorSet {
    name: "city name",
    candidates: &[
        "[data-testid='city-name']",
        ".city-name",
        "h2",
        "[class*='city']",
    ],
};

pub const WEATHER_DESCRIPTION: SelectorSet = SelectorSet {
    name: "weather description",
    candidates: &[
        "[data-testid='description']",
        ".weather-description",
        ".description",
        "[class*='description']",
    ],
};

pub const ERROR_BANNER: SelectorSet = SelectorSet {
    name: "error banner",
    candidates: &[
        "[data-testid='error']",
        ".error",
        ".alert-danger",
        "[class*='error']",
    ],
};

/// Every logical element this page knows about.
pub const ALL_SELECTOR_SETS: &[&SelectorSet] = &[
    &SEARCH_INPUT,
    &SEARCH_SUBMIT,
    &WEATHER_INFO,
    &TEMPERATURE,
    &CITY_NAME,
    &WEATHER_DESCRIPTION,
    &ERROR_BANNER,
];

/// Page object for weather search and display.
pub struct WeatherPage {
    base: BasePage,
    ui_base_url: String,
    /// The weather container gets a longer wait: it renders after the
    /// search round-trip completes.
    info_timeout: Duration,
}

impl WeatherPage {
    pub fn new(page: chromiumoxide::Page, config: &Config) -> Self {
        Self {
            base: BasePage::new(page, config),
            ui_base_url: config.ui_base_url.trim_end_matches('/').to_string(),
            info_timeout: Duration::from_millis(config.element_timeout_ms * 2),
        }
    }

    /// The underlying page wrapper, for title/url/screenshot access.
    pub fn base(&self) -> &BasePage {
        &self.base
    }

    /// Navigate to the site's landing page.
    pub async fn open(&self) -> Result<(), BrowserError> {
        self.base.navigate_to(&self.ui_base_url).await
    }

    /// Submit a city search.
    ///
    /// Preferred path: resolve the search input, fill it, commit with Enter.
    /// If no search input resolves at all, fall back to navigating the known
    /// search route directly; a navigation failure on that path propagates;
    /// there is no further fallback. Either way the call returns only after
    /// the page has settled.
    pub async fn search_for_city(&self, city: &str) -> Result<(), BrowserError> {
        info!("Searching for weather in: {city}");

        match self.base.resolve(&SEARCH_INPUT).await? {
            Resolution::Found { handle, .. } => {
                handle.click().await.map_err(|source| BrowserError::Interaction {
                    action: "focus",
                    element: SEARCH_INPUT.name,
                    source,
                })?;
                handle.type_str(city).await.map_err(|source| BrowserError::Interaction {
                    action: "fill",
                    element: SEARCH_INPUT.name,
                    source,
                })?;
                handle.press_key("Enter").await.map_err(|source| {
                    BrowserError::Interaction {
                        action: "submit",
                        element: SEARCH_INPUT.name,
                        source,
                    }
                })?;
            }
            Resolution::Absent => {
                let url = self.search_url(city);
                warn!("search input not found, navigating directly to {url}");
                self.base.navigate_to(&url).await?;
                return Ok(());
            }
        }

        self.base.wait_for_load().await;
        Ok(())
    }

    /// Direct query-string URL for the search route.
    pub fn search_url(&self, city: &str) -> String {
        build_search_url(&self.ui_base_url, city)
    }

    /// Whether any search affordance (input or submit control) resolved.
    pub async fn has_search_controls(&self) -> Result<bool, BrowserError> {
        Ok(self.base.is_visible(&SEARCH_INPUT).await?
            || self.base.is_visible(&SEARCH_SUBMIT).await?)
    }

    /// Displayed temperature text, if any.
    pub async fn temperature(&self) -> Result<Option<String>, BrowserError> {
        self.base.text_of(&TEMPERATURE).await
    }

    /// Displayed city name, if any.
    pub async fn city_name(&self) -> Result<Option<String>, BrowserError> {
        self.base.text_of(&CITY_NAME).await
    }

    /// Displayed weather description, if any.
    pub async fn weather_description(&self) -> Result<Option<String>, BrowserError> {
        self.base.text_of(&WEATHER_DESCRIPTION).await
    }

    /// Whether the weather container rendered.
    pub async fn is_weather_info_displayed(&self) -> Result<bool, BrowserError> {
        Ok(self
            .base
            .resolve_with_timeout(&WEATHER_INFO, self.info_timeout)
            .await?
            .is_found())
    }

    /// Whether an error banner rendered.
    pub async fn is_error_displayed(&self) -> Result<bool, BrowserError> {
        self.base.is_visible(&ERROR_BANNER).await
    }

    /// Error banner text, if any.
    pub async fn error_message(&self) -> Result<Option<String>, BrowserError> {
        self.base.text_of(&ERROR_BANNER).await
    }
}

fn build_search_url(base: &str, city: &str) -> String {
    format!("{}/find?q={}", base.trim_end_matches('/'), city.trim().replace(' ', "+"))
}
