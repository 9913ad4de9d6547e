//! Error types for the harness.
//!
//! Failures are grouped by domain: browser transport, HTTP API, and
//! configuration. An element that cannot be located is *not* an error here;
//! that path is modeled as [`crate::pages::Resolution::Absent`] and only
//! genuine connection loss surfaces as [`BrowserError`].

use chromiumoxide::error::CdpError;
use thiserror::Error;

/// Top-level harness error.
#[derive(Debug, Error)]
pub enum HarnessError {
    /// Browser lifecycle or CDP transport error.
    #[error("browser error: {0}")]
    Browser(#[from] BrowserError),
    /// Weather API call error.
    #[error("api error: {0}")]
    Api(#[from] ApiError),
    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    /// Filesystem error while writing artifacts.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Browser lifecycle and transport errors.
#[derive(Debug, Error)]
pub enum BrowserError {
    /// The launch configuration was rejected before the browser started.
    #[error("failed to configure browser: {message}")]
    Configuration { message: String },
    /// The browser process could not be launched.
    #[error("failed to launch browser")]
    Launch {
        #[source]
        source: CdpError,
    },
    /// A new page could not be opened.
    #[error("failed to open page")]
    PageCreation {
        #[source]
        source: CdpError,
    },
    /// Navigation to a URL failed outright (network error, bad URL).
    #[error("navigation to {url} failed")]
    Navigation {
        url: String,
        #[source]
        source: CdpError,
    },
    /// The CDP connection dropped while probing a selector. Distinct from
    /// "element not found": this must never be reported as an absent element.
    #[error("connection to the browser was lost while probing '{selector}'")]
    ConnectionLost {
        selector: String,
        #[source]
        source: CdpError,
    },
    /// An interaction (click, fill, key press) on a resolved element failed.
    #[error("{action} failed on '{element}'")]
    Interaction {
        action: &'static str,
        element: &'static str,
        #[source]
        source: CdpError,
    },
    /// Script evaluation on the page failed.
    #[error("script evaluation failed")]
    Evaluation {
        #[source]
        source: CdpError,
    },
    /// A page metadata read (title, url, element text) failed.
    #[error("failed to read {what} from the page")]
    Query {
        what: &'static str,
        #[source]
        source: CdpError,
    },
    /// A screenshot could not be captured or written.
    #[error("failed to capture screenshot to {path}")]
    Screenshot {
        path: String,
        #[source]
        source: CdpError,
    },
}

/// Weather API call errors. Expected-negative responses (404 for an unknown
/// city) are not errors; they come back as a normal envelope with that status.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The HTTP client could not be constructed.
    #[error("failed to build http client")]
    ClientBuild {
        #[source]
        source: reqwest::Error,
    },
    /// The request never produced a response (DNS, connect, timeout).
    #[error("request to {endpoint} failed")]
    Request {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },
    /// A success response carried a body that was not valid JSON.
    #[error("failed to decode response body from {endpoint}")]
    Decode {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The requested browser engine cannot be driven by the CDP backend.
    #[error("browser '{requested}' is not supported by the CDP backend (only chromium is launchable)")]
    UnsupportedBrowser { requested: String },
    /// A test-data fixture file could not be read.
    #[error("failed to read fixture file {path}")]
    FixtureRead {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// A test-data fixture file was not valid TOML.
    #[error("failed to parse fixture file {path}")]
    FixtureParse {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

/// Whether an error lives in the CDP channel itself, as opposed to a
/// protocol-level failure a selector probe is allowed to swallow. A dead
/// websocket must abort resolution; a malformed selector must not.
pub(crate) fn is_transport_error(error: &CdpError) -> bool {
    matches!(
        error,
        CdpError::Ws(_) | CdpError::Io(_) | CdpError::ChannelSendError(_) | CdpError::NoResponse
    )
}

/// Harness result type.
pub type Result<T> = std::result::Result<T, HarnessError>;
