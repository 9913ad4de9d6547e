//! Page objects.
//!
//! [`base::BasePage`] wraps the raw CDP page with paced, timeout-bounded
//! interactions; [`weather::WeatherPage`] models the weather site's logical
//! elements; [`resolver`] implements the multi-selector fallback used to
//! locate them on markup this project does not control.

pub mod base;
pub mod resolver;
pub mod weather;

pub use base::BasePage;
pub use resolver::{Resolution, SelectorSet};
pub use weather::WeatherPage;
