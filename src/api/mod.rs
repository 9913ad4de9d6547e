//! Weather API layer.
//!
//! [`client::WeatherApiClient`] issues one GET per logical operation and
//! normalizes the result into an envelope; [`validate`] checks response
//! shapes by required-key presence.

pub mod client;
pub mod validate;

pub use client::{ApiEnvelope, Payload, Units, WeatherApiClient};
