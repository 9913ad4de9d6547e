//! OpenWeatherMap API client.
//!
//! Each operation is a single fire-and-forget GET: no retry, no caching, no
//! rate limiting. Network failures surface as [`ApiError`]; HTTP error
//! statuses do not; they come back in the envelope for the caller to assert
//! on.

use std::collections::HashMap;
use std::time::Duration;

use serde_json::Value;
use tracing::{debug, info};

use crate::config::Config;
use crate::error::ApiError;

/// Unit system for temperature fields.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Units {
    Metric,
    Imperial,
    /// Kelvin, the upstream default.
    Standard,
}

impl Units {
    pub fn as_param(self) -> &'static str {
        match self {
            Units::Metric => "metric",
            Units::Imperial => "imperial",
            Units::Standard => "standard",
        }
    }
}

/// Body of an API response.
///
/// JSON for success statuses, raw text otherwise. Callers must branch on
/// [`ApiEnvelope::status`] before trusting the shape of the data.
#[derive(Clone, Debug)]
pub enum Payload {
    Json(Value),
    Text(String),
}

impl Payload {
    pub fn as_json(&self) -> Option<&Value> {
        match self {
            Payload::Json(value) => Some(value),
            Payload::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Payload::Json(_) => None,
            Payload::Text(text) => Some(text),
        }
    }
}

/// Normalized API response: status, headers, and the status-dependent body.
#[derive(Clone, Debug)]
pub struct ApiEnvelope {
    pub status: u16,
    pub headers: HashMap<String, String>,
    pub data: Payload,
}

impl ApiEnvelope {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Client for the OpenWeatherMap data and geocoding endpoints.
#[derive(Clone, Debug)]
pub struct WeatherApiClient {
    http: reqwest::Client,
    base_url: String,
    geocoding_url: String,
    api_key: String,
}

impl WeatherApiClient {
    pub fn new(config: &Config) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .user_agent("openweather-qa/0.1")
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|source| ApiError::ClientBuild { source })?;

        Ok(Self {
            http,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            geocoding_url: config.geocoding_url.clone(),
            api_key: config.api_key.clone(),
        })
    }

    /// Current weather by city name.
    pub async fn current_weather(&self, city: &str, units: Units) -> Result<ApiEnvelope, ApiError> {
        info!("Requesting current weather for: {city}");
        let params = self.city_params(city, units);
        self.get_envelope(&format!("{}/weather", self.base_url), &params).await
    }

    /// Current weather by geographic coordinates.
    pub async fn weather_by_coordinates(
        &self,
        lat: f64,
        lon: f64,
        units: Units,
    ) -> Result<ApiEnvelope, ApiError> {
        info!("Requesting weather for coordinates: {lat}, {lon}");
        let params = self.coordinate_params(lat, lon, units);
        self.get_envelope(&format!("{}/weather", self.base_url), &params).await
    }

    /// Current weather by OpenWeatherMap city id.
    pub async fn weather_by_city_id(&self, city_id: u64, units: Units) -> Result<ApiEnvelope, ApiError> {
        info!("Requesting weather for city id: {city_id}");
        let params = self.id_params(city_id, units);
        self.get_envelope(&format!("{}/weather", self.base_url), &params).await
    }

    /// 5-day / 3-hour forecast by city name.
    pub async fn five_day_forecast(&self, city: &str, units: Units) -> Result<ApiEnvelope, ApiError> {
        info!("Requesting 5-day forecast for: {city}");
        let params = self.city_params(city, units);
        self.get_envelope(&format!("{}/forecast", self.base_url), &params).await
    }

    /// Geocoding search for a city name.
    pub async fn search_cities(&self, query: &str, limit: u32) -> Result<ApiEnvelope, ApiError> {
        info!("Searching cities for: {query}");
        let params = vec![
            ("q", query.to_string()),
            ("limit", limit.to_string()),
            ("appid", self.api_key.clone()),
        ];
        let endpoint = self.geocoding_url.clone();
        self.get_envelope(&endpoint, &params).await
    }

    // ========== parameter builders ==========

    fn city_params(&self, city: &str, units: Units) -> Vec<(&'static str, String)> {
        vec![
            ("q", city.to_string()),
            ("appid", self.api_key.clone()),
            ("units", units.as_param().to_string()),
        ]
    }

    fn coordinate_params(&self, lat: f64, lon: f64, units: Units) -> Vec<(&'static str, String)> {
        vec![
            ("lat", lat.to_string()),
            ("lon", lon.to_string()),
            ("appid", self.api_key.clone()),
            ("units", units.as_param().to_string()),
        ]
    }

    fn id_params(&self, city_id: u64, units: Units) -> Vec<(&'static str, String)> {
        vec![
            ("id", city_id.to_string()),
            ("appid", self.api_key.clone()),
            ("units", units.as_param().to_string()),
        ]
    }

    /// Issue the GET and fold the response into an envelope.
    async fn get_envelope<P: serde::Serialize + ?Sized>(
        &self,
        endpoint: &str,
        params: &P,
    ) -> Result<ApiEnvelope, ApiError> {
        let response = self
            .http
            .get(endpoint)
            .query(params)
            .send()
            .await
            .map_err(|source| ApiError::Request { endpoint: endpoint.to_string(), source })?;

        let status = response.status();
        let headers = response
            .headers()
            .iter()
            .map(|(name, value)| {
                (
                    name.as_str().to_string(),
                    String::from_utf8_lossy(value.as_bytes()).into_owned(),
                )
            })
            .collect();

        // JSON for success, raw text for everything else. The split is the
        // contract: error bodies are not guaranteed to be JSON.
        let data = if status.is_success() {
            let value = response
                .json()
                .await
                .map_err(|source| ApiError::Decode { endpoint: endpoint.to_string(), source })?;
            Payload::Json(value)
        } else {
            let text = response
                .text()
                .await
                .map_err(|source| ApiError::Decode { endpoint: endpoint.to_string(), source })?;
            Payload::Text(text)
        };

        debug!("{} -> {}", endpoint, status.as_u16());

        Ok(ApiEnvelope { status: status.as_u16(), headers, data })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    fn client() -> WeatherApiClient {
        let config = Config { api_key: "k".to_string(), ..Config::default() };
        WeatherApiClient::new(&config).unwrap()
    }

    #[test]
    fn city_params_carry_key_and_units() {
        let params = client().city_params("London", Units::Metric);
        assert_eq!(
            params,
            vec![
                ("q", "London".to_string()),
                ("appid", "k".to_string()),
                ("units", "metric".to_string()),
            ]
        );
    }

    #[test]
    fn coordinate_and_id_params_use_the_right_query_names() {
        let coordinate = client().coordinate_params(51.5074, -0.1278, Units::Standard);
        assert_eq!(coordinate[0], ("lat", "51.5074".to_string()));
        assert_eq!(coordinate[1], ("lon", "-0.1278".to_string()));
        assert_eq!(coordinate[3], ("units", "standard".to_string()));

        let by_id = client().id_params(2643743, Units::Imperial);
        assert_eq!(by_id[0], ("id", "2643743".to_string()));
    }

    #[test]
    fn base_url_trailing_slash_is_normalized() {
        let config = Config {
            api_base_url: "https://api.openweathermap.org/data/2.5/".to_string(),
            ..Config::default()
        };
        let client = WeatherApiClient::new(&config).unwrap();
        assert_eq!(client.base_url, "https://api.openweathermap.org/data/2.5");
    }

    #[test]
    fn payload_accessors_split_by_variant() {
        let json = Payload::Json(serde_json::json!({"cod": 200}));
        assert!(json.as_json().is_some());
        assert!(json.as_text().is_none());

        let text = Payload::Text("Not found".to_string());
        assert_eq!(text.as_text(), Some("Not found"));
        assert!(text.as_json().is_none());
    }

    #[test]
    fn envelope_success_is_2xx_only() {
        let envelope = |status| ApiEnvelope {
            status,
            headers: Default::default(),
            data: Payload::Text(String::new()),
        };
        assert!(envelope(200).is_success());
        assert!(envelope(204).is_success());
        assert!(!envelope(301).is_success());
        assert!(!envelope(404).is_success());
    }
}
