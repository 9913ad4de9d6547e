//! Test data: city fixtures, coordinates, and the city-id table.
//!
//! The static lists cover the cities the suites exercise by default; an
//! optional TOML overlay (`TESTDATA_FILE`) can extend them per run.

use serde::Deserialize;

use crate::config::Config;
use crate::error::{ConfigError, Result};

/// Cities the weather API is expected to know.
pub const VALID_CITIES: &[&str] = &[
    "London",
    "New York",
    "Tokyo",
    "Paris",
    "Berlin",
    "Sydney",
    "Moscow",
    "Mumbai",
];

/// Inputs the API and the site should reject or handle gracefully.
pub const INVALID_CITIES: &[&str] = &[
    "InvalidCityName123",
    "NonExistentPlace",
    "zzzzz",
    "12345",
];

/// A known location with the city name the API reports for it.
#[derive(Clone, Copy, Debug)]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
    pub city: &'static str,
}

/// Coordinates used by the by-coordinates round-trip checks.
pub const TEST_COORDINATES: &[Coordinate] = &[
    Coordinate { lat: 51.5074, lon: -0.1278, city: "London" },
    Coordinate { lat: 40.7128, lon: -74.0060, city: "New York" },
    Coordinate { lat: 35.6762, lon: 139.6503, city: "Tokyo" },
    Coordinate { lat: 48.8566, lon: 2.3522, city: "Paris" },
];

/// OpenWeatherMap city ids for the by-id lookups.
pub static CITY_IDS: phf::Map<&'static str, u64> = phf::phf_map! {
    "London" => 2643743,
    "New York" => 5128581,
    "Tokyo" => 1850147,
    "Paris" => 2988507,
    "Berlin" => 2950159,
    "Sydney" => 2147714,
    "Moscow" => 524901,
    "Mumbai" => 1275339,
};

/// Extra city fixtures loaded from a TOML overlay file.
#[derive(Debug, Default, Deserialize)]
pub struct CityFixtures {
    #[serde(default)]
    pub valid: Vec<String>,
    #[serde(default)]
    pub invalid: Vec<String>,
}

impl CityFixtures {
    fn parse(path: &str, raw: &str) -> Result<Self> {
        toml::from_str(raw).map_err(|source| {
            ConfigError::FixtureParse { path: path.to_string(), source }.into()
        })
    }
}

/// Load the overlay file named by the configuration, if any.
pub fn load_fixtures(config: &Config) -> Result<CityFixtures> {
    let Some(path) = config.testdata_file.as_deref() else {
        return Ok(CityFixtures::default());
    };
    let raw = std::fs::read_to_string(path).map_err(|source| {
        ConfigError::FixtureRead { path: path.to_string(), source }
    })?;
    CityFixtures::parse(path, &raw)
}

/// The full list of valid cities for this run: the static set plus overlay.
pub fn cities_under_test(config: &Config) -> Result<Vec<String>> {
    let mut cities: Vec<String> = VALID_CITIES.iter().map(|c| c.to_string()).collect();
    cities.extend(load_fixtures(config)?.valid);
    Ok(cities)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn static_tables_are_consistent() {
        assert!(!VALID_CITIES.is_empty());
        assert!(!INVALID_CITIES.is_empty());
        // Every coordinate city is also in the valid-city list and id table.
        for coordinate in TEST_COORDINATES {
            assert!(VALID_CITIES.contains(&coordinate.city));
            assert!(CITY_IDS.contains_key(coordinate.city));
        }
        assert_eq!(CITY_IDS.get("London"), Some(&2643743));
    }

    #[test]
    fn overlay_parses_partial_files() {
        let fixtures = CityFixtures::parse(
            "inline",
            r#"
            valid = ["Oslo", "Lisbon"]
            "#,
        )
        .unwrap();
        assert_eq!(fixtures.valid, vec!["Oslo", "Lisbon"]);
        assert!(fixtures.invalid.is_empty());
    }

    #[test]
    fn overlay_rejects_malformed_toml() {
        assert!(CityFixtures::parse("inline", "valid = not-a-list").is_err());
    }
}
