//! Response-shape validators.
//!
//! Presence checks on required top-level keys, nothing more. Full schema
//! validation of the upstream provider's payloads is not this harness's job.

use serde_json::Value;

/// Keys a current-weather response must carry.
pub const WEATHER_KEYS: &[&str] =
    &["coord", "weather", "main", "wind", "clouds", "dt", "sys", "id", "name"];

/// Keys a 5-day forecast response must carry.
pub const FORECAST_KEYS: &[&str] = &["cod", "message", "cnt", "list", "city"];

/// Whether `data` looks like a current-weather response.
pub fn is_weather_shape(data: &Value) -> bool {
    has_keys(data, WEATHER_KEYS)
}

/// Whether `data` looks like a forecast response.
pub fn is_forecast_shape(data: &Value) -> bool {
    has_keys(data, FORECAST_KEYS)
}

fn has_keys(data: &Value, keys: &[&str]) -> bool {
    match data.as_object() {
        Some(map) => keys.iter().all(|key| map.contains_key(*key)),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn weather_fixture() -> Value {
        json!({
            "coord": {"lat": 51.51, "lon": -0.13},
            "weather": [{"main": "Clouds", "description": "overcast clouds"}],
            "main": {"temp": 11.2, "humidity": 81},
            "wind": {"speed": 4.1},
            "clouds": {"all": 90},
            "dt": 1714000000,
            "sys": {"country": "GB"},
            "id": 2643743,
            "name": "London"
        })
    }

    #[test]
    fn complete_weather_response_is_accepted() {
        assert!(is_weather_shape(&weather_fixture()));
    }

    #[test]
    fn weather_response_missing_a_key_is_rejected() {
        let mut data = weather_fixture();
        data.as_object_mut().unwrap().remove("wind");
        assert!(!is_weather_shape(&data));
    }

    #[test]
    fn forecast_with_all_required_keys_is_accepted() {
        let data = json!({
            "cod": "200",
            "message": 0,
            "cnt": 40,
            "list": [{"dt": 1714000000}],
            "city": {"name": "London"}
        });
        assert!(is_forecast_shape(&data));
    }

    #[test]
    fn forecast_missing_list_is_rejected() {
        let data = json!({
            "cod": "200",
            "message": 0,
            "cnt": 40,
            "city": {"name": "London"}
        });
        assert!(!is_forecast_shape(&data));
    }

    #[test]
    fn non_object_payloads_are_rejected() {
        assert!(!is_weather_shape(&json!("Not found")));
        assert!(!is_forecast_shape(&json!([1, 2, 3])));
    }
}
