//! API checks against the weather endpoints.
//!
//! Expected-negative responses (404 for an unknown city) are asserted as
//! outcomes, not treated as errors; only transport failures abort a check
//! through `?`.

use anyhow::{ensure, Context as _};
use tracing::info;

use crate::api::validate::{is_forecast_shape, is_weather_shape};
use crate::api::Units;
use crate::suites::TestContext;
use crate::utils::testdata::{cities_under_test, CITY_IDS, TEST_COORDINATES};

const RESPONSE_TIME_THRESHOLD_MS: u128 = 5_000;

pub(crate) async fn current_weather_valid_cities(ctx: &mut TestContext) -> anyhow::Result<()> {
    for city in &cities_under_test(&ctx.config)? {
        let envelope = ctx.api.current_weather(city, Units::Metric).await?;
        ensure!(envelope.status == 200, "expected status 200 for {city}, got {}", envelope.status);

        let data = envelope.data.as_json().context("success response should be JSON")?;
        ensure!(is_weather_shape(data), "weather response shape is invalid for {city}");

        let name = data["name"].as_str().unwrap_or_default().to_lowercase();
        let queried = city.to_lowercase();
        ensure!(
            name.contains(&queried) || queried.contains(&name),
            "reported city '{name}' does not match query '{city}'"
        );
        ensure!(data["main"]["temp"].is_number(), "response should carry main.temp for {city}");
    }
    Ok(())
}

pub(crate) async fn invalid_city_returns_not_found(ctx: &mut TestContext) -> anyhow::Result<()> {
    let envelope = ctx.api.current_weather("InvalidCityName123456789", Units::Metric).await?;
    ensure!(envelope.status == 404, "expected status 404, got {}", envelope.status);

    // Non-success bodies stay raw text; the upstream error document still
    // carries its code and message fields.
    let body = envelope.data.as_text().context("error response should be raw text")?;
    ensure!(
        body.contains("message") || body.contains("cod"),
        "error body should carry message or cod: {body}"
    );
    Ok(())
}

pub(crate) async fn weather_by_coordinates_round_trip(ctx: &mut TestContext) -> anyhow::Result<()> {
    for coordinate in &TEST_COORDINATES[..3] {
        let envelope = ctx
            .api
            .weather_by_coordinates(coordinate.lat, coordinate.lon, Units::Metric)
            .await?;
        ensure!(
            envelope.status == 200,
            "expected status 200 for {}, got {}",
            coordinate.city,
            envelope.status
        );

        let data = envelope.data.as_json().context("success response should be JSON")?;
        let coord = &data["coord"];
        let lat = coord["lat"].as_f64().context("response should carry coord.lat")?;
        let lon = coord["lon"].as_f64().context("response should carry coord.lon")?;
        ensure!(
            (lat - coordinate.lat).abs() < 1.0,
            "latitude {lat} is too far from requested {}",
            coordinate.lat
        );
        ensure!(
            (lon - coordinate.lon).abs() < 1.0,
            "longitude {lon} is too far from requested {}",
            coordinate.lon
        );
    }
    Ok(())
}

pub(crate) async fn weather_by_city_id(ctx: &mut TestContext) -> anyhow::Result<()> {
    let city_id = *CITY_IDS.get("London").context("city-id table should know London")?;
    let envelope = ctx.api.weather_by_city_id(city_id, Units::Metric).await?;
    ensure!(envelope.status == 200, "expected status 200, got {}", envelope.status);

    let data = envelope.data.as_json().context("success response should be JSON")?;
    ensure!(
        data["name"].as_str() == Some("London"),
        "city id {city_id} should resolve to London, got {}",
        data["name"]
    );
    Ok(())
}

pub(crate) async fn five_day_forecast(ctx: &mut TestContext) -> anyhow::Result<()> {
    let envelope = ctx.api.five_day_forecast("London", Units::Metric).await?;
    ensure!(envelope.status == 200, "expected status 200, got {}", envelope.status);

    let data = envelope.data.as_json().context("success response should be JSON")?;
    ensure!(is_forecast_shape(data), "forecast response shape is invalid");

    let entries = data["list"].as_array().context("forecast should carry a list")?;
    // A 5-day forecast in 3-hour steps carries 40 entries; require at least
    // one day's worth so partial windows still pass.
    ensure!(entries.len() >= 8, "forecast list too short: {} entries", entries.len());
    Ok(())
}

pub(crate) async fn geocoding_city_search(ctx: &mut TestContext) -> anyhow::Result<()> {
    let envelope = ctx.api.search_cities("London", 5).await?;
    ensure!(envelope.status == 200, "expected status 200, got {}", envelope.status);

    let data = envelope.data.as_json().context("success response should be JSON")?;
    let results = data.as_array().context("geocoding response should be an array")?;
    ensure!(!results.is_empty(), "geocoding search returned no results");
    ensure!(
        results[0]["lat"].is_number() && results[0]["lon"].is_number(),
        "geocoding result should carry lat/lon"
    );
    Ok(())
}

pub(crate) async fn response_time_within_threshold(ctx: &mut TestContext) -> anyhow::Result<()> {
    let started = std::time::Instant::now();
    let envelope = ctx.api.current_weather("London", Units::Metric).await?;
    let elapsed = started.elapsed().as_millis();

    ensure!(envelope.status == 200, "expected status 200, got {}", envelope.status);
    if let Some(content_type) = envelope.headers.get("content-type") {
        ensure!(
            content_type.contains("json"),
            "unexpected content type: {content_type}"
        );
    }
    info!("API answered in {elapsed} ms");
    ensure!(
        elapsed < RESPONSE_TIME_THRESHOLD_MS,
        "response took {elapsed} ms, threshold is {RESPONSE_TIME_THRESHOLD_MS} ms"
    );
    Ok(())
}

pub(crate) async fn unit_systems_sanity(ctx: &mut TestContext) -> anyhow::Result<()> {
    let expectations = [
        (Units::Metric, -50.0, 60.0),
        (Units::Imperial, -60.0, 140.0),
        (Units::Standard, 200.0, 350.0),
    ];

    for (units, low, high) in expectations {
        let envelope = ctx.api.current_weather("London", units).await?;
        ensure!(
            envelope.status == 200,
            "expected status 200 for {} units, got {}",
            units.as_param(),
            envelope.status
        );

        let data = envelope.data.as_json().context("success response should be JSON")?;
        let temp = data["main"]["temp"].as_f64().context("response should carry main.temp")?;
        ensure!(
            (low..=high).contains(&temp),
            "temperature {temp} is outside the plausible {} range [{low}, {high}]",
            units.as_param()
        );
    }
    Ok(())
}
