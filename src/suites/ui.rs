//! UI checks against the weather site.
//!
//! The markup is not ours, so these assert on what must hold across
//! redesigns (domain, title, graceful degradation) and report softer
//! observations through the log instead of failing on them.

use anyhow::{ensure, Context as _};
use tracing::info;

use crate::suites::TestContext;
use crate::utils::testdata::INVALID_CITIES;

pub(crate) async fn weather_page_loads(ctx: &mut TestContext) -> anyhow::Result<()> {
    let page = ctx.ui()?;
    page.open().await?;

    let title = page.base().title().await?;
    ensure!(title.contains("OpenWeatherMap"), "unexpected page title: '{title}'");

    let url = page.base().url().await?;
    ensure!(url.contains("openweathermap.org"), "unexpected landing URL: {url}");

    // The search affordance moves around between site builds; report what
    // resolved rather than failing the smoke check over it.
    if page.has_search_controls().await? {
        info!("search controls resolved on the landing page");
    } else {
        info!("no search controls resolved; the URL fallback will carry searches");
    }
    Ok(())
}

pub(crate) async fn city_search_stays_on_site(ctx: &mut TestContext) -> anyhow::Result<()> {
    let page = ctx.ui()?;
    page.open().await?;
    page.search_for_city("London").await?;

    let url = page.base().url().await?;
    ensure!(url.to_lowercase().contains("openweathermap"), "search left the site: {url}");

    // Whether the widget renders depends on the site build of the day;
    // observe it rather than gate on it.
    if page.is_weather_info_displayed().await? {
        info!("weather info displayed for London");
        if let Some(temperature) = page.temperature().await? {
            info!("displayed temperature: {temperature}");
        }
    } else {
        info!("weather info not displayed; markup may have changed");
    }
    Ok(())
}

pub(crate) async fn invalid_city_is_handled(ctx: &mut TestContext) -> anyhow::Result<()> {
    let page = ctx.ui()?;
    page.open().await?;
    page.search_for_city(INVALID_CITIES[0]).await?;

    let error_displayed = page.is_error_displayed().await?;
    let url = page.base().url().await?.to_lowercase();
    let handled = error_displayed
        || url.contains("not found")
        || url.contains("error")
        || url.contains("find");
    ensure!(handled, "invalid search was not handled gracefully (url: {url})");

    if error_displayed {
        if let Some(message) = page.error_message().await? {
            info!("error banner: {message}");
        }
    }
    Ok(())
}

pub(crate) async fn accessibility_basics(ctx: &mut TestContext) -> anyhow::Result<()> {
    let page = ctx.ui()?;
    page.open().await?;

    let title = page.base().title().await?;
    ensure!(!title.trim().is_empty(), "page should carry a non-empty title");

    let landmarks: u64 = page
        .base()
        .inner()
        .evaluate(
            "document.querySelectorAll(\"main, [role='main'], nav, [role='navigation']\").length",
        )
        .await
        .context("failed to count landmark elements")?
        .into_value()
        .context("landmark count should be numeric")?;
    ensure!(landmarks > 0, "page should expose a main or navigation landmark");
    Ok(())
}
