use crate::adapters::http::HttpClient;
use crate::adapters::sunrise_api::SunriseApiClient;
use crate::config::toml_config::AppConfig;
use crate::core::lifecycle::RequestLifecycle;
use crate::core::sunrise::SunriseComparator;
use crate::domain::model::{parse_lookup_date, Coordinates, SunriseComparison};
use crate::domain::ports::Renderer;
use crate::utils::error::Result;
use chrono::NaiveDate;

pub fn build_comparator<R: Renderer>(
    config: &AppConfig,
    renderer: R,
) -> Result<SunriseComparator<SunriseApiClient, R>> {
    let http = HttpClient::new(&config.http)?;
    let provider = SunriseApiClient::new(http, config.http.sunrise_base_url.clone());
    Ok(SunriseComparator::new(provider, renderer))
}

/// 驗證輸入後同時查詢兩個城市；驗證失敗時不會發出任何請求。
/// 回傳的錯誤都已經交給 renderer 顯示過。
pub async fn run_sunrise<R: Renderer>(
    config: &AppConfig,
    date: Option<&str>,
    renderer: R,
) -> Result<SunriseComparison> {
    let (city_a, city_b, date) =
        lookup_inputs(config, date).inspect_err(|e| renderer.render_error(e))?;
    let http = HttpClient::new(&config.http).inspect_err(|e| renderer.render_error(e))?;

    let provider = SunriseApiClient::new(http, config.http.sunrise_base_url.clone());
    let comparator = SunriseComparator::new(provider, renderer);
    let (lifecycle, outcome) = comparator
        .compare(RequestLifecycle::new(), city_a, city_b, date)
        .await;
    tracing::debug!("Sunrise request finished with status {:?}", lifecycle.status());
    outcome
}

fn lookup_inputs(
    config: &AppConfig,
    date: Option<&str>,
) -> Result<(Coordinates, Coordinates, Option<NaiveDate>)> {
    let city_a = config.sunrise.city_a()?;
    let city_b = config.sunrise.city_b()?;
    let date = date.map(parse_lookup_date).transpose()?;
    Ok((city_a, city_b, date))
}
