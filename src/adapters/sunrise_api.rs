use crate::adapters::http::{endpoint, ensure_success, HttpClient};
use crate::domain::model::{Coordinates, SunriseReport};
use crate::domain::ports::SunriseProvider;
use crate::utils::error::{AppError, Result};
use async_trait::async_trait;
use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::Deserialize;

pub const DEFAULT_SUNRISE_BASE_URL: &str = "https://api.sunrise-sunset.org";

#[derive(Debug, Deserialize)]
struct SunriseEnvelope {
    status: String,
    #[serde(default)]
    results: serde_json::Value,
}

/// `formatted=0` 時的欄位，時間為 ISO-8601，day_length 為秒數
#[derive(Debug, Deserialize)]
struct SunriseResults {
    sunrise: String,
    sunset: String,
    solar_noon: String,
    day_length: u64,
}

/// sunrise-sunset.org client
#[derive(Debug, Clone)]
pub struct SunriseApiClient {
    http: HttpClient,
    base_url: String,
}

impl SunriseApiClient {
    pub fn new(http: HttpClient, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into(),
        }
    }

    fn lookup_url(&self, coordinates: Coordinates, date: Option<NaiveDate>) -> Result<String> {
        let mut url = endpoint(&self.base_url, "json")?;
        {
            let mut query = url.query_pairs_mut();
            query
                .append_pair("lat", &coordinates.latitude().to_string())
                .append_pair("lng", &coordinates.longitude().to_string())
                .append_pair("formatted", "0");
            if let Some(date) = date {
                query.append_pair("date", &date.format("%Y-%m-%d").to_string());
            }
        }
        Ok(url.into())
    }
}

#[async_trait]
impl SunriseProvider for SunriseApiClient {
    async fn sunrise(
        &self,
        coordinates: Coordinates,
        date: Option<NaiveDate>,
    ) -> Result<SunriseReport> {
        let url = self.lookup_url(coordinates, date)?;
        let (status, body) = self.http.get_raw(&url).await?;

        // API 在參數錯誤時回 400 但 body 仍帶 status，優先回報語意錯誤
        let envelope = match serde_json::from_str::<SunriseEnvelope>(&body) {
            Ok(envelope) => envelope,
            Err(e) => {
                ensure_success(status, &url)?;
                return Err(e.into());
            }
        };
        if envelope.status != "OK" {
            return Err(AppError::UpstreamStatus {
                status: envelope.status,
            });
        }
        ensure_success(status, &url)?;

        parse_report(coordinates, envelope.results)
    }
}

fn parse_report(coordinates: Coordinates, results: serde_json::Value) -> Result<SunriseReport> {
    let results: SunriseResults =
        serde_json::from_value(results).map_err(|e| AppError::UnexpectedPayload {
            message: format!("sunrise results: {}", e),
        })?;

    Ok(SunriseReport {
        coordinates,
        sunrise: parse_timestamp("sunrise", &results.sunrise)?,
        sunset: parse_timestamp("sunset", &results.sunset)?,
        solar_noon: parse_timestamp("solar_noon", &results.solar_noon)?,
        day_length_seconds: results.day_length,
    })
}

fn parse_timestamp(field: &str, raw: &str) -> Result<DateTime<FixedOffset>> {
    DateTime::parse_from_rfc3339(raw).map_err(|e| AppError::UnexpectedPayload {
        message: format!("{} '{}' is not ISO-8601: {}", field, raw, e),
    })
}
