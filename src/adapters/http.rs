use crate::config::toml_config::HttpSettings;
use crate::utils::error::{AppError, Result};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;

/// reqwest 的薄包裝：統一處理狀態碼與 JSON 解析錯誤
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    pub fn new(settings: &HttpSettings) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_seconds))
            .user_agent(settings.user_agent.clone())
            .build()?;
        Ok(Self { client })
    }

    /// 回傳狀態碼與原始 body，不檢查狀態碼
    pub async fn get_raw(&self, url: &str) -> Result<(StatusCode, String)> {
        tracing::debug!("Making API request to: {}", url);
        let response = self.client.get(url).send().await?;
        let status = response.status();
        tracing::debug!("API response status: {}", status);
        let body = response.text().await?;
        Ok((status, body))
    }

    pub async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        let (status, body) = self.get_raw(url).await?;
        ensure_success(status, url)?;
        Ok(serde_json::from_str(&body)?)
    }

    /// 404 視為「不存在」，回傳 None
    pub async fn get_json_optional<T: DeserializeOwned>(&self, url: &str) -> Result<Option<T>> {
        let (status, body) = self.get_raw(url).await?;
        if status == StatusCode::NOT_FOUND {
            tracing::debug!("Resource not found (expected): {}", url);
            return Ok(None);
        }
        ensure_success(status, url)?;
        Ok(Some(serde_json::from_str(&body)?))
    }

    pub async fn post_json<B: Serialize, T: DeserializeOwned>(&self, url: &str, payload: &B) -> Result<T> {
        tracing::debug!("Making API POST request to: {}", url);
        let response = self.client.post(url).json(payload).send().await?;
        let status = response.status();
        tracing::debug!("API response status: {}", status);
        let body = response.text().await?;
        ensure_success(status, url)?;
        Ok(serde_json::from_str(&body)?)
    }
}

pub(crate) fn ensure_success(status: StatusCode, url: &str) -> Result<()> {
    if status.is_success() {
        Ok(())
    } else {
        Err(AppError::HttpStatus {
            status: status.as_u16(),
            url: url.to_string(),
        })
    }
}

/// 把 base URL 與路徑接起來，並檢查結果是合法的 URL
pub(crate) fn endpoint(base_url: &str, path: &str) -> Result<url::Url> {
    let raw = format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        path.trim_start_matches('/')
    );
    url::Url::parse(&raw).map_err(|e| AppError::Config {
        field: "base_url".to_string(),
        message: format!("Invalid endpoint '{}': {}", raw, e),
    })
}
