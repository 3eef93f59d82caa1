use crate::adapters::placeholder_api::DEFAULT_PLACEHOLDER_BASE_URL;
use crate::adapters::sunrise_api::DEFAULT_SUNRISE_BASE_URL;
use crate::domain::model::Coordinates;
use crate::utils::error::{AppError, Result};
use crate::utils::validation::{
    validate_non_empty_string, validate_positive_number, validate_url, Validate,
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub http: HttpSettings,
    pub sunrise: SunriseSettings,
    pub countdown: CountdownSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpSettings {
    pub placeholder_base_url: String,
    pub sunrise_base_url: String,
    pub timeout_seconds: u64,
    pub user_agent: String,
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            placeholder_base_url: DEFAULT_PLACEHOLDER_BASE_URL.to_string(),
            sunrise_base_url: DEFAULT_SUNRISE_BASE_URL.to_string(),
            timeout_seconds: 30,
            user_agent: format!("async-drills/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// 預設比較的兩個城市，格式為 "lat,lng"
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SunriseSettings {
    pub city_a: String,
    pub city_b: String,
}

impl Default for SunriseSettings {
    fn default() -> Self {
        Self {
            city_a: "48.8647,2.3490".to_string(),
            city_b: "40.7306,-73.9352".to_string(),
        }
    }
}

impl SunriseSettings {
    pub fn city_a(&self) -> Result<Coordinates> {
        self.city_a.parse()
    }

    pub fn city_b(&self) -> Result<Coordinates> {
        self.city_b.parse()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CountdownSettings {
    pub interval_ms: u64,
    pub ticks: Option<u64>,
}

impl Default for CountdownSettings {
    fn default() -> Self {
        Self {
            interval_ms: 1_000,
            ticks: None,
        }
    }
}

impl AppConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(AppError::Io)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| AppError::Config {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${SUNRISE_BASE_URL})，找不到的保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| AppError::Config {
            field: "environment".to_string(),
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }
}

impl Validate for AppConfig {
    fn validate(&self) -> Result<()> {
        validate_url("http.placeholder_base_url", &self.http.placeholder_base_url)?;
        validate_url("http.sunrise_base_url", &self.http.sunrise_base_url)?;
        validate_positive_number("http.timeout_seconds", self.http.timeout_seconds, 1)?;
        validate_non_empty_string("http.user_agent", &self.http.user_agent)?;

        self.sunrise.city_a()?;
        self.sunrise.city_b()?;

        validate_positive_number("countdown.interval_ms", self.countdown.interval_ms, 1)?;
        if let Some(ticks) = self.countdown.ticks {
            validate_positive_number("countdown.ticks", ticks, 1)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.sunrise.city_a().unwrap().latitude(), 48.8647);
        assert_eq!(config.countdown.interval_ms, 1_000);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config = AppConfig::from_toml_str(
            r#"
[http]
timeout_seconds = 5

[countdown]
ticks = 3
"#,
        )
        .unwrap();

        assert_eq!(config.http.timeout_seconds, 5);
        assert_eq!(config.http.sunrise_base_url, DEFAULT_SUNRISE_BASE_URL);
        assert_eq!(config.countdown.ticks, Some(3));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("ASYNC_DRILLS_TEST_SUNRISE_URL", "http://localhost:9999");
        let config = AppConfig::from_toml_str(
            r#"
[http]
sunrise_base_url = "${ASYNC_DRILLS_TEST_SUNRISE_URL}"
placeholder_base_url = "${ASYNC_DRILLS_TEST_UNSET_VARIABLE}"
"#,
        )
        .unwrap();

        assert_eq!(config.http.sunrise_base_url, "http://localhost:9999");
        assert_eq!(
            config.http.placeholder_base_url,
            "${ASYNC_DRILLS_TEST_UNSET_VARIABLE}"
        );
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        let mut config = AppConfig::default();
        config.sunrise.city_b = "200,0".to_string();
        assert!(config.validate().unwrap_err().is_validation());

        let mut config = AppConfig::default();
        config.countdown.interval_ms = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let err = AppConfig::from_toml_str("[http\ntimeout_seconds = ").unwrap_err();
        assert!(matches!(err, AppError::Config { .. }));
    }
}
