use crate::utils::error::{AppError, Result};
use crate::utils::validation::{parse_number, validate_range};
use chrono::{DateTime, FixedOffset, Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// 經緯度，只能透過驗證過的建構子產生
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Coordinates {
    latitude: f64,
    longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Result<Self> {
        validate_range("latitude", latitude, -90.0, 90.0)?;
        validate_range("longitude", longitude, -180.0, 180.0)?;
        Ok(Self {
            latitude,
            longitude,
        })
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }
}

impl FromStr for Coordinates {
    type Err = AppError;

    /// Parses `"lat,lng"`.
    fn from_str(s: &str) -> Result<Self> {
        let (lat, lng) = s.split_once(',').ok_or_else(|| {
            AppError::validation("coordinates", s, "Expected the form LAT,LNG")
        })?;
        Coordinates::new(parse_number("latitude", lat)?, parse_number("longitude", lng)?)
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.4},{:.4}", self.latitude, self.longitude)
    }
}

/// Parses a `YYYY-MM-DD` date as accepted by the sunrise API.
pub fn parse_lookup_date(raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|e| AppError::validation("date", raw, format!("Expected YYYY-MM-DD: {}", e)))
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SunriseReport {
    pub coordinates: Coordinates,
    pub sunrise: DateTime<FixedOffset>,
    pub sunset: DateTime<FixedOffset>,
    pub solar_noon: DateTime<FixedOffset>,
    pub day_length_seconds: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SunriseComparison {
    pub first: SunriseReport,
    pub second: SunriseReport,
}

impl SunriseComparison {
    /// second.sunrise - first.sunrise
    pub fn difference(&self) -> chrono::Duration {
        self.second.sunrise.signed_duration_since(self.first.sunrise)
    }

    pub fn earlier(&self) -> &SunriseReport {
        if self.second.sunrise < self.first.sunrise {
            &self.second
        } else {
            &self.first
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub user_id: u64,
    pub id: u64,
    pub title: String,
    pub body: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPost {
    pub user_id: u64,
    pub title: String,
    pub body: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    pub name: String,
    pub username: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub company: Option<Company>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Company {
    pub name: String,
    #[serde(default, rename = "catchPhrase")]
    pub catch_phrase: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FileKind {
    File,
    Directory,
    Symlink,
    Other,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FileInfo {
    pub path: PathBuf,
    pub absolute: PathBuf,
    pub exists: bool,
    pub kind: Option<FileKind>,
    pub size_bytes: Option<u64>,
    pub created: Option<DateTime<Local>>,
    pub modified: Option<DateTime<Local>>,
    pub accessed: Option<DateTime<Local>>,
    pub parent: Option<PathBuf>,
    pub file_name: Option<String>,
    pub stem: Option<String>,
    pub extension: Option<String>,
}

impl FileInfo {
    pub fn is_file(&self) -> bool {
        self.kind == Some(FileKind::File)
    }

    pub fn is_dir(&self) -> bool {
        self.kind == Some(FileKind::Directory)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coordinates_from_str() {
        let paris: Coordinates = "48.8647,2.3490".parse().unwrap();
        assert_eq!(paris.latitude(), 48.8647);
        assert_eq!(paris.longitude(), 2.3490);

        let nyc: Coordinates = " 40.7306 , -73.9352 ".parse().unwrap();
        assert_eq!(nyc.longitude(), -73.9352);
    }

    #[test]
    fn test_coordinates_reject_invalid_input() {
        assert!("91,0".parse::<Coordinates>().unwrap_err().is_validation());
        assert!("0,-180.5".parse::<Coordinates>().is_err());
        assert!("abc,10".parse::<Coordinates>().is_err());
        assert!("48.8".parse::<Coordinates>().is_err());
        assert!(Coordinates::new(f64::NAN, 0.0).is_err());
    }

    #[test]
    fn test_parse_lookup_date() {
        assert_eq!(
            parse_lookup_date("2024-06-21").unwrap(),
            NaiveDate::from_ymd_opt(2024, 6, 21).unwrap()
        );
        assert!(parse_lookup_date("21/06/2024").is_err());
    }

    #[test]
    fn test_post_deserializes_camel_case() {
        let post: Post = serde_json::from_value(serde_json::json!({
            "userId": 1, "id": 7, "title": "t", "body": "b"
        }))
        .unwrap();
        assert_eq!(post.user_id, 1);
        assert_eq!(post.id, 7);
    }
}
