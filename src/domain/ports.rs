use crate::domain::model::{Coordinates, SunriseComparison, SunriseReport};
use crate::utils::error::{AppError, Result};
use async_trait::async_trait;
use chrono::NaiveDate;

/// 查詢某個座標的日出資訊
#[async_trait]
pub trait SunriseProvider: Send + Sync {
    async fn sunrise(&self, coordinates: Coordinates, date: Option<NaiveDate>)
        -> Result<SunriseReport>;
}

/// 結果輸出的位置 (console、測試用的記錄器...)
pub trait Renderer: Send + Sync {
    fn render_loading(&self, visible: bool);
    fn render_comparison(&self, comparison: &SunriseComparison);
    fn render_error(&self, error: &AppError);
}
