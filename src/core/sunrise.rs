use crate::core::join::tracked_join;
use crate::core::lifecycle::RequestLifecycle;
use crate::domain::model::{Coordinates, SunriseComparison};
use crate::domain::ports::{Renderer, SunriseProvider};
use crate::utils::error::Result;
use chrono::NaiveDate;

/// 同時查兩個城市的日出時間，兩個都成功才輸出
pub struct SunriseComparator<P: SunriseProvider, R: Renderer> {
    provider: P,
    renderer: R,
}

impl<P: SunriseProvider, R: Renderer> SunriseComparator<P, R> {
    pub fn new(provider: P, renderer: R) -> Self {
        Self { provider, renderer }
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub async fn compare(
        &self,
        lifecycle: RequestLifecycle,
        city_a: Coordinates,
        city_b: Coordinates,
        date: Option<NaiveDate>,
    ) -> (RequestLifecycle, Result<SunriseComparison>) {
        tracing::debug!("Comparing sunrise for {} and {}", city_a, city_b);

        let show_indicator = lifecycle.can_begin();
        if show_indicator {
            self.renderer.render_loading(true);
        }
        let (lifecycle, outcome) = tracked_join(
            lifecycle,
            self.provider.sunrise(city_a, date),
            self.provider.sunrise(city_b, date),
        )
        .await;
        if show_indicator {
            self.renderer.render_loading(false);
        }

        match outcome {
            Ok((first, second)) => {
                let comparison = SunriseComparison { first, second };
                tracing::info!(
                    "🌅 Sunrise difference: {} minutes",
                    comparison.difference().num_minutes()
                );
                self.renderer.render_comparison(&comparison);
                (lifecycle, Ok(comparison))
            }
            Err(e) => {
                tracing::warn!("❌ Sunrise comparison failed: {}", e);
                self.renderer.render_error(&e);
                (lifecycle, Err(e))
            }
        }
    }
}
