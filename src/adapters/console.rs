use crate::domain::model::{SunriseComparison, SunriseReport};
use crate::domain::ports::Renderer;
use crate::utils::error::AppError;
use chrono::Local;

/// 把結果印到 stdout / stderr
#[derive(Debug, Clone, Default)]
pub struct ConsoleRenderer;

impl ConsoleRenderer {
    pub fn new() -> Self {
        Self
    }

    fn line(label: &str, report: &SunriseReport) -> String {
        format!(
            "{} ({}): sunrise {} UTC / {} local, sunset {} UTC, day length {}h {:02}m",
            label,
            report.coordinates,
            report.sunrise.format("%H:%M:%S"),
            report.sunrise.with_timezone(&Local).format("%H:%M:%S"),
            report.sunset.format("%H:%M:%S"),
            report.day_length_seconds / 3600,
            (report.day_length_seconds % 3600) / 60,
        )
    }
}

impl Renderer for ConsoleRenderer {
    fn render_loading(&self, visible: bool) {
        if visible {
            println!("⏳ Loading sunrise times...");
        }
    }

    fn render_comparison(&self, comparison: &SunriseComparison) {
        println!("🌅 {}", Self::line("City A", &comparison.first));
        println!("🌅 {}", Self::line("City B", &comparison.second));

        let minutes = comparison.difference().num_minutes();
        let who = if minutes == 0 {
            "Both cities see the sun rise at the same moment".to_string()
        } else if minutes > 0 {
            format!("City A sees the sunrise {} minutes before City B", minutes)
        } else {
            format!("City B sees the sunrise {} minutes before City A", -minutes)
        };
        println!("📊 {}", who);
    }

    fn render_error(&self, error: &AppError) {
        eprintln!("❌ {}", error.user_friendly_message());
    }
}
