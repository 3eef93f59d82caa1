use crate::utils::error::{AppError, Result};
use chrono::{DateTime, Datelike, TimeDelta, TimeZone};
use serde::Serialize;
use std::fmt;

/// 距離目標時間還剩多少
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Countdown {
    pub target_year: i32,
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
    pub total_seconds: i64,
}

impl Countdown {
    /// Midnight of the next January 1st in `now`'s timezone. At exactly
    /// 00:00 on January 1st the target is the following year.
    pub fn next_new_year<Tz: TimeZone>(now: &DateTime<Tz>) -> Result<DateTime<Tz>> {
        let year = now
            .year()
            .checked_add(1)
            .ok_or_else(|| AppError::validation("now", now.year(), "Year out of range"))?;
        now.timezone()
            .with_ymd_and_hms(year, 1, 1, 0, 0, 0)
            .earliest()
            .ok_or_else(|| {
                AppError::validation("now", year, "Midnight of January 1st does not exist in this timezone")
            })
    }

    pub fn until_new_year<Tz: TimeZone>(now: &DateTime<Tz>) -> Result<Self> {
        let target = Self::next_new_year(now)?;
        Ok(Self::between(now, &target))
    }

    /// 剩餘時間，不足一秒進位，已過目標時歸零
    pub fn between<Tz: TimeZone>(now: &DateTime<Tz>, target: &DateTime<Tz>) -> Self {
        let remaining = target
            .clone()
            .signed_duration_since(now.clone())
            .max(TimeDelta::zero());
        let mut total_seconds = remaining.num_seconds();
        if remaining > TimeDelta::seconds(total_seconds) {
            total_seconds += 1;
        }

        Self {
            target_year: target.year(),
            days: total_seconds / 86_400,
            hours: (total_seconds % 86_400) / 3_600,
            minutes: (total_seconds % 3_600) / 60,
            seconds: total_seconds % 60,
            total_seconds,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.total_seconds == 0
    }
}

impl fmt::Display for Countdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}d {:02}h {:02}m {:02}s until {}",
            self.days, self.hours, self.minutes, self.seconds, self.target_year
        )
    }
}
