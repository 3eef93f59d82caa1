//! Date arithmetic helpers over `chrono`: shifting by calendar units,
//! pattern formatting, signed differences and relative descriptions.

use crate::utils::error::{AppError, Result};
use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Datelike, Months, NaiveDateTime, TimeDelta, TimeZone};
use serde::Serialize;
use std::fmt::{self, Display, Write};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TimeUnit {
    Seconds,
    Minutes,
    Hours,
    Days,
    Weeks,
    Months,
    Years,
}

impl TimeUnit {
    /// 固定長度的單位換算成秒；月、年長度不固定
    fn fixed_seconds(self) -> Option<i64> {
        match self {
            TimeUnit::Seconds => Some(1),
            TimeUnit::Minutes => Some(60),
            TimeUnit::Hours => Some(3_600),
            TimeUnit::Days => Some(86_400),
            TimeUnit::Weeks => Some(604_800),
            TimeUnit::Months | TimeUnit::Years => None,
        }
    }

    fn as_str(self) -> &'static str {
        match self {
            TimeUnit::Seconds => "seconds",
            TimeUnit::Minutes => "minutes",
            TimeUnit::Hours => "hours",
            TimeUnit::Days => "days",
            TimeUnit::Weeks => "weeks",
            TimeUnit::Months => "months",
            TimeUnit::Years => "years",
        }
    }
}

impl Display for TimeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TimeUnit {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "s" | "sec" | "second" | "seconds" => Ok(TimeUnit::Seconds),
            "min" | "minute" | "minutes" => Ok(TimeUnit::Minutes),
            "h" | "hour" | "hours" => Ok(TimeUnit::Hours),
            "d" | "day" | "days" => Ok(TimeUnit::Days),
            "w" | "week" | "weeks" => Ok(TimeUnit::Weeks),
            "month" | "months" => Ok(TimeUnit::Months),
            "y" | "year" | "years" => Ok(TimeUnit::Years),
            _ => Err(AppError::validation(
                "unit",
                s,
                "Expected one of seconds, minutes, hours, days, weeks, months, years",
            )),
        }
    }
}

fn overflow(amount: i64, unit: TimeUnit) -> AppError {
    AppError::validation(
        "amount",
        format!("{} {}", amount, unit),
        "Result is outside the supported date range",
    )
}

fn shift_naive_months(ts: NaiveDateTime, months: i64) -> Option<NaiveDateTime> {
    let magnitude = Months::new(u32::try_from(months.unsigned_abs()).ok()?);
    if months >= 0 {
        ts.checked_add_months(magnitude)
    } else {
        ts.checked_sub_months(magnitude)
    }
}

/// 加上一段時間。月、年依日曆計算，超出月底時取月底 (1/31 + 1 month = 2/28)。
pub fn add<Tz: TimeZone>(ts: &DateTime<Tz>, amount: i64, unit: TimeUnit) -> Result<DateTime<Tz>> {
    match unit.fixed_seconds() {
        Some(factor) => {
            let delta = amount
                .checked_mul(factor)
                .and_then(TimeDelta::try_seconds)
                .ok_or_else(|| overflow(amount, unit))?;
            ts.clone()
                .checked_add_signed(delta)
                .ok_or_else(|| overflow(amount, unit))
        }
        None => {
            let months = if unit == TimeUnit::Years {
                amount.checked_mul(12).ok_or_else(|| overflow(amount, unit))?
            } else {
                amount
            };
            let magnitude = u32::try_from(months.unsigned_abs())
                .map(Months::new)
                .map_err(|_| overflow(amount, unit))?;
            let shifted = if months >= 0 {
                ts.clone().checked_add_months(magnitude)
            } else {
                ts.clone().checked_sub_months(magnitude)
            };
            shifted.ok_or_else(|| overflow(amount, unit))
        }
    }
}

pub fn subtract<Tz: TimeZone>(
    ts: &DateTime<Tz>,
    amount: i64,
    unit: TimeUnit,
) -> Result<DateTime<Tz>> {
    let negated = amount.checked_neg().ok_or_else(|| overflow(amount, unit))?;
    add(ts, negated, unit)
}

/// strftime 格式化；格式字串錯誤回傳驗證錯誤
pub fn format<Tz: TimeZone>(ts: &DateTime<Tz>, pattern: &str) -> Result<String>
where
    Tz::Offset: Display,
{
    let items: Vec<Item> = StrftimeItems::new(pattern).collect();
    if items.iter().any(|item| matches!(item, Item::Error)) {
        return Err(AppError::validation(
            "pattern",
            pattern,
            "Unknown or incomplete format specifier",
        ));
    }

    let mut out = String::new();
    write!(out, "{}", ts.format_with_items(items.iter())).map_err(|_| {
        AppError::validation("pattern", pattern, "Pattern cannot be rendered for this value")
    })?;
    Ok(out)
}

/// `later - earlier`，以指定單位表示，往零截斷。
pub fn difference<Tz: TimeZone>(
    later: &DateTime<Tz>,
    earlier: &DateTime<Tz>,
    unit: TimeUnit,
) -> i64 {
    match unit.fixed_seconds() {
        Some(factor) => later.clone().signed_duration_since(earlier.clone()).num_seconds() / factor,
        None => {
            let months = month_difference(later, earlier);
            if unit == TimeUnit::Years {
                months / 12
            } else {
                months
            }
        }
    }
}

/// 經過的完整月數 (可為負)
fn month_difference<Tz: TimeZone>(later: &DateTime<Tz>, earlier: &DateTime<Tz>) -> i64 {
    let start = earlier.naive_local();
    let end = later.with_timezone(&earlier.timezone()).naive_local();

    let mut months = i64::from(end.year() - start.year()) * 12
        + (i64::from(end.month()) - i64::from(start.month()));

    if months > 0 && shift_naive_months(start, months).map_or(true, |s| s > end) {
        months -= 1;
    } else if months < 0 && shift_naive_months(start, months).map_or(true, |s| s < end) {
        months += 1;
    }
    months
}

pub fn is_before<Tz: TimeZone, Tz2: TimeZone>(a: &DateTime<Tz>, b: &DateTime<Tz2>) -> bool {
    a < b
}

pub fn is_after<Tz: TimeZone, Tz2: TimeZone>(a: &DateTime<Tz>, b: &DateTime<Tz2>) -> bool {
    a > b
}

fn plural(count: i64, unit: &str) -> String {
    if count == 1 {
        format!("1 {}", unit)
    } else {
        format!("{} {}s", count, unit)
    }
}

/// 相對時間描述，例如 "5 minutes ago"、"in about 2 years"
pub fn format_relative<Tz: TimeZone, Tz2: TimeZone>(ts: &DateTime<Tz>, base: &DateTime<Tz2>) -> String {
    let seconds = ts
        .clone()
        .signed_duration_since(base.clone())
        .num_seconds();
    let future = seconds > 0;
    let abs = seconds.unsigned_abs() as f64;

    const MINUTE: f64 = 60.0;
    const HOUR: f64 = 3_600.0;
    const DAY: f64 = 86_400.0;

    let phrase = if abs < 45.0 {
        "less than a minute".to_string()
    } else if abs < 45.0 * MINUTE {
        plural(((abs / MINUTE).round() as i64).max(1), "minute")
    } else if abs < 90.0 * MINUTE {
        "about 1 hour".to_string()
    } else if abs < DAY {
        plural(((abs / HOUR).round() as i64).min(23), "hour")
    } else if abs < 42.0 * HOUR {
        "1 day".to_string()
    } else if abs < 30.0 * DAY {
        plural((abs / DAY).round() as i64, "day")
    } else if abs < 45.0 * DAY {
        "about 1 month".to_string()
    } else if abs < 365.0 * DAY {
        plural(((abs / DAY / 30.0).round() as i64).clamp(2, 11), "month")
    } else {
        format!(
            "about {}",
            plural(((abs / DAY / 365.25).round() as i64).max(1), "year")
        )
    };

    if future {
        format!("in {}", phrase)
    } else {
        format!("{} ago", phrase)
    }
}
