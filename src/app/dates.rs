use crate::core::dates::{add, difference, format, format_relative, is_after, is_before, subtract, TimeUnit};
use crate::utils::error::{AppError, Result};
use chrono::{DateTime, FixedOffset};

#[derive(Debug, Clone)]
pub struct DatesRequest {
    pub amount: i64,
    pub unit: TimeUnit,
    pub pattern: String,
    pub compare: Option<DateTime<FixedOffset>>,
}

pub fn parse_timestamp(field: &str, raw: &str) -> Result<DateTime<FixedOffset>> {
    DateTime::parse_from_rfc3339(raw.trim())
        .map_err(|e| AppError::validation(field, raw, format!("Expected RFC 3339 timestamp: {}", e)))
}

/// 產生 (標籤, 結果) 清單，由呼叫端決定怎麼印
pub fn date_report(
    base: &DateTime<FixedOffset>,
    request: &DatesRequest,
) -> Result<Vec<(String, String)>> {
    let amount = request.amount;
    let unit = request.unit;
    let later = add(base, amount, unit)?;
    let earlier = subtract(base, amount, unit)?;

    let mut lines = vec![
        ("base".to_string(), format(base, &request.pattern)?),
        (format!("base + {} {}", amount, unit), format(&later, &request.pattern)?),
        (format!("base - {} {}", amount, unit), format(&earlier, &request.pattern)?),
        (
            format!("(base + {} {}) relative to base", amount, unit),
            format_relative(&later, base),
        ),
        (
            format!("(base - {} {}) relative to base", amount, unit),
            format_relative(&earlier, base),
        ),
    ];

    if let Some(other) = &request.compare {
        lines.push((
            format!("other - base in {}", unit),
            difference(other, base, unit).to_string(),
        ));
        lines.push(("other is before base".to_string(), is_before(other, base).to_string()));
        lines.push(("other is after base".to_string(), is_after(other, base).to_string()));
        lines.push(("other relative to base".to_string(), format_relative(other, base)));
    }

    Ok(lines)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_report() {
        let base = parse_timestamp("base", "2024-01-15T10:00:00+00:00").unwrap();
        let request = DatesRequest {
            amount: 3,
            unit: TimeUnit::Days,
            pattern: "%Y-%m-%d".to_string(),
            compare: Some(parse_timestamp("compare", "2024-01-01T10:00:00+00:00").unwrap()),
        };

        let lines = date_report(&base, &request).unwrap();
        let value = |label: &str| {
            lines
                .iter()
                .find(|(l, _)| l == label)
                .map(|(_, v)| v.clone())
                .unwrap()
        };

        assert_eq!(value("base"), "2024-01-15");
        assert_eq!(value("base + 3 days"), "2024-01-18");
        assert_eq!(value("base - 3 days"), "2024-01-12");
        assert_eq!(value("(base + 3 days) relative to base"), "in 3 days");
        assert_eq!(value("other - base in days"), "-14");
        assert_eq!(value("other is before base"), "true");
        assert_eq!(value("other is after base"), "false");
    }

    #[test]
    fn test_bad_inputs_are_validation_errors() {
        assert!(parse_timestamp("base", "yesterday").unwrap_err().is_validation());

        let base = parse_timestamp("base", "2024-01-15T10:00:00Z").unwrap();
        let request = DatesRequest {
            amount: 1,
            unit: TimeUnit::Hours,
            pattern: "%Y-%Q".to_string(),
            compare: None,
        };
        assert!(date_report(&base, &request).unwrap_err().is_validation());
    }
}
