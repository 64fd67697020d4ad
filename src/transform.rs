pub mod comparison;
pub mod trends;

pub use comparison::{ComparisonPoint, ComparisonReport, ComparisonSummary};
pub use trends::{Granularity, TrendFeed, TrendPoint, TrendReport, TrendSummary};

use rustc_hash::FxHashMap;
use std::sync::OnceLock;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrendDirection {
    Up,
    Down,
}

impl TrendDirection {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Up => "up",
            Self::Down => "down",
        }
    }
}

// Monetary and percentage fields arrive as decimal strings. Anything that
// fails to parse, or parses to a non-finite value, is treated as absent so
// it can degrade to zero instead of poisoning downstream sums.
pub fn parse_amount(value: &str) -> Option<f64> {
    let parsed = value.trim().parse::<f64>().ok()?;
    parsed.is_finite().then_some(parsed)
}

// Counts may arrive as plain integers or as decimal strings; truncate
// toward zero in the latter case.
pub fn parse_count(value: &str) -> Option<i64> {
    let trimmed = value.trim();
    if let Ok(count) = trimmed.parse::<i64>() {
        return Some(count);
    }
    let parsed = trimmed.parse::<f64>().ok()?;
    parsed.is_finite().then_some(parsed.trunc() as i64)
}

pub fn period_label(period: &str) -> String {
    period_labels().get(period).map_or_else(
        || period.to_string(),
        |label| (*label).to_string(),
    )
}

fn period_labels() -> &'static FxHashMap<&'static str, &'static str> {
    static PERIOD_LABELS: OnceLock<FxHashMap<&'static str, &'static str>> = OnceLock::new();
    PERIOD_LABELS.get_or_init(|| {
        [
            ("today", "Today"),
            ("last_week", "Last Week"),
            ("last_2_weeks", "2 Weeks Ago"),
            ("last_3_weeks", "3 Weeks Ago"),
            ("last_4_weeks", "4 Weeks Ago"),
            ("last_30_days", "Last 30 Days"),
        ]
        .into_iter()
        .collect()
    })
}

#[cfg(test)]
mod tests {
    use super::{parse_amount, parse_count, period_label};

    #[test]
    fn parse_amount_accepts_decimal_strings() {
        assert_eq!(parse_amount("1234.56"), Some(1234.56));
        assert_eq!(parse_amount("  -42.5 "), Some(-42.5));
    }

    #[test]
    fn parse_amount_rejects_garbage_and_non_finite() {
        assert_eq!(parse_amount("abc"), None);
        assert_eq!(parse_amount(""), None);
        assert_eq!(parse_amount("NaN"), None);
        assert_eq!(parse_amount("inf"), None);
    }

    #[test]
    fn parse_count_handles_integer_and_decimal_strings() {
        assert_eq!(parse_count("147"), Some(147));
        assert_eq!(parse_count("12.7"), Some(12));
        assert_eq!(parse_count("n/a"), None);
    }

    #[test]
    fn known_periods_map_to_display_labels() {
        assert_eq!(period_label("today"), "Today");
        assert_eq!(period_label("last_30_days"), "Last 30 Days");
    }

    #[test]
    fn unknown_periods_fall_back_to_the_raw_key() {
        assert_eq!(period_label("last_quarter"), "last_quarter");
    }
}
