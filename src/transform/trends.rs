use crate::feeds::{MonthlyTrend, WeeklyTrend, YtdSummary};

use super::{parse_amount, parse_count};

const DAYS_PER_WEEK: f64 = 7.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Granularity {
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

impl Granularity {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
            Self::Yearly => "yearly",
        }
    }
}

// The four feed shapes the backend exposes. Daily has no endpoint of its
// own; it is derived from a short weekly window (see daily_report).
pub enum TrendFeed<'a> {
    Daily(&'a [WeeklyTrend]),
    Weekly(&'a [WeeklyTrend]),
    Monthly(&'a [MonthlyTrend]),
    Yearly {
        summary: Option<&'a YtdSummary>,
        year: i32,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct TrendPoint {
    pub period: String,
    pub profit: f64,
    pub revenue: f64,
    pub margin: f64,
    pub sales: i64,
}

// For daily feeds profit/revenue/margin are averages and sales a rounded
// average; weekly and monthly average the money fields but total the sales;
// yearly carries the YTD source values through untouched.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TrendSummary {
    pub profit: f64,
    pub revenue: f64,
    pub margin: f64,
    pub sales: i64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TrendReport {
    pub granularity: Granularity,
    pub points: Vec<TrendPoint>,
    pub summary: TrendSummary,
}

pub fn transform(feed: TrendFeed<'_>) -> TrendReport {
    match feed {
        TrendFeed::Daily(weeks) => daily_report(weeks),
        TrendFeed::Weekly(weeks) => weekly_report(weeks),
        TrendFeed::Monthly(months) => monthly_report(months),
        TrendFeed::Yearly { summary, year } => yearly_report(summary, year),
    }
}

// Daily figures are interpolated from weekly aggregates by dividing each
// week by seven; the backend has no daily endpoint, so these points are an
// approximation rather than measured values. Margin is a ratio already and
// is copied through undivided. Labels count down from the window length and
// the mapped sequence is reversed so the points read oldest-first.
fn daily_report(weeks: &[WeeklyTrend]) -> TrendReport {
    let window = weeks.len();
    let mut points: Vec<TrendPoint> = weeks
        .iter()
        .enumerate()
        .map(|(index, week)| {
            let sales = parse_count(&week.sales_count).unwrap_or(0);
            TrendPoint {
                period: format!("Day {}", window - index),
                profit: parse_amount(&week.weekly_profit).unwrap_or(0.0) / DAYS_PER_WEEK,
                revenue: parse_amount(&week.weekly_revenue).unwrap_or(0.0) / DAYS_PER_WEEK,
                margin: parse_amount(&week.week_margin).unwrap_or(0.0),
                sales: (sales as f64 / DAYS_PER_WEEK).round() as i64,
            }
        })
        .collect();
    points.reverse();

    let summary = summarize(&points, Granularity::Daily);
    TrendReport {
        granularity: Granularity::Daily,
        points,
        summary,
    }
}

fn weekly_report(weeks: &[WeeklyTrend]) -> TrendReport {
    let points: Vec<TrendPoint> = weeks
        .iter()
        .map(|week| TrendPoint {
            period: format!("Week {}", week.week_number),
            profit: parse_amount(&week.weekly_profit).unwrap_or(0.0),
            revenue: parse_amount(&week.weekly_revenue).unwrap_or(0.0),
            margin: parse_amount(&week.week_margin).unwrap_or(0.0),
            sales: parse_count(&week.sales_count).unwrap_or(0),
        })
        .collect();

    let summary = summarize(&points, Granularity::Weekly);
    TrendReport {
        granularity: Granularity::Weekly,
        points,
        summary,
    }
}

fn monthly_report(months: &[MonthlyTrend]) -> TrendReport {
    let points: Vec<TrendPoint> = months
        .iter()
        .map(|month| TrendPoint {
            period: month.period.clone(),
            profit: parse_amount(&month.monthly_profit).unwrap_or(0.0),
            revenue: parse_amount(&month.monthly_revenue).unwrap_or(0.0),
            margin: parse_amount(&month.margin).unwrap_or(0.0),
            sales: parse_count(&month.sales_count).unwrap_or(0),
        })
        .collect();

    let summary = summarize(&points, Granularity::Monthly);
    TrendReport {
        granularity: Granularity::Monthly,
        points,
        summary,
    }
}

// A missing YTD record yields an empty series, not a synthetic zero point.
fn yearly_report(summary: Option<&YtdSummary>, year: i32) -> TrendReport {
    let Some(ytd) = summary else {
        return TrendReport {
            granularity: Granularity::Yearly,
            points: Vec::new(),
            summary: TrendSummary::default(),
        };
    };

    let point = TrendPoint {
        period: format!("{year} YTD"),
        profit: parse_amount(&ytd.ytd_profit).unwrap_or(0.0),
        revenue: parse_amount(&ytd.ytd_revenue).unwrap_or(0.0),
        margin: parse_amount(&ytd.ytd_margin).unwrap_or(0.0),
        sales: parse_count(&ytd.ytd_sales).unwrap_or(0),
    };
    // Yearly summary fields come straight from the source record, not from
    // re-aggregating the single point.
    let summary = TrendSummary {
        profit: point.profit,
        revenue: point.revenue,
        margin: point.margin,
        sales: point.sales,
    };

    TrendReport {
        granularity: Granularity::Yearly,
        points: vec![point],
        summary,
    }
}

fn summarize(points: &[TrendPoint], granularity: Granularity) -> TrendSummary {
    if points.is_empty() {
        return TrendSummary::default();
    }

    let count = points.len() as f64;
    let total_sales: i64 = points.iter().map(|point| point.sales).sum();
    let sales = if granularity == Granularity::Daily {
        (total_sales as f64 / count).round() as i64
    } else {
        total_sales
    };

    TrendSummary {
        profit: points.iter().map(|point| point.profit).sum::<f64>() / count,
        revenue: points.iter().map(|point| point.revenue).sum::<f64>() / count,
        margin: points.iter().map(|point| point.margin).sum::<f64>() / count,
        sales,
    }
}

#[cfg(test)]
mod tests {
    use super::{Granularity, TrendFeed, TrendReport, transform};
    use crate::feeds::{MonthlyTrend, WeeklyTrend, YtdSummary};

    fn week(number: u32, profit: &str, revenue: &str, margin: &str, sales: &str) -> WeeklyTrend {
        WeeklyTrend {
            week_number: number,
            weekly_profit: profit.to_string(),
            weekly_revenue: revenue.to_string(),
            week_margin: margin.to_string(),
            sales_count: sales.to_string(),
        }
    }

    fn month(period: &str, profit: &str, revenue: &str, margin: &str, sales: &str) -> MonthlyTrend {
        MonthlyTrend {
            period: period.to_string(),
            monthly_profit: profit.to_string(),
            monthly_revenue: revenue.to_string(),
            margin: margin.to_string(),
            sales_count: sales.to_string(),
        }
    }

    fn four_weeks() -> Vec<WeeklyTrend> {
        vec![
            week(31, "700.00", "2100.00", "33.33", "70"),
            week(30, "1400.00", "4200.00", "33.33", "140"),
            week(29, "2100.00", "6300.00", "33.33", "210"),
            week(28, "2800.00", "8400.00", "33.33", "280"),
        ]
    }

    #[test]
    fn weekly_points_preserve_order_and_labels() {
        let report = transform(TrendFeed::Weekly(&four_weeks()));
        assert_eq!(report.granularity, Granularity::Weekly);
        assert_eq!(report.points.len(), 4);
        assert_eq!(report.points[0].period, "Week 31");
        assert_eq!(report.points[3].period, "Week 28");
    }

    #[test]
    fn weekly_margin_is_passed_through_unchanged() {
        let weeks = vec![week(12, "500.00", "2000.00", "99.9", "10")];
        let report = transform(TrendFeed::Weekly(&weeks));
        // The margin field is copied from the feed, never recomputed from
        // profit and revenue.
        assert!((report.points[0].margin - 99.9).abs() < 1e-9);
    }

    #[test]
    fn weekly_summary_averages_money_and_totals_sales() {
        let report = transform(TrendFeed::Weekly(&four_weeks()));
        assert!((report.summary.profit - 1750.0).abs() < 1e-9);
        assert!((report.summary.revenue - 5250.0).abs() < 1e-9);
        assert!((report.summary.margin - 33.33).abs() < 1e-9);
        assert_eq!(report.summary.sales, 700);
    }

    #[test]
    fn empty_weekly_feed_yields_empty_points_and_zero_summary() {
        let report = transform(TrendFeed::Weekly(&[]));
        assert!(report.points.is_empty());
        assert_eq!(report.summary.profit, 0.0);
        assert_eq!(report.summary.revenue, 0.0);
        assert_eq!(report.summary.margin, 0.0);
        assert_eq!(report.summary.sales, 0);
    }

    #[test]
    fn daily_points_are_reversed_into_chronological_order() {
        let report = transform(TrendFeed::Daily(&four_weeks()));
        let labels: Vec<&str> = report
            .points
            .iter()
            .map(|point| point.period.as_str())
            .collect();
        assert_eq!(labels, ["Day 1", "Day 2", "Day 3", "Day 4"]);
    }

    #[test]
    fn daily_divides_money_and_sales_by_seven_but_not_margin() {
        let report = transform(TrendFeed::Daily(&four_weeks()));
        // After reversal the last point corresponds to the first input week.
        let newest = report.points.last().unwrap();
        assert!((newest.profit - 100.0).abs() < 1e-9);
        assert!((newest.revenue - 300.0).abs() < 1e-9);
        assert!((newest.margin - 33.33).abs() < 1e-9);
        assert_eq!(newest.sales, 10);
    }

    #[test]
    fn daily_sales_round_per_point() {
        let weeks = vec![week(7, "70.00", "210.00", "33.33", "74")];
        let report = transform(TrendFeed::Daily(&weeks));
        // 74 / 7 = 10.57 rounds to 11.
        assert_eq!(report.points[0].sales, 11);
    }

    #[test]
    fn daily_summary_averages_sales_instead_of_totaling() {
        let report = transform(TrendFeed::Daily(&four_weeks()));
        // Point sales are 40, 30, 20, 10; the daily card shows their mean.
        assert_eq!(report.summary.sales, 25);
        assert!((report.summary.profit - 250.0).abs() < 1e-9);
    }

    #[test]
    fn unparseable_weekly_fields_degrade_to_zero() {
        let weeks = vec![week(5, "oops", "4200.00", "NaN", "n/a")];
        let report = transform(TrendFeed::Weekly(&weeks));
        assert_eq!(report.points[0].profit, 0.0);
        assert!((report.points[0].revenue - 4200.0).abs() < 1e-9);
        assert_eq!(report.points[0].margin, 0.0);
        assert_eq!(report.points[0].sales, 0);
    }

    #[test]
    fn monthly_labels_are_taken_verbatim() {
        let months = vec![
            month("Jun 2026", "30000.00", "95000.00", "31.58", "540"),
            month("Jul 2026", "36000.00", "112000.00", "32.14", "610"),
        ];
        let report = transform(TrendFeed::Monthly(&months));
        assert_eq!(report.points[0].period, "Jun 2026");
        assert_eq!(report.points[1].period, "Jul 2026");
        assert_eq!(report.summary.sales, 1150);
    }

    #[test]
    fn yearly_wraps_the_ytd_record_in_a_single_labeled_point() {
        let ytd = YtdSummary {
            ytd_profit: "214000.00".to_string(),
            ytd_revenue: "688000.00".to_string(),
            ytd_margin: "31.10".to_string(),
            ytd_sales: "3890".to_string(),
        };
        let report = transform(TrendFeed::Yearly {
            summary: Some(&ytd),
            year: 2026,
        });
        assert_eq!(report.points.len(), 1);
        assert_eq!(report.points[0].period, "2026 YTD");
        assert!((report.summary.profit - 214_000.0).abs() < 1e-9);
        assert_eq!(report.summary.sales, 3890);
    }

    #[test]
    fn yearly_without_a_record_yields_an_empty_series() {
        let report = transform(TrendFeed::Yearly {
            summary: None,
            year: 2026,
        });
        assert!(report.points.is_empty());
        assert_eq!(report.summary.profit, 0.0);
        assert_eq!(report.summary.revenue, 0.0);
        assert_eq!(report.summary.margin, 0.0);
        assert_eq!(report.summary.sales, 0);
    }

    #[test]
    fn transform_is_deterministic() {
        let weeks = four_weeks();
        let first: TrendReport = transform(TrendFeed::Daily(&weeks));
        let second: TrendReport = transform(TrendFeed::Daily(&weeks));
        assert_eq!(first, second);
    }
}
