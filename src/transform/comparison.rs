use crate::feeds::PeriodAggregate;

use super::{TrendDirection, parse_amount, period_label};

const DAYS_PER_WEEK: f64 = 7.0;

#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonPoint {
    pub period: String,
    pub label: String,
    pub revenue: f64,
    pub profit: f64,
    pub margin: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ComparisonSummary {
    pub today_profit: f64,
    pub last_week_profit: f64,
    pub last_30_days_profit: f64,
    pub avg_margin: f64,
    pub profit_trend: TrendDirection,
    pub revenue_trend: TrendDirection,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonReport {
    pub points: Vec<ComparisonPoint>,
    pub summary: ComparisonSummary,
}

pub fn transform(aggregates: &[PeriodAggregate]) -> ComparisonReport {
    let points: Vec<ComparisonPoint> = aggregates.iter().map(point_from_aggregate).collect();

    let avg_margin = if points.is_empty() {
        0.0
    } else {
        points.iter().map(|point| point.margin).sum::<f64>() / points.len() as f64
    };

    let (today_profit, today_revenue) = profit_revenue_for(aggregates, "today");
    let (last_week_profit, last_week_revenue) = profit_revenue_for(aggregates, "last_week");
    let (last_30_days_profit, _) = profit_revenue_for(aggregates, "last_30_days");

    // Today measured against one seventh of last week's total. A rough
    // daily-average baseline, not a statistical trend test.
    let summary = ComparisonSummary {
        today_profit,
        last_week_profit,
        last_30_days_profit,
        avg_margin,
        profit_trend: direction(today_profit, last_week_profit / DAYS_PER_WEEK),
        revenue_trend: direction(today_revenue, last_week_revenue / DAYS_PER_WEEK),
    };

    ComparisonReport { points, summary }
}

fn point_from_aggregate(aggregate: &PeriodAggregate) -> ComparisonPoint {
    let revenue = parse_amount(&aggregate.revenue).unwrap_or(0.0);
    let profit = parse_amount(&aggregate.profit).unwrap_or(0.0);
    ComparisonPoint {
        period: aggregate.period.clone(),
        label: period_label(&aggregate.period),
        revenue,
        profit,
        margin: margin_percent(profit, revenue),
    }
}

fn margin_percent(profit: f64, revenue: f64) -> f64 {
    if revenue == 0.0 {
        0.0
    } else {
        profit / revenue * 100.0
    }
}

fn profit_revenue_for(aggregates: &[PeriodAggregate], period: &str) -> (f64, f64) {
    aggregates
        .iter()
        .find(|aggregate| aggregate.period == period)
        .map_or((0.0, 0.0), |aggregate| {
            (
                parse_amount(&aggregate.profit).unwrap_or(0.0),
                parse_amount(&aggregate.revenue).unwrap_or(0.0),
            )
        })
}

const fn direction(current: f64, baseline: f64) -> TrendDirection {
    if current > baseline {
        TrendDirection::Up
    } else {
        TrendDirection::Down
    }
}

#[cfg(test)]
mod tests {
    use super::{ComparisonReport, transform};
    use crate::feeds::PeriodAggregate;
    use crate::transform::TrendDirection;

    fn aggregate(period: &str, revenue: &str, profit: &str) -> PeriodAggregate {
        PeriodAggregate {
            period: period.to_string(),
            revenue: revenue.to_string(),
            profit: profit.to_string(),
        }
    }

    fn sample() -> Vec<PeriodAggregate> {
        vec![
            aggregate("today", "1000.00", "400.00"),
            aggregate("last_week", "7000.00", "1400.00"),
            aggregate("last_30_days", "30000.00", "9000.00"),
        ]
    }

    #[test]
    fn one_point_per_aggregate_in_input_order() {
        let report = transform(&sample());
        assert_eq!(report.points.len(), 3);
        assert_eq!(report.points[0].period, "today");
        assert_eq!(report.points[1].period, "last_week");
        assert_eq!(report.points[2].period, "last_30_days");
    }

    #[test]
    fn known_periods_get_display_labels_and_margins() {
        let report = transform(&sample());
        assert_eq!(report.points[0].label, "Today");
        assert_eq!(report.points[1].label, "Last Week");
        assert!((report.points[0].margin - 40.0).abs() < 1e-9);
        assert!((report.points[2].margin - 30.0).abs() < 1e-9);
    }

    #[test]
    fn unknown_period_keeps_its_raw_key_as_label() {
        let report = transform(&[aggregate("last_quarter", "100", "10")]);
        assert_eq!(report.points[0].label, "last_quarter");
    }

    #[test]
    fn zero_revenue_yields_zero_margin() {
        let report = transform(&[aggregate("today", "0", "100.00")]);
        assert_eq!(report.points[0].margin, 0.0);
        assert_eq!(report.summary.avg_margin, 0.0);
    }

    #[test]
    fn unparseable_revenue_degrades_to_zero() {
        let report = transform(&[aggregate("today", "abc", "50.00")]);
        assert_eq!(report.points[0].revenue, 0.0);
        assert_eq!(report.points[0].profit, 50.0);
        assert_eq!(report.points[0].margin, 0.0);
    }

    #[test]
    fn summary_pulls_the_three_headline_periods() {
        let report = transform(&sample());
        assert!((report.summary.today_profit - 400.0).abs() < 1e-9);
        assert!((report.summary.last_week_profit - 1400.0).abs() < 1e-9);
        assert!((report.summary.last_30_days_profit - 9000.0).abs() < 1e-9);
    }

    #[test]
    fn missing_headline_periods_default_to_zero() {
        let report = transform(&[aggregate("last_2_weeks", "500", "100")]);
        assert_eq!(report.summary.today_profit, 0.0);
        assert_eq!(report.summary.last_week_profit, 0.0);
        assert_eq!(report.summary.last_30_days_profit, 0.0);
        // 0 > 0/7 is false, so an absent pair reads as Down.
        assert_eq!(report.summary.profit_trend, TrendDirection::Down);
        assert_eq!(report.summary.revenue_trend, TrendDirection::Down);
    }

    #[test]
    fn trend_compares_today_against_a_seventh_of_last_week() {
        // 400 > 1400/7 = 200, 1000 > 7000/7 = 1000 is false.
        let report = transform(&sample());
        assert_eq!(report.summary.profit_trend, TrendDirection::Up);
        assert_eq!(report.summary.revenue_trend, TrendDirection::Down);
    }

    #[test]
    fn avg_margin_is_the_mean_over_all_points() {
        let report = transform(&sample());
        // Margins: 40, 20, 30.
        assert!((report.summary.avg_margin - 30.0).abs() < 1e-9);
    }

    #[test]
    fn transform_is_deterministic() {
        let input = sample();
        let first: ComparisonReport = transform(&input);
        let second: ComparisonReport = transform(&input);
        assert_eq!(first, second);
    }
}
