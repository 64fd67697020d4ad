use criterion::{Criterion, criterion_group, criterion_main};
use profitlens::feeds::{MonthlyTrend, PeriodAggregate, WeeklyTrend};
use profitlens::transform::{TrendFeed, comparison, trends};
use std::hint::black_box;

fn comparison_fixture() -> Vec<PeriodAggregate> {
    [
        ("today", "1520.00", "410.00"),
        ("last_week", "10450.00", "3120.00"),
        ("last_2_weeks", "9800.00", "2950.00"),
        ("last_3_weeks", "11200.00", "3400.00"),
        ("last_4_weeks", "9100.00", "2600.00"),
        ("last_30_days", "44100.00", "13200.00"),
    ]
    .into_iter()
    .map(|(period, revenue, profit)| PeriodAggregate {
        period: period.to_string(),
        revenue: revenue.to_string(),
        profit: profit.to_string(),
    })
    .collect()
}

fn weekly_fixture(weeks: u32) -> Vec<WeeklyTrend> {
    (0..weeks)
        .map(|index| WeeklyTrend {
            week_number: 40 - index,
            weekly_profit: format!("{}.00", 8_000 + index * 130),
            weekly_revenue: format!("{}.00", 26_000 + index * 410),
            week_margin: "31.60".to_string(),
            sales_count: (140 + index * 3).to_string(),
        })
        .collect()
}

fn monthly_fixture(months: u32) -> Vec<MonthlyTrend> {
    (0..months)
        .map(|index| MonthlyTrend {
            period: format!("Month {}", index + 1),
            monthly_profit: format!("{}.00", 34_000 + index * 900),
            monthly_revenue: format!("{}.00", 108_000 + index * 2_500),
            margin: "31.40".to_string(),
            sales_count: (590 + index * 11).to_string(),
        })
        .collect()
}

fn bench_transforms(c: &mut Criterion) {
    let aggregates = comparison_fixture();
    let weeks = weekly_fixture(12);
    let months = monthly_fixture(12);

    c.bench_function("comparison_transform", |b| {
        b.iter(|| comparison::transform(black_box(&aggregates)));
    });
    c.bench_function("daily_transform", |b| {
        b.iter(|| trends::transform(TrendFeed::Daily(black_box(&weeks[..4]))));
    });
    c.bench_function("weekly_transform", |b| {
        b.iter(|| trends::transform(TrendFeed::Weekly(black_box(&weeks))));
    });
    c.bench_function("monthly_transform", |b| {
        b.iter(|| trends::transform(TrendFeed::Monthly(black_box(&months))));
    });
}

criterion_group!(benches, bench_transforms);
criterion_main!(benches);
