use crate::cli::Cli;
use crate::progress::{ProgressState, Stage, run_with_spinner};
use crate::report::{HtmlReportContext, HtmlReportPaths, save_html_report};
use crate::summary::{SummaryContext, SummaryPaths, print_summary};
use anyhow::{Context, Result};
use chrono::{Datelike, Local};
use clap::Parser;
use csv::Writer;
use flate2::Compression;
use flate2::write::GzEncoder;
use profitlens::feeds::{
    fetch_monthly_trends, fetch_period_comparison, fetch_weekly_trends, fetch_ytd_summary,
};
use profitlens::transform::{ComparisonReport, TrendFeed, TrendReport, comparison, trends};
use reqwest::Client;
use serde::Serialize;
use std::ffi::OsString;
use std::future::Future;
use std::io::Write as _;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::fs;

mod cli;
mod progress;
mod report;
mod summary;

const HTTP_TIMEOUT_SECONDS: u64 = 20;
// The backend has no daily endpoint; daily points are interpolated from the
// most recent weeks of the weekly feed.
const DAILY_WINDOW_WEEKS: u32 = 4;

#[tokio::main]
async fn main() -> Result<()> {
    colored::control::set_override(true);

    let mut cli = Cli::parse();

    if let Some(command) = cli.command.take() {
        crate::cli::handle_command(command)?;
        return Ok(());
    }

    let run_started_at = Local::now();

    let client = Client::builder()
        .user_agent(concat!("profitlens-fetcher/", env!("CARGO_PKG_VERSION")))
        .timeout(Duration::from_secs(HTTP_TIMEOUT_SECONDS))
        .build()
        .context("failed to build HTTP client")?;

    let progress = (!cli.no_progress).then(ProgressState::new);
    let base_url = cli.api_url.trim_end_matches('/');

    // The five feeds are independent; they race freely and any of them may
    // complete first.
    let (aggregates, daily_window, weekly_trends, monthly_trends, ytd_summary) = tokio::try_join!(
        traced(
            progress.as_ref(),
            "period comparison",
            fetch_period_comparison(&client, base_url)
        ),
        traced(
            progress.as_ref(),
            "daily window",
            fetch_weekly_trends(&client, base_url, DAILY_WINDOW_WEEKS)
        ),
        traced(
            progress.as_ref(),
            "weekly trends",
            fetch_weekly_trends(&client, base_url, cli.weeks)
        ),
        traced(
            progress.as_ref(),
            "monthly trends",
            fetch_monthly_trends(&client, base_url, cli.months)
        ),
        traced(
            progress.as_ref(),
            "YTD summary",
            fetch_ytd_summary(&client, base_url)
        ),
    )?;
    if let Some(progress) = progress.as_ref() {
        progress.clear();
    }

    let comparison_report = comparison::transform(&aggregates);
    let daily = trends::transform(TrendFeed::Daily(&daily_window));
    let weekly = trends::transform(TrendFeed::Weekly(&weekly_trends));
    let monthly = trends::transform(TrendFeed::Monthly(&monthly_trends));
    let yearly = trends::transform(TrendFeed::Yearly {
        summary: ytd_summary.as_ref(),
        year: run_started_at.year(),
    });
    let trend_reports = [&daily, &weekly, &monthly, &yearly];

    let trends_path = match cli.save_trends.as_ref() {
        Some(path) => {
            Some(save_trend_points_csv(path.as_path(), &trend_reports, cli.archive_csv).await?)
        }
        None => None,
    };
    let comparison_path = match cli.save_comparison.as_ref() {
        Some(path) => {
            Some(save_comparison_csv(path.as_path(), &comparison_report, cli.archive_csv).await?)
        }
        None => None,
    };

    if let Some(path) = cli.save_html.as_ref() {
        let html_context = HtmlReportContext {
            comparison: &comparison_report,
            daily: &daily,
            weekly: &weekly,
            monthly: &monthly,
            yearly: &yearly,
            run_started_at: &run_started_at,
            full_output: cli.full_output,
            paths: HtmlReportPaths {
                trends: trends_path.as_deref(),
                comparison: comparison_path.as_deref(),
            },
            output_path: path.as_path(),
        };
        save_html_report(path.as_path(), &html_context).await?;
    }

    print_summary(&SummaryContext {
        comparison: &comparison_report,
        daily: &daily,
        weekly: &weekly,
        monthly: &monthly,
        yearly: &yearly,
        run_started_at: &run_started_at,
        paths: SummaryPaths {
            trends: trends_path.as_deref(),
            comparison: comparison_path.as_deref(),
            html: cli.save_html.as_deref(),
        },
        full_output: cli.full_output,
    });

    Ok(())
}

async fn traced<T>(
    progress: Option<&ProgressState>,
    label: &str,
    fut: impl Future<Output = Result<T>>,
) -> Result<T> {
    match progress {
        Some(progress) => run_with_spinner(progress, Stage::Fetch, label, fut).await,
        None => fut.await,
    }
}

#[derive(Debug, Serialize)]
struct TrendCsvRecord<'a> {
    granularity: &'a str,
    period: &'a str,
    profit: f64,
    revenue: f64,
    margin: f64,
    sales: i64,
}

#[derive(Debug, Serialize)]
struct ComparisonCsvRecord<'a> {
    period: &'a str,
    label: &'a str,
    revenue: f64,
    profit: f64,
    margin: f64,
}

async fn save_trend_points_csv(
    path: &Path,
    reports: &[&TrendReport],
    archive: bool,
) -> Result<PathBuf> {
    let serialized = serialize_trend_points(reports)?;
    write_csv_output(path, &serialized, archive).await
}

fn serialize_trend_points(reports: &[&TrendReport]) -> Result<Vec<u8>> {
    let mut writer = Writer::from_writer(Vec::new());
    for report in reports {
        for point in &report.points {
            let record = TrendCsvRecord {
                granularity: report.granularity.as_str(),
                period: point.period.as_str(),
                profit: point.profit,
                revenue: point.revenue,
                margin: point.margin,
                sales: point.sales,
            };
            writer
                .serialize(record)
                .context("failed to serialize trend point record")?;
        }
    }
    finalize_writer(writer, "trend point CSV writer")
}

async fn save_comparison_csv(
    path: &Path,
    report: &ComparisonReport,
    archive: bool,
) -> Result<PathBuf> {
    let mut writer = Writer::from_writer(Vec::new());
    for point in &report.points {
        let record = ComparisonCsvRecord {
            period: point.period.as_str(),
            label: point.label.as_str(),
            revenue: point.revenue,
            profit: point.profit,
            margin: point.margin,
        };
        writer
            .serialize(record)
            .context("failed to serialize comparison record")?;
    }
    let serialized = finalize_writer(writer, "comparison CSV writer")?;
    write_csv_output(path, &serialized, archive).await
}

fn finalize_writer(mut writer: Writer<Vec<u8>>, label: &str) -> Result<Vec<u8>> {
    writer
        .flush()
        .with_context(|| format!("failed to flush {label}"))?;
    writer
        .into_inner()
        .with_context(|| format!("failed to finalize {label}"))
}

async fn write_csv_output(path: &Path, bytes: &[u8], archive: bool) -> Result<PathBuf> {
    if archive {
        let archived = archive_path(path);
        let compressed = gzip_bytes(bytes)?;
        write_output_file(&archived, &compressed).await?;
        Ok(archived)
    } else {
        write_output_file(path, bytes).await?;
        Ok(path.to_path_buf())
    }
}

fn archive_path(path: &Path) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(".gz");
    PathBuf::from(name)
}

fn gzip_bytes(bytes: &[u8]) -> Result<Vec<u8>> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder
        .write_all(bytes)
        .context("failed to compress CSV output")?;
    encoder.finish().context("failed to finalize gzip stream")
}

pub(crate) async fn write_output_file(path: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .await
            .with_context(|| format!("failed to create directory {}", parent.display()))?;
    }

    fs::write(path, bytes)
        .await
        .with_context(|| format!("failed to write {}", path.display()))?;

    Ok(())
}
