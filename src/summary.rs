use chrono::{DateTime, Local};
use colored::Colorize;
use profitlens::formatting::{format_currency, format_percent};
use profitlens::transform::{ComparisonReport, Granularity, TrendDirection, TrendReport};
use std::path::Path;

const COMPACT_ROW_LIMIT: usize = 10;

pub struct SummaryPaths<'a> {
    pub(crate) trends: Option<&'a Path>,
    pub(crate) comparison: Option<&'a Path>,
    pub(crate) html: Option<&'a Path>,
}

pub struct SummaryContext<'a> {
    pub(crate) comparison: &'a ComparisonReport,
    pub(crate) daily: &'a TrendReport,
    pub(crate) weekly: &'a TrendReport,
    pub(crate) monthly: &'a TrendReport,
    pub(crate) yearly: &'a TrendReport,
    pub(crate) run_started_at: &'a DateTime<Local>,
    pub(crate) paths: SummaryPaths<'a>,
    pub(crate) full_output: bool,
}

pub fn print_summary(context: &SummaryContext<'_>) {
    println!();
    print_summary_header(context);
    print_summary_paths(&context.paths);
    println!();

    let mut width = print_comparison_section(context.comparison);
    for report in [context.daily, context.weekly, context.monthly, context.yearly] {
        println!();
        width = width.max(print_trend_section(report, context.full_output));
    }

    if width > 0 {
        let divider = "=".repeat(width);
        println!("{}", divider.bright_cyan());
    }
}

fn print_summary_header(context: &SummaryContext<'_>) {
    println!(
        "{}",
        "===================== ProfitLens Update ====================="
            .bold()
            .bright_cyan()
    );
    println!(
        "{} {}",
        "Run started".bright_yellow().bold(),
        context
            .run_started_at
            .format("%Y-%m-%d %H:%M:%S %Z")
            .to_string()
            .bright_white()
    );
    let ytd_state = if context.yearly.points.is_empty() {
        "absent"
    } else {
        "present"
    };
    println!(
        "{} {} | {} | {} | {} | {}",
        "Feeds".bright_yellow().bold(),
        format!("Comparison: {}", context.comparison.points.len()).bright_white(),
        format!("Daily window: {}", context.daily.points.len()).bright_white(),
        format!("Weekly: {}", context.weekly.points.len()).bright_white(),
        format!("Monthly: {}", context.monthly.points.len()).bright_white(),
        format!("YTD: {ytd_state}").bright_white()
    );
}

fn print_summary_paths(paths: &SummaryPaths<'_>) {
    print_path_line(
        "Trends CSV",
        paths.trends,
        "not saved (use --save-trends)",
    );
    print_path_line(
        "Comparison CSV",
        paths.comparison,
        "not saved (use --save-comparison)",
    );
    print_path_line("HTML Report", paths.html, "not saved (use --save-html)");
}

fn print_path_line(label: &str, path: Option<&Path>, hint: &str) {
    let label_colored = label.bright_yellow().bold();
    match path {
        Some(path) => println!(
            "{} {}",
            label_colored,
            format!("{}", path.display()).bright_white()
        ),
        None => println!("{} {}", label_colored, hint.bright_black()),
    }
}

fn trend_marker(direction: TrendDirection) -> colored::ColoredString {
    match direction {
        TrendDirection::Up => "▲ up".bright_green().bold(),
        TrendDirection::Down => "▼ down".bright_red().bold(),
    }
}

fn print_comparison_section(report: &ComparisonReport) -> usize {
    println!("{}", "Period Comparison".bold().bright_magenta());

    let summary = &report.summary;
    println!(
        "{} {} | {} {} | {} {} | {} {}",
        "Today".bright_yellow(),
        format_currency(summary.today_profit).bright_white().bold(),
        "Last week".bright_yellow(),
        format_currency(summary.last_week_profit).bright_white().bold(),
        "Last 30 days".bright_yellow(),
        format_currency(summary.last_30_days_profit)
            .bright_white()
            .bold(),
        "Avg margin".bright_yellow(),
        format_percent(summary.avg_margin).bright_white().bold()
    );
    println!(
        "{} {} | {} {}",
        "Profit trend".bright_yellow(),
        trend_marker(summary.profit_trend),
        "Revenue trend".bright_yellow(),
        trend_marker(summary.revenue_trend)
    );

    if report.points.is_empty() {
        let message = "No comparison data available.";
        println!("{}", message.bright_black());
        return message.len();
    }

    let header = format!(
        "{:<13} | {:>10} | {:>10} | {:>7}",
        "Period", "Revenue", "Profit", "Margin"
    );
    let separator = "--------------+------------+------------+--------";
    let mut max_width = header.len().max(separator.len());
    println!("{}", header.bold().bright_white());
    println!("{}", separator.bright_black());
    for point in &report.points {
        let line = format!(
            "{:<13} | {:>10} | {:>10} | {:>7}",
            point.label,
            format_currency(point.revenue),
            format_currency(point.profit),
            format_percent(point.margin)
        );
        max_width = max_width.max(line.len());
        println!("{}", line.bright_green());
    }

    max_width
}

const fn section_title(granularity: Granularity) -> &'static str {
    match granularity {
        Granularity::Daily => "Daily Trends",
        Granularity::Weekly => "Weekly Trends",
        Granularity::Monthly => "Monthly Trends",
        Granularity::Yearly => "Year to Date",
    }
}

const fn stat_prefixes(granularity: Granularity) -> (&'static str, &'static str) {
    // Money/margin stats are averages everywhere except yearly; sales is an
    // average for daily, a total otherwise.
    match granularity {
        Granularity::Daily => ("Avg", "Avg sales"),
        Granularity::Weekly | Granularity::Monthly => ("Avg", "Total sales"),
        Granularity::Yearly => ("Total", "Total sales"),
    }
}

fn print_trend_section(report: &TrendReport, full_output: bool) -> usize {
    println!("{}", section_title(report.granularity).bold().bright_magenta());

    let (money_prefix, sales_label) = stat_prefixes(report.granularity);
    println!(
        "{} {} | {} {} | {} {} | {} {}",
        format!("{money_prefix} profit").bright_yellow(),
        format_currency(report.summary.profit).bright_white().bold(),
        format!("{money_prefix} revenue").bright_yellow(),
        format_currency(report.summary.revenue).bright_white().bold(),
        "Avg margin".bright_yellow(),
        format_percent(report.summary.margin).bright_white().bold(),
        sales_label.bright_yellow(),
        report.summary.sales.to_string().bright_white().bold()
    );

    if report.points.is_empty() {
        let message = "No data available for this period.";
        println!("{}", message.bright_black());
        return message.len();
    }

    let header = format!(
        "{:<13} | {:>10} | {:>10} | {:>7} | {:>6}",
        "Period", "Profit", "Revenue", "Margin", "Sales"
    );
    let separator = "--------------+------------+------------+---------+-------";
    let mut max_width = header.len().max(separator.len());
    println!("{}", header.bold().bright_white());
    println!("{}", separator.bright_black());

    let limit = if full_output {
        report.points.len()
    } else {
        COMPACT_ROW_LIMIT
    };
    for point in report.points.iter().take(limit) {
        let line = format!(
            "{:<13} | {:>10} | {:>10} | {:>7} | {:>6}",
            point.period,
            format_currency(point.profit),
            format_currency(point.revenue),
            format_percent(point.margin),
            point.sales
        );
        max_width = max_width.max(line.len());
        println!("{}", line.bright_green());
    }
    if report.points.len() > limit {
        let message = format!(
            "... {} more entries (use --full-output to display all).",
            report.points.len() - limit
        );
        max_width = max_width.max(message.len());
        println!("{}", message.bright_black());
    }

    max_width
}
