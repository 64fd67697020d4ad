use crate::write_output_file;
use anyhow::Result;
use chrono::{DateTime, Local};
use minify_html::{Cfg, minify};
use profitlens::formatting::{format_currency, format_percent};
use profitlens::transform::{ComparisonReport, Granularity, TrendDirection, TrendReport};
use std::path::Path;

const COMPACT_ROW_LIMIT: usize = 10;

pub struct HtmlReportPaths<'a> {
    pub(crate) trends: Option<&'a Path>,
    pub(crate) comparison: Option<&'a Path>,
}

pub struct HtmlReportContext<'a> {
    pub(crate) comparison: &'a ComparisonReport,
    pub(crate) daily: &'a TrendReport,
    pub(crate) weekly: &'a TrendReport,
    pub(crate) monthly: &'a TrendReport,
    pub(crate) yearly: &'a TrendReport,
    pub(crate) run_started_at: &'a DateTime<Local>,
    pub(crate) full_output: bool,
    pub(crate) paths: HtmlReportPaths<'a>,
    pub(crate) output_path: &'a Path,
}

pub async fn save_html_report(output_path: &Path, context: &HtmlReportContext<'_>) -> Result<()> {
    let html = render_html_report(context);
    let cfg = Cfg {
        keep_closing_tags: true,
        ..Cfg::default()
    };
    let minified = minify(html.as_bytes(), &cfg);
    write_output_file(output_path, &minified).await
}

fn render_html_report(context: &HtmlReportContext<'_>) -> String {
    let generated_at = context
        .run_started_at
        .format("%Y-%m-%d %H:%M:%S %Z")
        .to_string();
    let coverage = format!(
        "{} weeks · {} months · {} comparison windows",
        context.weekly.points.len(),
        context.monthly.points.len(),
        context.comparison.points.len()
    );
    let title = format!(
        "ProfitLens Report - {}",
        context.run_started_at.format("%Y-%m-%d")
    );
    let summary = &context.comparison.summary;

    let mut html = String::new();
    html.push_str("<!doctype html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    html.push_str(&format!("<title>{}</title>\n", escape_html(&title)));
    html.push_str("<meta name=\"color-scheme\" content=\"light\">\n");
    html.push_str("<style>\n");
    html.push_str(REPORT_STYLE);
    html.push_str("\n</style>\n</head>\n<body>\n");
    html.push_str("<div class=\"page\">\n");

    html.push_str("<header class=\"hero\">\n");
    html.push_str(&format!(
        "<div class=\"pill\">ProfitLens v{}</div>\n",
        env!("CARGO_PKG_VERSION")
    ));
    html.push_str("<h1>Profit Report</h1>\n");
    html.push_str("<p class=\"subtitle\">Profit, revenue, and margin analytics aggregated across daily, weekly, monthly, and year-to-date windows.</p>\n");
    html.push_str("<div class=\"meta\">\n");
    html.push_str(&format!(
        "<div><span class=\"label\">Generated</span><span class=\"value mono\">{}</span></div>\n",
        escape_html(&generated_at)
    ));
    html.push_str(&format!(
        "<div><span class=\"label\">Coverage</span><span class=\"value mono\">{}</span></div>\n",
        escape_html(&coverage)
    ));
    html.push_str("</div>\n");
    html.push_str("</header>\n");

    html.push_str("<section class=\"cards\">\n");
    html.push_str(&render_stat_card(
        "Today's profit",
        &format_currency(summary.today_profit),
        Some(summary.profit_trend),
    ));
    html.push_str(&render_stat_card(
        "Last week profit",
        &format_currency(summary.last_week_profit),
        None,
    ));
    html.push_str(&render_stat_card(
        "Last 30 days profit",
        &format_currency(summary.last_30_days_profit),
        None,
    ));
    html.push_str(&render_stat_card(
        "Average margin",
        &format_percent(summary.avg_margin),
        Some(summary.revenue_trend),
    ));
    html.push_str("</section>\n");

    html.push_str(&render_comparison_section(context.comparison));

    for report in [context.daily, context.weekly, context.monthly, context.yearly] {
        html.push_str(&render_trend_section(report, context.full_output));
    }

    html.push_str(&render_downloads(context));

    html.push_str("<footer class=\"footer\">\n");
    html.push_str("<div>Source: POS profit analytics backend. Daily figures are interpolated from weekly aggregates.</div>\n");
    html.push_str("</footer>\n");
    html.push_str("</div>\n</body>\n</html>\n");
    html
}

fn render_stat_card(label: &str, value: &str, trend: Option<TrendDirection>) -> String {
    let mut card = String::new();
    card.push_str("<div class=\"card\">");
    card.push_str(&format!(
        "<div class=\"card-label\">{}</div>",
        escape_html(label)
    ));
    card.push_str(&format!(
        "<div class=\"card-value\">{}</div>",
        escape_html(value)
    ));
    if let Some(direction) = trend {
        card.push_str(&render_trend_pill(direction));
    }
    card.push_str("</div>\n");
    card
}

fn render_trend_pill(direction: TrendDirection) -> String {
    let marker = match direction {
        TrendDirection::Up => "▲",
        TrendDirection::Down => "▼",
    };
    format!(
        "<span class=\"trend {}\">{} {}</span>",
        direction.as_str(),
        marker,
        direction.as_str()
    )
}

fn render_comparison_section(report: &ComparisonReport) -> String {
    let mut section = String::new();
    section.push_str("<section class=\"table-section\">\n");
    section.push_str("<div class=\"section-header\">\n");
    section.push_str("<h2>Period Comparison</h2>\n");
    section.push_str(&format!(
        "<div class=\"badges\">Profit {} Revenue {}</div>\n",
        render_trend_pill(report.summary.profit_trend),
        render_trend_pill(report.summary.revenue_trend)
    ));
    section.push_str("</div>\n");

    if report.points.is_empty() {
        section.push_str("<p class=\"muted\">No comparison data available.</p>\n</section>\n");
        return section;
    }

    section.push_str("<div class=\"table-wrap\">\n<table>\n");
    section.push_str(
        "<thead><tr><th>Period</th><th>Revenue</th><th>Profit</th><th>Margin</th></tr></thead>\n",
    );
    section.push_str("<tbody>\n");
    for point in &report.points {
        section.push_str("<tr>");
        section.push_str(&format!(
            "<td class=\"period\">{}</td>",
            escape_html(&point.label)
        ));
        section.push_str(&format!(
            "<td class=\"num\">{}</td>",
            escape_html(&format_currency(point.revenue))
        ));
        section.push_str(&format!(
            "<td class=\"num\">{}</td>",
            escape_html(&format_currency(point.profit))
        ));
        section.push_str(&format!(
            "<td class=\"num\">{}</td>",
            escape_html(&format_percent(point.margin))
        ));
        section.push_str("</tr>\n");
    }
    section.push_str("</tbody>\n</table>\n</div>\n</section>\n");
    section
}

const fn trend_section_title(granularity: Granularity) -> &'static str {
    match granularity {
        Granularity::Daily => "Daily Trends",
        Granularity::Weekly => "Weekly Trends",
        Granularity::Monthly => "Monthly Trends",
        Granularity::Yearly => "Year to Date",
    }
}

fn render_trend_section(report: &TrendReport, full_output: bool) -> String {
    let (money_prefix, sales_label) = match report.granularity {
        Granularity::Daily => ("Avg", "Avg sales"),
        Granularity::Weekly | Granularity::Monthly => ("Avg", "Total sales"),
        Granularity::Yearly => ("Total", "Total sales"),
    };

    let mut section = String::new();
    section.push_str("<section class=\"table-section\">\n");
    section.push_str("<div class=\"section-header\">\n");
    section.push_str(&format!(
        "<h2>{}</h2>\n",
        trend_section_title(report.granularity)
    ));
    section.push_str("</div>\n");

    section.push_str("<div class=\"cards\">\n");
    section.push_str(&render_stat_card(
        &format!("{money_prefix} profit"),
        &format_currency(report.summary.profit),
        None,
    ));
    section.push_str(&render_stat_card(
        &format!("{money_prefix} revenue"),
        &format_currency(report.summary.revenue),
        None,
    ));
    section.push_str(&render_stat_card(
        "Avg margin",
        &format_percent(report.summary.margin),
        None,
    ));
    section.push_str(&render_stat_card(
        sales_label,
        &report.summary.sales.to_string(),
        None,
    ));
    section.push_str("</div>\n");

    if report.points.is_empty() {
        section.push_str("<p class=\"muted\">No data available for this period.</p>\n</section>\n");
        return section;
    }

    section.push_str("<div class=\"table-wrap\">\n<table>\n");
    section.push_str("<thead><tr><th>Period</th><th>Profit</th><th>Revenue</th><th>Margin</th><th>Sales</th></tr></thead>\n");
    section.push_str("<tbody>\n");
    let limit = if full_output {
        report.points.len()
    } else {
        COMPACT_ROW_LIMIT
    };
    for point in report.points.iter().take(limit) {
        section.push_str("<tr>");
        section.push_str(&format!(
            "<td class=\"period\">{}</td>",
            escape_html(&point.period)
        ));
        section.push_str(&format!(
            "<td class=\"num\">{}</td>",
            escape_html(&format_currency(point.profit))
        ));
        section.push_str(&format!(
            "<td class=\"num\">{}</td>",
            escape_html(&format_currency(point.revenue))
        ));
        section.push_str(&format!(
            "<td class=\"num\">{}</td>",
            escape_html(&format_percent(point.margin))
        ));
        section.push_str(&format!("<td class=\"num\">{}</td>", point.sales));
        section.push_str("</tr>\n");
    }
    section.push_str("</tbody>\n</table>\n</div>\n");
    if report.points.len() > limit {
        section.push_str(&format!(
            "<div class=\"hint\">Showing {} of {} points. Run with --full-output to include every row.</div>\n",
            limit,
            report.points.len()
        ));
    }
    section.push_str("</section>\n");
    section
}

fn render_downloads(context: &HtmlReportContext<'_>) -> String {
    let items = [
        ("Trends CSV", context.paths.trends),
        ("Comparison CSV", context.paths.comparison),
    ];
    let any_saved = items.iter().any(|(_, path)| path.is_some());

    let mut section = String::new();
    section.push_str("<section class=\"downloads\">\n");
    section.push_str("<h3>Downloads</h3>\n");
    if !any_saved {
        section.push_str("<p class=\"muted\">No CSV files were saved. Use --save-trends or --save-comparison.</p>\n");
        section.push_str("</section>\n");
        return section;
    }

    section.push_str("<div class=\"download-list\">\n");
    for (label, path) in items {
        section.push_str("<div class=\"download-item\">\n");
        section.push_str(&format!(
            "<div class=\"download-label\">{}</div>\n",
            escape_html(label)
        ));
        if let Some(path) = path {
            let full_display = path.to_string_lossy();
            let display_name = path
                .file_name()
                .and_then(|name| name.to_str())
                .unwrap_or(full_display.as_ref());
            if let Some(rel) = relative_link(context.output_path, path) {
                section.push_str(&format!(
                    "<a class=\"download-link\" href=\"{}\" title=\"{}\">{}</a>\n",
                    escape_html(&rel),
                    escape_html(full_display.as_ref()),
                    escape_html(display_name)
                ));
            } else {
                section.push_str(&format!(
                    "<span class=\"download-path\" title=\"{}\">{}</span>\n",
                    escape_html(full_display.as_ref()),
                    escape_html(display_name)
                ));
            }
        } else {
            section.push_str("<span class=\"download-path\">Not saved</span>\n");
        }
        section.push_str("</div>\n");
    }
    section.push_str("</div>\n</section>\n");
    section
}

fn relative_link(html_path: &Path, target: &Path) -> Option<String> {
    let html_dir = html_path.parent()?;
    let target_dir = target.parent()?;
    if html_dir == target_dir {
        target
            .file_name()
            .and_then(|name| name.to_str())
            .map(std::string::ToString::to_string)
    } else {
        None
    }
}

fn escape_html(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

const REPORT_STYLE: &str = r#"
:root {
  color-scheme: light;
  --bg-top: #f4f6f4;
  --bg-bottom: #e8eee9;
  --ink: #18201b;
  --muted: #5d6a61;
  --card: #ffffff;
  --accent: #0f9d6a;
  --accent-strong: #0a7b52;
  --accent-cool: #2f4156;
  --border: #d4ddd5;
  --shadow: 0 20px 48px rgba(20, 30, 24, 0.12);
}

* {
  box-sizing: border-box;
}

body {
  margin: 0;
  font-family: "Segoe UI", "Helvetica Neue", sans-serif;
  color: var(--ink);
  background: linear-gradient(155deg, var(--bg-top), var(--bg-bottom));
}

.page {
  max-width: 1100px;
  margin: 0 auto;
  padding: 44px 24px 60px;
}

.hero {
  background: linear-gradient(120deg, #ffffff, #f1f7f2);
  border: 1px solid var(--border);
  border-radius: 22px;
  padding: 30px 34px;
  box-shadow: var(--shadow);
}

.pill {
  display: inline-flex;
  align-items: center;
  padding: 6px 14px;
  border-radius: 999px;
  background: rgba(47, 65, 86, 0.12);
  color: var(--accent-cool);
  font-size: 13px;
  font-weight: 600;
  text-transform: uppercase;
  letter-spacing: 0.08em;
}

h1 {
  font-family: "Georgia", serif;
  font-size: clamp(2.2rem, 4vw, 3rem);
  margin: 14px 0 8px;
}

.subtitle {
  margin: 0 0 16px;
  color: var(--muted);
  max-width: 640px;
  line-height: 1.5;
}

.meta {
  display: grid;
  grid-template-columns: repeat(auto-fit, minmax(220px, 1fr));
  gap: 12px;
}

.label {
  display: block;
  font-size: 12px;
  text-transform: uppercase;
  letter-spacing: 0.1em;
  color: var(--muted);
  margin-bottom: 4px;
}

.value {
  font-weight: 600;
}

.mono {
  font-family: "SFMono-Regular", ui-monospace, monospace;
}

.cards {
  display: grid;
  grid-template-columns: repeat(auto-fit, minmax(180px, 1fr));
  gap: 16px;
  margin: 26px 0;
}

.card {
  background: var(--card);
  border-radius: 16px;
  padding: 18px 20px;
  border: 1px solid var(--border);
  box-shadow: 0 12px 32px rgba(24, 32, 27, 0.08);
}

.card-label {
  font-size: 12px;
  text-transform: uppercase;
  letter-spacing: 0.1em;
  color: var(--muted);
  margin-bottom: 8px;
}

.card-value {
  font-size: 24px;
  font-weight: 600;
  color: var(--accent-cool);
}

.table-section {
  margin: 30px 0 22px;
}

.section-header {
  display: flex;
  justify-content: space-between;
  align-items: flex-end;
  gap: 16px;
  flex-wrap: wrap;
  margin-bottom: 14px;
}

.section-header h2 {
  margin: 0 0 6px;
  font-family: "Georgia", serif;
  font-size: 1.7rem;
}

.badges {
  color: var(--muted);
  font-size: 13px;
}

.hint {
  color: var(--muted);
  font-size: 13px;
  margin-top: 8px;
}

.table-wrap {
  border-radius: 18px;
  overflow: auto;
  border: 1px solid var(--border);
  background: var(--card);
  box-shadow: var(--shadow);
}

table {
  width: 100%;
  border-collapse: collapse;
  min-width: 640px;
}

thead th {
  position: sticky;
  top: 0;
  background: var(--accent-cool);
  color: #f6f9f7;
  text-align: left;
  font-size: 12px;
  text-transform: uppercase;
  letter-spacing: 0.08em;
  padding: 13px 16px;
  z-index: 2;
}

tbody td {
  padding: 11px 16px;
  border-bottom: 1px solid rgba(212, 221, 213, 0.6);
  font-size: 14px;
}

tbody tr:nth-child(even) {
  background: rgba(244, 246, 244, 0.7);
}

tbody tr:hover {
  background: rgba(15, 157, 106, 0.1);
}

.num {
  text-align: right;
  font-variant-numeric: tabular-nums;
  font-family: "SFMono-Regular", ui-monospace, monospace;
}

.period {
  font-weight: 600;
}

.trend {
  display: inline-flex;
  align-items: center;
  justify-content: center;
  padding: 2px 8px;
  border-radius: 999px;
  font-size: 12px;
  font-weight: 600;
  min-width: 52px;
}

.trend.up {
  background: rgba(15, 157, 106, 0.16);
  color: var(--accent-strong);
}

.trend.down {
  background: rgba(190, 70, 48, 0.18);
  color: #8b2d17;
}

.downloads {
  background: var(--card);
  border: 1px solid var(--border);
  border-radius: 16px;
  padding: 20px 24px;
  box-shadow: 0 12px 32px rgba(24, 32, 27, 0.08);
}

.downloads h3 {
  margin: 0 0 12px;
  font-family: "Georgia", serif;
  font-size: 1.35rem;
}

.download-list {
  display: grid;
  grid-template-columns: repeat(auto-fit, minmax(220px, 1fr));
  gap: 12px;
}

.download-item {
  padding: 12px 14px;
  border-radius: 12px;
  border: 1px solid rgba(212, 221, 213, 0.8);
  background: rgba(244, 246, 244, 0.7);
}

.download-label {
  font-size: 12px;
  text-transform: uppercase;
  letter-spacing: 0.08em;
  color: var(--muted);
  margin-bottom: 6px;
}

.download-link,
.download-path {
  color: var(--accent-strong);
  font-weight: 600;
  text-decoration: none;
  word-break: break-all;
}

.download-link:hover {
  text-decoration: underline;
}

.muted {
  color: var(--muted);
}

.footer {
  margin-top: 26px;
  color: var(--muted);
  font-size: 13px;
  text-align: center;
}

@media (max-width: 720px) {
  .page {
    padding: 30px 16px 44px;
  }

  .hero {
    padding: 22px;
  }

  table {
    min-width: 560px;
  }
}
"#;

#[cfg(test)]
mod tests {
    use super::escape_html;

    #[test]
    fn escapes_markup_characters() {
        assert_eq!(
            escape_html(r#"<Rs> & "profit""#),
            "&lt;Rs&gt; &amp; &quot;profit&quot;"
        );
        assert_eq!(escape_html("Jul 2026"), "Jul 2026");
    }
}
