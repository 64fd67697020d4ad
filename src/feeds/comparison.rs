use anyhow::{Context, Result};
use reqwest::Client;
use serde::Deserialize;

use super::fetch_json_with_retry;

// Pre-computed revenue/profit pairs for the named historical windows
// (today, last_week, last_2_weeks, ..., last_30_days). Monetary fields
// arrive as decimal strings and stay that way until transformation.
#[derive(Debug, Clone, Deserialize)]
pub struct PeriodAggregate {
    pub period: String,
    pub revenue: String,
    pub profit: String,
}

pub async fn fetch_period_comparison(
    client: &Client,
    base_url: &str,
) -> Result<Vec<PeriodAggregate>> {
    let url = format!("{base_url}/api/profit/period-comparison");
    fetch_json_with_retry(client, &url)
        .await
        .context("failed to download period comparison aggregates")
}

#[cfg(test)]
mod tests {
    use super::PeriodAggregate;

    #[test]
    fn decodes_backend_field_names() {
        let body = r#"[
            {"period": "today", "revenue": "1500.00", "profit": "420.50"},
            {"period": "last_week", "revenue": "9800.25", "profit": "2100.00"}
        ]"#;
        let aggregates: Vec<PeriodAggregate> = serde_json::from_str(body).unwrap();
        assert_eq!(aggregates.len(), 2);
        assert_eq!(aggregates[0].period, "today");
        assert_eq!(aggregates[1].profit, "2100.00");
    }
}
