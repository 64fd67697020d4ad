use anyhow::{Context, Result};
use reqwest::Client;
use serde::Deserialize;

use super::fetch_json_with_retry;

#[derive(Debug, Clone, Deserialize)]
pub struct WeeklyTrend {
    pub week_number: u32,
    pub weekly_profit: String,
    pub weekly_revenue: String,
    pub week_margin: String,
    pub sales_count: String,
}

pub async fn fetch_weekly_trends(
    client: &Client,
    base_url: &str,
    weeks: u32,
) -> Result<Vec<WeeklyTrend>> {
    let url = format!("{base_url}/api/profit/weekly-trends?weeks={weeks}");
    fetch_json_with_retry(client, &url)
        .await
        .with_context(|| format!("failed to download weekly trends ({weeks} weeks)"))
}

#[cfg(test)]
mod tests {
    use super::WeeklyTrend;

    #[test]
    fn decodes_backend_field_names() {
        let body = r#"[{
            "week_number": 31,
            "weekly_profit": "8400.00",
            "weekly_revenue": "26100.00",
            "week_margin": "32.18",
            "sales_count": "147"
        }]"#;
        let weeks: Vec<WeeklyTrend> = serde_json::from_str(body).unwrap();
        assert_eq!(weeks.len(), 1);
        assert_eq!(weeks[0].week_number, 31);
        assert_eq!(weeks[0].sales_count, "147");
    }
}
