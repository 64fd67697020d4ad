use anyhow::{Context, Result};
use reqwest::Client;
use serde::Deserialize;

use super::fetch_json_with_retry;

#[derive(Debug, Clone, Deserialize)]
pub struct MonthlyTrend {
    pub period: String,
    pub monthly_profit: String,
    pub monthly_revenue: String,
    pub margin: String,
    pub sales_count: String,
}

pub async fn fetch_monthly_trends(
    client: &Client,
    base_url: &str,
    months: u32,
) -> Result<Vec<MonthlyTrend>> {
    let url = format!("{base_url}/api/profit/monthly-trends?months={months}");
    fetch_json_with_retry(client, &url)
        .await
        .with_context(|| format!("failed to download monthly trends ({months} months)"))
}

#[cfg(test)]
mod tests {
    use super::MonthlyTrend;

    #[test]
    fn decodes_backend_field_names() {
        let body = r#"[{
            "period": "Jul 2026",
            "monthly_profit": "36200.00",
            "monthly_revenue": "112500.00",
            "margin": "32.17",
            "sales_count": "612"
        }]"#;
        let months: Vec<MonthlyTrend> = serde_json::from_str(body).unwrap();
        assert_eq!(months[0].period, "Jul 2026");
        assert_eq!(months[0].margin, "32.17");
    }
}
