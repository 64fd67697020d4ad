use anyhow::{Context, Result};
use reqwest::Client;
use serde::Deserialize;

use super::fetch_json_with_retry;

#[derive(Debug, Clone, Deserialize)]
pub struct YtdSummary {
    pub ytd_profit: String,
    pub ytd_revenue: String,
    pub ytd_margin: String,
    pub ytd_sales: String,
}

// The endpoint returns a JSON null before the first sale of the year,
// so decode through a Value and map null to None rather than failing.
pub async fn fetch_ytd_summary(client: &Client, base_url: &str) -> Result<Option<YtdSummary>> {
    let url = format!("{base_url}/api/profit/ytd-summary");
    let body: serde_json::Value = fetch_json_with_retry(client, &url)
        .await
        .context("failed to download year-to-date summary")?;

    if body.is_null() {
        return Ok(None);
    }

    let summary: YtdSummary = serde_json::from_value(body)
        .context("failed to decode year-to-date summary record")?;
    Ok(Some(summary))
}

#[cfg(test)]
mod tests {
    use super::YtdSummary;

    #[test]
    fn decodes_backend_field_names() {
        let body = r#"{
            "ytd_profit": "214000.00",
            "ytd_revenue": "688000.00",
            "ytd_margin": "31.10",
            "ytd_sales": "3890"
        }"#;
        let summary: YtdSummary = serde_json::from_str(body).unwrap();
        assert_eq!(summary.ytd_sales, "3890");
    }

    #[test]
    fn null_body_is_not_a_record() {
        let body: serde_json::Value = serde_json::from_str("null").unwrap();
        assert!(body.is_null());
        assert!(serde_json::from_value::<YtdSummary>(body).is_err());
    }
}
