pub mod comparison;
pub mod monthly;
pub mod weekly;
pub mod ytd;

pub use comparison::{PeriodAggregate, fetch_period_comparison};
pub use monthly::{MonthlyTrend, fetch_monthly_trends};
pub use weekly::{WeeklyTrend, fetch_weekly_trends};
pub use ytd::{YtdSummary, fetch_ytd_summary};

use anyhow::{Context, Result, anyhow};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tokio::time::sleep;

const MAX_ATTEMPTS: usize = 3;

pub async fn fetch_json_with_retry<T>(client: &Client, url: &str) -> Result<T>
where
    T: DeserializeOwned,
{
    send_with_retry(client, url)
        .await?
        .json::<T>()
        .await
        .with_context(|| format!("failed to decode response body from {url}"))
}

async fn send_with_retry(client: &Client, url: &str) -> Result<Response> {
    let mut last_err: Option<anyhow::Error> = None;
    for attempt in 1..=MAX_ATTEMPTS {
        match client.get(url).send().await {
            Ok(response) => match response.error_for_status() {
                Ok(success) => return Ok(success),
                Err(err) => last_err = Some(err.into()),
            },
            Err(err) => last_err = Some(err.into()),
        }

        if attempt < MAX_ATTEMPTS {
            sleep(retry_delay(attempt)).await;
        }
    }

    let detail = last_err
        .as_ref()
        .map_or_else(|| "unknown error".to_string(), describe_error);
    Err(anyhow!(
        "failed to fetch {url} after {MAX_ATTEMPTS} attempts: {detail}"
    ))
}

fn retry_delay(attempt: usize) -> Duration {
    const MAX_EXPONENT: u32 = 6;
    let exponent = u32::try_from(attempt).unwrap_or(MAX_EXPONENT).min(MAX_EXPONENT);
    Duration::from_secs(2_u64.saturating_pow(exponent))
}

fn describe_error(error: &anyhow::Error) -> String {
    let mut pieces: Vec<String> = Vec::new();
    for (idx, cause) in error.chain().enumerate() {
        let text = cause.to_string();
        if text.is_empty() {
            continue;
        }
        if idx == 0 {
            pieces.push(text);
        } else {
            pieces.push(format!("caused by {text}"));
        }
    }

    if pieces.is_empty() {
        format!("{error:?}")
    } else {
        pieces.join(" | ")
    }
}
