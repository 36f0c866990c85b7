// src/providers/yahoo.rs
use serde::Deserialize;

use super::{FuturesProvider, ProviderError};
use crate::types::PricePoint;

const DEFAULT_BASE_URL: &str = "https://query1.finance.yahoo.com";

/// Yahoo Finance v8 chart endpoint. One GET per run, no auth, no retries.
pub struct YahooChart {
    http: reqwest::Client,
    base_url: String,
}

impl YahooChart {
    pub fn new(http: reqwest::Client) -> Self {
        Self { http, base_url: DEFAULT_BASE_URL.to_string() }
    }

    /// Point the provider at a different host (mock server in tests).
    pub fn with_base_url(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self { http, base_url: base_url.into() }
    }
}

// Vendor payload shape: chart.result[0].timestamp[] (seconds) zipped with
// chart.result[0].indicators.quote[0].close[]. Close entries are nullable and
// occasionally junk, so they are coerced per element rather than typed as f64.
#[derive(Debug, Deserialize)]
struct ChartResponse {
    chart: ChartBody,
}

#[derive(Debug, Deserialize)]
struct ChartBody {
    #[serde(default)]
    result: Option<Vec<ChartResult>>,
    #[serde(default)]
    error: Option<VendorError>,
}

#[derive(Debug, Deserialize)]
struct VendorError {
    code: String,
    #[serde(default)]
    description: String,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    #[serde(default)]
    timestamp: Vec<i64>,
    indicators: Indicators,
}

#[derive(Debug, Deserialize)]
struct Indicators {
    quote: Vec<QuoteBlock>,
}

#[derive(Debug, Deserialize)]
struct QuoteBlock {
    #[serde(default)]
    close: Vec<Option<serde_json::Value>>,
}

fn to_points(timestamps: &[i64], closes: &[Option<serde_json::Value>]) -> Vec<PricePoint> {
    let mut out = Vec::with_capacity(timestamps.len());
    for (ts_sec, close) in timestamps.iter().zip(closes.iter()) {
        let ts_ms = ts_sec * 1000;
        match close.as_ref().and_then(|v| v.as_f64()) {
            Some(px) if px.is_finite() => out.push(PricePoint { ts_ms, close: px }),
            Some(_) | None => {
                tracing::warn!(ts_ms, "skipping bar without a usable close");
            }
        }
    }
    out.sort_by_key(|p| p.ts_ms);
    out
}

#[async_trait::async_trait]
impl FuturesProvider for YahooChart {
    async fn daily_closes(
        &self,
        ticker: &str,
        lookback_days: u32,
    ) -> Result<Vec<PricePoint>, ProviderError> {
        let url = format!("{}/v8/finance/chart/{ticker}", self.base_url);
        let resp = self
            .http
            .get(&url)
            .query(&[
                ("range", format!("{lookback_days}d")),
                ("interval", "1d".to_string()),
                ("includePrePost", "false".to_string()),
            ])
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(ProviderError::Status(status.as_u16()));
        }

        let body = resp.text().await?;
        let parsed: ChartResponse =
            serde_json::from_str(&body).map_err(|e| ProviderError::Decode(e.to_string()))?;

        if let Some(err) = parsed.chart.error {
            return Err(ProviderError::Vendor(format!("{}: {}", err.code, err.description)));
        }

        let Some(results) = parsed.chart.result else {
            return Ok(Vec::new());
        };
        let Some(series) = results.first() else {
            return Ok(Vec::new());
        };
        let Some(quote) = series.indicators.quote.first() else {
            return Ok(Vec::new());
        };

        Ok(to_points(&series.timestamp, &quote.close))
    }
}
