//! Yahoo Finance API client for historical stock data.
//!
//! Provides daily OHLC bars for stocks and ETFs through the unofficial
//! chart endpoint.

use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

use crate::config::HistoryConfig;
use crate::error::{AppError, Result};
use crate::types::{BarInterval, HistoryRange, OhlcPoint};

/// Source tag attached to results built from this provider.
pub const SOURCE_TAG: &str = "yfinance_realtime";

/// Yahoo Finance chart response.
#[derive(Debug, Deserialize)]
struct YahooChartResponse {
    chart: YahooChart,
}

#[derive(Debug, Deserialize)]
struct YahooChart {
    result: Option<Vec<YahooResult>>,
    error: Option<YahooError>,
}

#[derive(Debug, Deserialize)]
struct YahooError {
    code: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct YahooResult {
    timestamp: Option<Vec<i64>>,
    indicators: YahooIndicators,
}

#[derive(Debug, Deserialize)]
struct YahooIndicators {
    quote: Vec<YahooQuote>,
}

#[derive(Debug, Deserialize)]
struct YahooQuote {
    open: Option<Vec<Option<f64>>>,
    high: Option<Vec<Option<f64>>>,
    low: Option<Vec<Option<f64>>>,
    close: Option<Vec<Option<f64>>>,
    volume: Option<Vec<Option<u64>>>,
}

/// Normalize symbol for Yahoo Finance API.
/// Yahoo uses hyphens instead of dots for share classes (e.g., BRK-B not BRK.B)
pub fn normalize_yahoo_symbol(symbol: &str) -> String {
    symbol.trim().to_uppercase().replace('.', "-")
}

/// Decode a chart API body into ascending bars.
///
/// Bars with a missing or non-positive close are skipped. A symbol that
/// exists but has no bars in range yields an empty vector.
pub fn parse_chart_response(body: &str) -> Result<Vec<OhlcPoint>> {
    let data: YahooChartResponse = serde_json::from_str(body)?;

    if let Some(error) = data.chart.error {
        if error.code == "Not Found" {
            return Err(AppError::stock_not_found());
        }
        return Err(AppError::ExternalApi(format!(
            "Yahoo API error: {} - {}",
            error.code, error.description
        )));
    }

    let result = data
        .chart
        .result
        .and_then(|results| results.into_iter().next())
        .ok_or_else(|| AppError::ExternalApi("No results in response".to_string()))?;

    // No timestamps means no trading days in range.
    let Some(timestamps) = result.timestamp else {
        return Ok(Vec::new());
    };

    let quote = result
        .indicators
        .quote
        .into_iter()
        .next()
        .ok_or_else(|| AppError::ExternalApi("No quote data in response".to_string()))?;

    let opens = quote.open.unwrap_or_default();
    let highs = quote.high.unwrap_or_default();
    let lows = quote.low.unwrap_or_default();
    let closes = quote.close.unwrap_or_default();
    let volumes = quote.volume.unwrap_or_default();

    let mut points: Vec<OhlcPoint> = timestamps
        .iter()
        .enumerate()
        .filter_map(|(i, &timestamp)| {
            let close = closes.get(i).copied().flatten()?;
            if !close.is_finite() || close <= 0.0 {
                return None;
            }

            Some(OhlcPoint {
                time: timestamp * 1000, // Convert to milliseconds
                open: opens.get(i).copied().flatten().unwrap_or(close),
                high: highs.get(i).copied().flatten().unwrap_or(close),
                low: lows.get(i).copied().flatten().unwrap_or(close),
                close,
                volume: volumes.get(i).copied().flatten().map(|v| v as f64),
            })
        })
        .collect();

    points.sort_by_key(|p| p.time);
    Ok(points)
}

/// Yahoo Finance API client.
pub struct YahooFinanceClient {
    client: Client,
    base_url: String,
}

impl YahooFinanceClient {
    /// Create a new Yahoo Finance client.
    pub fn new(config: &HistoryConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent("Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36")
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Chart endpoint URL for a symbol.
    pub fn chart_url(&self, symbol: &str, range: HistoryRange, interval: BarInterval) -> String {
        format!(
            "{}/v8/finance/chart/{}?range={}&interval={}&includePrePost=false",
            self.base_url,
            normalize_yahoo_symbol(symbol),
            range.as_str(),
            interval.as_str()
        )
    }

    /// Fetch historical bars for a symbol, ascending by time.
    pub async fn get_historical_data(
        &self,
        symbol: &str,
        range: HistoryRange,
        interval: BarInterval,
    ) -> Result<Vec<OhlcPoint>> {
        let url = self.chart_url(symbol, range, interval);

        debug!("Fetching Yahoo Finance data: {}", url);

        let response = self.client.get(&url).send().await?;

        // Yahoo answers unknown symbols with 404 and an error body.
        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(AppError::stock_not_found());
        }

        let body = response.text().await?;

        match parse_chart_response(&body) {
            Ok(points) => Ok(points),
            Err(e @ AppError::NotFound(_)) => Err(e),
            Err(_) if !status.is_success() => {
                Err(AppError::ExternalApi(format!("API error: {}", status)))
            }
            Err(e) => Err(e),
        }
    }
}
