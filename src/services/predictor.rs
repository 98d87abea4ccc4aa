//! Prediction pipeline: fetch history, compute indicators, score, classify.
//!
//! `analyze` is the pure part and returns a typed result. `predict` and
//! `predict_from_bars` are the boundary where any failure is turned into the
//! neutral fallback body.

use tracing::{debug, info, warn};

use crate::config::HistoryConfig;
use crate::error::{AppError, Result};
use crate::services::signals::{classify, scorer, IndicatorSet};
use crate::sources::yahoo::{YahooFinanceClient, SOURCE_TAG};
use crate::types::{
    BarInterval, HistoryRange, LatestSnapshot, OhlcPoint, PredictionResponse, PriceSeries,
    SignalResult,
};

/// Run the indicator and scoring pipeline over a price series.
///
/// Fails with `NotFound` on an empty series, `BadRequest` when a close is
/// non-finite or non-positive, and `Computation` if a non-finite value
/// reaches the scorer.
pub fn analyze(symbol: &str, series: &PriceSeries, source: &str) -> Result<SignalResult> {
    let symbol = symbol.trim().to_uppercase();

    let current_price = series
        .last_close()
        .ok_or_else(AppError::stock_not_found)?;

    let closes = series.closes();
    if let Some((i, bad)) = closes
        .iter()
        .enumerate()
        .find(|(_, c)| !c.is_finite() || **c <= 0.0)
    {
        return Err(AppError::BadRequest(format!(
            "Invalid close {} at index {}",
            bad, i
        )));
    }

    let indicators = IndicatorSet::compute(&closes);
    let snapshot = indicators.latest(current_price);
    ensure_finite(&snapshot)?;

    let score = scorer::score_snapshot(&snapshot);
    let classification = classify(score);

    debug!(
        "{}: {} bars, rsi={:.2} sma50={:.2} sma200={:.2} score={}",
        symbol,
        closes.len(),
        snapshot.rsi,
        snapshot.sma_50,
        snapshot.sma_200,
        score
    );

    Ok(SignalResult {
        symbol,
        prediction: classification.prediction,
        confidence: classification.confidence,
        trend: classification.trend,
        price: scorer::round_to(snapshot.price, 2),
        rsi: scorer::round_to(snapshot.rsi, 2),
        source: source.to_string(),
    })
}

fn ensure_finite(snapshot: &LatestSnapshot) -> Result<()> {
    let fields = [
        ("price", snapshot.price),
        ("rsi", snapshot.rsi),
        ("sma_50", snapshot.sma_50),
        ("sma_200", snapshot.sma_200),
    ];

    match fields.iter().find(|(_, v)| !v.is_finite()) {
        Some((name, value)) => Err(AppError::Computation(format!("{} is {}", name, value))),
        None => Ok(()),
    }
}

/// Analyze already-fetched bars, mapping any failure to the fallback body.
pub fn predict_from_bars(symbol: &str, bars: Vec<OhlcPoint>) -> PredictionResponse {
    let series = PriceSeries::new(bars);
    let outcome = analyze(symbol, &series, SOURCE_TAG);
    respond(symbol, outcome)
}

fn respond(symbol: &str, outcome: Result<SignalResult>) -> PredictionResponse {
    match &outcome {
        Ok(result) => info!(
            "{}: {} ({}%, {}) at {}",
            result.symbol,
            result.prediction.label(),
            result.confidence,
            result.trend.label(),
            result.price
        ),
        Err(e) => warn!("Error analyzing {}: {}", symbol, e),
    }

    PredictionResponse::from_outcome(symbol.trim(), outcome)
}

/// Fetches history and produces predictions. One instance is shared by all
/// requests; it holds no per-request state.
pub struct PredictionService {
    client: YahooFinanceClient,
    range: HistoryRange,
    interval: BarInterval,
}

impl PredictionService {
    pub fn new(config: &HistoryConfig) -> Result<Self> {
        Ok(Self {
            client: YahooFinanceClient::new(config)?,
            range: config.range,
            interval: config.interval,
        })
    }

    pub fn range(&self) -> HistoryRange {
        self.range
    }

    pub fn interval(&self) -> BarInterval {
        self.interval
    }

    /// Fetch and analyze a symbol. Never fails: errors become the fallback.
    pub async fn predict(&self, symbol: &str) -> PredictionResponse {
        let outcome = self.fetch_and_analyze(symbol).await;
        respond(symbol, outcome)
    }

    async fn fetch_and_analyze(&self, symbol: &str) -> Result<SignalResult> {
        let bars = self
            .client
            .get_historical_data(symbol, self.range, self.interval)
            .await?;

        let series = PriceSeries::new(bars);
        if let Some(date) = series.last().and_then(|b| b.date()) {
            debug!("{}: latest bar {}", symbol, date);
        }

        analyze(symbol, &series, SOURCE_TAG)
    }
}
