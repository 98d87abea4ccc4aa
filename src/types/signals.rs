use serde::Serialize;

use crate::error::AppError;

/// Discrete trading call derived from the composite score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Prediction {
    Buy,
    Sell,
    Hold,
}

impl Prediction {
    /// Get display label for this prediction.
    pub fn label(&self) -> &'static str {
        match self {
            Prediction::Buy => "Buy",
            Prediction::Sell => "Sell",
            Prediction::Hold => "Hold",
        }
    }
}

/// Trend label attached to a result.
///
/// `Neutral` is only ever produced by the fallback path; normal
/// classification yields `Up` or `Down`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Trend {
    Up,
    Down,
    Neutral,
}

impl Trend {
    pub fn label(&self) -> &'static str {
        match self {
            Trend::Up => "Up",
            Trend::Down => "Down",
            Trend::Neutral => "Neutral",
        }
    }
}

/// Latest indicator values fed to the scorer.
///
/// Every field is defined: missing indicator values have already been
/// replaced by their fallbacks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatestSnapshot {
    pub price: f64,
    pub rsi: f64,
    pub sma_50: f64,
    pub sma_200: f64,
}

/// Successful analysis of a symbol.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SignalResult {
    /// Uppercased ticker.
    pub symbol: String,
    pub prediction: Prediction,
    /// 50..=95, one decimal.
    pub confidence: f64,
    pub trend: Trend,
    /// Last close, two decimals.
    pub price: f64,
    /// Latest RSI, two decimals.
    pub rsi: f64,
    /// Tag naming where the price history came from.
    pub source: String,
}

/// Neutral answer returned whenever fetching or analysis fails.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FallbackResult {
    pub symbol: String,
    pub prediction: Prediction,
    pub confidence: u8,
    pub trend: Trend,
    pub error: String,
}

impl FallbackResult {
    pub const CONFIDENCE: u8 = 50;

    pub fn new(symbol: &str, error: impl Into<String>) -> Self {
        Self {
            symbol: symbol.to_uppercase(),
            prediction: Prediction::Hold,
            confidence: Self::CONFIDENCE,
            trend: Trend::Neutral,
            error: error.into(),
        }
    }
}

/// Body of the predict endpoint: one of the two shapes above, untagged.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PredictionResponse {
    Signal(SignalResult),
    Fallback(FallbackResult),
}

impl PredictionResponse {
    /// Collapse a pipeline outcome into a response body. Errors never
    /// escape: they become the neutral fallback carrying the error text.
    pub fn from_outcome(symbol: &str, outcome: Result<SignalResult, AppError>) -> Self {
        match outcome {
            Ok(result) => PredictionResponse::Signal(result),
            Err(e) => PredictionResponse::Fallback(FallbackResult::new(symbol, e.to_string())),
        }
    }

    pub fn symbol(&self) -> &str {
        match self {
            PredictionResponse::Signal(s) => &s.symbol,
            PredictionResponse::Fallback(f) => &f.symbol,
        }
    }

    pub fn prediction(&self) -> Prediction {
        match self {
            PredictionResponse::Signal(s) => s.prediction,
            PredictionResponse::Fallback(f) => f.prediction,
        }
    }

    pub fn trend(&self) -> Trend {
        match self {
            PredictionResponse::Signal(s) => s.trend,
            PredictionResponse::Fallback(f) => f.trend,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, PredictionResponse::Fallback(_))
    }
}
