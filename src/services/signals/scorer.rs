//! Heuristic scorer: three additive rules over the latest snapshot.
//!
//! | Rule | Condition | Points |
//! |---|---|---|
//! | Momentum | RSI < 30 / RSI > 70 | +2 / -2 |
//! | Price trend | price > SMA-50 | +1, else -1 |
//! | Cross | SMA-50 > SMA-200 | +1, else -1 |

use crate::types::{LatestSnapshot, Prediction, Trend};

pub const RSI_OVERSOLD: f64 = 30.0;
pub const RSI_OVERBOUGHT: f64 = 70.0;

pub const MIN_CONFIDENCE: f64 = 50.0;
pub const MAX_CONFIDENCE: f64 = 95.0;

/// Lowest score that is still a Buy (and its negation a Sell).
const ACTION_THRESHOLD: i32 = 2;

/// Outcome of classifying a score.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Classification {
    pub prediction: Prediction,
    /// Clamped to 50..=95, one decimal.
    pub confidence: f64,
    pub trend: Trend,
}

/// Composite score in [-4, 4].
pub fn score(price: f64, rsi: f64, sma_50: f64, sma_200: f64) -> i32 {
    let mut score = 0;

    if rsi < RSI_OVERSOLD {
        score += 2;
    } else if rsi > RSI_OVERBOUGHT {
        score -= 2;
    }

    // Ties fall to the bearish side.
    score += if price > sma_50 { 1 } else { -1 };
    score += if sma_50 > sma_200 { 1 } else { -1 };

    score
}

/// Score a snapshot.
pub fn score_snapshot(snapshot: &LatestSnapshot) -> i32 {
    score(snapshot.price, snapshot.rsi, snapshot.sma_50, snapshot.sma_200)
}

/// Map a score to prediction, confidence and trend.
///
/// A score of zero is labelled `Down`.
pub fn classify(score: i32) -> Classification {
    let magnitude = score.unsigned_abs() as f64;

    let (prediction, raw_confidence) = if score >= ACTION_THRESHOLD {
        (Prediction::Buy, 60.0 + 5.0 * magnitude)
    } else if score <= -ACTION_THRESHOLD {
        (Prediction::Sell, 60.0 + 5.0 * magnitude)
    } else {
        (Prediction::Hold, 50.0 + 5.0 * magnitude)
    };

    let confidence = round_to(raw_confidence.clamp(MIN_CONFIDENCE, MAX_CONFIDENCE), 1);
    let trend = if score > 0 { Trend::Up } else { Trend::Down };

    Classification {
        prediction,
        confidence,
        trend,
    }
}

/// Round to a fixed number of decimal places.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}
