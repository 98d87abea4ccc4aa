//! Trading signals service module.
//!
//! Indicator series over closing prices, latest-value extraction,
//! and the heuristic scorer that turns them into a Buy/Sell/Hold call.

pub mod indicators;
pub mod scorer;

pub use indicators::{compute_rsi, compute_sma, RSI_PERIOD, SMA_LONG, SMA_SHORT};
pub use scorer::{classify, score, Classification};

use crate::types::LatestSnapshot;

/// RSI value used when the series has no defined RSI at its last index.
pub const RSI_FALLBACK: f64 = 50.0;

/// Trailing mean over `values`, one output per input.
///
/// Each position averages up to `window` entries ending at that position.
/// Positions with fewer than `min_periods` available entries are `None`.
/// `min_periods == window` gives a strict moving average, `min_periods == 1`
/// an expanding mean that turns into a moving one once the window fills.
pub fn rolling_mean(values: &[f64], window: usize, min_periods: usize) -> Vec<Option<f64>> {
    let window = window.max(1);
    let min_periods = min_periods.clamp(1, window);

    (0..values.len())
        .map(|i| {
            let start = (i + 1).saturating_sub(window);
            let slice = &values[start..=i];
            if slice.len() < min_periods {
                None
            } else {
                Some(slice.iter().sum::<f64>() / slice.len() as f64)
            }
        })
        .collect()
}

/// Last entry of `series` if it is defined and finite, otherwise `fallback`.
pub fn extract_latest(series: &[Option<f64>], fallback: f64) -> f64 {
    series
        .last()
        .copied()
        .flatten()
        .filter(|v| v.is_finite())
        .unwrap_or(fallback)
}

/// RSI, SMA-50 and SMA-200 aligned with the input closes.
#[derive(Debug, Clone, PartialEq)]
pub struct IndicatorSet {
    pub rsi: Vec<Option<f64>>,
    pub sma_50: Vec<Option<f64>>,
    pub sma_200: Vec<Option<f64>>,
}

impl IndicatorSet {
    /// Compute all three series from closing prices.
    pub fn compute(closes: &[f64]) -> Self {
        Self {
            rsi: compute_rsi(closes, RSI_PERIOD),
            sma_50: compute_sma(closes, SMA_SHORT),
            sma_200: compute_sma(closes, SMA_LONG),
        }
    }

    pub fn len(&self) -> usize {
        self.rsi.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rsi.is_empty()
    }

    /// Latest values with fallbacks substituted for undefined entries.
    pub fn latest(&self, current_price: f64) -> LatestSnapshot {
        LatestSnapshot {
            price: current_price,
            rsi: extract_latest(&self.rsi, RSI_FALLBACK),
            sma_50: extract_latest(&self.sma_50, current_price),
            sma_200: extract_latest(&self.sma_200, current_price),
        }
    }
}
