//! Simple Moving Average (SMA) indicator.

use crate::services::signals::rolling_mean;

/// Short trend window.
pub const SMA_SHORT: usize = 50;

/// Long trend window.
pub const SMA_LONG: usize = 200;

/// Simple moving average of `closes` over a trailing `window`.
///
/// The output has one entry per close. Positions with fewer than `window`
/// closes available (current one included) are `None`; partial windows are
/// never averaged.
pub fn compute_sma(closes: &[f64], window: usize) -> Vec<Option<f64>> {
    rolling_mean(closes, window, window)
}
