//! Relative Strength Index (RSI) indicator.
//!
//! Measures momentum by comparing the magnitude of recent gains to recent losses.
//! Values range from 0-100:
//! - Below 30: Oversold (potential buy signal)
//! - Above 70: Overbought (potential sell signal)

use crate::services::signals::rolling_mean;

/// Standard RSI look-back.
pub const RSI_PERIOD: usize = 14;

/// RSI series over `closes` using simple rolling means of gains and losses.
///
/// The first close has no predecessor and contributes a zero change. Until
/// `period` changes are available the averages cover every change seen so
/// far, so every position is defined. A window without losses yields 100.
pub fn compute_rsi(closes: &[f64], period: usize) -> Vec<Option<f64>> {
    let (gains, losses): (Vec<f64>, Vec<f64>) = closes
        .iter()
        .enumerate()
        .map(|(i, &close)| {
            let change = if i == 0 { 0.0 } else { close - closes[i - 1] };
            if change > 0.0 {
                (change, 0.0)
            } else {
                (0.0, change.abs())
            }
        })
        .unzip();

    let avg_gains = rolling_mean(&gains, period, 1);
    let avg_losses = rolling_mean(&losses, period, 1);

    avg_gains
        .into_iter()
        .zip(avg_losses)
        .map(|(gain, loss)| Some(rsi_from_averages(gain?, loss?)))
        .collect()
}

/// RSI from average gain and loss. Zero average loss saturates at 100.
fn rsi_from_averages(avg_gain: f64, avg_loss: f64) -> f64 {
    if avg_loss == 0.0 {
        return 100.0;
    }

    let rs = avg_gain / avg_loss;
    100.0 - (100.0 / (1.0 + rs))
}
