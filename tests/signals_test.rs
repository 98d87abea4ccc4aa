//! Pipeline tests for indicator computation, scoring and the fallback path

use genfin::services::signals::{compute_rsi, compute_sma, IndicatorSet, RSI_PERIOD};
use genfin::services::{analyze, predict_from_bars};
use genfin::types::{OhlcPoint, Prediction, PredictionResponse, PriceSeries, Trend};

fn bars(closes: &[f64]) -> Vec<OhlcPoint> {
    closes
        .iter()
        .enumerate()
        .map(|(i, &close)| OhlcPoint {
            time: 1_700_000_000_000 + i as i64 * 86_400_000,
            open: close,
            high: close + 1.0,
            low: close - 0.5,
            close,
            volume: Some(1_000_000.0),
        })
        .collect()
}

fn signal(response: PredictionResponse) -> genfin::types::SignalResult {
    match response {
        PredictionResponse::Signal(s) => s,
        PredictionResponse::Fallback(f) => panic!("unexpected fallback: {}", f.error),
    }
}

/// Rises for 200 days, then sells off for the last 14.
fn pullback_in_uptrend() -> Vec<f64> {
    (0..214)
        .map(|i| if i < 200 { 100.0 + i as f64 } else { 498.0 - i as f64 })
        .collect()
}

/// Falls for 200 days, then rallies for the last 14.
fn bounce_in_downtrend() -> Vec<f64> {
    (0..214)
        .map(|i| if i < 200 { 400.0 - i as f64 } else { i as f64 + 2.0 })
        .collect()
}

// =============================================================================
// Scenarios
// =============================================================================

#[test]
fn test_monotonic_ramp_is_hold() {
    let closes: Vec<f64> = (0..250).map(|i| 100.0 + i as f64).collect();

    let set = IndicatorSet::compute(&closes);
    let snapshot = set.latest(*closes.last().unwrap());
    assert!(snapshot.rsi > 70.0);
    assert!(snapshot.price > snapshot.sma_50);
    assert!(snapshot.sma_50 > snapshot.sma_200);

    let result = signal(predict_from_bars("ramp", bars(&closes)));
    assert_eq!(result.prediction, Prediction::Hold);
    assert_eq!(result.confidence, 50.0);
    assert_eq!(result.trend, Trend::Down);
    assert_eq!(result.rsi, 100.0);
    assert_eq!(result.price, 349.0);
}

#[test]
fn test_flat_series_is_sell() {
    let closes = vec![100.0; 250];

    let set = IndicatorSet::compute(&closes);
    let snapshot = set.latest(100.0);
    assert_eq!(snapshot.rsi, 100.0);
    assert_eq!(snapshot.sma_50, 100.0);
    assert_eq!(snapshot.sma_200, 100.0);

    let result = signal(predict_from_bars("flat", bars(&closes)));
    assert_eq!(result.prediction, Prediction::Sell);
    assert_eq!(result.confidence, 80.0);
    assert_eq!(result.trend, Trend::Down);
    assert_eq!(result.rsi, 100.0);
}

#[test]
fn test_oversold_pullback_in_uptrend_is_buy() {
    let closes = pullback_in_uptrend();

    let snapshot = IndicatorSet::compute(&closes).latest(285.0);
    assert_eq!(snapshot.rsi, 0.0);
    assert!((snapshot.sma_50 - 284.3).abs() < 1e-9);
    assert!(snapshot.sma_50 > snapshot.sma_200);

    let result = signal(predict_from_bars("dip", bars(&closes)));
    assert_eq!(result.prediction, Prediction::Buy);
    assert_eq!(result.confidence, 80.0);
    assert_eq!(result.trend, Trend::Up);
}

#[test]
fn test_overbought_bounce_in_downtrend_is_sell() {
    let closes = bounce_in_downtrend();

    let snapshot = IndicatorSet::compute(&closes).latest(215.0);
    assert_eq!(snapshot.rsi, 100.0);
    assert!((snapshot.sma_50 - 215.7).abs() < 1e-9);
    assert!(snapshot.sma_50 < snapshot.sma_200);

    let result = signal(predict_from_bars("pop", bars(&closes)));
    assert_eq!(result.prediction, Prediction::Sell);
    assert_eq!(result.confidence, 80.0);
    assert_eq!(result.trend, Trend::Down);
}

#[test]
fn test_six_month_history_uses_price_fallback_for_sma200() {
    // About six months of trading days: SMA-200 is never defined.
    let closes: Vec<f64> = (0..126).map(|i| 50.0 + (i % 10) as f64).collect();
    let set = IndicatorSet::compute(&closes);

    assert!(set.sma_200.iter().all(|v| v.is_none()));
    assert!(set.sma_50.last().unwrap().is_some());

    let price = *closes.last().unwrap();
    assert_eq!(set.latest(price).sma_200, price);
}

#[test]
fn test_short_history_uses_price_fallback_for_sma50() {
    let closes: Vec<f64> = (0..40).map(|i| 20.0 + i as f64 * 0.25).collect();
    let set = IndicatorSet::compute(&closes);

    assert!(set.sma_50.last().unwrap().is_none());
    assert_eq!(set.latest(29.75).sma_50, 29.75);
}

// =============================================================================
// Fallback
// =============================================================================

#[test]
fn test_empty_series_returns_fallback() {
    let response = predict_from_bars("aapl", Vec::new());
    let json = serde_json::to_value(&response).unwrap();

    assert_eq!(json["symbol"], "AAPL");
    assert_eq!(json["prediction"], "Hold");
    assert_eq!(json["confidence"], 50);
    assert_eq!(json["trend"], "Neutral");
    assert!(json["error"].is_string());
    assert_eq!(json.as_object().unwrap().len(), 5);
}

#[test]
fn test_malformed_series_returns_fallback() {
    let response = predict_from_bars("bad", bars(&[10.0, 0.0, 11.0]));
    assert!(response.is_fallback());
    assert_eq!(response.trend(), Trend::Neutral);
}

#[test]
fn test_analyze_empty_series_is_error() {
    assert!(analyze("aapl", &PriceSeries::default(), "test").is_err());
}

// =============================================================================
// Properties
// =============================================================================

fn wave(len: usize, seed: usize) -> Vec<f64> {
    (0..len)
        .map(|i| {
            let step = (i * (seed * 2 + 7) + seed * 13) % 41;
            50.0 + step as f64 + (i as f64 * 0.1)
        })
        .collect()
}

#[test]
fn test_rsi_bounded_and_sma_within_window() {
    for seed in 0..20 {
        for len in [1usize, 2, 13, 14, 15, 49, 50, 51, 199, 200, 260] {
            let closes = wave(len, seed);

            let rsi = compute_rsi(&closes, RSI_PERIOD);
            assert_eq!(rsi.len(), len);
            for value in rsi.iter() {
                let v = value.expect("rsi defined at every position");
                assert!((0.0..=100.0).contains(&v), "rsi {} out of range", v);
            }

            for window in [50usize, 200] {
                let sma = compute_sma(&closes, window);
                assert_eq!(sma.len(), len);
                for (i, value) in sma.iter().enumerate() {
                    match value {
                        None => assert!(i + 1 < window),
                        Some(v) => {
                            let slice = &closes[i + 1 - window..=i];
                            let min = slice.iter().cloned().fold(f64::INFINITY, f64::min);
                            let max = slice.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
                            assert!(*v >= min - 1e-9 && *v <= max + 1e-9);
                        }
                    }
                }
            }
        }
    }
}

#[test]
fn test_confidence_bounds_and_precision() {
    for seed in 0..20 {
        for len in [1usize, 30, 60, 126, 250] {
            let result = signal(predict_from_bars("prop", bars(&wave(len, seed))));

            assert!((50.0..=95.0).contains(&result.confidence));
            assert_eq!(result.confidence * 2.0, (result.confidence * 2.0).round());
            assert_ne!(result.trend, Trend::Neutral);
            assert_eq!(result.rsi, (result.rsi * 100.0).round() / 100.0);
        }
    }
}

#[test]
fn test_pipeline_is_idempotent() {
    let closes = wave(180, 3);

    let first = serde_json::to_string(&predict_from_bars("msft", bars(&closes))).unwrap();
    let second = serde_json::to_string(&predict_from_bars("msft", bars(&closes))).unwrap();

    assert_eq!(first, second);
}
