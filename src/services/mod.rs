pub mod predictor;
pub mod signals;

pub use predictor::{analyze, predict_from_bars, PredictionService};
pub use signals::IndicatorSet;
