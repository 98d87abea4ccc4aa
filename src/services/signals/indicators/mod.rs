//! Technical indicator implementations.

pub mod rsi;
pub mod sma;

pub use rsi::{compute_rsi, RSI_PERIOD};
pub use sma::{compute_sma, SMA_LONG, SMA_SHORT};
