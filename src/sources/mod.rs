//! External price history providers.

pub mod yahoo;

pub use yahoo::YahooFinanceClient;
