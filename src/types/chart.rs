use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};

/// Lookback range requested from the history provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum HistoryRange {
    #[serde(rename = "1mo")]
    OneMonth,
    #[serde(rename = "3mo")]
    ThreeMonths,
    #[serde(rename = "6mo")]
    #[default]
    SixMonths,
    #[serde(rename = "1y")]
    OneYear,
    #[serde(rename = "2y")]
    TwoYears,
    #[serde(rename = "5y")]
    FiveYears,
}

impl HistoryRange {
    /// Get the range from a string.
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "1mo" => Some(HistoryRange::OneMonth),
            "3mo" => Some(HistoryRange::ThreeMonths),
            "6mo" => Some(HistoryRange::SixMonths),
            "1y" => Some(HistoryRange::OneYear),
            "2y" => Some(HistoryRange::TwoYears),
            "5y" => Some(HistoryRange::FiveYears),
            _ => None,
        }
    }

    /// Query-string form understood by the chart API.
    pub fn as_str(&self) -> &'static str {
        match self {
            HistoryRange::OneMonth => "1mo",
            HistoryRange::ThreeMonths => "3mo",
            HistoryRange::SixMonths => "6mo",
            HistoryRange::OneYear => "1y",
            HistoryRange::TwoYears => "2y",
            HistoryRange::FiveYears => "5y",
        }
    }
}

/// Bar size requested from the history provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum BarInterval {
    #[serde(rename = "1d")]
    #[default]
    OneDay,
    #[serde(rename = "1wk")]
    OneWeek,
}

impl BarInterval {
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "1d" => Some(BarInterval::OneDay),
            "1wk" => Some(BarInterval::OneWeek),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BarInterval::OneDay => "1d",
            BarInterval::OneWeek => "1wk",
        }
    }
}

/// OHLC (Open, High, Low, Close) data point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OhlcPoint {
    /// Bar open time, unix milliseconds.
    pub time: i64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub volume: Option<f64>,
}

impl OhlcPoint {
    /// Calendar date (UTC) of this bar.
    pub fn date(&self) -> Option<NaiveDate> {
        DateTime::from_timestamp_millis(self.time).map(|dt| dt.date_naive())
    }
}

/// Ascending daily bars for one symbol.
#[derive(Debug, Clone, Default)]
pub struct PriceSeries {
    bars: Vec<OhlcPoint>,
}

impl PriceSeries {
    /// Wrap bars that are already in ascending time order.
    pub fn new(bars: Vec<OhlcPoint>) -> Self {
        Self { bars }
    }

    /// Closing prices in chronological order.
    pub fn closes(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.close).collect()
    }

    pub fn last(&self) -> Option<&OhlcPoint> {
        self.bars.last()
    }

    pub fn last_close(&self) -> Option<f64> {
        self.bars.last().map(|b| b.close)
    }
}
