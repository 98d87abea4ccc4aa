//! Prediction API endpoints.

use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use serde::Deserialize;

use crate::error::AppError;
use crate::types::PredictionResponse;
use crate::AppState;

/// Query parameters for the query-string form of the endpoint.
#[derive(Debug, Deserialize)]
pub struct PredictQuery {
    pub symbol: Option<String>,
}

impl PredictQuery {
    /// The requested symbol, if present and not blank.
    fn symbol(&self) -> Option<&str> {
        self.symbol
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}

/// Create the prediction router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(predict_query))
        .route("/:symbol", get(predict_symbol))
}

/// Predict for the symbol in the path. Always answers 200; failures are
/// reported through the fallback body.
async fn predict_symbol(
    State(state): State<AppState>,
    Path(symbol): Path<String>,
) -> Json<PredictionResponse> {
    Json(state.predictor.predict(&symbol).await)
}

/// Predict for `?symbol=`; a missing symbol is a 400.
async fn predict_query(
    State(state): State<AppState>,
    Query(query): Query<PredictQuery>,
) -> Result<Json<PredictionResponse>, AppError> {
    let symbol = query
        .symbol()
        .ok_or_else(|| AppError::BadRequest("Symbol required".to_string()))?;

    Ok(Json(state.predictor.predict(symbol).await))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_predict_query_parses_symbol() {
        let query: PredictQuery = serde_urlencoded::from_str("symbol=aapl").unwrap();
        assert_eq!(query.symbol(), Some("aapl"));
    }

    #[test]
    fn test_predict_query_missing_symbol() {
        let query: PredictQuery = serde_urlencoded::from_str("").unwrap();
        assert!(query.symbol().is_none());
    }

    #[test]
    fn test_predict_query_blank_symbol() {
        let query: PredictQuery = serde_urlencoded::from_str("symbol=%20%20").unwrap();
        assert!(query.symbol().is_none());
    }
}
