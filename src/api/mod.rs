pub mod health;
pub mod predict;

use crate::config::{AllowedOrigins, CorsConfig};
use crate::AppState;
use axum::http::HeaderValue;
use axum::Router;
use tower_http::cors::{AllowHeaders, AllowMethods, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::warn;

/// Create the API router.
pub fn router() -> Router<AppState> {
    Router::new()
        .merge(health::router())
        .nest("/api/predict", predict::router())
}

/// Build the CORS layer from configuration.
///
/// Explicit origins allow credentials, so methods and headers are mirrored
/// from the request instead of using wildcards.
pub fn cors_layer(config: &CorsConfig) -> CorsLayer {
    let listed = match &config.allowed_origins {
        AllowedOrigins::Any => {
            return CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any);
        }
        AllowedOrigins::List(listed) => listed,
    };

    let origins: Vec<HeaderValue> = listed
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_credentials(true)
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
}

/// Full application: routes, CORS, request tracing, state.
pub fn app(state: AppState) -> Router {
    let cors = cors_layer(&state.config.cors);

    Router::new()
        .merge(router())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
