//! GenFin - technical-indicator trading signals for equities

pub mod api;
pub mod config;
pub mod error;
pub mod services;
pub mod sources;
pub mod types;

use config::Config;
use services::PredictionService;
use std::sync::Arc;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub predictor: Arc<PredictionService>,
}

impl AppState {
    /// Build the state from configuration.
    pub fn new(config: Config) -> error::Result<Self> {
        let predictor = PredictionService::new(&config.history)?;

        Ok(Self {
            config: Arc::new(config),
            predictor: Arc::new(predictor),
        })
    }
}

// Re-export commonly used types
pub use error::{AppError, Result};
pub use types::*;
