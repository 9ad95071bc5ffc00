//! Application state shared by every request

use std::sync::Arc;

use crate::infrastructure::services::PredictionService;

/// Written once at startup, then only read
#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub prediction: Option<Arc<PredictionService>>,
}

impl AppState {
    /// State for a process that holds a model
    pub fn loaded(service: PredictionService) -> Self {
        Self {
            prediction: Some(Arc::new(service)),
        }
    }

    /// State for a process that could not load a model
    pub fn unloaded() -> Self {
        Self::default()
    }

    pub fn is_loaded(&self) -> bool {
        self.prediction.is_some()
    }
}
