use std::sync::Arc;

use crate::space_client::Predictor;

/// Shared application state injected into all route handlers via Axum
/// extractors. Holds the one Space client built at startup; handlers see
/// it through the `Predictor` trait so tests can swap in a mock.
#[derive(Clone)]
pub struct AppState {
    pub predictor: Arc<dyn Predictor>,
}
