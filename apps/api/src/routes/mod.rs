pub mod health;
pub mod pages;

use axum::{
    routing::{get, post},
    Router,
};

use crate::recommend::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Pages
        .route("/", get(pages::index_page))
        .route("/recommendations", get(pages::recommendations_page))
        .route("/courses", get(pages::courses_page))
        .route("/health", get(health::health_handler))
        // Recommendation API
        .route(
            "/api/get_recommendations",
            post(handlers::handle_get_recommendations),
        )
        .route("/api/submit_ratings", post(handlers::handle_submit_ratings))
        .route("/api/train_model", post(handlers::handle_train_model))
        .route("/api/get_courses", get(handlers::handle_get_courses))
        .route(
            "/api/test_connection",
            get(handlers::handle_test_connection),
        )
        .with_state(state)
}
