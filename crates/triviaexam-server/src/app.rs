use axum::{
    routing::{get, post},
    Router,
};

use crate::handlers;
use crate::state::AppState;

pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/submit", post(handlers::submit))
        .route("/results", get(handlers::results))
        .route("/retake", get(handlers::retake))
        .route("/healthz", get(handlers::healthz))
        .nest("/api", Router::new().route("/grade", post(handlers::api_grade)))
        .fallback(handlers::not_found)
        .with_state(state)
}
