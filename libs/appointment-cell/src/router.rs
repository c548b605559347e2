// libs/appointment-cell/src/router.rs
use std::sync::Arc;

use axum::{
    routing::{get, post, put},
    Router,
};

use shared_config::AppConfig;

use crate::handlers;

pub fn appointment_routes(state: Arc<AppConfig>) -> Router {
    Router::new()
        .route("/", post(handlers::create_appointment))
        .route("/search", get(handlers::search_appointments))
        .route("/{appointment_id}", get(handlers::get_appointment))
        .route("/{appointment_id}/status", put(handlers::update_appointment_status))
        .with_state(state)
}

/// The polled live-queue view, nested separately so the api binary can
/// expose it at `/queue` like the original dashboard expects.
pub fn queue_routes(state: Arc<AppConfig>) -> Router {
    Router::new()
        .route("/", get(handlers::get_queue))
        .with_state(state)
}

pub fn dashboard_routes(state: Arc<AppConfig>) -> Router {
    Router::new()
        .route("/summary", get(handlers::get_daily_summary))
        .with_state(state)
}
