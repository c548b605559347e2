use std::sync::Arc;

use axum::{routing::get, Router};

use appointment_cell::router::{appointment_routes, dashboard_routes, queue_routes};
use shared_config::AppConfig;

pub fn create_router(state: Arc<AppConfig>) -> Router {
    Router::new()
        .route("/", get(|| async { "Clinic Desk API is running!" }))
        .nest("/appointments", appointment_routes(state.clone()))
        .nest("/queue", queue_routes(state.clone()))
        .nest("/dashboard", dashboard_routes(state))
}
