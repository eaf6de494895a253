use std::path::Path;

use axum::{
    http::StatusCode,
    routing::{delete, get, post},
    Json, Router,
};
use tower_http::{
    cors::CorsLayer,
    services::{ServeDir, ServeFile},
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use common::types::Health;

use crate::metrics;
use crate::state::ServerState;

pub mod admin;
pub mod catalog;
pub mod reservations;

pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

async fn metrics_text() -> (StatusCode, String) {
    metrics::encode_metrics()
}

/// Build the full application router: booking API, admin publication routes,
/// and the static front end as fallback.
pub fn build_router(state: ServerState, cors: CorsLayer, web_dir: &str) -> Router {
    let index = Path::new(web_dir).join("index.html");
    let static_dir = ServeDir::new(web_dir).fallback(ServeFile::new(index));

    let public = Router::new()
        .route("/health", get(health))
        .route("/metrics", get(metrics_text))
        .route("/services", get(catalog::list_services))
        .route("/services/:id/slots", get(catalog::list_slots));

    let admin_routes = Router::new()
        .route("/admin/services", post(admin::create_service))
        .route("/admin/services/:id/slots", post(admin::add_slot));

    let reservation_routes = Router::new()
        .route("/reservations", post(reservations::book))
        .route("/reservations/me", get(reservations::my_reservations))
        .route("/reservations/:id", delete(reservations::cancel));

    public
        .merge(admin_routes)
        .merge(reservation_routes)
        .fallback_service(static_dir)
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                // 5xx responses are logged at ERROR
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
