//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! The relay exposes one websocket endpoint plus two small JSON/health
//! endpoints. Every response carries permissive CORS and a fixed set of
//! security headers; unknown paths get a JSON 404.

pub mod ws;

#[cfg(test)]
#[path = "mod_test.rs"]
mod mod_test;

use axum::extract::State;
use axum::http::{HeaderName, HeaderValue, StatusCode, header};
use axum::routing::get;
use axum::{Json, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

use crate::error::ApiError;
use crate::services::relay::RelayStats;
use crate::state::AppState;

const SECURITY_HEADERS: [(HeaderName, &str); 4] = [
    (header::X_CONTENT_TYPE_OPTIONS, "nosniff"),
    (header::X_FRAME_OPTIONS, "SAMEORIGIN"),
    (header::REFERRER_POLICY, "no-referrer"),
    (HeaderName::from_static("cross-origin-resource-policy"), "same-origin"),
];

/// Full relay router.
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let mut router = Router::new()
        .route("/ws", get(ws::handle_ws))
        .route("/healthz", get(healthz))
        .route("/api/relay", get(relay_stats))
        .fallback(not_found)
        .with_state(state);

    for (name, value) in SECURITY_HEADERS {
        router = router.layer(SetResponseHeaderLayer::if_not_present(name, HeaderValue::from_static(value)));
    }

    router.layer(cors).layer(TraceLayer::new_for_http())
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}

/// `GET /api/relay`: connected clients and relayed frame count.
async fn relay_stats(State(state): State<AppState>) -> Json<RelayStats> {
    Json(state.hub.stats().await)
}

async fn not_found() -> ApiError {
    ApiError::NotFound
}
