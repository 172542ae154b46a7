//! Top-level router: API routes, auth, tracing, timeouts and CORS.

use std::time::Duration;

use axum::http::{header, HeaderValue, Method};
use axum::routing::get;
use axum::{Json, Router};
use tower_http::compression::CompressionLayer;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use super::booking::booking_routes;
use super::contact::contact_routes;
use super::messaging::messaging_routes;
use super::middleware::{auth_middleware, AuthState};
use super::state::AppState;
use super::tutor::tutor_routes;

/// Cross-cutting HTTP settings.
#[derive(Debug, Clone)]
pub struct RouterSettings {
    pub request_timeout: Duration,
    /// Allowed browser origins; empty allows any origin.
    pub cors_origins: Vec<String>,
}

impl Default for RouterSettings {
    fn default() -> Self {
        Self {
            request_timeout: Duration::from_secs(30),
            cors_origins: Vec::new(),
        }
    }
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let allow_origin = if origins.is_empty() {
        AllowOrigin::any()
    } else {
        AllowOrigin::list(origins.iter().filter_map(|o| match HeaderValue::from_str(o) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %o, "Ignoring malformed CORS origin");
                None
            }
        }))
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::OPTIONS])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
}

/// Builds the complete application router.
pub fn api_router(state: AppState, auth: AuthState, settings: &RouterSettings) -> Router {
    let api = Router::new()
        .merge(booking_routes())
        .merge(tutor_routes())
        .merge(messaging_routes())
        .merge(contact_routes())
        .layer(axum::middleware::from_fn_with_state(auth, auth_middleware));

    Router::new()
        .route("/health", get(health))
        .nest("/api", api)
        .with_state(state)
        .layer(CompressionLayer::new())
        .layer(TimeoutLayer::new(settings.request_timeout))
        .layer(cors_layer(&settings.cors_origins))
        .layer(TraceLayer::new_for_http())
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
}
