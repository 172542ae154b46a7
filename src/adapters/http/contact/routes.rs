//! Router for contact endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{list_inquiries, submit_inquiry};
use crate::adapters::http::state::AppState;

/// Contact routes, mounted under `/api`.
pub fn contact_routes() -> Router<AppState> {
    Router::new()
        .route("/contact", post(submit_inquiry))
        .route("/admin/inquiries", get(list_inquiries))
}
