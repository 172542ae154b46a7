//! Router for messaging endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{get_conversation, send_message, unread_count};
use crate::adapters::http::state::AppState;

/// Messaging routes, mounted under `/api`.
pub fn messaging_routes() -> Router<AppState> {
    Router::new()
        .route("/messages", post(send_message))
        .route("/messages/unread-count", get(unread_count))
        .route("/messages/:user_id", get(get_conversation))
}
