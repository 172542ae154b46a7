//! Router for booking endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{create_checkout, handle_payment_webhook, list_my_classes, request_reschedule, submit_feedback};
use crate::adapters::http::state::AppState;

/// Booking routes, mounted under `/api`.
///
/// The webhook route carries no user auth; the payload signature is checked
/// by the payment provider adapter.
pub fn booking_routes() -> Router<AppState> {
    Router::new()
        .route("/checkout", post(create_checkout))
        .route("/webhooks/stripe", post(handle_payment_webhook))
        .route("/my-classes", get(list_my_classes))
        .route("/bookings/:id/reschedule", post(request_reschedule))
        .route("/bookings/:id/feedback", post(submit_feedback))
}
