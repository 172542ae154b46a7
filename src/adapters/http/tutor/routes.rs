//! Router for tutor and admin review endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{
    append_availability, get_availability, get_own_profile, get_public_profile, replace_availability,
    review_application, save_profile,
};
use crate::adapters::http::state::AppState;

/// Tutor routes, mounted under `/api`.
pub fn tutor_routes() -> Router<AppState> {
    Router::new()
        .route("/tutors/:id", get(get_public_profile))
        .route("/tutors/:id/availability", get(get_availability))
        .route("/tutor/profile", get(get_own_profile).post(save_profile))
        .route("/tutor/availability", post(append_availability).put(replace_availability))
        .route("/admin/tutors/:id/review", post(review_application))
}
