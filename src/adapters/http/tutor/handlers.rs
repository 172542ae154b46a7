//! HTTP handlers for tutor endpoints.

use axum::extract::{Json, Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::adapters::http::error::ApiError;
use crate::adapters::http::middleware::RequireAuth;
use crate::adapters::http::state::AppState;
use crate::application::handlers::tutor::{
    AvailabilityUpdateMode, GetTutorProfileQuery, ReviewTutorApplicationCommand, SaveTutorProfileCommand,
    SlotInput, UpdateAvailabilityCommand,
};
use crate::domain::foundation::UserId;

use super::dto::{
    ApplicationStatusResponse, AvailabilityRequest, AvailabilityResponse, ReviewRequest, SaveProfileRequest,
    TutorProfileResponse,
};

/// GET /api/tutors/:id
pub async fn get_public_profile(
    State(state): State<AppState>,
    Path(tutor_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let query = GetTutorProfileQuery {
        tutor_id: UserId::new(tutor_id)?,
        public: true,
    };
    let view = state.tutor_profile_handler().handle(query).await?;
    Ok(Json(TutorProfileResponse::public(view)))
}

/// GET /api/tutors/:id/availability
pub async fn get_availability(
    State(state): State<AppState>,
    Path(tutor_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let tutor_id = UserId::new(tutor_id)?;
    let slots = state.availability_query_handler().handle(&tutor_id).await?;
    Ok(Json(AvailabilityResponse::new(&slots)))
}

/// GET /api/tutor/profile
pub async fn get_own_profile(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<impl IntoResponse, ApiError> {
    let query = GetTutorProfileQuery {
        tutor_id: user.id,
        public: false,
    };
    let view = state.tutor_profile_handler().handle(query).await?;
    Ok(Json(TutorProfileResponse::owner(view)))
}

/// POST /api/tutor/profile
pub async fn save_profile(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Json(request): Json<SaveProfileRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let (details, availability) = request.into_parts();
    let cmd = SaveTutorProfileCommand {
        tutor: user,
        details,
        availability,
    };

    let result = state.save_profile_handler().handle(cmd).await?;
    let body = serde_json::json!({
        "tutorStatus": result.status.as_str(),
        "availability": AvailabilityResponse::new(result.profile.availability.slots()).slots,
    });
    Ok((StatusCode::OK, Json(body)))
}

async fn update_availability(
    state: AppState,
    tutor: UserId,
    mode: AvailabilityUpdateMode,
    request: AvailabilityRequest,
) -> Result<AvailabilityResponse, ApiError> {
    let cmd = UpdateAvailabilityCommand {
        tutor,
        mode,
        slots: request.slots.into_iter().map(SlotInput::from).collect(),
    };
    let schedule = state.update_availability_handler().handle(cmd).await?;
    Ok(AvailabilityResponse::new(schedule.slots()))
}

/// PUT /api/tutor/availability
pub async fn replace_availability(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Json(request): Json<AvailabilityRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let response = update_availability(state, user.id, AvailabilityUpdateMode::Replace, request).await?;
    Ok(Json(response))
}

/// POST /api/tutor/availability
pub async fn append_availability(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Json(request): Json<AvailabilityRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let response = update_availability(state, user.id, AvailabilityUpdateMode::Append, request).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// POST /api/admin/tutors/:id/review
pub async fn review_application(
    State(state): State<AppState>,
    RequireAuth(admin): RequireAuth,
    Path(tutor_id): Path<String>,
    Json(request): Json<ReviewRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let cmd = ReviewTutorApplicationCommand {
        admin: admin.id,
        tutor_id: UserId::new(tutor_id)?,
        decision: request.into(),
    };
    let account = state.review_handler().handle(cmd).await?;
    Ok(Json(ApplicationStatusResponse::from(&account)))
}
