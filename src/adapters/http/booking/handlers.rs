//! HTTP handlers for booking endpoints.

use axum::body::Bytes;
use axum::extract::{Json, Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use uuid::Uuid;

use crate::adapters::http::error::{ApiError, ErrorResponse};
use crate::adapters::http::middleware::RequireAuth;
use crate::adapters::http::state::AppState;
use crate::application::handlers::booking::{
    CreateCheckoutCommand, HandlePaymentWebhookCommand, ListMyClassesQuery, RequestRescheduleCommand,
    SubmitFeedbackCommand, SubmitFeedbackResult,
};
use crate::domain::foundation::{BookingId, ErrorCode, MarketplaceError, UserId};

use super::dto::{
    BookingResponse, CheckoutResponse, CreateCheckoutRequest, FeedbackRequest, FeedbackResponse, MyClassesResponse,
    RescheduleRequest, WebhookAck,
};

/// Header carrying the payment provider's webhook signature.
pub const SIGNATURE_HEADER: &str = "stripe-signature";

/// POST /api/checkout
pub async fn create_checkout(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Json(request): Json<CreateCheckoutRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let cmd = CreateCheckoutCommand {
        student: user,
        tutor_id: UserId::new(request.tutor_id)?,
        subject: request.subject,
        session_date: request.session_date,
        start_time: request.start_time,
    };

    let result = state.create_checkout_handler().handle(cmd).await?;
    Ok((StatusCode::CREATED, Json(CheckoutResponse::from(result))))
}

/// POST /api/webhooks/stripe
///
/// Acknowledges everything that passed verification, except a booking whose
/// fulfillment is held by a concurrent delivery (409, so it is redelivered).
pub async fn handle_payment_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, ApiError> {
    let signature = headers
        .get(SIGNATURE_HEADER)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| MarketplaceError::InvalidSignature("missing signature header".to_string()))?;

    let cmd = HandlePaymentWebhookCommand {
        payload: body.to_vec(),
        signature: signature.to_string(),
    };
    let result = state.webhook_handler().handle(cmd).await?;

    if result.requires_redelivery() {
        let body = ErrorResponse::new(
            ErrorCode::FulfillmentInProgress.to_string(),
            "Fulfillment in progress, retry later",
        );
        return Ok((StatusCode::CONFLICT, Json(body)).into_response());
    }
    Ok((StatusCode::OK, Json(WebhookAck { received: true })).into_response())
}

/// GET /api/my-classes
pub async fn list_my_classes(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<impl IntoResponse, ApiError> {
    let classes = state
        .list_my_classes_handler()
        .handle(ListMyClassesQuery { user: user.id.clone() })
        .await?;
    Ok(Json(MyClassesResponse::for_viewer(&classes, &user.id)))
}

/// POST /api/bookings/:id/reschedule
pub async fn request_reschedule(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(booking_id): Path<Uuid>,
    Json(request): Json<RescheduleRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let cmd = RequestRescheduleCommand {
        booking_id: BookingId::from_uuid(booking_id),
        requester: user.id.clone(),
        reason: request.reason,
    };
    let booking = state.reschedule_handler().handle(cmd).await?;
    Ok(Json(BookingResponse::for_viewer(&booking, &user.id)))
}

/// POST /api/bookings/:id/feedback
pub async fn submit_feedback(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(booking_id): Path<Uuid>,
    Json(request): Json<FeedbackRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let cmd = SubmitFeedbackCommand {
        booking_id: BookingId::from_uuid(booking_id),
        submitter: user.id,
        rating: request.rating,
        comment: request.comment,
    };

    let response = match state.feedback_handler().handle(cmd).await? {
        SubmitFeedbackResult::Submitted(feedback) => (StatusCode::CREATED, Json(FeedbackResponse::submitted(&feedback))),
        SubmitFeedbackResult::AlreadySubmitted => (StatusCode::OK, Json(FeedbackResponse::already_submitted())),
    };
    Ok(response)
}
