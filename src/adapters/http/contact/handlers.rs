//! HTTP handlers for contact endpoints.

use axum::extract::{Json, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::adapters::http::error::ApiError;
use crate::adapters::http::middleware::RequireAuth;
use crate::adapters::http::state::AppState;
use crate::application::handlers::contact::{ListInquiriesQuery, SubmitInquiryCommand};

use super::dto::{InquiryAcceptedResponse, InquiryListResponse, InquiryRequest, InquiryResponse, ListInquiriesParams};

/// POST /api/contact
pub async fn submit_inquiry(
    State(state): State<AppState>,
    Json(request): Json<InquiryRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let cmd = SubmitInquiryCommand { form: request.into() };
    state.submit_inquiry_handler().handle(cmd).await?;
    Ok((
        StatusCode::CREATED,
        Json(InquiryAcceptedResponse {
            success: true,
            message: "Thank you for your message! We will get back to you shortly.",
        }),
    ))
}

/// GET /api/admin/inquiries?limit=N
pub async fn list_inquiries(
    State(state): State<AppState>,
    RequireAuth(admin): RequireAuth,
    Query(params): Query<ListInquiriesParams>,
) -> Result<impl IntoResponse, ApiError> {
    let query = ListInquiriesQuery {
        admin: admin.id,
        limit: params.limit,
    };
    let inquiries = state.list_inquiries_handler().handle(query).await?;
    Ok(Json(InquiryListResponse {
        inquiries: inquiries.iter().map(InquiryResponse::from).collect(),
    }))
}
