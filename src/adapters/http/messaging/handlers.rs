//! HTTP handlers for messaging endpoints.

use axum::extract::{Json, Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::adapters::http::error::ApiError;
use crate::adapters::http::middleware::RequireAuth;
use crate::adapters::http::state::AppState;
use crate::application::handlers::messaging::{GetConversationQuery, SendMessageCommand};
use crate::domain::foundation::UserId;

use super::dto::{ConversationResponse, MessageResponse, SendMessageRequest, UnreadCountResponse};

/// POST /api/messages
pub async fn send_message(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Json(request): Json<SendMessageRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let cmd = SendMessageCommand {
        sender: user,
        receiver: UserId::new(request.receiver_id)?,
        text: request.text,
    };
    let message = state.send_message_handler().handle(cmd).await?;
    Ok((StatusCode::CREATED, Json(MessageResponse::from(&message))))
}

/// GET /api/messages/:user_id
pub async fn get_conversation(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(other): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let query = GetConversationQuery {
        user: user.id,
        other: UserId::new(other)?,
    };
    let messages = state.conversation_handler().handle(query).await?;
    Ok(Json(ConversationResponse {
        messages: messages.iter().map(MessageResponse::from).collect(),
    }))
}

/// GET /api/messages/unread-count
pub async fn unread_count(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<impl IntoResponse, ApiError> {
    let count = state.unread_count_handler().handle(&user.id).await?;
    Ok(Json(UnreadCountResponse { count }))
}
