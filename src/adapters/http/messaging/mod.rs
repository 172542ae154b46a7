//! HTTP adapter for poll-based direct messages.
//!
//! - `POST /api/messages` - Send a message
//! - `GET /api/messages/unread-count` - Inbox badge
//! - `GET /api/messages/:user_id` - Thread with one user, marking it read

pub mod dto;
pub mod handlers;
pub mod routes;

pub use routes::messaging_routes;
