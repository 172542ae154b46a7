//! HTTP adapter for checkout, webhook and class endpoints.
//!
//! - `POST /api/checkout` - Start a hosted checkout for one session
//! - `POST /api/webhooks/stripe` - Payment provider webhook
//! - `GET /api/my-classes` - Caller's upcoming and past classes
//! - `POST /api/bookings/:id/reschedule` - Ask to move a scheduled class
//! - `POST /api/bookings/:id/feedback` - Student rates a class

pub mod dto;
pub mod handlers;
pub mod routes;

pub use routes::booking_routes;
