//! HTTP adapter for the public contact form.
//!
//! - `POST /api/contact` - Submit an inquiry; no sign-in required
//! - `GET /api/admin/inquiries` - Newest inquiries, admins only

pub mod dto;
pub mod handlers;
pub mod routes;

pub use routes::contact_routes;
