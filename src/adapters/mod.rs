//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `auth` - Bearer token validation (HS256 JWT, mock)
//! - `cache` - Provider credential cache (in-process, Redis)
//! - `clock` - System and fixed clocks
//! - `http` - axum REST API
//! - `memory` - In-memory repositories for tests and local runs
//! - `notification` - Transactional email (Resend, recording)
//! - `postgres` - sqlx repositories
//! - `stripe` - Hosted checkout and signed webhooks
//! - `zoom` - Meeting provisioning

pub mod auth;
pub mod cache;
pub mod clock;
pub mod http;
pub mod memory;
pub mod notification;
pub mod postgres;
pub mod stripe;
pub mod zoom;
