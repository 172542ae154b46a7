//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.

pub mod booking;
pub mod contact;
pub mod messaging;
pub mod tutor;
