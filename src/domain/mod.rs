//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, timestamps, errors, state machine)
//! - `availability` - Tutor availability slots and day-window matching
//! - `booking` - Booking lifecycle, pricing and feedback
//! - `tutor` - User accounts, tutor applications and profiles
//! - `messaging` - Direct messages between users
//! - `inquiry` - Contact-form inquiries from visitors

pub mod availability;
pub mod booking;
pub mod foundation;
pub mod inquiry;
pub mod messaging;
pub mod tutor;
