//! YourTutor - Tutoring Marketplace Backend
//!
//! Students book paid one-on-one sessions from a tutor's published
//! availability. Payment completes through a hosted checkout; the signed
//! payment webhook then schedules the booking, consumes the slot and
//! provisions a video meeting.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
