//! HTTP adapter for tutor profiles, availability and admin review.
//!
//! - `GET /api/tutors/:id` - Public profile of an approved tutor
//! - `GET /api/tutors/:id/availability` - Bookable slots
//! - `GET|POST /api/tutor/profile` - Caller's own profile; saving submits it for review
//! - `PUT|POST /api/tutor/availability` - Replace or extend the caller's slots
//! - `POST /api/admin/tutors/:id/review` - Approve or reject an application

pub mod dto;
pub mod handlers;
pub mod routes;

pub use routes::tutor_routes;
