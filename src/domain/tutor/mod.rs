//! Tutor module - accounts, application review and public profiles.

mod account;
mod profile;

pub use account::{ReviewDecision, ReviewError, TutorStatus, UserAccount, UserRole};
pub use profile::{ProfileDetails, Qualification, TutorProfile};
