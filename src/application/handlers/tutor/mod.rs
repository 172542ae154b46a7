//! Tutor handlers.
//!
//! ## Commands
//! - Saving a profile (submits the tutor application)
//! - Replacing or extending availability
//! - Admin review of an application
//!
//! ## Queries
//! - Profile and availability lookup

mod get_tutor_profile;
mod review_tutor_application;
mod save_tutor_profile;
mod update_availability;

pub use get_tutor_profile::{GetAvailabilityHandler, GetTutorProfileHandler, GetTutorProfileQuery, TutorProfileView};
pub use review_tutor_application::{ReviewTutorApplicationCommand, ReviewTutorApplicationHandler};
pub use save_tutor_profile::{SaveTutorProfileCommand, SaveTutorProfileHandler, SaveTutorProfileResult};
pub use update_availability::{
    AvailabilityUpdateMode, SlotInput, UpdateAvailabilityCommand, UpdateAvailabilityHandler,
};
