//! Tutor profile persistence port.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::tutor::TutorProfile;

#[async_trait]
pub trait TutorProfileRepository: Send + Sync {
    /// Loads a profile with its availability.
    async fn find_by_tutor(&self, tutor: &UserId) -> Result<Option<TutorProfile>, DomainError>;

    /// Inserts or replaces the profile details.
    ///
    /// Availability is left untouched; it is written through
    /// `AvailabilityStore`. A newly inserted profile starts with no slots.
    async fn upsert(&self, profile: &TutorProfile) -> Result<(), DomainError>;
}
