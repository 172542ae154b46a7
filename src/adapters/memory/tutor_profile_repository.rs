//! In-memory tutor profiles, also serving as the availability store.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::availability::{AvailabilitySchedule, AvailabilitySlot, DayWindow, TimeOfDay};
use crate::domain::foundation::{DomainError, ErrorCode, UserId};
use crate::domain::tutor::TutorProfile;
use crate::ports::{AvailabilityStore, TutorProfileRepository};

#[derive(Debug, Clone, Default)]
pub struct InMemoryTutorProfileRepository {
    profiles: Arc<RwLock<HashMap<UserId, TutorProfile>>>,
}

impl InMemoryTutorProfileRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a profile together with its availability.
    pub async fn insert(&self, profile: TutorProfile) {
        self.profiles
            .write()
            .await
            .insert(profile.tutor_id.clone(), profile);
    }
}

#[async_trait]
impl TutorProfileRepository for InMemoryTutorProfileRepository {
    async fn find_by_tutor(&self, tutor: &UserId) -> Result<Option<TutorProfile>, DomainError> {
        Ok(self.profiles.read().await.get(tutor).cloned())
    }

    async fn upsert(&self, profile: &TutorProfile) -> Result<(), DomainError> {
        let mut profiles = self.profiles.write().await;
        match profiles.get_mut(&profile.tutor_id) {
            Some(existing) => {
                existing.details = profile.details.clone();
                existing.updated_at = profile.updated_at;
            }
            None => {
                let mut fresh = profile.clone();
                fresh.availability = AvailabilitySchedule::new();
                profiles.insert(profile.tutor_id.clone(), fresh);
            }
        }
        Ok(())
    }
}

#[async_trait]
impl AvailabilityStore for InMemoryTutorProfileRepository {
    async fn list_slots(&self, tutor: &UserId) -> Result<Vec<AvailabilitySlot>, DomainError> {
        Ok(self
            .profiles
            .read()
            .await
            .get(tutor)
            .map(|p| p.availability.slots().to_vec())
            .unwrap_or_default())
    }

    async fn add_slot(&self, tutor: &UserId, slot: AvailabilitySlot) -> Result<(), DomainError> {
        let mut profiles = self.profiles.write().await;
        let profile = profiles
            .get_mut(tutor)
            .ok_or_else(|| DomainError::not_found(ErrorCode::ProfileNotFound, tutor))?;
        profile.availability.add(slot)?;
        Ok(())
    }

    async fn replace_all_slots(&self, tutor: &UserId, slots: &AvailabilitySchedule) -> Result<(), DomainError> {
        let mut profiles = self.profiles.write().await;
        let profile = profiles
            .get_mut(tutor)
            .ok_or_else(|| DomainError::not_found(ErrorCode::ProfileNotFound, tutor))?;
        profile.availability = slots.clone();
        Ok(())
    }

    async fn remove_slot(&self, tutor: &UserId, window: &DayWindow, start_time: &TimeOfDay) -> Result<bool, DomainError> {
        let mut profiles = self.profiles.write().await;
        Ok(profiles
            .get_mut(tutor)
            .map(|p| p.availability.remove(window, start_time))
            .unwrap_or(false))
    }
}
