//! Tutor profile queries.

use std::sync::Arc;

use crate::domain::availability::AvailabilitySlot;
use crate::domain::foundation::{MarketplaceError, UserId};
use crate::domain::tutor::{TutorProfile, TutorStatus, UserAccount};
use crate::ports::{AvailabilityStore, TutorProfileRepository, UserDirectory};

#[derive(Debug, Clone)]
pub struct GetTutorProfileQuery {
    pub tutor_id: UserId,
    /// Public lookups only see approved tutors with a profile.
    pub public: bool,
}

/// An account together with its profile, if one was ever saved.
#[derive(Debug, Clone, PartialEq)]
pub struct TutorProfileView {
    pub account: UserAccount,
    pub profile: Option<TutorProfile>,
}

pub struct GetTutorProfileHandler {
    profiles: Arc<dyn TutorProfileRepository>,
    users: Arc<dyn UserDirectory>,
}

impl GetTutorProfileHandler {
    pub fn new(profiles: Arc<dyn TutorProfileRepository>, users: Arc<dyn UserDirectory>) -> Self {
        Self { profiles, users }
    }

    pub async fn handle(&self, query: GetTutorProfileQuery) -> Result<TutorProfileView, MarketplaceError> {
        let not_found = || MarketplaceError::not_found("Tutor", &query.tutor_id);

        let (account, profile) = futures::try_join!(
            self.users.find_by_id(&query.tutor_id),
            self.profiles.find_by_tutor(&query.tutor_id),
        )?;
        let account = account.ok_or_else(not_found)?;

        if query.public && (account.tutor_status != TutorStatus::Approved || profile.is_none()) {
            return Err(not_found());
        }

        Ok(TutorProfileView { account, profile })
    }
}

/// Bookable slots of one tutor, ordered by date and start time.
pub struct GetAvailabilityHandler {
    availability: Arc<dyn AvailabilityStore>,
}

impl GetAvailabilityHandler {
    pub fn new(availability: Arc<dyn AvailabilityStore>) -> Self {
        Self { availability }
    }

    pub async fn handle(&self, tutor_id: &UserId) -> Result<Vec<AvailabilitySlot>, MarketplaceError> {
        Ok(self.availability.list_slots(tutor_id).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::{InMemoryTutorProfileRepository, InMemoryUserDirectory};
    use crate::domain::availability::AvailabilitySchedule;
    use crate::domain::tutor::ProfileDetails;
    use chrono::NaiveDate;

    fn user(id: &str) -> UserId {
        UserId::new(id).unwrap()
    }

    async fn setup() -> (InMemoryTutorProfileRepository, GetTutorProfileHandler) {
        let profiles = InMemoryTutorProfileRepository::new();
        let users = InMemoryUserDirectory::new();
        users
            .insert(UserAccount::approved_tutor(user("tutor-1"), "Tess", "tess@example.com"))
            .await;
        users
            .insert(UserAccount::student(user("student-1"), "Sam", "sam@example.com"))
            .await;

        let schedule = AvailabilitySchedule::from_slots(vec![
            AvailabilitySlot::parse(NaiveDate::from_ymd_opt(2025, 3, 11).unwrap(), "09:00", "10:00").unwrap(),
            AvailabilitySlot::parse(NaiveDate::from_ymd_opt(2025, 3, 10).unwrap(), "14:00", "15:00").unwrap(),
        ])
        .unwrap();
        let details = ProfileDetails {
            bio: "Statistics".to_string(),
            hourly_rate: 50.0,
            subjects: vec!["Statistics".to_string()],
            experience_years: None,
            teaching_style: None,
            is_online: true,
            is_in_person: false,
            qualifications: vec![],
        };
        profiles
            .insert(TutorProfile::new(user("tutor-1"), details, schedule).unwrap())
            .await;

        let handler = GetTutorProfileHandler::new(Arc::new(profiles.clone()), Arc::new(users));
        (profiles, handler)
    }

    #[tokio::test]
    async fn public_profile_of_approved_tutor() {
        let (_, handler) = setup().await;
        let view = handler
            .handle(GetTutorProfileQuery {
                tutor_id: user("tutor-1"),
                public: true,
            })
            .await
            .unwrap();

        assert_eq!(view.account.name, "Tess");
        assert_eq!(view.profile.unwrap().availability.len(), 2);
    }

    #[tokio::test]
    async fn user_without_profile_is_hidden_publicly_but_visible_to_self() {
        let (_, handler) = setup().await;

        let public = handler
            .handle(GetTutorProfileQuery {
                tutor_id: user("student-1"),
                public: true,
            })
            .await;
        assert!(matches!(public, Err(MarketplaceError::NotFound { .. })));

        let own = handler
            .handle(GetTutorProfileQuery {
                tutor_id: user("student-1"),
                public: false,
            })
            .await
            .unwrap();
        assert!(own.profile.is_none());
    }

    #[tokio::test]
    async fn availability_is_ordered() {
        let (profiles, _) = setup().await;
        let handler = GetAvailabilityHandler::new(Arc::new(profiles));

        let slots = handler.handle(&user("tutor-1")).await.unwrap();

        assert_eq!(slots[0].date, NaiveDate::from_ymd_opt(2025, 3, 10).unwrap());
        assert!(handler.handle(&user("nobody")).await.unwrap().is_empty());
    }
}
