//! SaveTutorProfileHandler - Submit or resubmit a tutor application.
//!
//! Saving a profile always puts the account back into the review queue and
//! tells both the applicant and the admin inbox.

use std::sync::Arc;

use crate::domain::foundation::{AuthenticatedUser, MarketplaceError};
use crate::domain::tutor::{ProfileDetails, TutorProfile, TutorStatus};
use crate::ports::{AvailabilityStore, Contact, Notification, Notifier, TutorProfileRepository, UserDirectory};

use super::update_availability::{parse_schedule, SlotInput};

#[derive(Debug, Clone)]
pub struct SaveTutorProfileCommand {
    pub tutor: AuthenticatedUser,
    pub details: ProfileDetails,
    pub availability: Vec<SlotInput>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SaveTutorProfileResult {
    pub profile: TutorProfile,
    pub status: TutorStatus,
}

pub struct SaveTutorProfileHandler {
    profiles: Arc<dyn TutorProfileRepository>,
    availability: Arc<dyn AvailabilityStore>,
    users: Arc<dyn UserDirectory>,
    notifier: Arc<dyn Notifier>,
}

impl SaveTutorProfileHandler {
    pub fn new(
        profiles: Arc<dyn TutorProfileRepository>,
        availability: Arc<dyn AvailabilityStore>,
        users: Arc<dyn UserDirectory>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            profiles,
            availability,
            users,
            notifier,
        }
    }

    pub async fn handle(&self, cmd: SaveTutorProfileCommand) -> Result<SaveTutorProfileResult, MarketplaceError> {
        let tutor_id = cmd.tutor.id.clone();
        let schedule = parse_schedule(&cmd.availability)?;

        let mut account = self
            .users
            .find_by_id(&tutor_id)
            .await?
            .ok_or_else(|| MarketplaceError::not_found("User", &tutor_id))?;

        let profile = match self.profiles.find_by_tutor(&tutor_id).await? {
            Some(mut existing) => {
                existing.update(cmd.details, schedule)?;
                existing
            }
            None => TutorProfile::new(tutor_id.clone(), cmd.details, schedule)?,
        };

        self.profiles.upsert(&profile).await?;
        self.availability
            .replace_all_slots(&tutor_id, &profile.availability)
            .await?;

        account.submit_application()?;
        account.rejection_reason = None;
        self.users.update(&account).await?;
        tracing::info!(
            tutor_id = %tutor_id,
            role = account.role.as_str(),
            "Tutor profile saved and submitted for review"
        );

        let notification = Notification::TutorApplicationSubmitted {
            applicant: Contact::from(&account),
        };
        if let Err(err) = self.notifier.notify(notification).await {
            tracing::warn!(tutor_id = %tutor_id, error = %err, "Profile saved but application emails failed");
        }

        Ok(SaveTutorProfileResult {
            profile,
            status: account.tutor_status,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::{InMemoryTutorProfileRepository, InMemoryUserDirectory};
    use crate::adapters::notification::RecordingNotifier;
    use crate::domain::foundation::UserId;
    use crate::domain::tutor::{ReviewDecision, UserAccount, UserRole};
    use chrono::NaiveDate;

    fn user(id: &str) -> UserId {
        UserId::new(id).unwrap()
    }

    fn details(rate: f64) -> ProfileDetails {
        ProfileDetails {
            bio: "Physics tutor, former lab assistant".to_string(),
            hourly_rate: rate,
            subjects: vec!["Physics".to_string()],
            experience_years: Some(3),
            teaching_style: Some("Socratic".to_string()),
            is_online: true,
            is_in_person: false,
            qualifications: vec![],
        }
    }

    fn slot(start: &str, end: &str) -> SlotInput {
        SlotInput {
            date: NaiveDate::from_ymd_opt(2025, 4, 2).unwrap(),
            start_time: start.to_string(),
            end_time: end.to_string(),
        }
    }

    struct Fixture {
        profiles: InMemoryTutorProfileRepository,
        users: InMemoryUserDirectory,
        notifier: RecordingNotifier,
        handler: SaveTutorProfileHandler,
    }

    async fn fixture(account: UserAccount) -> Fixture {
        let profiles = InMemoryTutorProfileRepository::new();
        let users = InMemoryUserDirectory::new();
        let notifier = RecordingNotifier::new();
        users.insert(account).await;
        Fixture {
            handler: SaveTutorProfileHandler::new(
                Arc::new(profiles.clone()),
                Arc::new(profiles.clone()),
                Arc::new(users.clone()),
                Arc::new(notifier.clone()),
            ),
            profiles,
            users,
            notifier,
        }
    }

    fn cmd(rate: f64, slots: Vec<SlotInput>) -> SaveTutorProfileCommand {
        SaveTutorProfileCommand {
            tutor: AuthenticatedUser::new(user("applicant"), "ana@example.com", None),
            details: details(rate),
            availability: slots,
        }
    }

    #[tokio::test]
    async fn first_save_creates_profile_and_queues_review() {
        let fx = fixture(UserAccount::student(user("applicant"), "Ana", "ana@example.com")).await;

        let result = fx
            .handler
            .handle(cmd(30.0, vec![slot("10:00", "11:00")]))
            .await
            .unwrap();

        assert_eq!(result.status, TutorStatus::Pending);
        let stored = fx.profiles.find_by_tutor(&user("applicant")).await.unwrap().unwrap();
        assert_eq!(stored.availability.len(), 1);
        let account = fx.users.find_by_id(&user("applicant")).await.unwrap().unwrap();
        assert_eq!(account.role, UserRole::Student);
        assert_eq!(fx.notifier.kinds(), vec!["tutor_application_submitted"]);
    }

    #[tokio::test]
    async fn resubmission_after_rejection_clears_reason() {
        let mut account = UserAccount::student(user("applicant"), "Ana", "ana@example.com");
        account.submit_application().unwrap();
        account
            .apply_review(&ReviewDecision::Reject {
                reason: "Please add a qualification".to_string(),
            })
            .unwrap();
        let fx = fixture(account).await;

        fx.handler.handle(cmd(30.0, vec![])).await.unwrap();

        let account = fx.users.find_by_id(&user("applicant")).await.unwrap().unwrap();
        assert_eq!(account.tutor_status, TutorStatus::Pending);
        assert_eq!(account.rejection_reason, None);
    }

    #[tokio::test]
    async fn second_save_replaces_availability_and_keeps_creation_time() {
        let fx = fixture(UserAccount::student(user("applicant"), "Ana", "ana@example.com")).await;
        let first = fx
            .handler
            .handle(cmd(30.0, vec![slot("10:00", "11:00"), slot("12:00", "13:00")]))
            .await
            .unwrap();

        let second = fx.handler.handle(cmd(45.0, vec![slot("16:00", "17:00")])).await.unwrap();

        assert_eq!(second.profile.created_at, first.profile.created_at);
        let stored = fx.profiles.find_by_tutor(&user("applicant")).await.unwrap().unwrap();
        assert_eq!(stored.hourly_rate(), 45.0);
        assert_eq!(stored.availability.len(), 1);
    }

    #[tokio::test]
    async fn invalid_rate_writes_nothing() {
        let fx = fixture(UserAccount::student(user("applicant"), "Ana", "ana@example.com")).await;

        let err = fx.handler.handle(cmd(-1.0, vec![])).await.unwrap_err();

        assert!(matches!(err, MarketplaceError::Validation(e) if e.field() == "hourlyRate"));
        assert!(fx.profiles.find_by_tutor(&user("applicant")).await.unwrap().is_none());
        assert!(fx.notifier.sent().is_empty());
    }

    #[tokio::test]
    async fn duplicate_slots_are_rejected() {
        let fx = fixture(UserAccount::student(user("applicant"), "Ana", "ana@example.com")).await;
        let err = fx
            .handler
            .handle(cmd(30.0, vec![slot("10:00", "11:00"), slot("10:00", "10:30")]))
            .await
            .unwrap_err();
        assert!(matches!(err, MarketplaceError::Validation(_)));
    }
}
