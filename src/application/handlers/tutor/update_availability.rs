//! UpdateAvailabilityHandler - Approved tutors edit their bookable slots.

use chrono::NaiveDate;
use std::sync::Arc;

use crate::domain::availability::{AvailabilitySchedule, AvailabilitySlot};
use crate::domain::foundation::{MarketplaceError, UserId, ValidationError};
use crate::ports::{AvailabilityStore, UserDirectory};

/// A slot as submitted, before time validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotInput {
    pub date: NaiveDate,
    pub start_time: String,
    pub end_time: String,
}

impl SlotInput {
    pub fn parse(&self) -> Result<AvailabilitySlot, ValidationError> {
        AvailabilitySlot::parse(self.date, &self.start_time, &self.end_time)
    }
}

/// Parses a full list into a duplicate-free schedule.
pub(crate) fn parse_schedule(slots: &[SlotInput]) -> Result<AvailabilitySchedule, ValidationError> {
    let parsed = slots.iter().map(SlotInput::parse).collect::<Result<Vec<_>, _>>()?;
    AvailabilitySchedule::from_slots(parsed)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AvailabilityUpdateMode {
    /// The submitted list becomes the whole schedule.
    Replace,
    /// The submitted slots are added to the existing ones.
    Append,
}

#[derive(Debug, Clone)]
pub struct UpdateAvailabilityCommand {
    pub tutor: UserId,
    pub mode: AvailabilityUpdateMode,
    pub slots: Vec<SlotInput>,
}

pub struct UpdateAvailabilityHandler {
    availability: Arc<dyn AvailabilityStore>,
    users: Arc<dyn UserDirectory>,
}

impl UpdateAvailabilityHandler {
    pub fn new(availability: Arc<dyn AvailabilityStore>, users: Arc<dyn UserDirectory>) -> Self {
        Self { availability, users }
    }

    /// Returns the schedule after the update.
    pub async fn handle(&self, cmd: UpdateAvailabilityCommand) -> Result<AvailabilitySchedule, MarketplaceError> {
        let account = self
            .users
            .find_by_id(&cmd.tutor)
            .await?
            .ok_or_else(|| MarketplaceError::not_found("User", &cmd.tutor))?;
        if !account.is_approved_tutor() {
            return Err(MarketplaceError::forbidden("only approved tutors can publish availability"));
        }

        let submitted = parse_schedule(&cmd.slots)?;

        match cmd.mode {
            AvailabilityUpdateMode::Replace => {
                self.availability.replace_all_slots(&cmd.tutor, &submitted).await?;
                tracing::info!(tutor_id = %cmd.tutor, slots = submitted.len(), "Availability replaced");
                Ok(submitted)
            }
            AvailabilityUpdateMode::Append => {
                // Reject the whole batch before writing any of it.
                let mut merged = AvailabilitySchedule::from_stored(self.availability.list_slots(&cmd.tutor).await?);
                for slot in submitted.slots() {
                    merged.add(*slot)?;
                }
                for slot in submitted.into_slots() {
                    self.availability.add_slot(&cmd.tutor, slot).await?;
                }
                tracing::info!(tutor_id = %cmd.tutor, slots = merged.len(), "Availability extended");
                Ok(merged)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::{InMemoryTutorProfileRepository, InMemoryUserDirectory};
    use crate::domain::tutor::{ProfileDetails, TutorProfile, UserAccount};

    fn user(id: &str) -> UserId {
        UserId::new(id).unwrap()
    }

    fn input(day: u32, start: &str, end: &str) -> SlotInput {
        SlotInput {
            date: NaiveDate::from_ymd_opt(2025, 3, day).unwrap(),
            start_time: start.to_string(),
            end_time: end.to_string(),
        }
    }

    async fn setup(account: UserAccount) -> (InMemoryTutorProfileRepository, UpdateAvailabilityHandler) {
        let profiles = InMemoryTutorProfileRepository::new();
        let users = InMemoryUserDirectory::new();
        let details = ProfileDetails {
            bio: "Chemistry tutor".to_string(),
            hourly_rate: 35.0,
            subjects: vec!["Chemistry".to_string()],
            experience_years: None,
            teaching_style: None,
            is_online: true,
            is_in_person: true,
            qualifications: vec![],
        };
        let schedule = parse_schedule(&[input(10, "9:00", "10:00")]).unwrap();
        profiles
            .insert(TutorProfile::new(account.id.clone(), details, schedule).unwrap())
            .await;
        users.insert(account).await;

        let handler = UpdateAvailabilityHandler::new(Arc::new(profiles.clone()), Arc::new(users));
        (profiles, handler)
    }

    fn tutor() -> UserAccount {
        UserAccount::approved_tutor(user("tutor-1"), "Tess", "tess@example.com")
    }

    #[tokio::test]
    async fn replace_overwrites_schedule() {
        let (profiles, handler) = setup(tutor()).await;

        let schedule = handler
            .handle(UpdateAvailabilityCommand {
                tutor: user("tutor-1"),
                mode: AvailabilityUpdateMode::Replace,
                slots: vec![input(12, "14:00", "15:00"), input(11, "08:30", "09:30")],
            })
            .await
            .unwrap();

        assert_eq!(schedule.len(), 2);
        let stored = profiles.list_slots(&user("tutor-1")).await.unwrap();
        assert_eq!(stored.len(), 2);
        assert_eq!(stored[0].date, NaiveDate::from_ymd_opt(2025, 3, 11).unwrap());
    }

    #[tokio::test]
    async fn append_keeps_existing_slots() {
        let (profiles, handler) = setup(tutor()).await;

        let schedule = handler
            .handle(UpdateAvailabilityCommand {
                tutor: user("tutor-1"),
                mode: AvailabilityUpdateMode::Append,
                slots: vec![input(10, "11:00", "12:00")],
            })
            .await
            .unwrap();

        assert_eq!(schedule.len(), 2);
        assert_eq!(profiles.list_slots(&user("tutor-1")).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn append_duplicate_writes_nothing() {
        let (profiles, handler) = setup(tutor()).await;

        let err = handler
            .handle(UpdateAvailabilityCommand {
                tutor: user("tutor-1"),
                mode: AvailabilityUpdateMode::Append,
                slots: vec![input(11, "10:00", "11:00"), input(10, "09:00", "10:30")],
            })
            .await
            .unwrap_err();

        assert!(matches!(err, MarketplaceError::Validation(_)));
        assert_eq!(profiles.list_slots(&user("tutor-1")).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn invalid_times_are_rejected() {
        let (_, handler) = setup(tutor()).await;

        for slots in [
            vec![input(12, "24:00", "25:00")],
            vec![input(12, "15:00", "14:00")],
            vec![input(12, "14:00", "15:00"), input(12, "14:00", "16:00")],
        ] {
            let result = handler
                .handle(UpdateAvailabilityCommand {
                    tutor: user("tutor-1"),
                    mode: AvailabilityUpdateMode::Replace,
                    slots,
                })
                .await;
            assert!(matches!(result, Err(MarketplaceError::Validation(_))));
        }
    }

    #[tokio::test]
    async fn pending_applicant_is_forbidden() {
        let mut applicant = UserAccount::student(user("tutor-1"), "Tess", "tess@example.com");
        applicant.submit_application().unwrap();
        let (_, handler) = setup(applicant).await;

        let err = handler
            .handle(UpdateAvailabilityCommand {
                tutor: user("tutor-1"),
                mode: AvailabilityUpdateMode::Replace,
                slots: vec![],
            })
            .await
            .unwrap_err();
        assert!(matches!(err, MarketplaceError::Forbidden(_)));
    }
}
