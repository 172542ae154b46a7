//! Request and response bodies for tutor endpoints.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::application::handlers::tutor::{SlotInput, TutorProfileView};
use crate::domain::availability::AvailabilitySlot;
use crate::domain::tutor::{ProfileDetails, Qualification, ReviewDecision, UserAccount};

/// One slot as exchanged with clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotDto {
    pub date: NaiveDate,
    pub start_time: String,
    pub end_time: String,
}

impl From<SlotDto> for SlotInput {
    fn from(dto: SlotDto) -> Self {
        SlotInput {
            date: dto.date,
            start_time: dto.start_time,
            end_time: dto.end_time,
        }
    }
}

impl From<&AvailabilitySlot> for SlotDto {
    fn from(slot: &AvailabilitySlot) -> Self {
        Self {
            date: slot.date,
            start_time: slot.start_time.to_string(),
            end_time: slot.end_time.to_string(),
        }
    }
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveProfileRequest {
    pub bio: String,
    pub hourly_rate: f64,
    pub subjects: Vec<String>,
    #[serde(default)]
    pub experience_years: Option<u32>,
    #[serde(default)]
    pub teaching_style: Option<String>,
    #[serde(default = "default_true")]
    pub is_online: bool,
    #[serde(default)]
    pub is_in_person: bool,
    #[serde(default)]
    pub qualifications: Vec<Qualification>,
    #[serde(default)]
    pub availability: Vec<SlotDto>,
}

impl SaveProfileRequest {
    /// Splits the body into profile details and the submitted slots.
    pub fn into_parts(self) -> (ProfileDetails, Vec<SlotInput>) {
        let details = ProfileDetails {
            bio: self.bio,
            hourly_rate: self.hourly_rate,
            subjects: self.subjects,
            experience_years: self.experience_years,
            teaching_style: self.teaching_style,
            is_online: self.is_online,
            is_in_person: self.is_in_person,
            qualifications: self.qualifications,
        };
        (details, self.availability.into_iter().map(SlotInput::from).collect())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AvailabilityRequest {
    pub slots: Vec<SlotDto>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AvailabilityResponse {
    pub slots: Vec<SlotDto>,
}

impl AvailabilityResponse {
    pub fn new<'a>(slots: impl IntoIterator<Item = &'a AvailabilitySlot>) -> Self {
        Self {
            slots: slots.into_iter().map(SlotDto::from).collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TutorProfileResponse {
    pub tutor_id: String,
    pub name: String,
    pub tutor_status: &'static str,
    /// Only rendered on the owner's view.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rejection_reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile: Option<ProfileDetails>,
    pub availability: Vec<SlotDto>,
}

impl TutorProfileResponse {
    pub fn public(view: TutorProfileView) -> Self {
        Self::render(view, false)
    }

    pub fn owner(view: TutorProfileView) -> Self {
        Self::render(view, true)
    }

    fn render(view: TutorProfileView, owner: bool) -> Self {
        let availability = view
            .profile
            .as_ref()
            .map(|p| p.availability.slots().iter().map(SlotDto::from).collect())
            .unwrap_or_default();
        Self {
            tutor_id: view.account.id.to_string(),
            name: view.account.name,
            tutor_status: view.account.tutor_status.as_str(),
            rejection_reason: if owner { view.account.rejection_reason } else { None },
            profile: view.profile.map(|p| p.details),
            availability,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationStatusResponse {
    pub tutor_id: String,
    pub role: &'static str,
    pub tutor_status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rejection_reason: Option<String>,
}

impl From<&UserAccount> for ApplicationStatusResponse {
    fn from(account: &UserAccount) -> Self {
        Self {
            tutor_id: account.id.to_string(),
            role: account.role.as_str(),
            tutor_status: account.tutor_status.as_str(),
            rejection_reason: account.rejection_reason.clone(),
        }
    }
}

/// `{"decision": "approve"}` or `{"decision": "reject", "reason": "..."}`.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "decision", rename_all = "lowercase")]
pub enum ReviewRequest {
    Approve,
    Reject { reason: String },
}

impl From<ReviewRequest> for ReviewDecision {
    fn from(request: ReviewRequest) -> Self {
        match request {
            ReviewRequest::Approve => ReviewDecision::Approve,
            ReviewRequest::Reject { reason } => ReviewDecision::Reject { reason },
        }
    }
}
