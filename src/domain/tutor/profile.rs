//! Tutor profile aggregate, owner of the tutor's availability.

use serde::{Deserialize, Serialize};

use crate::domain::availability::AvailabilitySchedule;
use crate::domain::booking::charge_minor_units;
use crate::domain::foundation::{ensure_length, Timestamp, UserId, ValidationError};

/// Metadata of an uploaded qualification document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Qualification {
    pub url: String,
    pub file_name: String,
    pub file_type: String,
    pub uploaded_at: Timestamp,
}

/// Editable, non-availability part of a profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileDetails {
    pub bio: String,
    pub hourly_rate: f64,
    pub subjects: Vec<String>,
    pub experience_years: Option<u32>,
    pub teaching_style: Option<String>,
    pub is_online: bool,
    pub is_in_person: bool,
    pub qualifications: Vec<Qualification>,
}

impl ProfileDetails {
    pub const MAX_BIO_CHARS: usize = 2000;

    /// Validates and normalizes the details.
    pub fn validated(mut self) -> Result<Self, ValidationError> {
        ensure_length("bio", &self.bio, 1, Self::MAX_BIO_CHARS)?;
        charge_minor_units(self.hourly_rate)?;

        self.subjects = self
            .subjects
            .iter()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        if self.subjects.is_empty() {
            return Err(ValidationError::empty_field("subjects"));
        }

        self.bio = self.bio.trim().to_string();
        Ok(self)
    }
}

/// Public profile of one tutor. One per tutor identity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TutorProfile {
    pub tutor_id: UserId,
    #[serde(flatten)]
    pub details: ProfileDetails,
    pub availability: AvailabilitySchedule,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl TutorProfile {
    pub fn new(
        tutor_id: UserId,
        details: ProfileDetails,
        availability: AvailabilitySchedule,
    ) -> Result<Self, ValidationError> {
        let now = Timestamp::now();
        Ok(Self {
            tutor_id,
            details: details.validated()?,
            availability,
            created_at: now,
            updated_at: now,
        })
    }

    /// Replaces the editable details, keeping creation time.
    pub fn update(&mut self, details: ProfileDetails, availability: AvailabilitySchedule) -> Result<(), ValidationError> {
        self.details = details.validated()?;
        self.availability = availability;
        self.updated_at = Timestamp::now();
        Ok(())
    }

    pub fn hourly_rate(&self) -> f64 {
        self.details.hourly_rate
    }

    pub fn teaches(&self, subject: &str) -> bool {
        self.details
            .subjects
            .iter()
            .any(|s| s.eq_ignore_ascii_case(subject.trim()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn details() -> ProfileDetails {
        ProfileDetails {
            bio: "Maths tutor with ten years of classroom experience".to_string(),
            hourly_rate: 40.0,
            subjects: vec!["Algebra".to_string(), "  Calculus ".to_string(), "".to_string()],
            experience_years: Some(10),
            teaching_style: None,
            is_online: true,
            is_in_person: false,
            qualifications: vec![],
        }
    }

    #[test]
    fn new_profile_normalizes_subjects() {
        let profile =
            TutorProfile::new(UserId::new("tutor-1").unwrap(), details(), AvailabilitySchedule::new()).unwrap();
        assert_eq!(profile.details.subjects, vec!["Algebra", "Calculus"]);
        assert!(profile.teaches("calculus"));
        assert!(!profile.teaches("Physics"));
    }

    #[test]
    fn non_positive_rate_is_rejected() {
        let mut bad = details();
        bad.hourly_rate = 0.0;
        let err = TutorProfile::new(UserId::new("tutor-1").unwrap(), bad, AvailabilitySchedule::new()).unwrap_err();
        assert_eq!(err.field(), "hourlyRate");
    }

    #[test]
    fn profile_needs_a_subject_and_bio() {
        let mut no_subjects = details();
        no_subjects.subjects = vec!["  ".to_string()];
        assert_eq!(
            no_subjects.validated().unwrap_err(),
            ValidationError::empty_field("subjects")
        );

        let mut no_bio = details();
        no_bio.bio = String::new();
        assert_eq!(no_bio.validated().unwrap_err(), ValidationError::empty_field("bio"));
    }

    #[test]
    fn serializes_details_inline() {
        let profile =
            TutorProfile::new(UserId::new("tutor-1").unwrap(), details(), AvailabilitySchedule::new()).unwrap();
        let json = serde_json::to_value(&profile).unwrap();
        assert_eq!(json["tutorId"], "tutor-1");
        assert_eq!(json["hourlyRate"], 40.0);
        assert!(json["availability"].as_array().unwrap().is_empty());
    }
}
