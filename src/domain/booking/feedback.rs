//! Post-session feedback left by a student.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::{ensure_length, BookingId, FeedbackId, Timestamp, UserId, ValidationError};

/// Star rating, 1 (poor) to 5 (excellent).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Rating(u8);

impl Rating {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    pub fn new(value: u8) -> Result<Self, ValidationError> {
        if !(Self::MIN..=Self::MAX).contains(&value) {
            return Err(ValidationError::out_of_range(
                "rating",
                i64::from(Self::MIN),
                i64::from(Self::MAX),
                i64::from(value),
            ));
        }
        Ok(Self(value))
    }

    pub fn value(&self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for Rating {
    type Error = ValidationError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Rating> for u8 {
    fn from(rating: Rating) -> Self {
        rating.0
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/5", self.0)
    }
}

/// One feedback record. At most one exists per booking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feedback {
    pub id: FeedbackId,
    pub booking_id: BookingId,
    pub student_id: UserId,
    pub tutor_id: UserId,
    pub subject: String,
    pub rating: Rating,
    pub comment: Option<String>,
    pub created_at: Timestamp,
}

impl Feedback {
    pub const MAX_COMMENT_CHARS: usize = 1000;

    /// Creates a feedback record. Blank comments are stored as `None`.
    pub fn new(
        booking_id: BookingId,
        student_id: UserId,
        tutor_id: UserId,
        subject: impl Into<String>,
        rating: Rating,
        comment: Option<String>,
    ) -> Result<Self, ValidationError> {
        let comment = match comment.map(|c| c.trim().to_string()) {
            Some(c) if c.is_empty() => None,
            Some(c) => {
                ensure_length("comment", &c, 1, Self::MAX_COMMENT_CHARS)?;
                Some(c)
            }
            None => None,
        };

        Ok(Self {
            id: FeedbackId::new(),
            booking_id,
            student_id,
            tutor_id,
            subject: subject.into(),
            rating,
            comment,
            created_at: Timestamp::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feedback(comment: Option<&str>) -> Result<Feedback, ValidationError> {
        Feedback::new(
            BookingId::new(),
            UserId::new("student-1").unwrap(),
            UserId::new("tutor-1").unwrap(),
            "Algebra",
            Rating::new(5).unwrap(),
            comment.map(str::to_string),
        )
    }

    #[test]
    fn rating_accepts_one_through_five() {
        for value in 1..=5 {
            assert_eq!(Rating::new(value).unwrap().value(), value);
        }
    }

    #[test]
    fn rating_rejects_zero_and_six() {
        assert_eq!(
            Rating::new(0).unwrap_err(),
            ValidationError::out_of_range("rating", 1, 5, 0)
        );
        assert!(Rating::new(6).is_err());
    }

    #[test]
    fn rating_deserialization_is_validated() {
        assert!(serde_json::from_str::<Rating>("4").is_ok());
        assert!(serde_json::from_str::<Rating>("9").is_err());
    }

    #[test]
    fn blank_comment_is_dropped() {
        assert_eq!(feedback(Some("   ")).unwrap().comment, None);
    }

    #[test]
    fn comment_over_limit_is_rejected() {
        let long = "a".repeat(1001);
        assert!(feedback(Some(&long)).is_err());
        assert!(feedback(Some(&"a".repeat(1000))).is_ok());
    }
}
