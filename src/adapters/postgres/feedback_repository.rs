//! PostgreSQL implementation of FeedbackRepository.
//!
//! The unique key on `booking_id` settles concurrent submissions.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use super::{db_error, stored_user_id, violates};
use crate::domain::booking::{Feedback, Rating};
use crate::domain::foundation::{BookingId, DomainError, ErrorCode, FeedbackId, Timestamp};
use crate::ports::{FeedbackRepository, InsertOutcome};

pub struct PostgresFeedbackRepository {
    pool: PgPool,
}

impl PostgresFeedbackRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct FeedbackRow {
    id: Uuid,
    booking_id: Uuid,
    student_id: String,
    tutor_id: String,
    subject: String,
    rating: i16,
    comment: Option<String>,
    created_at: DateTime<Utc>,
}

impl TryFrom<FeedbackRow> for Feedback {
    type Error = DomainError;

    fn try_from(row: FeedbackRow) -> Result<Self, Self::Error> {
        let rating = u8::try_from(row.rating)
            .ok()
            .and_then(|r| Rating::new(r).ok())
            .ok_or_else(|| {
                DomainError::new(ErrorCode::DatabaseError, format!("Invalid rating value: {}", row.rating))
            })?;

        Ok(Feedback {
            id: FeedbackId::from_uuid(row.id),
            booking_id: BookingId::from_uuid(row.booking_id),
            student_id: stored_user_id("student_id", row.student_id)?,
            tutor_id: stored_user_id("tutor_id", row.tutor_id)?,
            subject: row.subject,
            rating,
            comment: row.comment,
            created_at: Timestamp::from_datetime(row.created_at),
        })
    }
}

#[async_trait]
impl FeedbackRepository for PostgresFeedbackRepository {
    async fn insert(&self, feedback: &Feedback) -> Result<InsertOutcome, DomainError> {
        let result = sqlx::query(
            r#"
            INSERT INTO feedback (id, booking_id, student_id, tutor_id, subject, rating, comment, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(feedback.id.as_uuid())
        .bind(feedback.booking_id.as_uuid())
        .bind(feedback.student_id.as_str())
        .bind(feedback.tutor_id.as_str())
        .bind(&feedback.subject)
        .bind(i16::from(feedback.rating.value()))
        .bind(&feedback.comment)
        .bind(feedback.created_at.as_datetime())
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(InsertOutcome::Inserted),
            Err(e) if violates(&e, "feedback_booking_id_key") => Ok(InsertOutcome::Duplicate),
            Err(e) => Err(db_error("Failed to save feedback", e)),
        }
    }

    async fn find_by_booking(&self, booking: &BookingId) -> Result<Option<Feedback>, DomainError> {
        let row: Option<FeedbackRow> = sqlx::query_as(
            r#"
            SELECT id, booking_id, student_id, tutor_id, subject, rating, comment, created_at
            FROM feedback
            WHERE booking_id = $1
            "#,
        )
        .bind(booking.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("Failed to fetch feedback", e))?;

        row.map(Feedback::try_from).transpose()
    }
}
