//! PostgreSQL implementation of BookingRepository.
//!
//! Status changes are conditional updates on the current status, and the
//! fulfillment claim is a lease column taken with a single `UPDATE`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use super::{db_error, stored_enum, stored_user_id};
use crate::domain::booking::{Booking, BookingStatus, MeetingDetails};
use crate::domain::foundation::{BookingId, DomainError, ErrorCode, Timestamp, UserId};
use crate::ports::BookingRepository;

pub struct PostgresBookingRepository {
    pool: PgPool,
}

impl PostgresBookingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn exists(&self, id: &BookingId) -> Result<bool, DomainError> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS (SELECT 1 FROM bookings WHERE id = $1)")
            .bind(id.as_uuid())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| db_error("Failed to check booking", e))
    }

    /// Converts "no row touched" into NotFound when the booking is missing.
    async fn touched_or_missing(&self, id: &BookingId, rows: u64) -> Result<bool, DomainError> {
        if rows > 0 {
            return Ok(true);
        }
        if self.exists(id).await? {
            Ok(false)
        } else {
            Err(DomainError::not_found(ErrorCode::BookingNotFound, id))
        }
    }
}

const SELECT_BOOKING: &str = r#"
    SELECT id, student_id, tutor_id, subject, session_date, status,
           reschedule_requester_role, payment_session_id, feedback_submitted,
           meeting_id, meeting_join_url, meeting_host_url, meeting_passcode,
           created_at, updated_at
    FROM bookings
"#;

#[derive(Debug, sqlx::FromRow)]
struct BookingRow {
    id: Uuid,
    student_id: String,
    tutor_id: String,
    subject: String,
    session_date: DateTime<Utc>,
    status: String,
    reschedule_requester_role: Option<String>,
    payment_session_id: Option<String>,
    feedback_submitted: bool,
    meeting_id: Option<String>,
    meeting_join_url: Option<String>,
    meeting_host_url: Option<String>,
    meeting_passcode: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<BookingRow> for Booking {
    type Error = DomainError;

    fn try_from(row: BookingRow) -> Result<Self, Self::Error> {
        let meeting = match (row.meeting_id, row.meeting_join_url, row.meeting_host_url) {
            (Some(meeting_id), Some(join_url), Some(host_url)) => Some(MeetingDetails {
                join_url,
                host_url,
                meeting_id,
                passcode: row.meeting_passcode,
            }),
            _ => None,
        };
        let reschedule_requester_role = row
            .reschedule_requester_role
            .as_deref()
            .map(|r| stored_enum("reschedule_requester_role", r))
            .transpose()?;

        Ok(Booking {
            id: BookingId::from_uuid(row.id),
            student_id: stored_user_id("student_id", row.student_id)?,
            tutor_id: stored_user_id("tutor_id", row.tutor_id)?,
            subject: row.subject,
            session_date: Timestamp::from_datetime(row.session_date),
            status: stored_enum("status", &row.status)?,
            reschedule_requester_role,
            payment_session_id: row.payment_session_id,
            feedback_submitted: row.feedback_submitted,
            meeting,
            created_at: Timestamp::from_datetime(row.created_at),
            updated_at: Timestamp::from_datetime(row.updated_at),
        })
    }
}

#[async_trait]
impl BookingRepository for PostgresBookingRepository {
    async fn save(&self, booking: &Booking) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO bookings (
                id, student_id, tutor_id, subject, session_date, status,
                reschedule_requester_role, payment_session_id, feedback_submitted,
                created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            "#,
        )
        .bind(booking.id.as_uuid())
        .bind(booking.student_id.as_str())
        .bind(booking.tutor_id.as_str())
        .bind(&booking.subject)
        .bind(booking.session_date.as_datetime())
        .bind(booking.status.as_str())
        .bind(booking.reschedule_requester_role.map(|r| r.as_str()))
        .bind(&booking.payment_session_id)
        .bind(booking.created_at.as_datetime())
        .bind(booking.updated_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("Failed to save booking", e))?;

        Ok(())
    }

    async fn find_by_id(&self, id: &BookingId) -> Result<Option<Booking>, DomainError> {
        let row: Option<BookingRow> = sqlx::query_as(&format!("{} WHERE id = $1", SELECT_BOOKING))
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("Failed to fetch booking", e))?;

        row.map(Booking::try_from).transpose()
    }

    async fn find_by_payment_session(&self, session_id: &str) -> Result<Option<Booking>, DomainError> {
        let row: Option<BookingRow> =
            sqlx::query_as(&format!("{} WHERE payment_session_id = $1", SELECT_BOOKING))
                .bind(session_id)
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| db_error("Failed to fetch booking by payment session", e))?;

        row.map(Booking::try_from).transpose()
    }

    async fn list_for_participant(&self, user: &UserId) -> Result<Vec<Booking>, DomainError> {
        let rows: Vec<BookingRow> = sqlx::query_as(&format!(
            "{} WHERE student_id = $1 OR tutor_id = $1 ORDER BY session_date ASC",
            SELECT_BOOKING
        ))
        .bind(user.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("Failed to list bookings", e))?;

        rows.into_iter().map(Booking::try_from).collect()
    }

    async fn attach_payment_session(&self, id: &BookingId, session_id: &str) -> Result<(), DomainError> {
        let result = sqlx::query(
            "UPDATE bookings SET payment_session_id = $2, updated_at = NOW() WHERE id = $1",
        )
        .bind(id.as_uuid())
        .bind(session_id)
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("Failed to attach payment session", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found(ErrorCode::BookingNotFound, id));
        }
        Ok(())
    }

    async fn mark_feedback_submitted(&self, id: &BookingId) -> Result<(), DomainError> {
        let result = sqlx::query(
            "UPDATE bookings SET feedback_submitted = TRUE, updated_at = NOW() WHERE id = $1",
        )
        .bind(id.as_uuid())
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("Failed to mark feedback submitted", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found(ErrorCode::BookingNotFound, id));
        }
        Ok(())
    }

    async fn update_if_status(&self, booking: &Booking, expected: BookingStatus) -> Result<bool, DomainError> {
        // Only the transitioned columns are written. Meeting columns only
        // ever go from NULL to a value.
        let meeting = booking.meeting.as_ref();
        let result = sqlx::query(
            r#"
            UPDATE bookings SET
                status = $3,
                reschedule_requester_role = $4,
                meeting_id = COALESCE(meeting_id, $5),
                meeting_join_url = COALESCE(meeting_join_url, $6),
                meeting_host_url = COALESCE(meeting_host_url, $7),
                meeting_passcode = COALESCE(meeting_passcode, $8),
                fulfillment_claimed_until = NULL,
                updated_at = $9
            WHERE id = $1 AND status = $2
            "#,
        )
        .bind(booking.id.as_uuid())
        .bind(expected.as_str())
        .bind(booking.status.as_str())
        .bind(booking.reschedule_requester_role.map(|r| r.as_str()))
        .bind(meeting.map(|m| m.meeting_id.as_str()))
        .bind(meeting.map(|m| m.join_url.as_str()))
        .bind(meeting.map(|m| m.host_url.as_str()))
        .bind(meeting.and_then(|m| m.passcode.as_deref()))
        .bind(booking.updated_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("Failed to update booking", e))?;

        self.touched_or_missing(&booking.id, result.rows_affected()).await
    }

    async fn claim_fulfillment(&self, id: &BookingId, now: Timestamp, until: Timestamp) -> Result<bool, DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE bookings SET fulfillment_claimed_until = $3
            WHERE id = $1
              AND status = 'pending_payment'
              AND (fulfillment_claimed_until IS NULL OR fulfillment_claimed_until <= $2)
            "#,
        )
        .bind(id.as_uuid())
        .bind(now.as_datetime())
        .bind(until.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("Failed to claim booking for fulfillment", e))?;

        self.touched_or_missing(id, result.rows_affected()).await
    }

    async fn record_meeting(&self, id: &BookingId, meeting: &MeetingDetails) -> Result<bool, DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE bookings SET
                meeting_id = $2,
                meeting_join_url = $3,
                meeting_host_url = $4,
                meeting_passcode = $5,
                updated_at = NOW()
            WHERE id = $1 AND meeting_id IS NULL
            "#,
        )
        .bind(id.as_uuid())
        .bind(&meeting.meeting_id)
        .bind(&meeting.join_url)
        .bind(&meeting.host_url)
        .bind(&meeting.passcode)
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("Failed to record meeting", e))?;

        self.touched_or_missing(id, result.rows_affected()).await
    }
}
