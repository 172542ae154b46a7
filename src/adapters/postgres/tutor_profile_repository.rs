//! PostgreSQL implementation of TutorProfileRepository and AvailabilityStore.
//!
//! Slots live in their own table keyed by (tutor, day, start time); a
//! profile read assembles both.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::PgPool;

use super::{db_error, stored_user_id, violates};
use crate::domain::availability::{AvailabilitySchedule, AvailabilitySlot, DayWindow, TimeOfDay};
use crate::domain::foundation::{DomainError, ErrorCode, Timestamp, UserId};
use crate::domain::tutor::{ProfileDetails, Qualification, TutorProfile};
use crate::ports::{AvailabilityStore, TutorProfileRepository};

pub struct PostgresTutorProfileRepository {
    pool: PgPool,
}

impl PostgresTutorProfileRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn ensure_profile(&self, tutor: &UserId) -> Result<(), DomainError> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM tutor_profiles WHERE tutor_id = $1)",
        )
        .bind(tutor.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| db_error("Failed to check tutor profile", e))?;

        if exists {
            Ok(())
        } else {
            Err(DomainError::not_found(ErrorCode::ProfileNotFound, tutor))
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct ProfileRow {
    tutor_id: String,
    bio: String,
    hourly_rate: f64,
    subjects: Vec<String>,
    experience_years: Option<i32>,
    teaching_style: Option<String>,
    is_online: bool,
    is_in_person: bool,
    qualifications: Json<Vec<Qualification>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

#[derive(Debug, sqlx::FromRow)]
struct SlotRow {
    slot_date: DateTime<Utc>,
    start_time: String,
    end_time: String,
}

impl TryFrom<SlotRow> for AvailabilitySlot {
    type Error = DomainError;

    fn try_from(row: SlotRow) -> Result<Self, Self::Error> {
        let corrupt = |e: crate::domain::foundation::ValidationError| {
            DomainError::new(ErrorCode::DatabaseError, format!("Invalid stored slot: {}", e))
        };
        AvailabilitySlot::new(
            row.slot_date.date_naive(),
            TimeOfDay::parse("start_time", &row.start_time).map_err(corrupt)?,
            TimeOfDay::parse("end_time", &row.end_time).map_err(corrupt)?,
        )
        .map_err(corrupt)
    }
}

fn profile_from_row(row: ProfileRow, slots: Vec<AvailabilitySlot>) -> Result<TutorProfile, DomainError> {
    Ok(TutorProfile {
        tutor_id: stored_user_id("tutor_id", row.tutor_id)?,
        details: ProfileDetails {
            bio: row.bio,
            hourly_rate: row.hourly_rate,
            subjects: row.subjects,
            experience_years: row.experience_years.and_then(|y| u32::try_from(y).ok()),
            teaching_style: row.teaching_style,
            is_online: row.is_online,
            is_in_person: row.is_in_person,
            qualifications: row.qualifications.0,
        },
        availability: AvailabilitySchedule::from_stored(slots),
        created_at: Timestamp::from_datetime(row.created_at),
        updated_at: Timestamp::from_datetime(row.updated_at),
    })
}

const INSERT_SLOT: &str = r#"
    INSERT INTO availability_slots (tutor_id, slot_date, start_time, end_time)
    VALUES ($1, $2, $3, $4)
"#;

#[async_trait]
impl TutorProfileRepository for PostgresTutorProfileRepository {
    async fn find_by_tutor(&self, tutor: &UserId) -> Result<Option<TutorProfile>, DomainError> {
        let row: Option<ProfileRow> = sqlx::query_as(
            r#"
            SELECT tutor_id, bio, hourly_rate, subjects, experience_years, teaching_style,
                   is_online, is_in_person, qualifications, created_at, updated_at
            FROM tutor_profiles
            WHERE tutor_id = $1
            "#,
        )
        .bind(tutor.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("Failed to fetch tutor profile", e))?;

        match row {
            Some(row) => {
                let slots = self.list_slots(tutor).await?;
                profile_from_row(row, slots).map(Some)
            }
            None => Ok(None),
        }
    }

    async fn upsert(&self, profile: &TutorProfile) -> Result<(), DomainError> {
        let details = &profile.details;
        sqlx::query(
            r#"
            INSERT INTO tutor_profiles (
                tutor_id, bio, hourly_rate, subjects, experience_years, teaching_style,
                is_online, is_in_person, qualifications, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            ON CONFLICT (tutor_id) DO UPDATE SET
                bio = EXCLUDED.bio,
                hourly_rate = EXCLUDED.hourly_rate,
                subjects = EXCLUDED.subjects,
                experience_years = EXCLUDED.experience_years,
                teaching_style = EXCLUDED.teaching_style,
                is_online = EXCLUDED.is_online,
                is_in_person = EXCLUDED.is_in_person,
                qualifications = EXCLUDED.qualifications,
                updated_at = EXCLUDED.updated_at
            "#,
        )
        .bind(profile.tutor_id.as_str())
        .bind(&details.bio)
        .bind(details.hourly_rate)
        .bind(&details.subjects)
        .bind(details.experience_years.and_then(|y| i32::try_from(y).ok()))
        .bind(&details.teaching_style)
        .bind(details.is_online)
        .bind(details.is_in_person)
        .bind(Json(&details.qualifications))
        .bind(profile.created_at.as_datetime())
        .bind(profile.updated_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("Failed to save tutor profile", e))?;

        Ok(())
    }
}

#[async_trait]
impl AvailabilityStore for PostgresTutorProfileRepository {
    async fn list_slots(&self, tutor: &UserId) -> Result<Vec<AvailabilitySlot>, DomainError> {
        let rows: Vec<SlotRow> = sqlx::query_as(
            r#"
            SELECT slot_date, start_time, end_time
            FROM availability_slots
            WHERE tutor_id = $1
            ORDER BY slot_date ASC, start_time ASC
            "#,
        )
        .bind(tutor.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("Failed to list availability", e))?;

        rows.into_iter().map(AvailabilitySlot::try_from).collect()
    }

    async fn add_slot(&self, tutor: &UserId, slot: AvailabilitySlot) -> Result<(), DomainError> {
        self.ensure_profile(tutor).await?;

        sqlx::query(INSERT_SLOT)
            .bind(tutor.as_str())
            .bind(slot.day_start().as_datetime())
            .bind(slot.start_time.to_string())
            .bind(slot.end_time.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| {
                if violates(&e, "availability_slots_opening_key") {
                    return DomainError::validation(
                        "availability",
                        format!("a slot on {} at {} already exists", slot.date, slot.start_time),
                    );
                }
                db_error("Failed to add availability slot", e)
            })?;

        Ok(())
    }

    async fn replace_all_slots(&self, tutor: &UserId, slots: &AvailabilitySchedule) -> Result<(), DomainError> {
        self.ensure_profile(tutor).await?;

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| db_error("Failed to begin transaction", e))?;

        sqlx::query("DELETE FROM availability_slots WHERE tutor_id = $1")
            .bind(tutor.as_str())
            .execute(&mut *tx)
            .await
            .map_err(|e| db_error("Failed to clear availability", e))?;

        for slot in slots.slots() {
            sqlx::query(INSERT_SLOT)
                .bind(tutor.as_str())
                .bind(slot.day_start().as_datetime())
                .bind(slot.start_time.to_string())
                .bind(slot.end_time.to_string())
                .execute(&mut *tx)
                .await
                .map_err(|e| db_error("Failed to insert availability slot", e))?;
        }

        tx.commit()
            .await
            .map_err(|e| db_error("Failed to commit availability", e))?;

        Ok(())
    }

    async fn remove_slot(&self, tutor: &UserId, window: &DayWindow, start_time: &TimeOfDay) -> Result<bool, DomainError> {
        // A concurrent remover holding the row lock makes this one a no-op.
        let result = sqlx::query(
            r#"
            DELETE FROM availability_slots
            WHERE id = (
                SELECT id FROM availability_slots
                WHERE tutor_id = $1
                  AND slot_date BETWEEN $2 AND $3
                  AND start_time = $4
                LIMIT 1
                FOR UPDATE SKIP LOCKED
            )
            "#,
        )
        .bind(tutor.as_str())
        .bind(window.start.as_datetime())
        .bind(window.end.as_datetime())
        .bind(start_time.to_string())
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("Failed to remove availability slot", e))?;

        Ok(result.rows_affected() > 0)
    }
}
