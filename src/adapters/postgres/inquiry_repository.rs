//! PostgreSQL implementation of InquiryRepository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use super::db_error;
use crate::domain::foundation::{DomainError, InquiryId, Timestamp};
use crate::domain::inquiry::Inquiry;
use crate::ports::InquiryRepository;

pub struct PostgresInquiryRepository {
    pool: PgPool,
}

impl PostgresInquiryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct InquiryRow {
    id: Uuid,
    name: String,
    email: String,
    subject: Option<String>,
    message: String,
    created_at: DateTime<Utc>,
}

impl From<InquiryRow> for Inquiry {
    fn from(row: InquiryRow) -> Self {
        Inquiry {
            id: InquiryId::from_uuid(row.id),
            name: row.name,
            email: row.email,
            subject: row.subject,
            message: row.message,
            created_at: Timestamp::from_datetime(row.created_at),
        }
    }
}

#[async_trait]
impl InquiryRepository for PostgresInquiryRepository {
    async fn save(&self, inquiry: &Inquiry) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO inquiries (id, name, email, subject, message, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(inquiry.id.as_uuid())
        .bind(&inquiry.name)
        .bind(&inquiry.email)
        .bind(&inquiry.subject)
        .bind(&inquiry.message)
        .bind(inquiry.created_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("Failed to save inquiry", e))?;

        Ok(())
    }

    async fn list_recent(&self, limit: u32) -> Result<Vec<Inquiry>, DomainError> {
        let rows: Vec<InquiryRow> = sqlx::query_as(
            r#"
            SELECT id, name, email, subject, message, created_at
            FROM inquiries
            ORDER BY created_at DESC
            LIMIT $1
            "#,
        )
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("Failed to list inquiries", e))?;

        Ok(rows.into_iter().map(Inquiry::from).collect())
    }
}
