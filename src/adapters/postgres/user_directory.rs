//! PostgreSQL implementation of UserDirectory.

use async_trait::async_trait;
use sqlx::PgPool;

use super::{db_error, stored_enum, stored_user_id};
use crate::domain::foundation::{DomainError, ErrorCode, UserId};
use crate::domain::tutor::UserAccount;
use crate::ports::UserDirectory;

pub struct PostgresUserDirectory {
    pool: PgPool,
}

impl PostgresUserDirectory {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct UserRow {
    id: String,
    name: String,
    email: String,
    role: String,
    tutor_status: String,
    rejection_reason: Option<String>,
    is_admin: bool,
}

impl TryFrom<UserRow> for UserAccount {
    type Error = DomainError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        Ok(UserAccount {
            id: stored_user_id("id", row.id)?,
            name: row.name,
            email: row.email,
            role: stored_enum("role", &row.role)?,
            tutor_status: stored_enum("tutor_status", &row.tutor_status)?,
            rejection_reason: row.rejection_reason,
            is_admin: row.is_admin,
        })
    }
}

#[async_trait]
impl UserDirectory for PostgresUserDirectory {
    async fn find_by_id(&self, id: &UserId) -> Result<Option<UserAccount>, DomainError> {
        let row: Option<UserRow> = sqlx::query_as(
            r#"
            SELECT id, name, email, role, tutor_status, rejection_reason, is_admin
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("Failed to fetch user", e))?;

        row.map(UserAccount::try_from).transpose()
    }

    async fn update(&self, account: &UserAccount) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE users SET
                name = $2,
                email = $3,
                role = $4,
                tutor_status = $5,
                rejection_reason = $6,
                updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(account.id.as_str())
        .bind(&account.name)
        .bind(&account.email)
        .bind(account.role.as_str())
        .bind(account.tutor_status.as_str())
        .bind(&account.rejection_reason)
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("Failed to update user", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found(ErrorCode::UserNotFound, &account.id));
        }
        Ok(())
    }
}
