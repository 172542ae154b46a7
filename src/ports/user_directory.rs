//! User directory port.
//!
//! Registration belongs to the identity provider; the marketplace reads
//! accounts and updates role and tutor-review fields.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::tutor::UserAccount;

#[async_trait]
pub trait UserDirectory: Send + Sync {
    async fn find_by_id(&self, id: &UserId) -> Result<Option<UserAccount>, DomainError>;

    /// Persists role, tutor status and rejection reason.
    async fn update(&self, account: &UserAccount) -> Result<(), DomainError>;
}
