//! Contact-inquiry persistence port.

use async_trait::async_trait;

use crate::domain::foundation::DomainError;
use crate::domain::inquiry::Inquiry;

#[async_trait]
pub trait InquiryRepository: Send + Sync {
    async fn save(&self, inquiry: &Inquiry) -> Result<(), DomainError>;

    /// Newest first, at most `limit`.
    async fn list_recent(&self, limit: u32) -> Result<Vec<Inquiry>, DomainError>;
}
