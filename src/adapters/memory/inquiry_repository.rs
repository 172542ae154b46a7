//! In-memory contact inquiries.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::DomainError;
use crate::domain::inquiry::Inquiry;
use crate::ports::InquiryRepository;

#[derive(Debug, Clone, Default)]
pub struct InMemoryInquiryRepository {
    inquiries: Arc<RwLock<Vec<Inquiry>>>,
}

impl InMemoryInquiryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn count(&self) -> usize {
        self.inquiries.read().await.len()
    }
}

#[async_trait]
impl InquiryRepository for InMemoryInquiryRepository {
    async fn save(&self, inquiry: &Inquiry) -> Result<(), DomainError> {
        self.inquiries.write().await.push(inquiry.clone());
        Ok(())
    }

    async fn list_recent(&self, limit: u32) -> Result<Vec<Inquiry>, DomainError> {
        let mut recent = self.inquiries.read().await.clone();
        recent.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        recent.truncate(limit as usize);
        Ok(recent)
    }
}
