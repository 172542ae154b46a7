//! ListInquiriesHandler - Admin inbox of contact inquiries.

use std::sync::Arc;

use crate::domain::foundation::{MarketplaceError, UserId};
use crate::domain::inquiry::Inquiry;
use crate::ports::{InquiryRepository, UserDirectory};

const DEFAULT_LIMIT: u32 = 50;
const MAX_LIMIT: u32 = 200;

#[derive(Debug, Clone)]
pub struct ListInquiriesQuery {
    pub admin: UserId,
    pub limit: Option<u32>,
}

pub struct ListInquiriesHandler {
    inquiries: Arc<dyn InquiryRepository>,
    users: Arc<dyn UserDirectory>,
}

impl ListInquiriesHandler {
    pub fn new(inquiries: Arc<dyn InquiryRepository>, users: Arc<dyn UserDirectory>) -> Self {
        Self { inquiries, users }
    }

    pub async fn handle(&self, query: ListInquiriesQuery) -> Result<Vec<Inquiry>, MarketplaceError> {
        let is_admin = self
            .users
            .find_by_id(&query.admin)
            .await?
            .map(|a| a.is_admin)
            .unwrap_or(false);
        if !is_admin {
            return Err(MarketplaceError::forbidden("admin access required"));
        }

        let limit = query.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);
        Ok(self.inquiries.list_recent(limit).await?)
    }
}
