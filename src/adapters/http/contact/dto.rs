//! Request and response bodies for contact endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::inquiry::{Inquiry, InquiryForm};

#[derive(Debug, Clone, Deserialize)]
pub struct InquiryRequest {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub subject: Option<String>,
    pub message: String,
}

impl From<InquiryRequest> for InquiryForm {
    fn from(request: InquiryRequest) -> Self {
        Self {
            name: request.name,
            email: request.email,
            subject: request.subject,
            message: request.message,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct InquiryAcceptedResponse {
    pub success: bool,
    pub message: &'static str,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ListInquiriesParams {
    pub limit: Option<u32>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InquiryResponse {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    pub message: String,
    pub created_at: String,
}

impl From<&Inquiry> for InquiryResponse {
    fn from(inquiry: &Inquiry) -> Self {
        Self {
            id: inquiry.id.to_string(),
            name: inquiry.name.clone(),
            email: inquiry.email.clone(),
            subject: inquiry.subject.clone(),
            message: inquiry.message.clone(),
            created_at: inquiry.created_at.to_rfc3339(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct InquiryListResponse {
    pub inquiries: Vec<InquiryResponse>,
}
