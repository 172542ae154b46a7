//! Request and response bodies for booking endpoints.

use serde::{Deserialize, Serialize};

use crate::application::handlers::booking::{CreateCheckoutResult, MyClasses};
use crate::domain::booking::{Booking, Feedback};
use crate::domain::foundation::UserId;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCheckoutRequest {
    pub tutor_id: String,
    pub subject: String,
    /// RFC 3339 start instant.
    pub session_date: String,
    /// `HH:MM`
    pub start_time: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutResponse {
    pub booking_id: String,
    pub session_id: String,
    pub url: String,
}

impl From<CreateCheckoutResult> for CheckoutResponse {
    fn from(result: CreateCheckoutResult) -> Self {
        Self {
            booking_id: result.booking_id.to_string(),
            session_id: result.session_id,
            url: result.url,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MeetingResponse {
    pub meeting_id: String,
    pub join_url: String,
    /// Only shown to the tutor.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub passcode: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingResponse {
    pub id: String,
    pub student_id: String,
    pub tutor_id: String,
    pub subject: String,
    pub session_date: String,
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reschedule_requested_by: Option<&'static str>,
    pub feedback_submitted: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meeting: Option<MeetingResponse>,
}

impl BookingResponse {
    /// Renders a booking as seen by `viewer`.
    pub fn for_viewer(booking: &Booking, viewer: &UserId) -> Self {
        let is_tutor = booking.tutor_id == *viewer;
        Self {
            id: booking.id.to_string(),
            student_id: booking.student_id.to_string(),
            tutor_id: booking.tutor_id.to_string(),
            subject: booking.subject.clone(),
            session_date: booking.session_date.to_rfc3339(),
            status: booking.status.as_str(),
            reschedule_requested_by: booking.reschedule_requester_role.map(|r| r.as_str()),
            feedback_submitted: booking.feedback_submitted,
            meeting: booking.meeting.as_ref().map(|m| MeetingResponse {
                meeting_id: m.meeting_id.clone(),
                join_url: m.join_url.clone(),
                host_url: is_tutor.then(|| m.host_url.clone()),
                passcode: m.passcode.clone(),
            }),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct MyClassesResponse {
    pub upcoming: Vec<BookingResponse>,
    pub past: Vec<BookingResponse>,
}

impl MyClassesResponse {
    pub fn for_viewer(classes: &MyClasses, viewer: &UserId) -> Self {
        let render = |list: &[Booking]| list.iter().map(|b| BookingResponse::for_viewer(b, viewer)).collect();
        Self {
            upcoming: render(&classes.upcoming),
            past: render(&classes.past),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RescheduleRequest {
    pub reason: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FeedbackRequest {
    pub rating: u8,
    #[serde(default)]
    pub comment: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackResponse {
    /// `submitted` or `already_submitted`.
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feedback_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<u8>,
}

impl FeedbackResponse {
    pub fn submitted(feedback: &Feedback) -> Self {
        Self {
            status: "submitted",
            feedback_id: Some(feedback.id.to_string()),
            rating: Some(feedback.rating.value()),
        }
    }

    pub fn already_submitted() -> Self {
        Self {
            status: "already_submitted",
            feedback_id: None,
            rating: None,
        }
    }
}

/// Acknowledgement body the payment provider expects.
#[derive(Debug, Clone, Serialize)]
pub struct WebhookAck {
    pub received: bool,
}
