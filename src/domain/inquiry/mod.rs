//! Contact-form inquiries.
//!
//! Anyone may submit one, signed in or not. Inquiries are stored for the
//! admin team and acknowledged by email.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{ensure_length, InquiryId, Timestamp, ValidationError};

/// Raw contact-form fields.
#[derive(Debug, Clone, Default)]
pub struct InquiryForm {
    pub name: String,
    pub email: String,
    pub subject: Option<String>,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Inquiry {
    pub id: InquiryId,
    pub name: String,
    /// Trimmed and lowercased.
    pub email: String,
    pub subject: Option<String>,
    pub message: String,
    pub created_at: Timestamp,
}

impl Inquiry {
    pub const NAME_MIN: usize = 2;
    pub const NAME_MAX: usize = 100;
    pub const SUBJECT_MAX: usize = 200;
    pub const MESSAGE_MIN: usize = 10;
    pub const MESSAGE_MAX: usize = 5000;

    /// Validates and normalizes a form submission.
    pub fn submit(form: InquiryForm, now: Timestamp) -> Result<Self, ValidationError> {
        ensure_length("name", &form.name, Self::NAME_MIN, Self::NAME_MAX)?;

        let email = form.email.trim().to_lowercase();
        if !looks_like_email(&email) {
            return Err(ValidationError::invalid_format("email", "must be a valid email address"));
        }

        let subject = form
            .subject
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());
        if let Some(subject) = &subject {
            ensure_length("subject", subject, 1, Self::SUBJECT_MAX)?;
        }

        ensure_length("message", &form.message, Self::MESSAGE_MIN, Self::MESSAGE_MAX)?;

        Ok(Self {
            id: InquiryId::new(),
            name: form.name.trim().to_string(),
            email,
            subject,
            message: form.message.trim().to_string(),
            created_at: now,
        })
    }

    pub fn subject_or<'a>(&'a self, fallback: &'a str) -> &'a str {
        self.subject.as_deref().unwrap_or(fallback)
    }
}

/// Something before and after a single `@`, with a dot in the domain.
fn looks_like_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && !email.contains(char::is_whitespace)
                && matches!(domain.rsplit_once('.'), Some((host, tld)) if !host.is_empty() && !tld.is_empty())
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> InquiryForm {
        InquiryForm {
            name: "  Priya  ".to_string(),
            email: " Priya@Example.COM ".to_string(),
            subject: Some("   ".to_string()),
            message: "Do you offer GCSE chemistry tutoring?".to_string(),
        }
    }

    #[test]
    fn submit_normalizes_fields() {
        let inquiry = Inquiry::submit(form(), Timestamp::now()).unwrap();
        assert_eq!(inquiry.name, "Priya");
        assert_eq!(inquiry.email, "priya@example.com");
        assert_eq!(inquiry.subject, None);
        assert_eq!(inquiry.subject_or("No Subject"), "No Subject");
    }

    #[test]
    fn fields_are_checked_in_form_order() {
        let mut bad = form();
        bad.name = "P".to_string();
        bad.email = "not-an-email".to_string();
        assert_eq!(Inquiry::submit(bad.clone(), Timestamp::now()).unwrap_err().field(), "name");

        bad.name = "Priya".to_string();
        assert_eq!(Inquiry::submit(bad.clone(), Timestamp::now()).unwrap_err().field(), "email");

        bad.email = "priya@example.com".to_string();
        bad.message = "Hi there".to_string();
        assert_eq!(Inquiry::submit(bad, Timestamp::now()).unwrap_err().field(), "message");
    }

    #[test]
    fn email_shape() {
        assert!(looks_like_email("a@b.co"));
        assert!(!looks_like_email("a@b"));
        assert!(!looks_like_email("@b.co"));
        assert!(!looks_like_email("a@@b.co"));
        assert!(!looks_like_email("a b@c.io"));
    }

    #[test]
    fn long_subject_is_rejected() {
        let mut long = form();
        long.subject = Some("x".repeat(Inquiry::SUBJECT_MAX + 1));
        let err = Inquiry::submit(long, Timestamp::now()).unwrap_err();
        assert_eq!(err.field(), "subject");
    }
}
