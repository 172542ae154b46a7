//! Plain-text email rendering for each notification.

use crate::ports::{Contact, Notification};

/// Addresses and links shared by every email.
#[derive(Debug, Clone)]
pub struct EmailSettings {
    /// Recipient of admin-facing mail (tutor applications, inquiries).
    pub admin_email: Option<String>,
    /// Public site root, without trailing slash.
    pub public_base_url: String,
}

impl EmailSettings {
    fn my_classes_url(&self) -> String {
        format!("{}/my-classes", self.public_base_url)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingEmail {
    pub to: String,
    pub subject: String,
    pub text: String,
}

impl OutgoingEmail {
    fn to(contact: &Contact, subject: String, text: String) -> Self {
        Self {
            to: contact.email.clone(),
            subject,
            text,
        }
    }
}

/// Renders the emails a notification produces. May be empty.
pub fn render(notification: &Notification, settings: &EmailSettings) -> Vec<OutgoingEmail> {
    match notification {
        Notification::BookingConfirmed { booking, student, tutor } => {
            let classes = settings.my_classes_url();
            vec![
                OutgoingEmail::to(
                    student,
                    format!("YourTutor Session Confirmed: {} with {}", booking.subject, tutor.name),
                    format!(
                        "Your session for {} with {} is confirmed. Please visit your 'My Classes' page for the exact time in your local timezone and the meeting link: {}",
                        booking.subject, tutor.name, classes
                    ),
                ),
                OutgoingEmail::to(
                    tutor,
                    format!("New YourTutor Booking: {} with {}", booking.subject, student.name),
                    format!(
                        "You have a new session for {} with {}. Please visit your 'My Classes' page for the exact time in your local timezone and your host link: {}",
                        booking.subject, student.name, classes
                    ),
                ),
            ]
        }

        Notification::RescheduleRequested {
            booking,
            requester,
            recipient,
            reason,
            ..
        } => vec![OutgoingEmail::to(
            recipient,
            format!("Reschedule Request for Your Session with {}", requester.name),
            format!(
                "{} has requested to reschedule your session for {}. Reason: {}. Please use the messaging feature on YourTutor to coordinate.",
                requester.name, booking.subject, reason
            ),
        )],

        Notification::NewMessage {
            recipient,
            sender_name,
            preview,
        } => vec![OutgoingEmail::to(
            recipient,
            format!("New Message from {} on YourTutor", sender_name),
            format!(
                "{} sent you a message:\n\n{}\n\nReply on YourTutor: {}/messages",
                sender_name, preview, settings.public_base_url
            ),
        )],

        Notification::TutorStatusChanged { tutor, status, reason } => {
            let mut text = format!("Hi {}, your tutor application status is now: {}.", tutor.name, status);
            if let Some(reason) = reason {
                text.push_str(&format!("\n\nReason: {}", reason));
            }
            vec![OutgoingEmail::to(
                tutor,
                format!("Your YourTutor Application Status: {}", capitalize(status.as_str())),
                text,
            )]
        }

        Notification::TutorApplicationSubmitted { applicant } => {
            let mut emails = vec![OutgoingEmail::to(
                applicant,
                "We've Received Your YourTutor Application!".to_string(),
                format!(
                    "Hi {}, thanks for applying to tutor on YourTutor. An admin will review your profile shortly.",
                    applicant.name
                ),
            )];
            if let Some(admin) = &settings.admin_email {
                emails.push(OutgoingEmail {
                    to: admin.clone(),
                    subject: format!("[Action Required] New Tutor Application: {}", applicant.name),
                    text: format!(
                        "A new tutor application from {} ({}) is ready for review.",
                        applicant.name, applicant.email
                    ),
                });
            }
            emails
        }

        Notification::InquiryReceived { inquiry } => {
            let sender = Contact {
                name: inquiry.name.clone(),
                email: inquiry.email.clone(),
            };
            let mut emails = Vec::with_capacity(2);
            if let Some(admin) = &settings.admin_email {
                emails.push(OutgoingEmail {
                    to: admin.clone(),
                    subject: format!("New Contact Inquiry: {}", inquiry.subject_or("No Subject")),
                    text: format!(
                        "Name: {}\nEmail: {}\nSubject: {}\n\nMessage:\n{}",
                        inquiry.name,
                        inquiry.email,
                        inquiry.subject_or("N/A"),
                        inquiry.message
                    ),
                });
            }
            emails.push(OutgoingEmail::to(
                &sender,
                "We've received your inquiry at YourTutor".to_string(),
                format!(
                    "Hi {},\n\nThis is an automated confirmation that we have received your inquiry. Our team will review your message and get back to you as soon as possible.\n\nThanks,\nThe YourTutor Team",
                    inquiry.name
                ),
            ));
            emails
        }
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
