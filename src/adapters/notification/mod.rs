//! Notification adapters.
//!
//! - `ResendNotifier` - transactional email through the Resend HTTP API
//! - `RecordingNotifier` - keeps notifications in memory for assertions

mod recording;
mod resend;
mod templates;

pub use recording::RecordingNotifier;
pub use resend::{ResendConfig, ResendNotifier};
pub use templates::{render, EmailSettings, OutgoingEmail};
