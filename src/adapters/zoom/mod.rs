//! Zoom meeting provider adapter.
//!
//! Uses Server-to-Server OAuth (`account_credentials` grant). Access tokens
//! are cached through the `TokenCache` port and refreshed five minutes
//! before they expire.

mod mock_meeting_provider;
mod zoom_adapter;

pub use mock_meeting_provider::MockMeetingProvider;
pub use zoom_adapter::{ZoomConfig, ZoomMeetingAdapter};
