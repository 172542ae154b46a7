//! Meeting provider configuration

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Meeting provider configuration (Zoom server-to-server OAuth)
#[derive(Debug, Clone, Deserialize)]
pub struct MeetingConfig {
    pub zoom_account_id: String,

    pub zoom_client_id: String,

    pub zoom_client_secret: SecretString,

    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    #[serde(default = "default_oauth_base_url")]
    pub oauth_base_url: String,

    /// Upper bound on one meeting-creation call, in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// Length of a booked session
    #[serde(default = "default_session_minutes")]
    pub session_minutes: u32,
}

impl MeetingConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.zoom_account_id.is_empty() {
            return Err(ValidationError::MissingRequired("MEETING__ZOOM_ACCOUNT_ID"));
        }
        if self.zoom_client_id.is_empty() {
            return Err(ValidationError::MissingRequired("MEETING__ZOOM_CLIENT_ID"));
        }
        if self.zoom_client_secret.expose_secret().is_empty() {
            return Err(ValidationError::MissingRequired("MEETING__ZOOM_CLIENT_SECRET"));
        }
        if !(1..=60).contains(&self.request_timeout_secs) {
            return Err(ValidationError::InvalidMeetingTimeout);
        }
        if !(15..=240).contains(&self.session_minutes) {
            return Err(ValidationError::InvalidSessionLength);
        }
        Ok(())
    }
}

impl Default for MeetingConfig {
    fn default() -> Self {
        Self {
            zoom_account_id: String::new(),
            zoom_client_id: String::new(),
            zoom_client_secret: SecretString::new(String::new()),
            api_base_url: default_api_base_url(),
            oauth_base_url: default_oauth_base_url(),
            request_timeout_secs: default_request_timeout(),
            session_minutes: default_session_minutes(),
        }
    }
}

fn default_api_base_url() -> String {
    "https://api.zoom.us".to_string()
}

fn default_oauth_base_url() -> String {
    "https://zoom.us".to_string()
}

fn default_request_timeout() -> u64 {
    10
}

fn default_session_minutes() -> u32 {
    60
}

#[cfg(test)]
mod tests {
    use super::*;

    fn configured() -> MeetingConfig {
        MeetingConfig {
            zoom_account_id: "acct".to_string(),
            zoom_client_id: "client".to_string(),
            zoom_client_secret: SecretString::new("secret".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn defaults() {
        let config = MeetingConfig::default();
        assert_eq!(config.request_timeout(), Duration::from_secs(10));
        assert_eq!(config.session_minutes, 60);
        assert_eq!(config.api_base_url, "https://api.zoom.us");
    }

    #[test]
    fn credentials_are_required() {
        assert_eq!(
            MeetingConfig::default().validate(),
            Err(ValidationError::MissingRequired("MEETING__ZOOM_ACCOUNT_ID"))
        );
        assert!(configured().validate().is_ok());
    }

    #[test]
    fn bounds_are_enforced() {
        let config = MeetingConfig {
            request_timeout_secs: 0,
            ..configured()
        };
        assert_eq!(config.validate(), Err(ValidationError::InvalidMeetingTimeout));

        let config = MeetingConfig {
            session_minutes: 5,
            ..configured()
        };
        assert_eq!(config.validate(), Err(ValidationError::InvalidSessionLength));
    }
}
