//! Email configuration

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use super::error::ValidationError;

/// Email configuration (Resend)
#[derive(Debug, Clone, Deserialize)]
pub struct EmailConfig {
    /// Resend API key
    pub resend_api_key: SecretString,

    /// From email address
    #[serde(default = "default_from_email")]
    pub from_email: String,

    /// From name
    #[serde(default = "default_from_name")]
    pub from_name: String,

    /// Inbox that receives new tutor applications
    pub admin_email: Option<String>,
}

impl EmailConfig {
    /// Get formatted "From" header value
    pub fn from_header(&self) -> String {
        format!("{} <{}>", self.from_name, self.from_email)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        let api_key = self.resend_api_key.expose_secret();
        if api_key.is_empty() {
            return Err(ValidationError::MissingRequired("EMAIL__RESEND_API_KEY"));
        }
        if !api_key.starts_with("re_") {
            return Err(ValidationError::InvalidResendKey);
        }
        if !self.from_email.contains('@') {
            return Err(ValidationError::InvalidEmailAddress("from_email"));
        }
        if matches!(&self.admin_email, Some(admin) if !admin.contains('@')) {
            return Err(ValidationError::InvalidEmailAddress("admin_email"));
        }
        Ok(())
    }
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            resend_api_key: SecretString::new(String::new()),
            from_email: default_from_email(),
            from_name: default_from_name(),
            admin_email: None,
        }
    }
}

fn default_from_email() -> String {
    "noreply@yourtutor.app".to_string()
}

fn default_from_name() -> String {
    "YourTutor".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_key(key: &str) -> EmailConfig {
        EmailConfig {
            resend_api_key: SecretString::new(key.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_email_config_defaults() {
        let config = EmailConfig::default();
        assert_eq!(config.from_header(), "YourTutor <noreply@yourtutor.app>");
        assert!(config.admin_email.is_none());
    }

    #[test]
    fn test_validation_api_key() {
        assert_eq!(
            EmailConfig::default().validate(),
            Err(ValidationError::MissingRequired("EMAIL__RESEND_API_KEY"))
        );
        assert_eq!(with_key("sk_xxx").validate(), Err(ValidationError::InvalidResendKey));
        assert!(with_key("re_xxx").validate().is_ok());
    }

    #[test]
    fn test_validation_addresses() {
        let config = EmailConfig {
            admin_email: Some("admins".to_string()),
            ..with_key("re_xxx")
        };
        assert_eq!(config.validate(), Err(ValidationError::InvalidEmailAddress("admin_email")));

        let config = EmailConfig {
            from_email: "noreply".to_string(),
            ..with_key("re_xxx")
        };
        assert_eq!(config.validate(), Err(ValidationError::InvalidEmailAddress("from_email")));
    }
}
