//! Application configuration module
//!
//! Type-safe configuration loaded from environment variables with the
//! `config` and `dotenvy` crates. Variables carry the `YOURTUTOR` prefix and
//! nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use yourtutor::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Server running on {:?}", config.server.socket_addr());
//! ```

mod auth;
mod database;
mod email;
mod error;
mod fulfillment;
mod meeting;
mod payment;
mod redis;
mod server;

pub use auth::AuthConfig;
pub use database::DatabaseConfig;
pub use email::EmailConfig;
pub use error::{ConfigError, ValidationError};
pub use fulfillment::FulfillmentConfig;
pub use meeting::MeetingConfig;
pub use payment::PaymentConfig;
pub use redis::RedisConfig;
pub use server::{Environment, ServerConfig};

use serde::Deserialize;

use crate::adapters::http::RouterSettings;
use crate::application::{CheckoutSettings, FulfillmentSettings};

/// Root application configuration
///
/// Load using [`AppConfig::load()`] which reads from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration (host, port, environment)
    #[serde(default)]
    pub server: ServerConfig,

    /// Database configuration (PostgreSQL connection)
    pub database: DatabaseConfig,

    /// Redis configuration; the credential cache stays in-process without it
    pub redis: Option<RedisConfig>,

    /// Bearer token validation
    pub auth: AuthConfig,

    /// Payment configuration (Stripe)
    pub payment: PaymentConfig,

    /// Meeting provider configuration (Zoom)
    pub meeting: MeetingConfig,

    /// Email configuration (Resend)
    pub email: EmailConfig,

    #[serde(default)]
    pub fulfillment: FulfillmentConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// Loads `.env` when present, then reads every `YOURTUTOR__*` variable.
    ///
    /// # Environment Variable Format
    ///
    /// - `YOURTUTOR__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `YOURTUTOR__DATABASE__URL=...` -> `database.url = ...`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or values
    /// cannot be parsed into the expected types.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("YOURTUTOR")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns the first `ValidationError` found, section by section.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.database.validate()?;
        if let Some(redis) = &self.redis {
            redis.validate()?;
        }
        self.auth.validate()?;
        self.payment.validate()?;
        self.meeting.validate()?;
        self.email.validate()?;
        self.fulfillment.validate()?;
        Ok(())
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }

    pub fn checkout_settings(&self) -> CheckoutSettings {
        CheckoutSettings::new(&self.server.public_base_url, &self.payment.currency)
    }

    pub fn fulfillment_settings(&self) -> FulfillmentSettings {
        FulfillmentSettings {
            lease_secs: self.fulfillment.lease_secs,
            meeting_timeout: self.meeting.request_timeout(),
            session_minutes: self.meeting.session_minutes,
        }
    }

    pub fn router_settings(&self) -> RouterSettings {
        RouterSettings {
            request_timeout: self.server.request_timeout(),
            cors_origins: self.server.cors_origins_list(),
        }
    }
}
