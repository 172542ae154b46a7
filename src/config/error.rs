//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Invalid port number")]
    InvalidPort,

    #[error("Invalid request timeout")]
    InvalidTimeout,

    #[error("Invalid socket address: {0}")]
    InvalidSocketAddr(String),

    #[error("Public base URL must be an absolute http(s) URL")]
    InvalidPublicBaseUrl,

    #[error("Public base URL must use HTTPS in production")]
    PublicBaseUrlMustBeHttps,

    #[error("Invalid database URL format")]
    InvalidDatabaseUrl,

    #[error("Invalid Redis URL format")]
    InvalidRedisUrl,

    #[error("Redis key prefix must be non-empty and contain no whitespace")]
    InvalidRedisKeyPrefix,

    #[error("Redis connect timeout must be between 1 and 30 seconds")]
    InvalidRedisConnectTimeout,

    #[error("Pool needs max_connections >= min_connections and at least one connection")]
    InvalidPoolSize,

    #[error("Pool size exceeds maximum allowed (100)")]
    PoolSizeTooLarge,

    #[error("JWT secret must be at least {0} bytes")]
    JwtSecretTooShort(usize),

    #[error("Invalid Stripe API key format")]
    InvalidStripeKey,

    #[error("Invalid Stripe webhook secret format")]
    InvalidStripeWebhookSecret,

    #[error("Currency must be a three-letter ISO code")]
    InvalidCurrency,

    #[error("Meeting timeout must be between 1 and 60 seconds")]
    InvalidMeetingTimeout,

    #[error("Session length must be between 15 and 240 minutes")]
    InvalidSessionLength,

    #[error("Fulfillment lease must be between 10 and 3600 seconds")]
    InvalidFulfillmentLease,

    #[error("Invalid Resend API key format")]
    InvalidResendKey,

    #[error("Invalid email address: {0}")]
    InvalidEmailAddress(&'static str),
}
