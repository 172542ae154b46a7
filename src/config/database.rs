//! Postgres pool settings.

use serde::Deserialize;
use sqlx::postgres::PgPoolOptions;
use std::time::Duration;

use super::error::ValidationError;

const MAX_POOL_SIZE: u32 = 100;

/// `[database]` section. Only `url` is required.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub url: String,
    pub min_connections: u32,
    pub max_connections: u32,
    pub acquire_timeout_secs: u64,
    pub idle_timeout_secs: u64,
    pub max_lifetime_secs: u64,
    /// Apply `migrations/` before serving.
    pub run_migrations: bool,
}

impl DatabaseConfig {
    /// Pool options carrying the configured limits.
    pub fn pool_options(&self) -> PgPoolOptions {
        PgPoolOptions::new()
            .min_connections(self.min_connections)
            .max_connections(self.max_connections)
            .acquire_timeout(Duration::from_secs(self.acquire_timeout_secs))
            .idle_timeout(Duration::from_secs(self.idle_timeout_secs))
            .max_lifetime(Duration::from_secs(self.max_lifetime_secs))
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.url.is_empty() {
            return Err(ValidationError::MissingRequired("DATABASE__URL"));
        }
        if !(self.url.starts_with("postgres://") || self.url.starts_with("postgresql://")) {
            return Err(ValidationError::InvalidDatabaseUrl);
        }
        if self.max_connections == 0 || self.min_connections > self.max_connections {
            return Err(ValidationError::InvalidPoolSize);
        }
        if self.max_connections > MAX_POOL_SIZE {
            return Err(ValidationError::PoolSizeTooLarge);
        }
        Ok(())
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            min_connections: 2,
            max_connections: 10,
            acquire_timeout_secs: 30,
            idle_timeout_secs: 600,
            max_lifetime_secs: 1800,
            run_migrations: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_url(url: &str) -> DatabaseConfig {
        DatabaseConfig {
            url: url.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn pool_options_carry_configured_limits() {
        let config = DatabaseConfig {
            min_connections: 1,
            max_connections: 4,
            acquire_timeout_secs: 3,
            ..with_url("postgres://localhost/yourtutor")
        };

        let options = config.pool_options();
        assert_eq!(options.get_min_connections(), 1);
        assert_eq!(options.get_max_connections(), 4);
        assert_eq!(options.get_acquire_timeout(), Duration::from_secs(3));
    }

    #[test]
    fn url_must_be_present_and_postgres() {
        assert_eq!(
            DatabaseConfig::default().validate(),
            Err(ValidationError::MissingRequired("DATABASE__URL"))
        );
        assert_eq!(
            with_url("mysql://localhost/yourtutor").validate(),
            Err(ValidationError::InvalidDatabaseUrl)
        );
        assert!(with_url("postgresql://yourtutor:pass@db:5432/yourtutor").validate().is_ok());
    }

    #[test]
    fn pool_bounds() {
        let inverted = DatabaseConfig {
            min_connections: 8,
            max_connections: 4,
            ..with_url("postgres://localhost/yourtutor")
        };
        assert_eq!(inverted.validate(), Err(ValidationError::InvalidPoolSize));

        let empty = DatabaseConfig {
            min_connections: 0,
            max_connections: 0,
            ..with_url("postgres://localhost/yourtutor")
        };
        assert_eq!(empty.validate(), Err(ValidationError::InvalidPoolSize));

        let huge = DatabaseConfig {
            max_connections: 150,
            ..with_url("postgres://localhost/yourtutor")
        };
        assert_eq!(huge.validate(), Err(ValidationError::PoolSizeTooLarge));
    }
}
