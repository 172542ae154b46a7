//! Fulfillment tunables

use serde::Deserialize;

use super::error::ValidationError;

#[derive(Debug, Clone, Deserialize)]
pub struct FulfillmentConfig {
    /// How long one webhook delivery holds its claim on a booking
    #[serde(default = "default_lease_secs")]
    pub lease_secs: i64,
}

impl FulfillmentConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !(10..=3600).contains(&self.lease_secs) {
            return Err(ValidationError::InvalidFulfillmentLease);
        }
        Ok(())
    }
}

impl Default for FulfillmentConfig {
    fn default() -> Self {
        Self {
            lease_secs: default_lease_secs(),
        }
    }
}

fn default_lease_secs() -> i64 {
    120
}
