//! Time source port.

use crate::domain::foundation::Timestamp;

/// Source of "now", injected wherever expiry or ordering depends on time.
pub trait Clock: Send + Sync {
    fn now(&self) -> Timestamp;
}
