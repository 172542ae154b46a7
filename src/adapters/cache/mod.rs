//! Token cache adapters.
//!
//! - `InMemoryTokenCache` - single process, used in development and tests
//! - `RedisTokenCache` - shared across instances, entries expire with the token

mod in_memory;
mod redis;

pub use self::in_memory::InMemoryTokenCache;
pub use self::redis::RedisTokenCache;
