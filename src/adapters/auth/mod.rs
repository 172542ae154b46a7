//! Authentication adapters.
//!
//! Implementations of the `SessionValidator` port:
//!
//! - `jwt` - HS256 bearer tokens signed with a shared secret
//! - `mock` - Test implementation that maps fixed tokens to users

mod jwt;
mod mock;

pub use jwt::{JwtClaims, JwtSessionValidator};
pub use mock::MockSessionValidator;
