//! HTTP adapters - REST API implementations.
//!
//! Each area has its own `dto`, `handlers` and `routes`; [`api_router`]
//! assembles them behind the shared middleware stack.

pub mod booking;
pub mod contact;
pub mod error;
pub mod messaging;
pub mod middleware;
pub mod router;
pub mod state;
pub mod tutor;

pub use error::{ApiError, ErrorResponse};
pub use router::{api_router, RouterSettings};
pub use state::AppState;
