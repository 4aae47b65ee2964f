//! # Hubdash API
//!
//! HTTP handlers, extractors, middleware, and the router.

pub mod error;
pub mod extract;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod state;

pub use error::ApiError;
pub use routes::build_router;
pub use state::AppState;
