//! Authentication
//!
//! JWT issuing/validation plus the axum extractor that gates admin routes.

pub mod extractor;
pub mod jwt;

pub use jwt::{Claims, CurrentUser, JwtConfig, JwtError, JwtService};
