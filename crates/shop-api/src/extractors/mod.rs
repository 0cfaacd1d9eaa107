//! Axum extractors for request handling
//!
//! Custom extractors for authentication, validated bodies and path ids.

mod auth;
mod path;
mod validated;

pub use auth::AuthUser;
pub use path::IdPath;
pub use validated::ValidatedJson;
