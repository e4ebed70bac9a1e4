//! Middleware components for the Bookshelf API
//!
//! - `MaybePrincipal`: optional authentication, `None` when no valid token is sent
//! - `TokenVerifier`: HS256 bearer token verification

pub mod auth;

pub use auth::{extract_bearer_token, MaybePrincipal, TokenVerifier};
