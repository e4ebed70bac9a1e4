//! Shared test utilities for the Bookshelf workspace
//!
//! Provides a mock json-server style backend so the adapter core and the
//! GraphQL API can be tested without a running REST store.
//!
//! # Mock Services
//!
//! - [`MockBackendServer`] - Mock REST backend serving records, pages and writes
//!
//! # Example
//!
//! ```rust,ignore
//! use bookshelf_test_utils::{BookFixture, MockBackendServer};
//!
//! #[tokio::test]
//! async fn test_with_mock_backend() {
//!     let backend = MockBackendServer::start().await;
//!     backend.mock_record("books", BookFixture::new(1, "Dune").to_json()).await;
//!
//!     // Use backend.url() as REST_API_BASE_URL
//! }
//! ```

mod backend;
mod fixtures;

pub use backend::{link_header, MockBackendServer};
pub use fixtures::{
    AuthorFixture, BookAuthorFixture, BookFixture, LibraryEntryFixture, ReviewFixture,
    UserFixture,
};
