//! Bookshelf adapter core
//!
//! Maps the Bookshelf resource graph (authors, books, reviews, users and
//! their libraries) onto a page-oriented REST backend in the json-server
//! dialect:
//! - Pagination codec: page requests to query strings, response headers to page info
//! - Resource gateway: per-resource reads and writes, with 404 normalized to `None`
//! - Uniqueness enforcer: declarative pre-write existence checks
//! - Relationship resolver: join records projected onto related entities
//!
//! # Example
//!
//! ```rust,no_run
//! use bookshelf_backend_client::{BackendClient, EntityId, PageRequest};
//! use bookshelf_shared_config::BackendConfig;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = BackendClient::new(&BackendConfig::new("http://localhost:5000"))?;
//!
//! let books = client.books(PageRequest::new().with_limit(10)).await?;
//! for book in &books.items {
//!     println!("{}", book.title);
//! }
//!
//! if let Some(author) = client.author(&EntityId::from("1")).await? {
//!     println!("{}", author.name);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Environment Variables
//!
//! - `REST_API_BASE_URL`: backend base URL (required)
//! - `REST_API_TIMEOUT_SECS`: request timeout, unset for none
//! - `REST_API_USER_AGENT`: user agent sent to the backend

pub mod capability;
pub mod client;
mod error;
pub mod models;
pub mod pagination;
pub mod relationships;
pub mod resources;
pub mod uniqueness;

pub use capability::{AllowAll, Capability, PermissionEvaluator, Principal};
pub use client::BackendClient;
pub use error::{BackendError, BackendResult, ErrorKind};
pub use models::{
    Author, Book, BookAuthor, BookResult, EntityId, Genre, LibraryEntry, LibraryUpdate,
    NewAuthor, NewBook, NewReview, NewUser, Person, Review, ReviewUpdate, User,
};
pub use pagination::{Filters, OrderBy, Page, PageInfo, PageRequest, SortDirection};
pub use relationships::Relationship;
pub use resources::{SearchQuery, SIGN_UP_RULES};
pub use uniqueness::{UniqueInput, UniqueRule};
