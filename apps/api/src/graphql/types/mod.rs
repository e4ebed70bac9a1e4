//! GraphQL type definitions for Bookshelf
//!
//! Object types wrap backend records and resolve their relationships through
//! the [`BackendClient`](bookshelf_backend_client::BackendClient) in schema data.

mod author;
mod book;
mod enums;
mod page;
mod review;
mod scalars;
mod search;
mod user;

pub use author::Author;
pub use book::Book;
pub use enums::{AuthorOrderBy, BookOrderBy, Genre, LibraryOrderBy, ReviewOrderBy, SearchOrderBy};
pub use page::{Authors, Books, PageInfo, Reviews};
pub use review::Review;
pub use scalars::Rating;
pub use search::{BookResult, Person};
pub use user::User;

use async_graphql::ID;
use bookshelf_backend_client::EntityId;

/// GraphQL id for a backend record id
pub(crate) fn to_id(id: &EntityId) -> ID {
    ID(id.to_string())
}

/// Backend record id for a GraphQL id
pub(crate) fn entity_id(id: &ID) -> EntityId {
    EntityId::from(id.as_str())
}
