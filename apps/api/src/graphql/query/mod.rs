//! GraphQL queries for Bookshelf
//!
//! This module contains all query resolvers, organized by resource.

mod author;
mod book;
mod review;
mod search;
mod user;

pub use author::AuthorQuery;
pub use book::BookQuery;
pub use review::ReviewQuery;
pub use search::SearchQuery;
pub use user::UserQuery;

use async_graphql::MergedObject;

/// Root query type combining all query domains
#[derive(MergedObject, Default)]
pub struct Query(AuthorQuery, BookQuery, ReviewQuery, UserQuery, SearchQuery);
