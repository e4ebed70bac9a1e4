//! GraphQL mutations for Bookshelf
//!
//! This module contains all mutation resolvers, organized by resource.

mod author;
mod book;
mod review;
mod user;

pub use author::AuthorMutation;
pub use book::{BookMutation, CreateBookInput};
pub use review::{CreateReviewInput, ReviewMutation, UpdateReviewInput};
pub use user::{SignUpInput, UpdateLibraryBooksInput, UserMutation};

use async_graphql::MergedObject;

/// Root mutation type combining all mutation domains
#[derive(MergedObject, Default)]
pub struct Mutation(AuthorMutation, BookMutation, ReviewMutation, UserMutation);
