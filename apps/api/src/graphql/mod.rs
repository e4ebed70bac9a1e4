//! GraphQL schema and resolvers for Bookshelf
//!
//! This module contains the async-graphql schema including:
//! - Query resolvers for authors, books, reviews, users and search
//! - Mutation resolvers for creating records, reviews and library changes
//! - Type definitions wrapping backend records
//! - Capability guards consulted before every field

pub mod guards;
pub mod mutation;
pub mod pagination;
pub mod query;
pub mod schema;
pub mod types;

pub use guards::{CapabilityGuard, Permissions};
pub use schema::{build_schema, BookshelfSchema, SchemaBuilder};
