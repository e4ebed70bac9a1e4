//! GraphQL schema builder for Bookshelf
//!
//! This module provides the schema construction for the async-graphql API.

use std::sync::Arc;

use async_graphql::{EmptySubscription, Schema};
use bookshelf_backend_client::{BackendClient, PermissionEvaluator};

use super::guards::Permissions;
use super::mutation::Mutation;
use super::query::Query;

/// The Bookshelf GraphQL schema type
pub type BookshelfSchema = Schema<Query, Mutation, EmptySubscription>;

/// Builder for constructing the GraphQL schema with required services
pub struct SchemaBuilder {
    client: BackendClient,
    evaluator: Option<Arc<dyn PermissionEvaluator>>,
}

impl SchemaBuilder {
    /// Create a new schema builder around a backend client
    pub fn new(client: BackendClient) -> Self {
        Self {
            client,
            evaluator: None,
        }
    }

    /// Set the permission evaluator consulted by capability guards
    ///
    /// If not set, every capability is allowed.
    pub fn evaluator(mut self, evaluator: Arc<dyn PermissionEvaluator>) -> Self {
        self.evaluator = Some(evaluator);
        self
    }

    /// Build the schema with all configured services
    pub fn build(self) -> BookshelfSchema {
        let mut builder = Schema::build(Query::default(), Mutation::default(), EmptySubscription)
            .data(self.client);

        if let Some(evaluator) = self.evaluator {
            builder = builder.data(Permissions::new(evaluator));
        }

        builder.finish()
    }
}

/// Create a schema that lets every request through
pub fn build_schema(client: BackendClient) -> BookshelfSchema {
    SchemaBuilder::new(client).build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use bookshelf_backend_client::AllowAll;
    use bookshelf_shared_config::BackendConfig;

    fn client() -> BackendClient {
        BackendClient::new(&BackendConfig::new("http://localhost:5000")).unwrap()
    }

    #[test]
    fn test_schema_builder_without_evaluator() {
        let builder = SchemaBuilder::new(client());
        assert!(builder.evaluator.is_none());
    }

    #[test]
    fn test_sdl_matches_resource_graph() {
        let sdl = SchemaBuilder::new(client())
            .evaluator(Arc::new(AllowAll))
            .build()
            .sdl();

        assert!(sdl.contains("scalar Rating"));
        assert!(sdl.contains("interface Person"));
        assert!(sdl.contains("union BookResult = Book | Author"));
        assert!(sdl.contains("type Author implements Person"));
        assert!(sdl.contains("ADDED_ON_DESC"));
        assert!(sdl.contains("searchPeople("));
        assert!(sdl.contains("removeBooksFromLibrary(input: UpdateLibraryBooksInput!): User!"));
    }

    #[test]
    fn test_sdl_person_implementors_and_page_defaults() {
        let sdl = build_schema(client()).sdl();

        assert!(sdl.contains("type User implements Person"));
        assert!(sdl.contains("authors(limit: Int! = 20"));
        assert!(sdl.contains("books(limit: Int! = 20"));
        assert!(sdl.contains("library(limit: Int! = 20"));
    }
}
