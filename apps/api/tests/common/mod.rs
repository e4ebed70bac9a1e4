//! Common test utilities for API integration tests
//!
//! Schemas and routers wired to a wiremock backend, plus helpers for
//! reading GraphQL responses.

#![allow(dead_code)]

use std::sync::Arc;

use async_graphql::Request;
use bookshelf_api::graphql::{BookshelfSchema, SchemaBuilder};
use bookshelf_backend_client::{BackendClient, Capability, PermissionEvaluator, Principal};
use bookshelf_shared_config::BackendConfig;
use serde_json::Value;

pub use bookshelf_test_utils::{
    link_header, AuthorFixture, BookAuthorFixture, BookFixture, LibraryEntryFixture,
    MockBackendServer, ReviewFixture, UserFixture,
};

/// Anonymous callers may read; only authenticated callers may write
pub struct ReadOnlyForAnonymous;

impl PermissionEvaluator for ReadOnlyForAnonymous {
    fn allows(&self, principal: Option<&Principal>, capability: Capability) -> bool {
        principal.is_some() || !capability.is_mutation()
    }
}

/// Denies a fixed set of capabilities to everyone
pub struct Deny(pub Vec<Capability>);

impl PermissionEvaluator for Deny {
    fn allows(&self, _principal: Option<&Principal>, capability: Capability) -> bool {
        !self.0.contains(&capability)
    }
}

/// Start a mock backend and a client pointed at it
pub async fn backend() -> (MockBackendServer, BackendClient) {
    let backend = MockBackendServer::start().await;
    let client = BackendClient::new(&BackendConfig::new(backend.url()))
        .expect("client should build");
    (backend, client)
}

/// Start a mock backend and a schema with no permission evaluator
pub async fn setup() -> (MockBackendServer, BookshelfSchema) {
    let (backend, client) = backend().await;
    (backend, SchemaBuilder::new(client).build())
}

/// Start a mock backend and a schema guarded by `evaluator`
pub async fn setup_with(
    evaluator: Arc<dyn PermissionEvaluator>,
) -> (MockBackendServer, BookshelfSchema) {
    let (backend, client) = backend().await;
    (backend, SchemaBuilder::new(client).evaluator(evaluator).build())
}

/// A principal as an external authenticator would attach it
pub fn principal(subject: &str) -> Principal {
    Principal::new(subject, serde_json::json!({}))
}

/// Result of one GraphQL execution, converted to JSON
pub struct Outcome {
    pub data: Value,
    pub errors: Vec<Value>,
}

impl Outcome {
    /// `extensions.code` of the first error
    pub fn error_code(&self) -> Option<&str> {
        self.errors
            .first()
            .and_then(|e| e["extensions"]["code"].as_str())
    }

    /// Message of the first error
    pub fn error_message(&self) -> Option<&str> {
        self.errors.first().and_then(|e| e["message"].as_str())
    }
}

/// Execute `query` as an anonymous caller
pub async fn execute(schema: &BookshelfSchema, query: &str) -> Outcome {
    run(schema, Request::new(query)).await
}

/// Execute `query` on behalf of `principal`
pub async fn execute_as(schema: &BookshelfSchema, query: &str, principal: Principal) -> Outcome {
    run(schema, Request::new(query).data(principal)).await
}

async fn run(schema: &BookshelfSchema, request: Request) -> Outcome {
    let response = schema.execute(request).await;
    let body = serde_json::to_value(&response).expect("response serializes");
    Outcome {
        data: body["data"].clone(),
        errors: body["errors"].as_array().cloned().unwrap_or_default(),
    }
}
