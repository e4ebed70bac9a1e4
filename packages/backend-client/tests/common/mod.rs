//! Shared helpers for backend client integration tests

#![allow(dead_code)]

use bookshelf_backend_client::BackendClient;
use bookshelf_shared_config::BackendConfig;

pub use bookshelf_test_utils::{
    link_header, AuthorFixture, BookAuthorFixture, BookFixture, LibraryEntryFixture,
    MockBackendServer, ReviewFixture, UserFixture,
};

/// Start a mock backend and a client pointed at it
pub async fn setup() -> (MockBackendServer, BackendClient) {
    let backend = MockBackendServer::start().await;
    let client = BackendClient::new(&BackendConfig::new(backend.url()))
        .expect("client should build");
    (backend, client)
}
