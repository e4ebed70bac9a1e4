//! Bookshelf API library
//!
//! GraphQL front for the json-server style REST backend. This module exposes
//! the API components for use in the binary and in integration tests.

pub mod config;
pub mod error;
pub mod graphql;
pub mod middleware;
pub mod routes;

use axum::{
    http::{header, HeaderValue, Method, Uri},
    Extension, Router,
};
use bookshelf_backend_client::BackendClient;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::graphql::BookshelfSchema;
use crate::middleware::TokenVerifier;
use crate::routes::{graphql_router, health_router, GraphQLState, HealthState};

// Re-export commonly used types
pub use error::{ApiError, ApiResult, ErrorResponse};

/// Build the CORS layer from the configured origins
///
/// An empty list allows no cross-origin requests.
pub fn build_cors_layer(origins: &[String]) -> CorsLayer {
    let allowed_origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| {
            origin.parse().ok().or_else(|| {
                tracing::warn!("Invalid CORS origin '{}', skipping", origin);
                None
            })
        })
        .collect();

    if allowed_origins.is_empty() {
        tracing::warn!("No CORS origins configured, cross-origin requests will be rejected");
        return CorsLayer::new();
    }

    tracing::info!(
        "CORS configured with {} allowed origin(s): {:?}",
        allowed_origins.len(),
        origins
    );
    CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([
            header::AUTHORIZATION,
            header::CONTENT_TYPE,
            header::ACCEPT,
            header::ORIGIN,
        ])
        .allow_credentials(true)
        .max_age(std::time::Duration::from_secs(3600))
}

/// Assemble the application router
///
/// - `POST /graphql`, `GET /graphql/playground`
/// - `GET /health`, `GET /health/live`, `GET /health/ready`
pub fn build_app(
    schema: BookshelfSchema,
    client: BackendClient,
    verifier: TokenVerifier,
    cors: CorsLayer,
) -> Router {
    Router::new()
        .nest("/graphql", graphql_router(GraphQLState::new(schema)))
        .nest("/health", health_router(HealthState::new(client)))
        .fallback(route_not_found)
        .layer(Extension(verifier))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

async fn route_not_found(uri: Uri) -> ApiError {
    ApiError::not_found("route", uri.path())
}
