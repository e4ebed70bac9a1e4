//! Bookshelf API server
//!
//! Serves the GraphQL resource graph over a json-server style REST backend.

use std::net::SocketAddr;
use std::sync::Arc;

use bookshelf_api::config::Config;
use bookshelf_api::graphql::SchemaBuilder;
use bookshelf_api::middleware::TokenVerifier;
use bookshelf_api::{build_app, build_cors_layer};
use bookshelf_backend_client::{AllowAll, BackendClient};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "bookshelf_api=debug,bookshelf_backend_client=debug,tower_http=debug".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load environment variables
    dotenvy::dotenv().ok();

    // Load configuration
    let config = Config::from_env()?;

    tracing::info!(
        environment = %config.environment(),
        backend = %config.backend().base_url,
        "Starting Bookshelf API server on port {}",
        config.port
    );

    let client = BackendClient::new(config.backend())?;

    let schema = SchemaBuilder::new(client.clone())
        .evaluator(Arc::new(AllowAll))
        .build();

    let app = build_app(
        schema,
        client,
        TokenVerifier::new(&config.jwt_secret),
        build_cors_layer(&config.cors_allowed_origins),
    );

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("GraphQL endpoint ready at http://{}/graphql", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
