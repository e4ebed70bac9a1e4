//! GraphQL HTTP route handlers
//!
//! - `POST /graphql` - execute a query or mutation
//! - `GET /graphql/playground` - interactive playground

use async_graphql::http::{playground_source, GraphQLPlaygroundConfig};
use async_graphql_axum::{GraphQLRequest, GraphQLResponse};
use axum::{
    extract::State,
    response::{Html, IntoResponse},
    routing::{get, post},
    Router,
};

use crate::graphql::BookshelfSchema;
use crate::middleware::MaybePrincipal;

/// Shared state for the GraphQL routes
#[derive(Clone)]
pub struct GraphQLState {
    pub schema: BookshelfSchema,
}

impl GraphQLState {
    pub fn new(schema: BookshelfSchema) -> Self {
        Self { schema }
    }
}

/// Create the GraphQL router, meant to be nested under `/graphql`
pub fn graphql_router(state: GraphQLState) -> Router {
    Router::new()
        .route("/", post(graphql_handler))
        .route("/playground", get(graphql_playground))
        .with_state(state)
}

/// GraphQL handler
///
/// Attaches the verified principal, if any, to the request data so that
/// capability guards can see who is asking.
async fn graphql_handler(
    State(state): State<GraphQLState>,
    MaybePrincipal(principal): MaybePrincipal,
    req: GraphQLRequest,
) -> GraphQLResponse {
    let mut request = req.into_inner();

    if let Some(principal) = principal {
        tracing::debug!(subject = %principal.subject, "GraphQL request authenticated");
        request = request.data(principal);
    }

    state.schema.execute(request).await.into()
}

/// GraphQL Playground handler
async fn graphql_playground() -> impl IntoResponse {
    Html(playground_source(GraphQLPlaygroundConfig::new("/graphql")))
}
