//! HTTP-level tests for the assembled router

mod common;

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use bookshelf_api::{build_app, build_cors_layer, graphql::SchemaBuilder, middleware::TokenVerifier};
use common::{backend, AuthorFixture, MockBackendServer, ReadOnlyForAnonymous};
use jsonwebtoken::{encode, EncodingKey, Header};
use serde_json::{json, Value};
use tower::ServiceExt;

const SECRET: &str = "test-secret-that-is-long-enough-for-prod";

async fn app() -> (MockBackendServer, Router) {
    let (backend, client) = backend().await;
    let schema = SchemaBuilder::new(client.clone())
        .evaluator(Arc::new(ReadOnlyForAnonymous))
        .build();
    let router = build_app(
        schema,
        client,
        TokenVerifier::new(SECRET),
        build_cors_layer(&[]),
    );
    (backend, router)
}

fn token(secret: &str) -> String {
    let exp = chrono::Utc::now().timestamp() as u64 + 3600;
    encode(
        &Header::default(),
        &json!({ "sub": "reader-1", "exp": exp }),
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .unwrap()
}

fn graphql_post(query: &str, bearer: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri("/graphql")
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = bearer {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    builder
        .body(Body::from(json!({ "query": query }).to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

async fn json_body(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_health_endpoints() {
    let (_backend, app) = app().await;

    let health = app.clone().oneshot(get("/health")).await.unwrap();
    assert_eq!(health.status(), StatusCode::OK);

    let live = app.oneshot(get("/health/live")).await.unwrap();
    assert_eq!(live.status(), StatusCode::OK);
    assert_eq!(json_body(live).await["status"], "alive");
}

#[tokio::test]
async fn test_readiness_follows_backend() {
    let (backend, app) = app().await;

    let down = app.clone().oneshot(get("/health/ready")).await.unwrap();
    assert_eq!(down.status(), StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(json_body(down).await["services"][0]["status"], "unhealthy");

    backend.mock_root().await;
    let up = app.oneshot(get("/health/ready")).await.unwrap();
    assert_eq!(up.status(), StatusCode::OK);
    assert_eq!(json_body(up).await["status"], "healthy");
}

#[tokio::test]
async fn test_valid_token_authorizes_mutation() {
    let (backend, app) = app().await;
    backend
        .mock_create("authors", AuthorFixture::new(3, "Ursula K. Le Guin").to_json())
        .await;

    let response = app
        .oneshot(graphql_post(
            r#"mutation { createAuthor(name: "Ursula K. Le Guin") { id } }"#,
            Some(&token(SECRET)),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert!(body.get("errors").is_none(), "{}", body);
    assert_eq!(body["data"]["createAuthor"]["id"], "3");
}

#[tokio::test]
async fn test_invalid_token_is_anonymous() {
    let (backend, app) = app().await;
    backend.mock_create_expect("authors", json!({}), 0).await;

    let response = app
        .oneshot(graphql_post(
            r#"mutation { createAuthor(name: "Ursula K. Le Guin") { id } }"#,
            Some(&token("some-other-secret-of-sufficient-length")),
        ))
        .await
        .unwrap();

    let body = json_body(response).await;
    assert_eq!(body["errors"][0]["extensions"]["code"], "UNAUTHENTICATED");
}

#[tokio::test]
async fn test_anonymous_read_is_allowed() {
    let (backend, app) = app().await;
    backend
        .mock_record("authors", AuthorFixture::new(1, "Octavia E. Butler").to_json())
        .await;

    let response = app
        .oneshot(graphql_post(r#"{ author(id: "1") { name } }"#, None))
        .await
        .unwrap();

    let body = json_body(response).await;
    assert_eq!(body["data"]["author"]["name"], "Octavia E. Butler");
}

#[tokio::test]
async fn test_playground_served() {
    let (_backend, app) = app().await;

    let response = app.oneshot(get("/graphql/playground")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let content_type = response.headers()[header::CONTENT_TYPE].to_str().unwrap();
    assert!(content_type.starts_with("text/html"));
}

#[tokio::test]
async fn test_unknown_route_is_json_not_found() {
    let (_backend, app) = app().await;

    let response = app.oneshot(get("/nowhere")).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(json_body(response).await["code"], "NOT_FOUND");
}
