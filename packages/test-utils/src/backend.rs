//! Mock REST backend in the json-server dialect
//!
//! Provides a [`MockBackendServer`] answering record, list and write requests
//! the way json-server does, including the `X-Total-Count` and `Link`
//! pagination headers.

use serde_json::{json, Value};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockBuilder, MockServer, Request, ResponseTemplate};

/// Build a `Link` header value from `(rel, page)` pairs for `resource`
pub fn link_header(base_url: &str, resource: &str, relations: &[(&str, u32)]) -> String {
    relations
        .iter()
        .map(|(rel, page)| format!("<{}/{}?_page={}>; rel=\"{}\"", base_url, resource, page, rel))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Mock REST backend for testing the adapter
///
/// Wraps a [`wiremock::MockServer`] with helpers for the requests the adapter
/// issues. Query-parameter matchers are optional; list mocks without them
/// answer any query on the collection.
///
/// # Example
///
/// ```rust,ignore
/// use bookshelf_test_utils::{AuthorFixture, MockBackendServer};
///
/// #[tokio::test]
/// async fn test_authors_page() {
///     let backend = MockBackendServer::start().await;
///     let authors = vec![AuthorFixture::new(1, "Octavia E. Butler").to_json()];
///     backend.mock_page("authors", &[], authors, 1, None).await;
/// }
/// ```
pub struct MockBackendServer {
    server: MockServer,
}

impl MockBackendServer {
    /// Start a new mock backend
    pub async fn start() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    /// Get the server URL
    pub fn url(&self) -> String {
        self.server.uri()
    }

    /// Underlying wiremock server, for mocks the helpers do not cover
    pub fn server(&self) -> &MockServer {
        &self.server
    }

    fn collection(verb: &str, resource: &str, query: &[(&str, &str)]) -> MockBuilder {
        query.iter().fold(
            Mock::given(method(verb)).and(path(format!("/{}", resource))),
            |mock, (key, value)| mock.and(query_param(*key, *value)),
        )
    }

    fn record_path(resource: &str, id: &Value) -> String {
        match id {
            Value::String(s) => format!("/{}/{}", resource, s),
            other => format!("/{}/{}", resource, other),
        }
    }

    /// Serve a single record at `/{resource}/{record.id}`
    pub async fn mock_record(&self, resource: &str, record: Value) {
        Mock::given(method("GET"))
            .and(path(Self::record_path(resource, &record["id"])))
            .respond_with(ResponseTemplate::new(200).set_body_json(record))
            .mount(&self.server)
            .await;
    }

    /// Answer `/{resource}/{id}` with json-server's empty 404 body
    pub async fn mock_record_not_found(&self, resource: &str, id: i64) {
        Mock::given(method("GET"))
            .and(path(format!("/{}/{}", resource, id)))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({})))
            .mount(&self.server)
            .await;
    }

    /// Serve an unpaginated list on `/{resource}` matching the query parameters
    pub async fn mock_list(&self, resource: &str, query: &[(&str, &str)], items: Vec<Value>) {
        Self::collection("GET", resource, query)
            .respond_with(ResponseTemplate::new(200).set_body_json(items))
            .mount(&self.server)
            .await;
    }

    /// Serve a list that must be requested exactly `times` times
    pub async fn mock_list_expect(
        &self,
        resource: &str,
        query: &[(&str, &str)],
        items: Vec<Value>,
        times: u64,
    ) {
        Self::collection("GET", resource, query)
            .respond_with(ResponseTemplate::new(200).set_body_json(items))
            .expect(times)
            .mount(&self.server)
            .await;
    }

    /// Serve one page with pagination headers
    pub async fn mock_page(
        &self,
        resource: &str,
        query: &[(&str, &str)],
        items: Vec<Value>,
        total_count: u64,
        link: Option<String>,
    ) {
        let mut response = ResponseTemplate::new(200)
            .insert_header("X-Total-Count", total_count.to_string().as_str())
            .set_body_json(items);
        if let Some(link) = link {
            response = response.insert_header("Link", link.as_str());
        }

        Self::collection("GET", resource, query)
            .respond_with(response)
            .mount(&self.server)
            .await;
    }

    /// Accept POSTs to `/{resource}` and answer with `stored`
    pub async fn mock_create(&self, resource: &str, stored: Value) {
        Mock::given(method("POST"))
            .and(path(format!("/{}", resource)))
            .respond_with(ResponseTemplate::new(201).set_body_json(stored))
            .mount(&self.server)
            .await;
    }

    /// Accept exactly `times` POSTs to `/{resource}`
    pub async fn mock_create_expect(&self, resource: &str, stored: Value, times: u64) {
        Mock::given(method("POST"))
            .and(path(format!("/{}", resource)))
            .respond_with(ResponseTemplate::new(201).set_body_json(stored))
            .expect(times)
            .mount(&self.server)
            .await;
    }

    /// Accept a PATCH of `/{resource}/{stored.id}` and answer with `stored`
    pub async fn mock_update(&self, resource: &str, stored: Value) {
        Mock::given(method("PATCH"))
            .and(path(Self::record_path(resource, &stored["id"])))
            .respond_with(ResponseTemplate::new(200).set_body_json(stored))
            .mount(&self.server)
            .await;
    }

    /// Accept exactly `times` DELETEs of `/{resource}/{id}`
    pub async fn mock_delete(&self, resource: &str, id: i64, times: u64) {
        Mock::given(method("DELETE"))
            .and(path(format!("/{}/{}", resource, id)))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .expect(times)
            .mount(&self.server)
            .await;
    }

    /// Answer every request on `/{resource}` with a 500
    pub async fn mock_server_error(&self, resource: &str, error_message: &str) {
        Mock::given(path(format!("/{}", resource)))
            .respond_with(ResponseTemplate::new(500).set_body_json(json!({
                "error": error_message
            })))
            .mount(&self.server)
            .await;
    }

    /// Answer the root path, used as a readiness probe
    pub async fn mock_root(&self) {
        Mock::given(method("GET"))
            .and(path("/"))
            .respond_with(ResponseTemplate::new(200).set_body_string("OK"))
            .mount(&self.server)
            .await;
    }

    /// Requests received so far with the given method
    pub async fn requests(&self, verb: &str) -> Vec<Request> {
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .into_iter()
            .filter(|request| request.method.to_string().eq_ignore_ascii_case(verb))
            .collect()
    }

    /// JSON bodies of the POSTs received on `/{resource}`
    pub async fn posted_bodies(&self, resource: &str) -> Vec<Value> {
        let wanted = format!("/{}", resource);
        self.requests("POST")
            .await
            .into_iter()
            .filter(|request| request.url.path() == wanted)
            .filter_map(|request| serde_json::from_slice(&request.body).ok())
            .collect()
    }
}
