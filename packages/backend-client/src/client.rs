//! Resource gateway primitives over the REST backend
//!
//! Every public operation here is a single HTTP round trip. There is no
//! caching and no retry: transport failures surface to the caller as-is.

use std::fmt;
use std::time::Duration;

use bookshelf_shared_config::BackendConfig;
use reqwest::header::HeaderMap;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, instrument};

use crate::error::{BackendError, BackendResult};
use crate::models::EntityId;
use crate::pagination::{decode_page_info, encode_filter_query, encode_query, Filters, Page, PageRequest};

/// Maximum error body size kept in [`BackendError::Status`]
const MAX_ERROR_BODY_SIZE: usize = 1000;

/// Client for the page-oriented REST backend
#[derive(Clone)]
pub struct BackendClient {
    http_client: Client,
    config: BackendConfig,
}

impl fmt::Debug for BackendClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BackendClient")
            .field("base_url", &self.config.base_url)
            .field("timeout_secs", &self.config.timeout_secs)
            .finish()
    }
}

impl BackendClient {
    /// Create a new backend client from configuration
    ///
    /// No request timeout is applied unless the configuration sets one.
    pub fn new(config: &BackendConfig) -> BackendResult<Self> {
        let mut builder = Client::builder()
            .pool_max_idle_per_host(10)
            .pool_idle_timeout(Duration::from_secs(90))
            .user_agent(config.user_agent.clone());

        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        Ok(Self {
            http_client: builder.build()?,
            config: config.clone(),
        })
    }

    /// Create a client with a custom HTTP client (for testing)
    pub fn with_client(config: &BackendConfig, http_client: Client) -> Self {
        Self {
            http_client,
            config: config.clone(),
        }
    }

    /// Get the configuration
    pub fn config(&self) -> &BackendConfig {
        &self.config
    }

    /// Truncate error body to prevent memory exhaustion
    fn truncate_error_body(body: String) -> String {
        if body.len() <= MAX_ERROR_BODY_SIZE {
            return body;
        }

        let truncate_at = body
            .char_indices()
            .map(|(i, _)| i)
            .take_while(|i| *i <= MAX_ERROR_BODY_SIZE)
            .last()
            .unwrap_or(0);

        format!("{}... (truncated)", &body[..truncate_at])
    }

    fn record_path(resource: &str, id: &EntityId) -> String {
        let id: String = url::form_urlencoded::byte_serialize(id.as_str().as_bytes()).collect();
        format!("{}/{}", resource, id)
    }

    /// Send a request, mapping 404 to `NotFound` and any other non-2xx status to `Status`
    async fn send(&self, request: RequestBuilder, path: &str) -> BackendResult<Response> {
        let response = request.send().await?;
        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            return Err(BackendError::NotFound {
                path: path.to_string(),
            });
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(BackendError::Status {
                status: status.as_u16(),
                path: path.to_string(),
                body: Self::truncate_error_body(body),
            });
        }

        Ok(response)
    }

    async fn read_json<T: DeserializeOwned>(response: Response) -> BackendResult<T> {
        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    async fn get_with_headers<T: DeserializeOwned>(
        &self,
        path: &str,
    ) -> BackendResult<(T, HeaderMap)> {
        debug!(path, "GET");
        let request = self.http_client.get(self.config.resource_url(path));
        let response = self.send(request, path).await?;
        let headers = response.headers().clone();
        let body = Self::read_json(response).await?;
        Ok((body, headers))
    }

    /// GET a path relative to the base URL and decode the JSON body
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> BackendResult<T> {
        self.get_with_headers(path).await.map(|(body, _)| body)
    }

    /// Fetch a single record.
    ///
    /// A 404 from the backend is returned as `Ok(None)`, never as an error.
    #[instrument(skip(self))]
    pub async fn fetch_by_id<T: DeserializeOwned>(
        &self,
        resource: &str,
        id: &EntityId,
    ) -> BackendResult<Option<T>> {
        match self.get(&Self::record_path(resource, id)).await {
            Ok(record) => Ok(Some(record)),
            Err(BackendError::NotFound { path }) => {
                debug!(path = %path, "Record not found");
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    /// Fetch one page of a collection, rebuilding page info from the response headers
    ///
    /// # Errors
    /// - `BackendError::InvalidArgument` if the page size exceeds the maximum (no request is sent)
    /// - Transport errors from the backend call
    #[instrument(skip(self))]
    pub async fn fetch_page<T: DeserializeOwned>(
        &self,
        resource: &str,
        request: &PageRequest,
        filters: &Filters,
    ) -> BackendResult<Page<T>> {
        let query = encode_query(request, filters)?;
        let path = format!("{}{}", resource, query);

        let (items, headers) = self.get_with_headers::<Vec<T>>(&path).await?;
        let page_info = decode_page_info(&headers, request);

        debug!(
            resource,
            item_count = items.len(),
            total_count = page_info.as_ref().map(|info| info.total_count),
            "Fetched page"
        );

        Ok(Page { items, page_info })
    }

    /// Fetch every record of a collection matching the filters, unpaginated
    #[instrument(skip(self))]
    pub async fn find<T: DeserializeOwned>(
        &self,
        resource: &str,
        filters: &Filters,
    ) -> BackendResult<Vec<T>> {
        let path = format!("{}{}", resource, encode_filter_query(filters));
        self.get(&path).await
    }

    /// True when at least one record matches the filters
    pub async fn exists(&self, resource: &str, filters: &Filters) -> BackendResult<bool> {
        let matches = self.find::<serde_json::Value>(resource, filters).await?;
        Ok(!matches.is_empty())
    }

    /// POST a new record and return the stored record
    #[instrument(skip(self, body))]
    pub async fn create<B, T>(&self, resource: &str, body: &B) -> BackendResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        debug!(resource, "POST");
        let request = self
            .http_client
            .post(self.config.resource_url(resource))
            .json(body);
        let response = self.send(request, resource).await?;
        Self::read_json(response).await
    }

    /// PATCH an existing record and return the stored record
    #[instrument(skip(self, body))]
    pub async fn update<B, T>(&self, resource: &str, id: &EntityId, body: &B) -> BackendResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let path = Self::record_path(resource, id);
        debug!(path = %path, "PATCH");
        let request = self
            .http_client
            .patch(self.config.resource_url(&path))
            .json(body);
        let response = self.send(request, &path).await?;
        Self::read_json(response).await
    }

    /// DELETE a record, returning its id rather than the deleted body
    #[instrument(skip(self))]
    pub async fn delete(&self, resource: &str, id: &EntityId) -> BackendResult<EntityId> {
        let path = Self::record_path(resource, id);
        debug!(path = %path, "DELETE");
        let request = self.http_client.delete(self.config.resource_url(&path));
        self.send(request, &path).await?;
        Ok(id.clone())
    }

    /// Check that the backend answers on its base URL
    pub async fn ping(&self) -> BackendResult<()> {
        let request = self.http_client.get(self.config.resource_url(""));
        self.send(request, "/").await?;
        Ok(())
    }
}
