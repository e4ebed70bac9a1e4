//! Pagination codec
//!
//! Translates a [`PageRequest`] into the backend's query-string dialect
//! (`_sort`, `_order`, `_limit`, `_page` followed by plain field filters) and
//! rebuilds [`PageInfo`] from the `X-Total-Count` and `Link` response headers.

use std::collections::HashMap;

use reqwest::header::{HeaderMap, LINK};
use tracing::warn;

use crate::error::{BackendError, BackendResult};

/// Page size used when the caller does not ask for one
pub const DEFAULT_LIMIT: u32 = 20;

/// Largest page size the adapter will forward to the backend
pub const MAX_LIMIT: u32 = 100;

/// Header carrying the total number of records matching a list query
pub const TOTAL_COUNT_HEADER: &str = "x-total-count";

/// Requested ordering, parsed from a `FIELD_DIRECTION` token such as `title_asc`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderBy {
    field: Option<String>,
    direction: Option<String>,
}

impl OrderBy {
    /// Parse a `FIELD_DIRECTION` token, splitting on the last underscore.
    ///
    /// `createdAt_desc` yields field `createdAt` and direction `desc`. A token
    /// without an underscore is taken as a bare field. Empty halves are dropped.
    pub fn parse(token: &str) -> Self {
        let (field, direction) = match token.rsplit_once('_') {
            Some((field, direction)) => (field, Some(direction)),
            None => (token, None),
        };

        Self {
            field: Some(field).filter(|f| !f.is_empty()).map(str::to_string),
            direction: direction.filter(|d| !d.is_empty()).map(str::to_string),
        }
    }

    /// Order by `field` in the given direction
    pub fn new(field: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            field: Some(field.into()),
            direction: Some(direction.as_str().to_string()),
        }
    }

    /// Sort field, if any
    pub fn field(&self) -> Option<&str> {
        self.field.as_deref()
    }

    /// Direction token, if any
    pub fn direction(&self) -> Option<&str> {
        self.direction.as_deref()
    }
}

impl From<&str> for OrderBy {
    fn from(token: &str) -> Self {
        Self::parse(token)
    }
}

/// Sort direction understood by the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    /// Backend token for this direction
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }
}

/// Ordered field filters appended to a list query as `key=value` pairs
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filters(Vec<(String, String)>);

impl Filters {
    /// Create an empty filter set
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a filter, keeping insertion order
    pub fn with(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.push(key, value);
        self
    }

    /// Append a filter in place
    pub fn push(&mut self, key: impl Into<String>, value: impl ToString) {
        self.0.push((key.into(), value.to_string()));
    }

    /// Iterate the filters in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// True when no filter has been added
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Page selection for a list query
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageRequest {
    /// Page size; zero or absent means [`DEFAULT_LIMIT`]
    pub limit: Option<u32>,
    /// 1-based page number; zero or absent means the first page
    pub page: Option<u32>,
    /// Requested ordering
    pub order_by: Option<OrderBy>,
}

impl PageRequest {
    /// Create an empty page request (first page, default size, backend order)
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the page size
    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Set the page number
    pub fn with_page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    /// Set the ordering
    pub fn with_order_by(mut self, order_by: impl Into<OrderBy>) -> Self {
        self.order_by = Some(order_by.into());
        self
    }

    /// Fill in an ordering when the caller did not pick one
    pub fn or_order_by(mut self, default: &str) -> Self {
        if self.order_by.is_none() {
            self.order_by = Some(OrderBy::parse(default));
        }
        self
    }

    fn requested_limit(&self) -> Option<u32> {
        self.limit.filter(|limit| *limit > 0)
    }

    /// Page size that will be sent to the backend
    pub fn effective_limit(&self) -> u32 {
        self.requested_limit().unwrap_or(DEFAULT_LIMIT)
    }

    /// Page number that will be sent to the backend
    pub fn effective_page(&self) -> u32 {
        self.page.filter(|page| *page > 0).unwrap_or(1)
    }

    /// Reject page sizes the backend must never see
    pub fn validate(&self) -> BackendResult<()> {
        match self.requested_limit() {
            Some(limit) if limit > MAX_LIMIT => Err(BackendError::invalid_argument(format!(
                "Maximum of {} results per page",
                MAX_LIMIT
            ))),
            _ => Ok(()),
        }
    }
}

/// Pagination metadata rebuilt from response headers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageInfo {
    pub has_next_page: bool,
    pub has_prev_page: bool,
    pub page: u32,
    pub per_page: Option<u32>,
    pub total_count: u64,
}

/// One page of records
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    /// Records in backend order
    pub items: Vec<T>,
    /// Absent when the backend sent no total count
    pub page_info: Option<PageInfo>,
}

impl<T> Page<T> {
    /// Convert every item, keeping order and page info
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            page_info: self.page_info,
        }
    }
}

fn encode_component(raw: &str) -> String {
    url::form_urlencoded::byte_serialize(raw.as_bytes()).collect()
}

/// Build the query string for a list request.
///
/// Parameters are emitted in a fixed order: `_sort`, `_order`, `_limit`,
/// `_page`, then every filter in insertion order. The result starts with `?`,
/// or is empty when there is nothing to send.
///
/// # Errors
/// - `BackendError::InvalidArgument` if the limit exceeds [`MAX_LIMIT`]
pub fn encode_query(request: &PageRequest, filters: &Filters) -> BackendResult<String> {
    request.validate()?;

    let mut params = Vec::new();

    if let Some(order_by) = &request.order_by {
        if let Some(field) = order_by.field() {
            params.push(format!("_sort={}", encode_component(field)));
        }
        if let Some(direction) = order_by.direction() {
            params.push(format!("_order={}", encode_component(direction)));
        }
    }

    params.push(format!("_limit={}", request.effective_limit()));
    params.push(format!("_page={}", request.effective_page()));

    params.extend(encode_filters(filters));

    if params.is_empty() {
        return Ok(String::new());
    }
    Ok(format!("?{}", params.join("&")))
}

/// Build a query string from filters alone (no pagination parameters)
pub fn encode_filter_query(filters: &Filters) -> String {
    let params: Vec<String> = encode_filters(filters).collect();
    if params.is_empty() {
        String::new()
    } else {
        format!("?{}", params.join("&"))
    }
}

fn encode_filters(filters: &Filters) -> impl Iterator<Item = String> + '_ {
    filters
        .iter()
        .map(|(key, value)| format!("{}={}", encode_component(key), encode_component(value)))
}

/// Rebuild page info from list-response headers.
///
/// Returns `None` unless the backend sent a usable total count. Link relations
/// `next` and `prev` set the corresponding flags; a missing `Link` header
/// leaves both false. Relations split over repeated `Link` headers are merged.
pub fn decode_page_info(headers: &HeaderMap, request: &PageRequest) -> Option<PageInfo> {
    let raw_total = headers.get(TOTAL_COUNT_HEADER)?;

    let total_count = match raw_total
        .to_str()
        .ok()
        .and_then(|s| s.trim().parse::<u64>().ok())
    {
        Some(total) => total,
        None => {
            warn!(header = ?raw_total, "Ignoring unparseable total-count header");
            return None;
        }
    };

    let mut relations = HashMap::new();
    for value in headers.get_all(LINK) {
        let Ok(value) = value.to_str() else {
            continue;
        };
        for (relation, target) in parse_link_header(value) {
            relations.entry(relation).or_insert(target);
        }
    }

    Some(PageInfo {
        has_next_page: relations.contains_key("next"),
        has_prev_page: relations.contains_key("prev"),
        page: request.effective_page(),
        per_page: request.requested_limit(),
        total_count,
    })
}

/// Parse an RFC 5988 `Link` header into a map of relation name to target URL.
///
/// A link-value with several space-separated relations is registered under
/// each of them. The first target seen for a relation wins.
pub fn parse_link_header(header: &str) -> HashMap<String, String> {
    let mut links = HashMap::new();
    let mut rest = header;

    while let Some(start) = rest.find('<') {
        let after_open = &rest[start + 1..];
        let Some(end) = after_open.find('>') else {
            break;
        };
        let target = after_open[..end].trim();
        let tail = &after_open[end + 1..];
        let params_end = tail.find('<').unwrap_or(tail.len());

        for param in tail[..params_end].split(';') {
            let Some((name, value)) = param.split_once('=') else {
                continue;
            };
            if !name.trim().eq_ignore_ascii_case("rel") {
                continue;
            }
            let value = value.trim().trim_end_matches(',').trim().trim_matches('"');
            for relation in value.split_whitespace() {
                links
                    .entry(relation.to_ascii_lowercase())
                    .or_insert_with(|| target.to_string());
            }
        }

        rest = &tail[params_end..];
    }

    links
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::HeaderValue;
    use rstest::rstest;

    fn headers(pairs: &[(&'static str, &'static str)]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for (name, value) in pairs {
            map.insert(*name, HeaderValue::from_static(value));
        }
        map
    }

    #[rstest]
    #[case("title_asc", Some("title"), Some("asc"))]
    #[case("createdAt_desc", Some("createdAt"), Some("desc"))]
    #[case("added_on_desc", Some("added_on"), Some("desc"))]
    #[case("name", Some("name"), None)]
    #[case("_desc", None, Some("desc"))]
    #[case("title_", Some("title"), None)]
    fn test_order_by_parse(
        #[case] token: &str,
        #[case] field: Option<&str>,
        #[case] direction: Option<&str>,
    ) {
        let order_by = OrderBy::parse(token);
        assert_eq!(order_by.field(), field);
        assert_eq!(order_by.direction(), direction);
    }

    #[test]
    fn test_encode_query_orders_sort_before_pagination() {
        let request = PageRequest::new().with_order_by("title_asc");
        let query = encode_query(&request, &Filters::new()).unwrap();
        assert_eq!(query, "?_sort=title&_order=asc&_limit=20&_page=1");
    }

    #[test]
    fn test_encode_query_defaults() {
        let query = encode_query(&PageRequest::new(), &Filters::new()).unwrap();
        assert_eq!(query, "?_limit=20&_page=1");
    }

    #[test]
    fn test_encode_query_zero_values_fall_back_to_defaults() {
        let request = PageRequest::new().with_limit(0).with_page(0);
        let query = encode_query(&request, &Filters::new()).unwrap();
        assert_eq!(query, "?_limit=20&_page=1");
    }

    #[test]
    fn test_encode_query_appends_filters_in_order() {
        let request = PageRequest::new()
            .with_limit(5)
            .with_page(3)
            .with_order_by("createdAt_desc");
        let filters = Filters::new().with("_expand", "book").with("userId", 7);
        let query = encode_query(&request, &filters).unwrap();
        assert_eq!(
            query,
            "?_sort=createdAt&_order=desc&_limit=5&_page=3&_expand=book&userId=7"
        );
    }

    #[test]
    fn test_encode_query_escapes_filter_values() {
        let filters = Filters::new().with("email", "ada lovelace@example.com");
        let query = encode_query(&PageRequest::new(), &filters).unwrap();
        assert!(query.ends_with("&email=ada+lovelace%40example.com"));
    }

    #[rstest]
    #[case(1)]
    #[case(20)]
    #[case(99)]
    #[case(100)]
    fn test_encode_query_accepts_limits_up_to_max(#[case] limit: u32) {
        let request = PageRequest::new().with_limit(limit);
        assert!(encode_query(&request, &Filters::new()).is_ok());
    }

    #[rstest]
    #[case(101)]
    #[case(500)]
    #[case(u32::MAX)]
    fn test_encode_query_rejects_limits_over_max(#[case] limit: u32) {
        let request = PageRequest::new().with_limit(limit);
        let err = encode_query(&request, &Filters::new()).unwrap_err();
        assert_eq!(err.kind(), crate::ErrorKind::InvalidArgument);
    }

    #[test]
    fn test_encode_filter_query() {
        assert_eq!(encode_filter_query(&Filters::new()), "");
        assert_eq!(
            encode_filter_query(&Filters::new().with("bookId", 1).with("userId", 2)),
            "?bookId=1&userId=2"
        );
    }

    #[test]
    fn test_decode_page_info_requires_total_count() {
        let map = headers(&[("link", "<http://x/books?_page=2>; rel=\"next\"")]);
        assert_eq!(decode_page_info(&map, &PageRequest::new()), None);
    }

    #[test]
    fn test_decode_page_info_without_link_header() {
        let map = headers(&[("x-total-count", "42")]);
        let request = PageRequest::new().with_limit(10);
        let info = decode_page_info(&map, &request).unwrap();
        assert_eq!(
            info,
            PageInfo {
                has_next_page: false,
                has_prev_page: false,
                page: 1,
                per_page: Some(10),
                total_count: 42,
            }
        );
    }

    #[test]
    fn test_decode_page_info_reads_link_relations() {
        let map = headers(&[
            ("x-total-count", "60"),
            (
                "link",
                "<http://x/books?_page=1&_limit=20>; rel=\"first\", \
                 <http://x/books?_page=1&_limit=20>; rel=\"prev\", \
                 <http://x/books?_page=3&_limit=20>; rel=\"next\", \
                 <http://x/books?_page=3&_limit=20>; rel=\"last\"",
            ),
        ]);
        let request = PageRequest::new().with_limit(20).with_page(2);
        let info = decode_page_info(&map, &request).unwrap();
        assert!(info.has_next_page);
        assert!(info.has_prev_page);
        assert_eq!(info.page, 2);
        assert_eq!(info.total_count, 60);
    }

    #[test]
    fn test_decode_page_info_merges_repeated_link_headers() {
        let mut map = headers(&[("x-total-count", "60")]);
        map.append(LINK, HeaderValue::from_static("<http://x/books?_page=1>; rel=\"prev\""));
        map.append(LINK, HeaderValue::from_static("<http://x/books?_page=3>; rel=\"next\""));

        let info = decode_page_info(&map, &PageRequest::new().with_page(2)).unwrap();
        assert!(info.has_prev_page);
        assert!(info.has_next_page);
    }

    #[test]
    fn test_decode_page_info_last_page_has_no_next() {
        let map = headers(&[
            ("x-total-count", "60"),
            (
                "link",
                "<http://x/books?_page=2>; rel=\"prev\", <http://x/books?_page=1>; rel=\"first\"",
            ),
        ]);
        let info = decode_page_info(&map, &PageRequest::new().with_page(3)).unwrap();
        assert!(!info.has_next_page);
        assert!(info.has_prev_page);
        assert_eq!(info.per_page, None);
    }

    #[test]
    fn test_decode_page_info_ignores_garbage_total() {
        let map = headers(&[("x-total-count", "lots")]);
        assert_eq!(decode_page_info(&map, &PageRequest::new()), None);
    }

    #[test]
    fn test_parse_link_header_multiple_relations_in_one_value() {
        let links = parse_link_header("<http://x/a>; rel=\"next last\"");
        assert_eq!(links.get("next").map(String::as_str), Some("http://x/a"));
        assert_eq!(links.get("last").map(String::as_str), Some("http://x/a"));
    }

    #[test]
    fn test_parse_link_header_unquoted_and_malformed() {
        let links = parse_link_header("<http://x/a>; rel=prev, <http://x/broken; rel=\"next\"");
        assert!(links.contains_key("prev"));
        assert!(!links.contains_key("next"));
        assert!(parse_link_header("").is_empty());
    }
}
