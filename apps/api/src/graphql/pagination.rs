//! Shared pagination utilities for GraphQL resolvers
//!
//! Turns the `limit`/`page`/`orderBy` arguments of paginated fields into a
//! backend [`PageRequest`].

use bookshelf_backend_client::PageRequest;

use crate::error::{ApiError, ApiResult};

/// An `orderBy` enum value that maps to a `FIELD_DIRECTION` backend token
pub trait OrderToken: Copy {
    /// Backend token such as `title_asc`
    fn token(self) -> &'static str;
}

/// Build a page request from GraphQL arguments
///
/// Negative numbers are rejected here; the maximum page size is enforced by
/// the backend adapter.
pub fn page_request<O: OrderToken>(
    limit: i32,
    page: Option<i32>,
    order_by: Option<O>,
) -> ApiResult<PageRequest> {
    let limit = non_negative("limit", limit)?;

    let mut request = PageRequest::new().with_limit(limit);
    if let Some(page) = page {
        request = request.with_page(non_negative("page", page)?);
    }
    if let Some(order_by) = order_by {
        request = request.with_order_by(order_by.token());
    }
    Ok(request)
}

fn non_negative(name: &str, value: i32) -> ApiResult<u32> {
    u32::try_from(value).map_err(|_| ApiError::InvalidInput(format!("{} must not be negative", name)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[derive(Clone, Copy)]
    struct TitleDesc;

    impl OrderToken for TitleDesc {
        fn token(self) -> &'static str {
            "title_desc"
        }
    }

    #[test]
    fn test_page_request_from_arguments() {
        let request = page_request(10, Some(3), Some(TitleDesc)).unwrap();

        assert_eq!(request.effective_limit(), 10);
        assert_eq!(request.effective_page(), 3);
        let order_by = request.order_by.unwrap();
        assert_eq!(order_by.field(), Some("title"));
        assert_eq!(order_by.direction(), Some("desc"));
    }

    #[test]
    fn test_page_request_without_order_or_page() {
        let request = page_request::<TitleDesc>(20, None, None).unwrap();

        assert_eq!(request.effective_limit(), 20);
        assert_eq!(request.page, None);
        assert!(request.order_by.is_none());
    }

    #[test]
    fn test_negative_arguments_are_rejected() {
        assert_matches!(
            page_request::<TitleDesc>(-1, None, None),
            Err(ApiError::InvalidInput(ref message)) if message == "limit must not be negative"
        );
        assert_matches!(
            page_request::<TitleDesc>(5, Some(-2), None),
            Err(ApiError::InvalidInput(_))
        );
    }
}
