//! Paginated result wrappers

use async_graphql::SimpleObject;
use bookshelf_backend_client::{
    Author as BackendAuthor, Book as BackendBook, Page, PageInfo as BackendPageInfo,
    Review as BackendReview,
};

use super::{Author, Book, Review};

/// Where a page sits within the full result set
#[derive(SimpleObject, Debug, Clone, PartialEq, Eq)]
pub struct PageInfo {
    pub has_next_page: bool,
    pub has_prev_page: bool,
    /// 1-based page number
    pub page: u32,
    /// Requested page size, absent when none was asked for
    pub per_page: Option<u32>,
    /// Records matching the query across all pages
    pub total_count: u64,
}

impl From<BackendPageInfo> for PageInfo {
    fn from(info: BackendPageInfo) -> Self {
        Self {
            has_next_page: info.has_next_page,
            has_prev_page: info.has_prev_page,
            page: info.page,
            per_page: info.per_page,
            total_count: info.total_count,
        }
    }
}

/// A page of authors
#[derive(SimpleObject)]
pub struct Authors {
    pub results: Vec<Author>,
    pub page_info: Option<PageInfo>,
}

/// A page of books
#[derive(SimpleObject)]
pub struct Books {
    pub results: Vec<Book>,
    pub page_info: Option<PageInfo>,
}

/// A page of reviews
#[derive(SimpleObject)]
pub struct Reviews {
    pub results: Vec<Review>,
    pub page_info: Option<PageInfo>,
}

impl From<Page<BackendAuthor>> for Authors {
    fn from(page: Page<BackendAuthor>) -> Self {
        Self {
            results: page.items.into_iter().map(Author::from).collect(),
            page_info: page.page_info.map(PageInfo::from),
        }
    }
}

impl From<Page<BackendBook>> for Books {
    fn from(page: Page<BackendBook>) -> Self {
        Self {
            results: page.items.into_iter().map(Book::from).collect(),
            page_info: page.page_info.map(PageInfo::from),
        }
    }
}

impl From<Page<BackendReview>> for Reviews {
    fn from(page: Page<BackendReview>) -> Self {
        Self {
            results: page.items.into_iter().map(Review::from).collect(),
            page_info: page.page_info.map(PageInfo::from),
        }
    }
}
