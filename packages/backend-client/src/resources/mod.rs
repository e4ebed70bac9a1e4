//! Per-resource gateway operations
//!
//! Each submodule extends [`BackendClient`](crate::BackendClient) with the
//! operations of one resource type, built on the generic primitives in
//! [`client`](crate::client).

mod authors;
mod books;
mod reviews;
mod search;
mod users;

/// Backend collection names
pub mod collections {
    pub const AUTHORS: &str = "authors";
    pub const BOOKS: &str = "books";
    pub const BOOK_AUTHORS: &str = "bookAuthors";
    pub const REVIEWS: &str = "reviews";
    pub const USERS: &str = "users";
    pub const USER_BOOKS: &str = "userBooks";
}

/// Orderings applied when a list request does not pick one
pub mod default_order {
    pub const AUTHORS: &str = "name_asc";
    pub const BOOKS: &str = "title_asc";
    pub const REVIEWS: &str = "createdAt_desc";
    pub const LIBRARY: &str = "createdAt_desc";
}

pub use search::SearchQuery;
pub use users::SIGN_UP_RULES;

use crate::error::{BackendError, BackendResult};

/// Lowest and highest accepted review rating
pub const RATING_RANGE: std::ops::RangeInclusive<u8> = 1..=5;

pub(crate) fn validate_rating(rating: u8) -> BackendResult<()> {
    if RATING_RANGE.contains(&rating) {
        Ok(())
    } else {
        Err(BackendError::invalid_argument(format!(
            "Rating must be between {} and {}",
            RATING_RANGE.start(),
            RATING_RANGE.end()
        )))
    }
}
