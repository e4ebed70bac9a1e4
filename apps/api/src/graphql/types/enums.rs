//! GraphQL enums
//!
//! `orderBy` values map onto backend `FIELD_DIRECTION` tokens.

use async_graphql::Enum;
use bookshelf_backend_client::SortDirection;

use crate::graphql::pagination::OrderToken;

/// Book genre
#[derive(Enum, Copy, Clone, Debug, Eq, PartialEq)]
#[graphql(remote = "bookshelf_backend_client::Genre")]
pub enum Genre {
    Adventure,
    Children,
    Classics,
    ComicGraphicNovel,
    DetectiveMystery,
    Dystopia,
    Fantasy,
    Horror,
    Humor,
    NonFiction,
    ScienceFiction,
    Romance,
    Thriller,
    Western,
}

/// Ordering for author lists
#[derive(Enum, Copy, Clone, Debug, Eq, PartialEq)]
pub enum AuthorOrderBy {
    NameAsc,
    NameDesc,
}

impl OrderToken for AuthorOrderBy {
    fn token(self) -> &'static str {
        match self {
            AuthorOrderBy::NameAsc => "name_asc",
            AuthorOrderBy::NameDesc => "name_desc",
        }
    }
}

/// Ordering for book lists
#[derive(Enum, Copy, Clone, Debug, Eq, PartialEq)]
pub enum BookOrderBy {
    TitleAsc,
    TitleDesc,
}

impl OrderToken for BookOrderBy {
    fn token(self) -> &'static str {
        match self {
            BookOrderBy::TitleAsc => "title_asc",
            BookOrderBy::TitleDesc => "title_desc",
        }
    }
}

/// Ordering for a user's library, by when each book was added
#[derive(Enum, Copy, Clone, Debug, Eq, PartialEq)]
pub enum LibraryOrderBy {
    AddedOnAsc,
    AddedOnDesc,
}

impl OrderToken for LibraryOrderBy {
    fn token(self) -> &'static str {
        match self {
            LibraryOrderBy::AddedOnAsc => "createdAt_asc",
            LibraryOrderBy::AddedOnDesc => "createdAt_desc",
        }
    }
}

/// Ordering for review lists
#[derive(Enum, Copy, Clone, Debug, Eq, PartialEq)]
pub enum ReviewOrderBy {
    ReviewedOnAsc,
    ReviewedOnDesc,
}

impl OrderToken for ReviewOrderBy {
    fn token(self) -> &'static str {
        match self {
            ReviewOrderBy::ReviewedOnAsc => "createdAt_asc",
            ReviewOrderBy::ReviewedOnDesc => "createdAt_desc",
        }
    }
}

/// Ordering for merged search results
#[derive(Enum, Copy, Clone, Debug, Eq, PartialEq)]
pub enum SearchOrderBy {
    ResultAsc,
    ResultDesc,
}

impl From<SearchOrderBy> for SortDirection {
    fn from(order_by: SearchOrderBy) -> Self {
        match order_by {
            SearchOrderBy::ResultAsc => SortDirection::Asc,
            SearchOrderBy::ResultDesc => SortDirection::Desc,
        }
    }
}
