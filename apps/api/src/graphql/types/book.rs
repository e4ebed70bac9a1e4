//! Book GraphQL type

use async_graphql::{Context, Object, Result, ID};
use bookshelf_backend_client::{Book as BackendBook, BackendClient, Capability};

use crate::error::GraphQLResultExt;
use crate::graphql::guards::CapabilityGuard;
use crate::graphql::pagination::page_request;

use super::author::Author;
use super::enums::{Genre, ReviewOrderBy};
use super::page::Reviews;
use super::to_id;

/// A book in the catalogue
pub struct Book {
    inner: BackendBook,
}

impl Book {
    /// Create a new GraphQL Book from a backend record
    pub fn new(book: BackendBook) -> Self {
        Self { inner: book }
    }
}

impl From<BackendBook> for Book {
    fn from(book: BackendBook) -> Self {
        Self::new(book)
    }
}

#[Object]
impl Book {
    /// Unique book identifier
    async fn id(&self) -> ID {
        to_id(&self.inner.id)
    }

    /// Book title
    async fn title(&self) -> &str {
        &self.inner.title
    }

    /// URL of the cover image
    async fn cover(&self) -> Option<&str> {
        self.inner.cover.as_deref()
    }

    async fn genre(&self) -> Option<Genre> {
        self.inner.genre.map(Genre::from)
    }

    async fn summary(&self) -> Option<&str> {
        self.inner.summary.as_deref()
    }

    /// Everyone credited as an author of this book
    #[graphql(guard = "CapabilityGuard::new(Capability::ReadBookAuthors)")]
    async fn authors(&self, ctx: &Context<'_>) -> Result<Option<Vec<Author>>> {
        let client = ctx.data::<BackendClient>()?;
        let authors = client.book_authors(&self.inner.id).await.into_graphql()?;
        Ok(Some(authors.into_iter().map(Author::from).collect()))
    }

    /// Reviews of this book, newest first unless `orderBy` says otherwise
    #[graphql(guard = "CapabilityGuard::new(Capability::ReadBookReviews)")]
    async fn reviews(
        &self,
        ctx: &Context<'_>,
        #[graphql(default = 20)] limit: i32,
        order_by: Option<ReviewOrderBy>,
        page: Option<i32>,
    ) -> Result<Option<Reviews>> {
        let client = ctx.data::<BackendClient>()?;
        let request = page_request(limit, page, order_by).into_graphql()?;
        let reviews = client
            .book_reviews(&self.inner.id, request)
            .await
            .into_graphql()?;
        Ok(Some(reviews.into()))
    }
}
