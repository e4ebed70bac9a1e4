//! Book queries

use async_graphql::{Context, Object, Result, ID};
use bookshelf_backend_client::{BackendClient, Capability};

use crate::error::GraphQLResultExt;
use crate::graphql::guards::CapabilityGuard;
use crate::graphql::pagination::page_request;
use crate::graphql::types::{entity_id, Book, BookOrderBy, Books};

#[derive(Default)]
pub struct BookQuery;

#[Object]
impl BookQuery {
    /// Get a book by ID
    #[graphql(guard = "CapabilityGuard::new(Capability::ReadBook)")]
    async fn book(&self, ctx: &Context<'_>, id: ID) -> Result<Option<Book>> {
        let client = ctx.data::<BackendClient>()?;
        let book = client.book(&entity_id(&id)).await.into_graphql()?;
        Ok(book.map(Book::from))
    }

    /// List books, by title by default
    #[graphql(guard = "CapabilityGuard::new(Capability::ListBooks)")]
    async fn books(
        &self,
        ctx: &Context<'_>,
        #[graphql(default = 20)] limit: i32,
        order_by: Option<BookOrderBy>,
        page: Option<i32>,
    ) -> Result<Option<Books>> {
        let client = ctx.data::<BackendClient>()?;
        let request = page_request(limit, page, order_by).into_graphql()?;
        let books = client.books(request).await.into_graphql()?;
        Ok(Some(books.into()))
    }
}
