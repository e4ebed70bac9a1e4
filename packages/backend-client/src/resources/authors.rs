use tracing::{info, instrument};

use super::{collections, default_order};
use crate::client::BackendClient;
use crate::error::BackendResult;
use crate::models::{Author, Book, EntityId, NewAuthor};
use crate::pagination::{Filters, Page, PageRequest};
use crate::relationships::AUTHOR_BOOKS;

impl BackendClient {
    /// Fetch an author, `None` when the backend has no such record
    pub async fn author(&self, id: &EntityId) -> BackendResult<Option<Author>> {
        self.fetch_by_id(collections::AUTHORS, id).await
    }

    /// Fetch a page of authors, ordered by name unless told otherwise
    pub async fn authors(&self, request: PageRequest) -> BackendResult<Page<Author>> {
        let request = request.or_order_by(default_order::AUTHORS);
        self.fetch_page(collections::AUTHORS, &request, &Filters::new())
            .await
    }

    /// Every book the author is credited on
    pub async fn author_books(&self, author_id: &EntityId) -> BackendResult<Vec<Book>> {
        self.resolve_all_children(author_id, &AUTHOR_BOOKS).await
    }

    #[instrument(skip(self))]
    pub async fn create_author(&self, input: &NewAuthor) -> BackendResult<Author> {
        let author: Author = self.create(collections::AUTHORS, input).await?;
        info!(author_id = %author.id, "Created author");
        Ok(author)
    }
}
