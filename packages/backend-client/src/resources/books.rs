use futures_util::future::try_join_all;
use tracing::{info, instrument};

use super::{collections, default_order};
use crate::client::BackendClient;
use crate::error::{BackendError, BackendResult};
use crate::models::{Author, Book, BookAuthor, BookAuthorRecord, BookRecord, EntityId, NewBook, Review};
use crate::pagination::{Filters, Page, PageRequest};
use crate::relationships::BOOK_AUTHORS;

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

impl BackendClient {
    /// Fetch a book, `None` when the backend has no such record
    pub async fn book(&self, id: &EntityId) -> BackendResult<Option<Book>> {
        self.fetch_by_id(collections::BOOKS, id).await
    }

    /// Fetch a page of books, ordered by title unless told otherwise
    pub async fn books(&self, request: PageRequest) -> BackendResult<Page<Book>> {
        let request = request.or_order_by(default_order::BOOKS);
        self.fetch_page(collections::BOOKS, &request, &Filters::new())
            .await
    }

    /// Every author credited on the book
    pub async fn book_authors(&self, book_id: &EntityId) -> BackendResult<Vec<Author>> {
        self.resolve_all_children(book_id, &BOOK_AUTHORS).await
    }

    /// Fetch a page of the book's reviews, newest first unless told otherwise
    pub async fn book_reviews(
        &self,
        book_id: &EntityId,
        request: PageRequest,
    ) -> BackendResult<Page<Review>> {
        let request = request.or_order_by(default_order::REVIEWS);
        let filters = Filters::new().with("bookId", book_id);
        self.fetch_page(collections::REVIEWS, &request, &filters)
            .await
    }

    /// Create a book and link it to each of its authors.
    ///
    /// The book is stored first; the author links are then created
    /// concurrently. A failed link leaves the book in place.
    ///
    /// # Errors
    /// - `BackendError::InvalidArgument` if the title is blank
    /// - Transport errors from any of the writes
    #[instrument(skip(self))]
    pub async fn create_book(&self, input: &NewBook) -> BackendResult<Book> {
        if input.title.trim().is_empty() {
            return Err(BackendError::invalid_argument("Book title must not be empty"));
        }

        let record = BookRecord {
            cover: non_empty(&input.cover),
            genre: input.genre,
            summary: non_empty(&input.summary),
            title: &input.title,
        };
        let book: Book = self.create(collections::BOOKS, &record).await?;

        let mut author_ids: Vec<&EntityId> = Vec::with_capacity(input.author_ids.len());
        for id in &input.author_ids {
            if !author_ids.contains(&id) {
                author_ids.push(id);
            }
        }

        let links: Vec<BookAuthor> = try_join_all(author_ids.into_iter().map(|author_id| {
            let link = BookAuthorRecord {
                book_id: &book.id,
                author_id,
            };
            async move { self.create(collections::BOOK_AUTHORS, &link).await }
        }))
        .await?;

        info!(book_id = %book.id, author_count = links.len(), "Created book");
        Ok(book)
    }
}
