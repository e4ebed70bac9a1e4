use chrono::Utc;
use futures_util::future::try_join_all;
use tracing::{debug, info, instrument};

use super::{collections, default_order};
use crate::client::BackendClient;
use crate::error::{BackendError, BackendResult};
use crate::models::{
    Book, EntityId, LibraryEntry, LibraryEntryRecord, LibraryUpdate, NewUser, Review, User,
};
use crate::pagination::{Filters, Page, PageRequest};
use crate::relationships::USER_LIBRARY;
use crate::uniqueness::{UniqueInput, UniqueRule};

/// Fields a new account must not share with an existing one, in reporting order
pub const SIGN_UP_RULES: &[UniqueRule] = &[
    UniqueRule::new(&["email"], collections::USERS),
    UniqueRule::new(&["username"], collections::USERS),
];

impl UniqueInput for NewUser {
    fn unique_rules() -> &'static [UniqueRule] {
        SIGN_UP_RULES
    }
}

/// Input ids with duplicates removed, first occurrence kept
fn distinct(ids: &[EntityId]) -> Vec<&EntityId> {
    let mut seen = Vec::with_capacity(ids.len());
    for id in ids {
        if !seen.contains(&id) {
            seen.push(id);
        }
    }
    seen
}

impl BackendClient {
    /// Fetch a user, `None` when the backend has no such record
    pub async fn user(&self, id: &EntityId) -> BackendResult<Option<User>> {
        self.fetch_by_id(collections::USERS, id).await
    }

    /// Look a user up by username
    pub async fn user_by_username(&self, username: &str) -> BackendResult<Option<User>> {
        let users: Vec<User> = self
            .find(collections::USERS, &Filters::new().with("username", username))
            .await?;
        Ok(users.into_iter().next())
    }

    /// Fetch a page of the books in a user's library, most recently added first
    pub async fn user_library(
        &self,
        user_id: &EntityId,
        request: PageRequest,
    ) -> BackendResult<Page<Book>> {
        let request = request.or_order_by(default_order::LIBRARY);
        self.resolve_children(user_id, &USER_LIBRARY, &request).await
    }

    /// Fetch a page of the reviews a user wrote, newest first
    pub async fn user_reviews(
        &self,
        user_id: &EntityId,
        request: PageRequest,
    ) -> BackendResult<Page<Review>> {
        let request = request.or_order_by(default_order::REVIEWS);
        let filters = Filters::new().with("userId", user_id);
        self.fetch_page(collections::REVIEWS, &request, &filters)
            .await
    }

    /// Create an account after checking that its email and username are free
    ///
    /// # Errors
    /// - `BackendError::DuplicateField` naming `email` or `username`; email wins when both collide
    /// - Transport errors from the checks or the insert
    #[instrument(skip(self))]
    pub async fn sign_up(&self, input: &NewUser) -> BackendResult<User> {
        self.enforce_unique(input).await?;

        let user: User = self.create(collections::USERS, input).await?;
        info!(user_id = %user.id, "Signed up user");
        Ok(user)
    }

    async fn library_entries(
        &self,
        user_id: &EntityId,
        book_ids: &[&EntityId],
    ) -> BackendResult<Vec<Vec<LibraryEntry>>> {
        try_join_all(book_ids.iter().map(|book_id| async move {
            let filters = Filters::new()
                .with("userId", user_id)
                .with("bookId", book_id);
            self.find(collections::USER_BOOKS, &filters).await
        }))
        .await
    }

    async fn require_user(&self, id: &EntityId) -> BackendResult<User> {
        self.user(id).await?.ok_or_else(|| BackendError::NotFound {
            path: format!("{}/{}", collections::USERS, id),
        })
    }

    /// Add books to a user's library and return the user.
    ///
    /// The user is resolved before anything is written. Books already in the
    /// library are left alone. Each book is looked up and linked in its own
    /// round trip, so a failure part-way through can leave some books added.
    #[instrument(skip(self))]
    pub async fn add_books_to_library(&self, input: &LibraryUpdate) -> BackendResult<User> {
        let user = self.require_user(&input.user_id).await?;
        let book_ids = distinct(&input.book_ids);
        let existing = self.library_entries(&input.user_id, &book_ids).await?;

        let new_ids: Vec<&EntityId> = book_ids
            .iter()
            .zip(&existing)
            .filter(|(book_id, entries)| !entries.iter().any(|entry| &entry.book_id == **book_id))
            .map(|(book_id, _)| *book_id)
            .collect();

        debug!(
            requested = book_ids.len(),
            added = new_ids.len(),
            "Adding books to library"
        );

        let created_at = Utc::now();
        try_join_all(new_ids.iter().map(|book_id| {
            let record = LibraryEntryRecord {
                book_id: *book_id,
                created_at,
                user_id: &input.user_id,
            };
            async move {
                self.create::<_, LibraryEntry>(collections::USER_BOOKS, &record)
                    .await
            }
        }))
        .await?;

        Ok(user)
    }

    /// Remove books from a user's library and return the user.
    ///
    /// The user is resolved before anything is deleted. Ids that are not in
    /// the library are ignored. Partial removal is possible if one of the
    /// deletes fails.
    #[instrument(skip(self))]
    pub async fn remove_books_from_library(&self, input: &LibraryUpdate) -> BackendResult<User> {
        let user = self.require_user(&input.user_id).await?;
        let book_ids = distinct(&input.book_ids);
        let existing = self.library_entries(&input.user_id, &book_ids).await?;

        let entry_ids: Vec<&EntityId> = existing.iter().flatten().map(|entry| &entry.id).collect();

        debug!(
            requested = book_ids.len(),
            removed = entry_ids.len(),
            "Removing books from library"
        );

        try_join_all(
            entry_ids
                .into_iter()
                .map(|entry_id| self.delete(collections::USER_BOOKS, entry_id)),
        )
        .await?;

        Ok(user)
    }
}
