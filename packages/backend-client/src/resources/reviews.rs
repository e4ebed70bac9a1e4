use chrono::Utc;
use tracing::{info, instrument, warn};

use super::{collections, validate_rating};
use crate::client::BackendClient;
use crate::error::{BackendError, BackendResult};
use crate::models::{EntityId, NewReview, Review, ReviewPatch, ReviewRecord, ReviewUpdate};
use crate::pagination::Filters;

impl BackendClient {
    /// Fetch a review, `None` when the backend has no such record
    pub async fn review(&self, id: &EntityId) -> BackendResult<Option<Review>> {
        self.fetch_by_id(collections::REVIEWS, id).await
    }

    /// Submit a review.
    ///
    /// A reviewer may review each book once. The existing-review lookup and
    /// the insert are sequential; a concurrent submission for the same pair
    /// can slip between them.
    ///
    /// # Errors
    /// - `BackendError::InvalidArgument` if the rating is outside 1..=5
    /// - `BackendError::DuplicateReview` if the reviewer already reviewed the book
    /// - Transport errors from either call
    #[instrument(skip(self))]
    pub async fn create_review(&self, input: &NewReview) -> BackendResult<Review> {
        validate_rating(input.rating)?;

        let existing = Filters::new()
            .with("bookId", &input.book_id)
            .with("userId", &input.reviewer_id);
        if self.exists(collections::REVIEWS, &existing).await? {
            warn!(
                book_id = %input.book_id,
                reviewer_id = %input.reviewer_id,
                "Rejected second review for the same book"
            );
            return Err(BackendError::DuplicateReview {
                book_id: input.book_id.to_string(),
                reviewer_id: input.reviewer_id.to_string(),
            });
        }

        let record = ReviewRecord {
            text: input.text.as_deref().filter(|t| !t.is_empty()),
            book_id: &input.book_id,
            created_at: Utc::now(),
            rating: input.rating,
            user_id: &input.reviewer_id,
        };
        let review: Review = self.create(collections::REVIEWS, &record).await?;

        info!(review_id = %review.id, book_id = %review.book_id, "Created review");
        Ok(review)
    }

    /// Change a review's rating and text, stamping `updatedAt`
    #[instrument(skip(self))]
    pub async fn update_review(&self, input: &ReviewUpdate) -> BackendResult<Review> {
        validate_rating(input.rating)?;

        let patch = ReviewPatch {
            rating: input.rating,
            text: input.text.as_deref().filter(|t| !t.is_empty()),
            updated_at: Utc::now(),
        };
        self.update(collections::REVIEWS, &input.id, &patch).await
    }

    /// Delete a review and return its id
    #[instrument(skip(self))]
    pub async fn delete_review(&self, id: &EntityId) -> BackendResult<EntityId> {
        let deleted = self.delete(collections::REVIEWS, id).await?;
        info!(review_id = %deleted, "Deleted review");
        Ok(deleted)
    }
}
