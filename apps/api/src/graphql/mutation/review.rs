//! Review mutations
//!
//! - createReview: one review per reader per book
//! - updateReview: change rating and text
//! - deleteReview: remove a review, returning its id

use async_graphql::{Context, InputObject, Object, Result, ID};
use bookshelf_backend_client::{BackendClient, Capability, NewReview, ReviewUpdate};

use crate::error::GraphQLResultExt;
use crate::graphql::guards::CapabilityGuard;
use crate::graphql::types::{entity_id, to_id, Rating, Review};

/// Input for creating a review
#[derive(InputObject)]
pub struct CreateReviewInput {
    pub book_id: ID,
    pub rating: Rating,
    pub reviewer_id: ID,
    pub text: Option<String>,
}

/// Input for updating a review
#[derive(InputObject)]
pub struct UpdateReviewInput {
    pub id: ID,
    pub rating: Rating,
    pub text: Option<String>,
}

#[derive(Default)]
pub struct ReviewMutation;

#[Object]
impl ReviewMutation {
    /// Submit a review
    ///
    /// Fails with `FORBIDDEN` if the reviewer already reviewed the book.
    #[graphql(guard = "CapabilityGuard::new(Capability::CreateReview)")]
    async fn create_review(&self, ctx: &Context<'_>, input: CreateReviewInput) -> Result<Review> {
        let client = ctx.data::<BackendClient>()?;
        let review = client
            .create_review(&NewReview {
                book_id: entity_id(&input.book_id),
                rating: input.rating.value(),
                reviewer_id: entity_id(&input.reviewer_id),
                text: input.text,
            })
            .await
            .into_graphql()?;
        Ok(review.into())
    }

    #[graphql(guard = "CapabilityGuard::new(Capability::UpdateReview)")]
    async fn update_review(&self, ctx: &Context<'_>, input: UpdateReviewInput) -> Result<Review> {
        let client = ctx.data::<BackendClient>()?;
        let review = client
            .update_review(&ReviewUpdate {
                id: entity_id(&input.id),
                rating: input.rating.value(),
                text: input.text,
            })
            .await
            .into_graphql()?;
        Ok(review.into())
    }

    #[graphql(guard = "CapabilityGuard::new(Capability::DeleteReview)")]
    async fn delete_review(&self, ctx: &Context<'_>, id: ID) -> Result<ID> {
        let client = ctx.data::<BackendClient>()?;
        let deleted = client.delete_review(&entity_id(&id)).await.into_graphql()?;
        Ok(to_id(&deleted))
    }
}
