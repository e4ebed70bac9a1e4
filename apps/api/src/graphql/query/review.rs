//! Review queries

use async_graphql::{Context, Object, Result, ID};
use bookshelf_backend_client::{BackendClient, Capability};

use crate::error::GraphQLResultExt;
use crate::graphql::guards::CapabilityGuard;
use crate::graphql::types::{entity_id, Review};

#[derive(Default)]
pub struct ReviewQuery;

#[Object]
impl ReviewQuery {
    /// Get a review by ID
    #[graphql(guard = "CapabilityGuard::new(Capability::ReadReview)")]
    async fn review(&self, ctx: &Context<'_>, id: ID) -> Result<Option<Review>> {
        let client = ctx.data::<BackendClient>()?;
        let review = client.review(&entity_id(&id)).await.into_graphql()?;
        Ok(review.map(Review::from))
    }
}
