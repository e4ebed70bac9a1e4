//! Review GraphQL type

use async_graphql::{Context, Object, Result, ID};
use bookshelf_backend_client::{BackendClient, Capability, Review as BackendReview};
use chrono::{DateTime, Utc};

use crate::error::{ApiError, GraphQLResultExt};
use crate::graphql::guards::CapabilityGuard;

use super::book::Book;
use super::scalars::Rating;
use super::to_id;
use super::user::User;

/// A reader's rating of a book
pub struct Review {
    inner: BackendReview,
}

impl Review {
    /// Create a new GraphQL Review from a backend record
    pub fn new(review: BackendReview) -> Self {
        Self { inner: review }
    }
}

impl From<BackendReview> for Review {
    fn from(review: BackendReview) -> Self {
        Self::new(review)
    }
}

#[Object]
impl Review {
    /// Unique review identifier
    async fn id(&self) -> ID {
        to_id(&self.inner.id)
    }

    async fn rating(&self) -> Rating {
        Rating::new(self.inner.rating)
    }

    /// When the review was first submitted
    async fn reviewed_on(&self) -> DateTime<Utc> {
        self.inner.created_at
    }

    async fn text(&self) -> Option<&str> {
        self.inner.text.as_deref()
    }

    /// The reviewed book, if it still exists
    #[graphql(guard = "CapabilityGuard::new(Capability::ReadBook)")]
    async fn book(&self, ctx: &Context<'_>) -> Result<Option<Book>> {
        let client = ctx.data::<BackendClient>()?;
        let book = client.book(&self.inner.book_id).await.into_graphql()?;
        Ok(book.map(Book::from))
    }

    /// The user who wrote the review
    #[graphql(guard = "CapabilityGuard::new(Capability::ReadUser)")]
    async fn reviewer(&self, ctx: &Context<'_>) -> Result<User> {
        let client = ctx.data::<BackendClient>()?;
        client
            .user(&self.inner.user_id)
            .await
            .map_err(ApiError::from)
            .and_then(|user| {
                user.ok_or_else(|| ApiError::not_found("user", self.inner.user_id.as_str()))
            })
            .map(User::from)
            .into_graphql()
    }
}
