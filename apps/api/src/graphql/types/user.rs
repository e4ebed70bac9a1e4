//! User GraphQL type

use async_graphql::{Context, Object, Result, ID};
use bookshelf_backend_client::{BackendClient, Capability, User as BackendUser};

use crate::error::GraphQLResultExt;
use crate::graphql::guards::CapabilityGuard;
use crate::graphql::pagination::page_request;

use super::enums::{LibraryOrderBy, ReviewOrderBy};
use super::page::{Books, Reviews};
use super::to_id;

/// A registered reader
pub struct User {
    inner: BackendUser,
}

impl User {
    /// Create a new GraphQL User from a backend record
    pub fn new(user: BackendUser) -> Self {
        Self { inner: user }
    }
}

impl From<BackendUser> for User {
    fn from(user: BackendUser) -> Self {
        Self::new(user)
    }
}

#[Object]
impl User {
    /// Unique user identifier
    pub async fn id(&self) -> ID {
        to_id(&self.inner.id)
    }

    /// Display name
    pub async fn name(&self) -> String {
        self.inner.name.clone()
    }

    async fn email(&self) -> &str {
        &self.inner.email
    }

    async fn username(&self) -> &str {
        &self.inner.username
    }

    /// Books in this user's library, most recently added first by default
    #[graphql(guard = "CapabilityGuard::new(Capability::ReadUserLibrary)")]
    async fn library(
        &self,
        ctx: &Context<'_>,
        #[graphql(default = 20)] limit: i32,
        order_by: Option<LibraryOrderBy>,
        page: Option<i32>,
    ) -> Result<Option<Books>> {
        let client = ctx.data::<BackendClient>()?;
        let request = page_request(limit, page, order_by).into_graphql()?;
        let books = client
            .user_library(&self.inner.id, request)
            .await
            .into_graphql()?;
        Ok(Some(books.into()))
    }

    /// Reviews this user wrote, newest first by default
    #[graphql(guard = "CapabilityGuard::new(Capability::ReadUserReviews)")]
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
            .user_reviews(&self.inner.id, request)
            .await
            .into_graphql()?;
        Ok(Some(reviews.into()))
    }
}
