//! User queries

use async_graphql::{Context, Object, Result};
use bookshelf_backend_client::{BackendClient, Capability};

use crate::error::{ApiError, GraphQLResultExt};
use crate::graphql::guards::CapabilityGuard;
use crate::graphql::types::User;

#[derive(Default)]
pub struct UserQuery;

#[Object]
impl UserQuery {
    /// Get a user by username
    ///
    /// Fails with `NOT_FOUND` when nobody has that username.
    #[graphql(guard = "CapabilityGuard::new(Capability::ReadUser)")]
    async fn user(&self, ctx: &Context<'_>, username: String) -> Result<User> {
        let client = ctx.data::<BackendClient>()?;
        client
            .user_by_username(&username)
            .await
            .map_err(ApiError::from)
            .and_then(|user| user.ok_or_else(|| ApiError::not_found("user", username.as_str())))
            .map(User::from)
            .into_graphql()
    }
}
