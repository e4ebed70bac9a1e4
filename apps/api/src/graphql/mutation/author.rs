//! Author mutations

use async_graphql::{Context, Object, Result};
use bookshelf_backend_client::{BackendClient, Capability, NewAuthor};

use crate::error::GraphQLResultExt;
use crate::graphql::guards::CapabilityGuard;
use crate::graphql::types::Author;

#[derive(Default)]
pub struct AuthorMutation;

#[Object]
impl AuthorMutation {
    /// Create an author
    #[graphql(guard = "CapabilityGuard::new(Capability::CreateAuthor)")]
    async fn create_author(&self, ctx: &Context<'_>, name: String) -> Result<Author> {
        let client = ctx.data::<BackendClient>()?;
        let author = client
            .create_author(&NewAuthor { name })
            .await
            .into_graphql()?;
        Ok(author.into())
    }
}
