//! Author queries

use async_graphql::{Context, Object, Result, ID};
use bookshelf_backend_client::{BackendClient, Capability};

use crate::error::GraphQLResultExt;
use crate::graphql::guards::CapabilityGuard;
use crate::graphql::pagination::page_request;
use crate::graphql::types::{entity_id, Author, AuthorOrderBy, Authors};

#[derive(Default)]
pub struct AuthorQuery;

#[Object]
impl AuthorQuery {
    /// Get an author by ID
    #[graphql(guard = "CapabilityGuard::new(Capability::ReadAuthor)")]
    async fn author(&self, ctx: &Context<'_>, id: ID) -> Result<Option<Author>> {
        let client = ctx.data::<BackendClient>()?;
        let author = client.author(&entity_id(&id)).await.into_graphql()?;
        Ok(author.map(Author::from))
    }

    /// List authors, alphabetically by default
    #[graphql(guard = "CapabilityGuard::new(Capability::ListAuthors)")]
    async fn authors(
        &self,
        ctx: &Context<'_>,
        #[graphql(default = 20)] limit: i32,
        order_by: Option<AuthorOrderBy>,
        page: Option<i32>,
    ) -> Result<Option<Authors>> {
        let client = ctx.data::<BackendClient>()?;
        let request = page_request(limit, page, order_by).into_graphql()?;
        let authors = client.authors(request).await.into_graphql()?;
        Ok(Some(authors.into()))
    }
}
