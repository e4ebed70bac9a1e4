//! Book mutations

use async_graphql::{Context, InputObject, Object, Result, ID};
use bookshelf_backend_client::{BackendClient, Capability, NewBook};

use crate::error::GraphQLResultExt;
use crate::graphql::guards::CapabilityGuard;
use crate::graphql::types::{entity_id, Book, Genre};

/// Input for creating a book
#[derive(InputObject)]
pub struct CreateBookInput {
    /// Authors to credit; repeated ids are linked once
    pub author_ids: Option<Vec<ID>>,
    pub cover: Option<String>,
    pub genre: Option<Genre>,
    pub summary: Option<String>,
    pub title: String,
}

impl From<CreateBookInput> for NewBook {
    fn from(input: CreateBookInput) -> Self {
        NewBook {
            author_ids: input
                .author_ids
                .unwrap_or_default()
                .iter()
                .map(entity_id)
                .collect(),
            cover: input.cover,
            genre: input.genre.map(Into::into),
            summary: input.summary,
            title: input.title,
        }
    }
}

#[derive(Default)]
pub struct BookMutation;

#[Object]
impl BookMutation {
    /// Create a book and link it to its authors
    #[graphql(guard = "CapabilityGuard::new(Capability::CreateBook)")]
    async fn create_book(&self, ctx: &Context<'_>, input: CreateBookInput) -> Result<Book> {
        let client = ctx.data::<BackendClient>()?;
        let book = client
            .create_book(&NewBook::from(input))
            .await
            .into_graphql()?;
        Ok(book.into())
    }
}
