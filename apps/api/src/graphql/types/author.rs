//! Author GraphQL type

use async_graphql::{Context, Object, Result, ID};
use bookshelf_backend_client::{Author as BackendAuthor, BackendClient, Capability};

use crate::error::GraphQLResultExt;
use crate::graphql::guards::CapabilityGuard;

use super::book::Book;
use super::to_id;

/// A person who wrote one or more books
pub struct Author {
    inner: BackendAuthor,
}

impl Author {
    /// Create a new GraphQL Author from a backend record
    pub fn new(author: BackendAuthor) -> Self {
        Self { inner: author }
    }
}

impl From<BackendAuthor> for Author {
    fn from(author: BackendAuthor) -> Self {
        Self::new(author)
    }
}

#[Object]
impl Author {
    /// Unique author identifier
    pub async fn id(&self) -> ID {
        to_id(&self.inner.id)
    }

    /// Author name
    pub async fn name(&self) -> String {
        self.inner.name.clone()
    }

    /// Books this author wrote or co-wrote
    #[graphql(guard = "CapabilityGuard::new(Capability::ReadAuthorBooks)")]
    async fn books(&self, ctx: &Context<'_>) -> Result<Option<Vec<Book>>> {
        let client = ctx.data::<BackendClient>()?;
        let books = client.author_books(&self.inner.id).await.into_graphql()?;
        Ok(Some(books.into_iter().map(Book::from).collect()))
    }
}
