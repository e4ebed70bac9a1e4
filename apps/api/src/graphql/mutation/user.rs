//! User mutations
//!
//! Sign-up with unique email and username, and library membership changes.

use async_graphql::{Context, InputObject, Object, Result, ID};
use bookshelf_backend_client::{BackendClient, Capability, LibraryUpdate, NewUser};

use crate::error::GraphQLResultExt;
use crate::graphql::guards::CapabilityGuard;
use crate::graphql::types::{entity_id, User};

/// Input for signing up
#[derive(InputObject)]
pub struct SignUpInput {
    pub email: String,
    pub name: String,
    pub username: String,
}

/// Books to add to, or remove from, a user's library
#[derive(InputObject)]
pub struct UpdateLibraryBooksInput {
    pub book_ids: Vec<ID>,
    pub user_id: ID,
}

impl From<UpdateLibraryBooksInput> for LibraryUpdate {
    fn from(input: UpdateLibraryBooksInput) -> Self {
        LibraryUpdate {
            book_ids: input.book_ids.iter().map(entity_id).collect(),
            user_id: entity_id(&input.user_id),
        }
    }
}

#[derive(Default)]
pub struct UserMutation;

#[Object]
impl UserMutation {
    /// Register a user
    ///
    /// Fails with `CONFLICT` and a `field` extension naming the email or
    /// username that is already taken.
    #[graphql(guard = "CapabilityGuard::new(Capability::SignUp)")]
    async fn sign_up(&self, ctx: &Context<'_>, input: SignUpInput) -> Result<User> {
        let client = ctx.data::<BackendClient>()?;
        let user = client
            .sign_up(&NewUser {
                email: input.email,
                name: input.name,
                username: input.username,
            })
            .await
            .into_graphql()?;
        Ok(user.into())
    }

    /// Add books to a library; books already in it are left alone
    #[graphql(guard = "CapabilityGuard::new(Capability::AddBooksToLibrary)")]
    async fn add_books_to_library(
        &self,
        ctx: &Context<'_>,
        input: UpdateLibraryBooksInput,
    ) -> Result<User> {
        let client = ctx.data::<BackendClient>()?;
        let user = client
            .add_books_to_library(&input.into())
            .await
            .into_graphql()?;
        Ok(user.into())
    }

    /// Remove books from a library; ids not in it are ignored
    #[graphql(guard = "CapabilityGuard::new(Capability::RemoveBooksFromLibrary)")]
    async fn remove_books_from_library(
        &self,
        ctx: &Context<'_>,
        input: UpdateLibraryBooksInput,
    ) -> Result<User> {
        let client = ctx.data::<BackendClient>()?;
        let user = client
            .remove_books_from_library(&input.into())
            .await
            .into_graphql()?;
        Ok(user.into())
    }
}
