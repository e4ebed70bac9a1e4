//! Named capability points and the authenticated principal
//!
//! The adapter never decides who may do what. Each exposed operation has a
//! [`Capability`] name, and an external [`PermissionEvaluator`] is asked
//! whether the request's [`Principal`] (if any) may use it.

use std::fmt;

use serde_json::Value;

/// Authenticated identity attached to a request by an external component
#[derive(Debug, Clone, PartialEq)]
pub struct Principal {
    /// Subject identifier (for example the `sub` claim of a token)
    pub subject: String,
    /// Remaining identity attributes, untouched
    pub claims: Value,
}

impl Principal {
    /// Create a principal from a subject and its raw claims
    pub fn new(subject: impl Into<String>, claims: Value) -> Self {
        Self {
            subject: subject.into(),
            claims,
        }
    }
}

/// Every operation the adapter exposes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    ReadAuthor,
    ListAuthors,
    ReadAuthorBooks,
    CreateAuthor,
    ReadBook,
    ListBooks,
    ReadBookAuthors,
    ReadBookReviews,
    CreateBook,
    ReadReview,
    CreateReview,
    UpdateReview,
    DeleteReview,
    ReadUser,
    ReadUserLibrary,
    ReadUserReviews,
    SignUp,
    AddBooksToLibrary,
    RemoveBooksFromLibrary,
    SearchPeople,
    SearchBooks,
}

impl Capability {
    /// Stable name of the capability point
    pub fn name(&self) -> &'static str {
        match self {
            Capability::ReadAuthor => "author:read",
            Capability::ListAuthors => "author:list",
            Capability::ReadAuthorBooks => "author:books",
            Capability::CreateAuthor => "author:create",
            Capability::ReadBook => "book:read",
            Capability::ListBooks => "book:list",
            Capability::ReadBookAuthors => "book:authors",
            Capability::ReadBookReviews => "book:reviews",
            Capability::CreateBook => "book:create",
            Capability::ReadReview => "review:read",
            Capability::CreateReview => "review:create",
            Capability::UpdateReview => "review:update",
            Capability::DeleteReview => "review:delete",
            Capability::ReadUser => "user:read",
            Capability::ReadUserLibrary => "user:library",
            Capability::ReadUserReviews => "user:reviews",
            Capability::SignUp => "user:sign-up",
            Capability::AddBooksToLibrary => "library:add",
            Capability::RemoveBooksFromLibrary => "library:remove",
            Capability::SearchPeople => "search:people",
            Capability::SearchBooks => "search:books",
        }
    }

    /// True for operations that write to the backend
    pub fn is_mutation(&self) -> bool {
        matches!(
            self,
            Capability::CreateAuthor
                | Capability::CreateBook
                | Capability::CreateReview
                | Capability::UpdateReview
                | Capability::DeleteReview
                | Capability::SignUp
                | Capability::AddBooksToLibrary
                | Capability::RemoveBooksFromLibrary
        )
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Decides whether a principal may use a capability
pub trait PermissionEvaluator: Send + Sync {
    /// `principal` is `None` for anonymous requests
    fn allows(&self, principal: Option<&Principal>, capability: Capability) -> bool;
}

/// Evaluator that grants every capability
#[derive(Debug, Clone, Copy, Default)]
pub struct AllowAll;

impl PermissionEvaluator for AllowAll {
    fn allows(&self, _principal: Option<&Principal>, _capability: Capability) -> bool {
        true
    }
}
