//! Abstract types returned by search

use async_graphql::{Interface, Union, ID};
use bookshelf_backend_client::{BookResult as BackendBookResult, Person as BackendPerson};

use super::{Author, Book, User};

/// Anyone with a name: an author or a user
#[derive(Interface)]
#[graphql(
    field(name = "id", ty = "ID"),
    field(name = "name", ty = "String")
)]
pub enum Person {
    Author(Author),
    User(User),
}

impl From<BackendPerson> for Person {
    fn from(person: BackendPerson) -> Self {
        match person {
            BackendPerson::Author(author) => Person::Author(author.into()),
            BackendPerson::User(user) => Person::User(user.into()),
        }
    }
}

/// A book, or an author whose name matched a book search
#[derive(Union)]
pub enum BookResult {
    Book(Book),
    Author(Author),
}

impl From<BackendBookResult> for BookResult {
    fn from(result: BackendBookResult) -> Self {
        match result {
            BackendBookResult::Book(book) => BookResult::Book(book.into()),
            BackendBookResult::Author(author) => BookResult::Author(author.into()),
        }
    }
}
