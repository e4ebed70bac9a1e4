use std::cmp::Ordering;

use tracing::{debug, instrument};

use super::collections;
use crate::client::BackendClient;
use crate::error::{BackendError, BackendResult};
use crate::models::{Author, Book, BookResult, Person, User};
use crate::pagination::{Filters, SortDirection};

/// A name or title search across several resources
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub query: String,
    /// Match the whole value instead of a fragment of it
    pub exact: bool,
    pub direction: SortDirection,
}

impl SearchQuery {
    /// Fragment search, ascending results
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            exact: false,
            direction: SortDirection::Asc,
        }
    }

    pub fn exact(mut self, exact: bool) -> Self {
        self.exact = exact;
        self
    }

    pub fn with_direction(mut self, direction: SortDirection) -> Self {
        self.direction = direction;
        self
    }

    fn validate(&self) -> BackendResult<()> {
        if self.query.trim().is_empty() {
            return Err(BackendError::invalid_argument("Search query must not be empty"));
        }
        Ok(())
    }

    /// Equality filter when exact, the backend's `_like` filter otherwise
    fn filters(&self, field: &str) -> Filters {
        let key = if self.exact {
            field.to_string()
        } else {
            format!("{}_like", field)
        };
        Filters::new().with(key, &self.query)
    }

    fn compare(&self, a: &str, b: &str) -> Ordering {
        let ordering = a.to_lowercase().cmp(&b.to_lowercase());
        match self.direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    }
}

impl BackendClient {
    /// Authors and users whose name matches, merged and ordered by name
    #[instrument(skip(self))]
    pub async fn search_people(&self, search: &SearchQuery) -> BackendResult<Vec<Person>> {
        search.validate()?;

        let author_filters = search.filters("name");
        let user_filters = search.filters("name");
        let (authors, users) = tokio::try_join!(
            self.find::<Author>(collections::AUTHORS, &author_filters),
            self.find::<User>(collections::USERS, &user_filters),
        )?;

        let mut people: Vec<Person> = authors
            .into_iter()
            .map(Person::Author)
            .chain(users.into_iter().map(Person::User))
            .collect();
        people.sort_by(|a, b| search.compare(a.name(), b.name()));

        debug!(result_count = people.len(), "People search complete");
        Ok(people)
    }

    /// Books whose title matches and authors whose name matches, merged and ordered
    #[instrument(skip(self))]
    pub async fn search_books(&self, search: &SearchQuery) -> BackendResult<Vec<BookResult>> {
        search.validate()?;

        let book_filters = search.filters("title");
        let author_filters = search.filters("name");
        let (books, authors) = tokio::try_join!(
            self.find::<Book>(collections::BOOKS, &book_filters),
            self.find::<Author>(collections::AUTHORS, &author_filters),
        )?;

        let mut results: Vec<BookResult> = books
            .into_iter()
            .map(BookResult::Book)
            .chain(authors.into_iter().map(BookResult::Author))
            .collect();
        results.sort_by(|a, b| search.compare(a.label(), b.label()));

        debug!(result_count = results.len(), "Book search complete");
        Ok(results)
    }
}
