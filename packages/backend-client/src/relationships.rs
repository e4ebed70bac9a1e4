//! Relationship resolution through join records
//!
//! Many-to-many links live in their own backend collections. Resolving a
//! parent's children fetches the join records filtered by the parent key,
//! asks the backend to inline the child (`_expand`), and projects each join
//! record onto that child. Every resolution is its own round trip; nothing
//! is batched or cached across calls.

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{instrument, warn};

use crate::client::BackendClient;
use crate::error::BackendResult;
use crate::models::EntityId;
use crate::pagination::{Filters, Page, PageRequest};

/// How a parent reaches its children through a join collection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Relationship {
    /// Backend collection holding the join records
    pub join_resource: &'static str,
    /// Join record field holding the parent id
    pub parent_key: &'static str,
    /// Join record member holding the child once expanded
    pub child: &'static str,
}

/// An author's books
pub const AUTHOR_BOOKS: Relationship = Relationship {
    join_resource: "bookAuthors",
    parent_key: "authorId",
    child: "book",
};

/// A book's authors
pub const BOOK_AUTHORS: Relationship = Relationship {
    join_resource: "bookAuthors",
    parent_key: "bookId",
    child: "author",
};

/// The books in a user's library
pub const USER_LIBRARY: Relationship = Relationship {
    join_resource: "userBooks",
    parent_key: "userId",
    child: "book",
};

impl Relationship {
    fn filters(&self, parent_id: &EntityId) -> Filters {
        Filters::new()
            .with("_expand", self.child)
            .with(self.parent_key, parent_id)
    }

    /// Replace each join record by its expanded child, keeping order.
    ///
    /// Join records whose child is missing (dangling links) are skipped.
    fn project<T: DeserializeOwned>(&self, records: Vec<Value>) -> BackendResult<Vec<T>> {
        let mut children = Vec::with_capacity(records.len());

        for mut record in records {
            let child = record.get_mut(self.child).map(Value::take);
            match child {
                Some(child) if !child.is_null() => children.push(serde_json::from_value(child)?),
                _ => warn!(
                    join_resource = self.join_resource,
                    record_id = ?record.get("id"),
                    "Skipping join record without an expanded {}",
                    self.child
                ),
            }
        }

        Ok(children)
    }
}

impl BackendClient {
    /// Resolve one page of a parent's children
    #[instrument(skip(self))]
    pub async fn resolve_children<T: DeserializeOwned>(
        &self,
        parent_id: &EntityId,
        relationship: &Relationship,
        request: &PageRequest,
    ) -> BackendResult<Page<T>> {
        let page: Page<Value> = self
            .fetch_page(
                relationship.join_resource,
                request,
                &relationship.filters(parent_id),
            )
            .await?;

        Ok(Page {
            items: relationship.project(page.items)?,
            page_info: page.page_info,
        })
    }

    /// Resolve every child of a parent, without pagination
    #[instrument(skip(self))]
    pub async fn resolve_all_children<T: DeserializeOwned>(
        &self,
        parent_id: &EntityId,
        relationship: &Relationship,
    ) -> BackendResult<Vec<T>> {
        let records: Vec<Value> = self
            .find(relationship.join_resource, &relationship.filters(parent_id))
            .await?;
        relationship.project(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Book;
    use serde_json::json;
    use tracing_test::traced_test;

    #[test]
    fn test_filters_expand_child_then_parent_key() {
        let filters = USER_LIBRARY.filters(&EntityId::from("4"));
        let pairs: Vec<_> = filters.iter().collect();
        assert_eq!(pairs, vec![("_expand", "book"), ("userId", "4")]);
    }

    #[test]
    fn test_project_keeps_order_and_skips_dangling_links() {
        let records = vec![
            json!({ "id": 1, "userId": 4, "bookId": 2, "book": { "id": 2, "title": "Dune" } }),
            json!({ "id": 2, "userId": 4, "bookId": 9 }),
            json!({ "id": 3, "userId": 4, "bookId": 1, "book": { "id": 1, "title": "Emma" } }),
        ];
        let books: Vec<Book> = USER_LIBRARY.project(records).unwrap();
        let titles: Vec<_> = books.iter().map(|b| b.title.as_str()).collect();
        assert_eq!(titles, vec!["Dune", "Emma"]);
    }

    #[test]
    #[traced_test]
    fn test_dangling_link_is_logged() {
        let records = vec![json!({ "id": 8, "userId": 4, "bookId": 9 })];
        let books: Vec<Book> = USER_LIBRARY.project(records).unwrap();
        assert!(books.is_empty());
        assert!(logs_contain("Skipping join record"));
    }

    #[test]
    fn test_project_rejects_malformed_child() {
        let records = vec![json!({ "id": 1, "author": { "id": 1 } })];
        let result: BackendResult<Vec<crate::models::Author>> = BOOK_AUTHORS.project(records);
        assert!(result.is_err());
    }
}
