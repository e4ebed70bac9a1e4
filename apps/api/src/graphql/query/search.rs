//! Search queries
//!
//! Both searches fan out to two resources and return one merged list
//! ordered by name or title.

use async_graphql::{Context, Object, Result};
use bookshelf_backend_client::{BackendClient, Capability, SearchQuery as SearchTerms};

use crate::error::GraphQLResultExt;
use crate::graphql::guards::CapabilityGuard;
use crate::graphql::types::{BookResult, Person, SearchOrderBy};

#[derive(Default)]
pub struct SearchQuery;

fn search_terms(query: String, exact: bool, order_by: Option<SearchOrderBy>) -> SearchTerms {
    SearchTerms::new(query)
        .exact(exact)
        .with_direction(order_by.unwrap_or(SearchOrderBy::ResultAsc).into())
}

#[Object]
impl SearchQuery {
    /// Authors and users whose name matches `query`
    #[graphql(guard = "CapabilityGuard::new(Capability::SearchPeople)")]
    async fn search_people(
        &self,
        ctx: &Context<'_>,
        #[graphql(default = false)] exact: bool,
        order_by: Option<SearchOrderBy>,
        query: String,
    ) -> Result<Option<Vec<Person>>> {
        let client = ctx.data::<BackendClient>()?;
        let people = client
            .search_people(&search_terms(query, exact, order_by))
            .await
            .into_graphql()?;
        Ok(Some(people.into_iter().map(Person::from).collect()))
    }

    /// Books whose title, and authors whose name, match `query`
    #[graphql(guard = "CapabilityGuard::new(Capability::SearchBooks)")]
    async fn search_books(
        &self,
        ctx: &Context<'_>,
        #[graphql(default = false)] exact: bool,
        order_by: Option<SearchOrderBy>,
        query: String,
    ) -> Result<Option<Vec<BookResult>>> {
        let client = ctx.data::<BackendClient>()?;
        let results = client
            .search_books(&search_terms(query, exact, order_by))
            .await
            .into_graphql()?;
        Ok(Some(results.into_iter().map(BookResult::from).collect()))
    }
}
