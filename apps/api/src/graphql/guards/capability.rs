//! Capability guard for GraphQL resolvers
//!
//! Every resolver names the capability it exercises. The guard hands the
//! request's principal and that capability to the configured
//! [`PermissionEvaluator`] and refuses the field when the evaluator says no.

use std::sync::Arc;

use async_graphql::{Context, ErrorExtensions, Guard};
use bookshelf_backend_client::{Capability, PermissionEvaluator, Principal};
use tracing::{debug, warn};

use crate::error::ApiError;

/// Permission evaluator stored in schema data
#[derive(Clone)]
pub struct Permissions(Arc<dyn PermissionEvaluator>);

impl Permissions {
    /// Wrap an evaluator
    pub fn new(evaluator: Arc<dyn PermissionEvaluator>) -> Self {
        Self(evaluator)
    }

    /// Ask the evaluator about one capability
    pub fn allows(&self, principal: Option<&Principal>, capability: Capability) -> bool {
        self.0.allows(principal, capability)
    }
}

/// Guard that consults the [`PermissionEvaluator`] for one capability
///
/// # Example
///
/// ```ignore
/// #[Object]
/// impl ReviewMutation {
///     #[graphql(guard = "CapabilityGuard::new(Capability::DeleteReview)")]
///     async fn delete_review(&self, ctx: &Context<'_>, id: ID) -> Result<ID> {
///         // ...
///     }
/// }
/// ```
pub struct CapabilityGuard {
    capability: Capability,
}

impl CapabilityGuard {
    /// Create a guard for `capability`
    pub fn new(capability: Capability) -> Self {
        Self { capability }
    }
}

impl Guard for CapabilityGuard {
    async fn check(&self, ctx: &Context<'_>) -> async_graphql::Result<()> {
        let permissions = match ctx.data_opt::<Permissions>() {
            Some(permissions) => permissions,
            None => {
                debug!(
                    capability = %self.capability,
                    "No permission evaluator configured, allowing"
                );
                return Ok(());
            }
        };

        let principal = ctx.data_opt::<Principal>();
        if permissions.allows(principal, self.capability) {
            return Ok(());
        }

        warn!(
            capability = %self.capability,
            subject = principal.map(|p| p.subject.as_str()),
            "Capability denied"
        );

        let err = match principal {
            None => ApiError::Unauthenticated,
            Some(_) => ApiError::Forbidden(self.capability.name().to_string()),
        };
        Err(err.extend())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_graphql::{EmptyMutation, EmptySubscription, Object, Request, Schema};
    use tracing_test::traced_test;

    struct Probe;

    #[Object]
    impl Probe {
        #[graphql(guard = "CapabilityGuard::new(Capability::ListBooks)")]
        async fn books(&self) -> i32 {
            1
        }
    }

    struct Nobody;

    impl PermissionEvaluator for Nobody {
        fn allows(&self, _principal: Option<&Principal>, _capability: Capability) -> bool {
            false
        }
    }

    fn schema(evaluator: Option<Arc<dyn PermissionEvaluator>>) -> Schema<Probe, EmptyMutation, EmptySubscription> {
        let mut builder = Schema::build(Probe, EmptyMutation, EmptySubscription);
        if let Some(evaluator) = evaluator {
            builder = builder.data(Permissions::new(evaluator));
        }
        builder.finish()
    }

    fn code(response: &async_graphql::Response) -> Option<String> {
        let value = serde_json::to_value(response).unwrap();
        value["errors"][0]["extensions"]["code"]
            .as_str()
            .map(str::to_string)
    }

    #[tokio::test]
    async fn test_no_evaluator_allows() {
        let response = schema(None).execute("{ books }").await;
        assert!(response.errors.is_empty());
    }

    #[tokio::test]
    #[traced_test]
    async fn test_denial_without_principal_is_unauthenticated() {
        let response = schema(Some(Arc::new(Nobody))).execute("{ books }").await;
        assert_eq!(code(&response).as_deref(), Some("UNAUTHENTICATED"));
        assert!(logs_contain("Capability denied"));
    }

    #[tokio::test]
    async fn test_denial_with_principal_is_forbidden() {
        let request = Request::new("{ books }").data(Principal::new("7", serde_json::json!({})));
        let response = schema(Some(Arc::new(Nobody))).execute(request).await;
        assert_eq!(code(&response).as_deref(), Some("FORBIDDEN"));
    }
}
