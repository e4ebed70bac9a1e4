//! Pre-write uniqueness checks
//!
//! Input shapes declare which of their fields must not already exist in the
//! backend through a static [`UniqueRule`] table. Before the write, every
//! present field is looked up concurrently and the first collision, in rule
//! declaration order, aborts the mutation.
//!
//! The check and the write that follows are two separate requests. Two
//! concurrent writers can both pass the check; that window is accepted.

use futures_util::future::try_join_all;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::client::BackendClient;
use crate::error::{BackendError, BackendResult};
use crate::pagination::Filters;

/// A field that must be unique across a backend resource
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UniqueRule {
    /// Path of the field inside the input, outermost name first
    pub field_path: &'static [&'static str],
    /// Backend resource searched for an existing value
    pub resource: &'static str,
    /// Backend filter key, when it differs from the field name
    pub database_key: Option<&'static str>,
}

impl UniqueRule {
    /// Rule checking `field_path` against `resource`, filtering on the field's own name
    pub const fn new(field_path: &'static [&'static str], resource: &'static str) -> Self {
        Self {
            field_path,
            resource,
            database_key: None,
        }
    }

    /// Filter on a different backend key
    pub const fn with_database_key(mut self, key: &'static str) -> Self {
        self.database_key = Some(key);
        self
    }

    /// Last segment of the field path
    pub fn field_name(&self) -> &'static str {
        self.field_path.last().copied().unwrap_or_default()
    }

    /// Key used in the existence query
    pub fn filter_key(&self) -> &'static str {
        self.database_key.unwrap_or_else(|| self.field_name())
    }

    fn dotted_path(&self) -> String {
        self.field_path.join(".")
    }
}

/// An input shape carrying uniqueness rules
pub trait UniqueInput: Serialize {
    /// Rules in the order they are reported
    fn unique_rules() -> &'static [UniqueRule];
}

/// Locate the value at `path` inside `input`.
///
/// The path is first followed from the top level. When that fails, nested
/// objects are searched depth-first for the same path. Arrays are never
/// entered, and `null` counts as absent.
pub fn find_field<'a>(input: &'a Value, path: &[&str]) -> Option<&'a Value> {
    if path.is_empty() {
        return None;
    }

    let direct = path
        .iter()
        .try_fold(input, |value, segment| value.as_object()?.get(*segment))
        .filter(|value| !value.is_null());
    if direct.is_some() {
        return direct;
    }

    input
        .as_object()?
        .values()
        .filter(|child| child.is_object())
        .find_map(|child| find_field(child, path))
}

/// Render a scalar as a filter value; structured values cannot be looked up
fn filter_value(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Check every rule whose field is present in `input`.
///
/// Existence queries run concurrently; a transport error from any of them
/// fails the whole check.
///
/// # Errors
/// - `BackendError::DuplicateField` for the first rule, in declaration order, whose value exists
/// - Transport errors from any existence query
pub async fn enforce_unique(
    client: &BackendClient,
    input: &Value,
    rules: &[UniqueRule],
) -> BackendResult<()> {
    let checks: Vec<(&UniqueRule, String)> = rules
        .iter()
        .filter_map(|rule| {
            let value = find_field(input, rule.field_path)?;
            match filter_value(value) {
                Some(value) => Some((rule, value)),
                None => {
                    debug!(field = %rule.dotted_path(), "Skipping uniqueness check on non-scalar value");
                    None
                }
            }
        })
        .collect();

    let taken = try_join_all(checks.iter().map(|(rule, value)| async move {
        let filters = Filters::new().with(rule.filter_key(), value);
        client.exists(rule.resource, &filters).await
    }))
    .await?;

    for ((rule, _), taken) in checks.iter().zip(taken) {
        if taken {
            warn!(
                field = %rule.dotted_path(),
                resource = rule.resource,
                "Uniqueness check failed"
            );
            return Err(BackendError::DuplicateField {
                field: rule.field_name().to_string(),
                path: rule.dotted_path(),
                resource: rule.resource.to_string(),
            });
        }
    }

    Ok(())
}

impl BackendClient {
    /// Run the input's declared uniqueness rules against the backend
    pub async fn enforce_unique<I: UniqueInput>(&self, input: &I) -> BackendResult<()> {
        let value = serde_json::to_value(input)?;
        enforce_unique(self, &value, I::unique_rules()).await
    }
}
