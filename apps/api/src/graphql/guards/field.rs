//! Field-level guards
//!
//! Individual fields of a type (e.g. `User.age`) can be marked protected or
//! uppercased. The [`FieldGuardExtension`] consults the [`FieldPolicy`] on
//! every field resolution, so the resolvers themselves stay unaware of it.
//! A protected field resolved without an identity fails with the same
//! `UNAUTHENTICATED` error the operation guards produce. A nullable field is
//! resolved to `null` and the error is appended to the response, so sibling
//! fields and the parent object are unaffected; a non-null field propagates
//! the error to its parent.

use std::collections::HashMap;
use std::sync::Arc;

use async_graphql::extensions::{
    Extension, ExtensionContext, ExtensionFactory, NextExecute, NextResolve, ResolveInfo,
};
use async_graphql::{
    ErrorExtensions, PathSegment, QueryPathNode, QueryPathSegment, Response, ServerError,
    ServerResult, Value,
};
use parking_lot::Mutex;

use crate::error::{ApiError, ApiResult};
use crate::graphql::context::RequestContext;

/// Transform or check applied to a single field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldGuard {
    /// Field requires an authenticated identity
    Protected,
    /// String results are returned uppercased
    Uppercase,
}

/// Which guards apply to which `Type.field`
#[derive(Debug, Clone, Default)]
pub struct FieldPolicy {
    fields: HashMap<String, HashMap<String, Vec<FieldGuard>>>,
}

impl FieldPolicy {
    /// Policy with no guarded fields
    pub fn new() -> Self {
        Self::default()
    }

    /// Add guards to `type_name.field_name`
    pub fn field(
        mut self,
        type_name: &str,
        field_name: &str,
        guards: impl IntoIterator<Item = FieldGuard>,
    ) -> Self {
        let entry = self
            .fields
            .entry(type_name.to_string())
            .or_default()
            .entry(field_name.to_string())
            .or_default();

        for guard in guards {
            if !entry.contains(&guard) {
                entry.push(guard);
            }
        }
        self
    }

    /// Guards declared for a field, empty if none
    pub fn guards_for(&self, type_name: &str, field_name: &str) -> &[FieldGuard] {
        self.fields
            .get(type_name)
            .and_then(|fields| fields.get(field_name))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Body measurements and age are only visible to signed-in callers
    pub fn standard() -> Self {
        Self::new()
            .field("User", "age", [FieldGuard::Protected])
            .field("User", "height", [FieldGuard::Protected])
            .field("User", "weight", [FieldGuard::Protected])
    }
}

/// Uppercase string results, recursing into lists; other values pass through
pub fn uppercase_value(value: Value) -> Value {
    match value {
        Value::String(s) => Value::String(s.to_uppercase()),
        Value::List(items) => Value::List(items.into_iter().map(uppercase_value).collect()),
        other => other,
    }
}

fn ensure_authenticated(ctx: Option<&RequestContext>) -> ApiResult<()> {
    match ctx {
        Some(ctx) => ctx.me().map(|_| ()),
        None => Err(ApiError::Unauthenticated),
    }
}

/// Schema extension enforcing a [`FieldPolicy`]
pub struct FieldGuardExtension {
    policy: Arc<FieldPolicy>,
}

impl FieldGuardExtension {
    pub fn new(policy: FieldPolicy) -> Self {
        Self {
            policy: Arc::new(policy),
        }
    }
}

impl ExtensionFactory for FieldGuardExtension {
    fn create(&self) -> Arc<dyn Extension> {
        Arc::new(FieldGuards {
            policy: self.policy.clone(),
            rejected: Mutex::new(Vec::new()),
        })
    }
}

/// Convert an execution path into the path reported with an error
fn error_path(node: &QueryPathNode<'_>) -> Vec<PathSegment> {
    let mut path: Vec<PathSegment> = std::iter::once(node)
        .chain(node.parents())
        .map(|node| match node.segment {
            QueryPathSegment::Name(name) => PathSegment::Field(name.to_string()),
            QueryPathSegment::Index(idx) => PathSegment::Index(idx),
        })
        .collect();
    path.reverse();
    path
}

fn field_error(err: ApiError, path: Vec<PathSegment>) -> ServerError {
    let extended = err.extend();
    let mut error = ServerError::new(extended.message, None);
    error.path = path;
    error.extensions = extended.extensions;
    error
}

/// Per-request state of [`FieldGuardExtension`]
struct FieldGuards {
    policy: Arc<FieldPolicy>,
    /// Errors for nullable fields resolved to `null`, reported after execution
    rejected: Mutex<Vec<ServerError>>,
}

#[async_trait::async_trait]
impl Extension for FieldGuards {
    async fn execute(
        &self,
        ctx: &ExtensionContext<'_>,
        operation_name: Option<&str>,
        next: NextExecute<'_>,
    ) -> Response {
        let mut response = next.run(ctx, operation_name).await;
        response.errors.extend(self.rejected.lock().drain(..));
        response
    }

    async fn resolve(
        &self,
        ctx: &ExtensionContext<'_>,
        info: ResolveInfo<'_>,
        next: NextResolve<'_>,
    ) -> ServerResult<Option<Value>> {
        let guards = self.policy.guards_for(info.parent_type, info.name);
        if guards.is_empty() {
            return next.run(ctx, info).await;
        }

        if guards.contains(&FieldGuard::Protected) {
            if let Err(err) = ensure_authenticated(ctx.data_opt::<RequestContext>()) {
                tracing::debug!(
                    parent_type = info.parent_type,
                    field = info.name,
                    "Protected field requested without identity"
                );
                let error = field_error(err, error_path(info.path_node));
                if info.return_type.ends_with('!') {
                    return Err(error);
                }
                self.rejected.lock().push(error);
                return Ok(Some(Value::Null));
            }
        }

        let value = next.run(ctx, info).await?;

        if guards.contains(&FieldGuard::Uppercase) {
            Ok(value.map(uppercase_value))
        } else {
            Ok(value)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_policy_protects_measurements() {
        let policy = FieldPolicy::standard();

        for field in ["age", "height", "weight"] {
            assert_eq!(policy.guards_for("User", field), &[FieldGuard::Protected]);
        }
        assert!(policy.guards_for("User", "name").is_empty());
        assert!(policy.guards_for("Post", "age").is_empty());
    }

    #[test]
    fn test_field_guards_accumulate_without_duplicates() {
        let policy = FieldPolicy::new()
            .field("Post", "title", [FieldGuard::Uppercase])
            .field("Post", "title", [FieldGuard::Protected, FieldGuard::Uppercase]);

        assert_eq!(
            policy.guards_for("Post", "title"),
            &[FieldGuard::Uppercase, FieldGuard::Protected]
        );
    }

    #[test]
    fn test_uppercase_value_only_touches_strings() {
        assert_eq!(
            uppercase_value(Value::String("Fong".to_string())),
            Value::String("FONG".to_string())
        );
        assert_eq!(
            uppercase_value(Value::List(vec![
                Value::String("a".to_string()),
                Value::Null
            ])),
            Value::List(vec![Value::String("A".to_string()), Value::Null])
        );
        assert_eq!(uppercase_value(Value::Null), Value::Null);
        assert_eq!(uppercase_value(Value::Boolean(true)), Value::Boolean(true));
    }

    #[test]
    fn test_error_path_runs_root_to_leaf() {
        let users = QueryPathNode {
            parent: None,
            segment: QueryPathSegment::Name("users"),
        };
        let second = QueryPathNode {
            parent: Some(&users),
            segment: QueryPathSegment::Index(1),
        };
        let age = QueryPathNode {
            parent: Some(&second),
            segment: QueryPathSegment::Name("age"),
        };

        assert_eq!(
            error_path(&age),
            vec![
                PathSegment::Field("users".to_string()),
                PathSegment::Index(1),
                PathSegment::Field("age".to_string()),
            ]
        );
    }

    #[test]
    fn test_field_error_carries_code_and_path() {
        let error = field_error(
            ApiError::Unauthenticated,
            vec![PathSegment::Field("me".to_string())],
        );

        assert_eq!(error.path, vec![PathSegment::Field("me".to_string())]);
        let code = error
            .extensions
            .as_ref()
            .and_then(|extensions| extensions.get("code"))
            .cloned();
        assert_eq!(code, Some(Value::String("UNAUTHENTICATED".to_string())));
    }

    #[test]
    fn test_missing_context_counts_as_anonymous() {
        assert!(matches!(
            ensure_authenticated(None),
            Err(ApiError::Unauthenticated)
        ));
    }
}
