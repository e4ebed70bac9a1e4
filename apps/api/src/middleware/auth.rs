//! Bearer token verification
//!
//! Credentials are optional. A request without a token, or with one that
//! fails verification, reaches the schema with no [`Principal`]; the
//! capability guards decide what an anonymous caller may do.
//!
//! # Usage
//!
//! ```rust,ignore
//! use crate::middleware::MaybePrincipal;
//!
//! async fn handler(MaybePrincipal(principal): MaybePrincipal) -> impl IntoResponse {
//!     match principal {
//!         Some(p) => format!("Hello, {}!", p.subject),
//!         None => "Hello, guest!".to_string(),
//!     }
//! }
//! ```

use std::sync::Arc;

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
};
use bookshelf_backend_client::Principal;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::ApiResult;

/// Claims carried by an access token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user identifier)
    pub sub: String,
    /// Expiry as a unix timestamp
    pub exp: u64,
    /// Any other claims, passed through to the principal
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Verifies HS256 access tokens
#[derive(Clone)]
pub struct TokenVerifier {
    key: Arc<DecodingKey>,
    validation: Validation,
}

impl TokenVerifier {
    /// Create a verifier for tokens signed with `secret`
    pub fn new(secret: &str) -> Self {
        Self {
            key: Arc::new(DecodingKey::from_secret(secret.as_bytes())),
            validation: Validation::new(Algorithm::HS256),
        }
    }

    /// Verify a token and turn its claims into a principal
    ///
    /// # Errors
    /// - `ApiError::InvalidToken` if the token is invalid, expired, or malformed
    pub fn verify(&self, token: &str) -> ApiResult<Principal> {
        let token_data = decode::<Claims>(token, &self.key, &self.validation)?;
        let Claims { sub, extra, .. } = token_data.claims;
        Ok(Principal::new(sub, Value::Object(extra)))
    }

    /// Resolve the principal for a request, if its credentials check out
    pub fn principal_from_headers(&self, headers: &HeaderMap) -> Option<Principal> {
        let token = extract_bearer_token(headers)?;
        match self.verify(token) {
            Ok(principal) => Some(principal),
            Err(e) => {
                tracing::debug!(error = %e, "Ignoring unverifiable bearer token");
                None
            }
        }
    }
}

/// Extract the bearer token from the Authorization header
///
/// The scheme is matched case-insensitively and values with trailing parts
/// are rejected.
pub fn extract_bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(AUTHORIZATION).and_then(|v| v.to_str().ok())?;

    let mut parts = value.split_whitespace();
    let scheme = parts.next()?;
    let token = parts.next()?;

    // Reject malformed values like "Bearer <token> <extra>"
    if parts.next().is_some() {
        return None;
    }

    if scheme.eq_ignore_ascii_case("bearer") && !token.is_empty() {
        Some(token)
    } else {
        None
    }
}

/// Optional authentication extractor
///
/// Reads the [`TokenVerifier`] from request extensions. Never rejects.
#[derive(Debug, Clone, Default)]
pub struct MaybePrincipal(pub Option<Principal>);

#[async_trait]
impl<S> FromRequestParts<S> for MaybePrincipal
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let Some(verifier) = parts.extensions.get::<TokenVerifier>() else {
            tracing::warn!("TokenVerifier not in extensions for MaybePrincipal");
            return Ok(MaybePrincipal(None));
        };

        Ok(MaybePrincipal(verifier.principal_from_headers(&parts.headers)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use axum::http::HeaderValue;
    use jsonwebtoken::{encode, EncodingKey, Header};
    use serde_json::json;

    use crate::error::ApiError;

    const SECRET: &str = "test-secret-that-is-long-enough-for-prod";

    fn token(secret: &str, exp: u64) -> String {
        let claims = json!({ "sub": "42", "exp": exp, "role": "reader" });
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    fn far_future() -> u64 {
        (chrono::Utc::now().timestamp() + 3600) as u64
    }

    fn headers(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn test_extract_bearer_token() {
        assert_eq!(extract_bearer_token(&headers("Bearer abc")), Some("abc"));
        assert_eq!(extract_bearer_token(&headers("bearer abc")), Some("abc"));
        assert_eq!(extract_bearer_token(&headers("Basic abc")), None);
        assert_eq!(extract_bearer_token(&headers("Bearer abc extra")), None);
        assert_eq!(extract_bearer_token(&headers("Bearer")), None);
        assert_eq!(extract_bearer_token(&HeaderMap::new()), None);
    }

    #[test]
    fn test_verify_valid_token() {
        let verifier = TokenVerifier::new(SECRET);

        let principal = verifier.verify(&token(SECRET, far_future())).unwrap();

        assert_eq!(principal.subject, "42");
        assert_eq!(principal.claims, json!({ "role": "reader" }));
    }

    #[test]
    fn test_verify_rejects_wrong_secret_and_expired() {
        let verifier = TokenVerifier::new(SECRET);

        assert_matches!(
            verifier.verify(&token("some-other-secret", far_future())),
            Err(ApiError::InvalidToken(_))
        );
        assert_matches!(
            verifier.verify(&token(SECRET, 1_000)),
            Err(ApiError::InvalidToken(_))
        );
    }

    #[test]
    fn test_invalid_token_yields_no_principal() {
        let verifier = TokenVerifier::new(SECRET);

        assert!(verifier
            .principal_from_headers(&headers("Bearer not-a-jwt"))
            .is_none());
        assert!(verifier.principal_from_headers(&HeaderMap::new()).is_none());

        let valid = format!("Bearer {}", token(SECRET, far_future()));
        assert!(verifier.principal_from_headers(&headers(&valid)).is_some());
    }
}
