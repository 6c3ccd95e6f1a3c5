//! The hybrid authentication gate for mutating endpoints.
//!
//! Two strategies sit behind one `Authorizer` trait: a session strategy
//! verifying a JWT bearer token, and a Basic strategy verifying a
//! username/password pair. A request passes the gate when either strategy
//! accepts it; list endpoints are mounted outside the gate entirely.

use std::sync::Arc;

use async_trait::async_trait;
use axum::extract::{Request, State};
use axum::http::{Method, header};
use axum::middleware::Next;
use axum::response::Response;
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;

use crate::error::{AppError, AppResult};
use crate::services::AuthService;
use crate::state::AppState;

/// A single authentication strategy.
#[async_trait]
pub trait Authorizer: Send + Sync {
    /// Decides whether the `Authorization` header authorizes a mutation.
    ///
    /// `Ok(false)` means "not my scheme or credentials rejected"; an `Err`
    /// is reserved for infrastructure faults (e.g. the user lookup failed).
    async fn authorize(&self, auth_header: Option<&str>) -> AppResult<bool>;
}

/// Accepts `Authorization: Bearer <access token>`.
pub struct SessionAuthorizer {
    auth: AuthService,
}

impl SessionAuthorizer {
    pub fn new(auth: AuthService) -> Self {
        Self { auth }
    }
}

#[async_trait]
impl Authorizer for SessionAuthorizer {
    async fn authorize(&self, auth_header: Option<&str>) -> AppResult<bool> {
        let Some(token) = auth_header.and_then(|h| h.strip_prefix("Bearer ")) else {
            return Ok(false);
        };
        Ok(self.auth.verify_access_token(token).is_ok())
    }
}

/// Accepts `Authorization: Basic <base64 user:pass>`.
pub struct BasicAuthorizer {
    auth: AuthService,
}

impl BasicAuthorizer {
    pub fn new(auth: AuthService) -> Self {
        Self { auth }
    }
}

#[async_trait]
impl Authorizer for BasicAuthorizer {
    async fn authorize(&self, auth_header: Option<&str>) -> AppResult<bool> {
        let Some((username, password)) = auth_header.and_then(parse_basic) else {
            return Ok(false);
        };
        self.auth.verify_basic(&username, &password).await
    }
}

/// OR-composition over strategies: the first acceptance wins.
pub struct AnyAuthorizer {
    strategies: Vec<Arc<dyn Authorizer>>,
}

#[async_trait]
impl Authorizer for AnyAuthorizer {
    async fn authorize(&self, auth_header: Option<&str>) -> AppResult<bool> {
        for strategy in &self.strategies {
            if strategy.authorize(auth_header).await? {
                return Ok(true);
            }
        }
        Ok(false)
    }
}

/// The production gate: session OR Basic.
pub fn hybrid_authorizer(auth: AuthService) -> Arc<dyn Authorizer> {
    Arc::new(AnyAuthorizer {
        strategies: vec![
            Arc::new(SessionAuthorizer::new(auth.clone())),
            Arc::new(BasicAuthorizer::new(auth)),
        ],
    })
}

/// Decodes a Basic header value into its credential pair.
///
/// Returns `None` for a different scheme, invalid base64, non-UTF-8
/// payload, or a payload without the `:` separator.
fn parse_basic(auth_header: &str) -> Option<(String, String)> {
    let encoded = auth_header.strip_prefix("Basic ")?;
    let decoded = BASE64.decode(encoded.trim()).ok()?;
    let decoded = String::from_utf8(decoded).ok()?;
    let (username, password) = decoded.split_once(':')?;
    Some((username.to_string(), password.to_string()))
}

/// Middleware guarding catalog routes.
///
/// Reads pass through unauthenticated; mutations must satisfy the hybrid
/// gate.
pub async fn require_auth(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    if matches!(
        *request.method(),
        Method::GET | Method::HEAD | Method::OPTIONS
    ) {
        return Ok(next.run(request).await);
    }

    let auth_header = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    if state.authorizer.authorize(auth_header).await? {
        Ok(next.run(request).await)
    } else {
        Err(AppError::unauthorized("Authentication required"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_basic_decodes_credential_pair() {
        // "admin:rahasia123"
        let header = format!("Basic {}", BASE64.encode("admin:rahasia123"));
        assert_eq!(
            parse_basic(&header),
            Some(("admin".to_string(), "rahasia123".to_string()))
        );
    }

    #[test]
    fn parse_basic_keeps_colons_in_password() {
        let header = format!("Basic {}", BASE64.encode("admin:pa:ss"));
        assert_eq!(
            parse_basic(&header),
            Some(("admin".to_string(), "pa:ss".to_string()))
        );
    }

    #[test]
    fn parse_basic_rejects_missing_separator() {
        let header = format!("Basic {}", BASE64.encode("admin"));
        assert_eq!(parse_basic(&header), None);
    }

    #[test]
    fn parse_basic_rejects_other_schemes_and_garbage() {
        assert_eq!(parse_basic("Bearer abc"), None);
        assert_eq!(parse_basic("Basic !!!not-base64!!!"), None);
        assert_eq!(parse_basic(""), None);
    }
}
