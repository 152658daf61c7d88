//! Bearer-token middleware and the `CurrentUser` extractor.

use async_trait::async_trait;
use axum::extract::{FromRequestParts, Request, State};
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::Response;
use axum_extra::extract::cookie::CookieJar;
use tracing::warn;
use uuid::Uuid;

use models::role::RoleName;
use service::auth::errors::AuthError;
use service::auth::token::Claims;

use crate::errors::ApiError;
use crate::state::ServerState;

pub const AUTH_COOKIE: &str = "auth_token";

/// Read the token from `Authorization: Bearer <token>`, falling back to the
/// `auth_token` cookie.
fn extract_token(headers: &HeaderMap) -> Result<String, ApiError> {
    if let Some(value) = headers.get(AUTHORIZATION) {
        let raw = value.to_str().map_err(|_| ApiError::Auth(AuthError::Unauthorized))?;
        return match raw.strip_prefix("Bearer ") {
            Some(token) if !token.trim().is_empty() => Ok(token.trim().to_string()),
            _ => {
                warn!("invalid Authorization format (expect Bearer)");
                Err(ApiError::Auth(AuthError::Unauthorized))
            }
        };
    }
    CookieJar::from_headers(headers)
        .get(AUTH_COOKIE)
        .map(|c| c.value().to_string())
        .filter(|t| !t.is_empty())
        .ok_or(ApiError::MissingToken)
}

/// Validate the token and stash its claims for downstream extractors.
pub async fn require_auth(State(state): State<ServerState>, mut req: Request, next: Next) -> Result<Response, ApiError> {
    let token = extract_token(req.headers())?;
    let claims = state.auth.authenticate(&token).await.map_err(|e| {
        warn!(path = %req.uri().path(), error = %e, "token rejected");
        ApiError::from(e)
    })?;
    req.extensions_mut().insert(claims);
    Ok(next.run(req).await)
}

/// Claims of the authenticated caller.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub Claims);

impl CurrentUser {
    pub fn id(&self) -> Result<Uuid, ApiError> {
        Ok(self.0.user_id()?)
    }

    pub fn role(&self) -> RoleName {
        self.0.role
    }

    pub fn require(&self, allowed: &[RoleName]) -> Result<(), ApiError> {
        if self.0.has_role(allowed) {
            return Ok(());
        }
        warn!(user = %self.0.username, role = self.0.role.as_str(), "role not permitted");
        Err(ApiError::Forbidden(format!("role {} may not perform this action", self.0.role.as_str())))
    }
}

#[async_trait]
impl<S: Send + Sync> FromRequestParts<S> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts.extensions.get::<Claims>().cloned().map(CurrentUser).ok_or(ApiError::MissingToken)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn bearer_header_wins_over_cookie() {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer abc.def"));
        headers.insert("cookie", HeaderValue::from_static("auth_token=zzz"));
        assert_eq!(extract_token(&headers).unwrap(), "abc.def");
    }

    #[test]
    fn cookie_fallback_and_missing_token() {
        let mut headers = HeaderMap::new();
        headers.insert("cookie", HeaderValue::from_static("theme=dark; auth_token=tok123"));
        assert_eq!(extract_token(&headers).unwrap(), "tok123");
        assert!(matches!(extract_token(&HeaderMap::new()), Err(ApiError::MissingToken)));
    }

    #[test]
    fn non_bearer_scheme_is_unauthorized() {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_static("Basic dXNlcjpwYXNz"));
        assert!(matches!(extract_token(&headers), Err(ApiError::Auth(AuthError::Unauthorized))));
    }

    #[test]
    fn require_checks_role() {
        let user = CurrentUser(Claims {
            sub: Uuid::new_v4().to_string(),
            username: "judge.one".into(),
            role: RoleName::Judge,
            iat: 0,
            exp: 0,
        });
        assert!(user.require(&[RoleName::Judge]).is_ok());
        assert!(matches!(user.require(&[RoleName::Admin]), Err(ApiError::Forbidden(_))));
    }
}
