use async_trait::async_trait;
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{FromRequest, FromRequestParts, Path, Query, Request};
use axum::http::request::Parts;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{error, warn};

use common::types::{ApiResponse, FieldError};
use service::auth::errors::AuthError;
use service::errors::ServiceError;

/// Every failure a handler can return, rendered as the `{message, data, errors}` envelope.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Service(#[from] ServiceError),
    #[error(transparent)]
    Auth(#[from] AuthError),
    #[error("authentication required")]
    MissingToken,
    #[error("{0}")]
    Forbidden(String),
    #[error("{0}")]
    BadRequest(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Service(e) => match e {
                ServiceError::Validation(_) | ServiceError::Fields(_) => StatusCode::BAD_REQUEST,
                ServiceError::NotFound(_) => StatusCode::NOT_FOUND,
                ServiceError::Conflict(_) => StatusCode::CONFLICT,
                ServiceError::Forbidden(_) => StatusCode::FORBIDDEN,
                ServiceError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
                ServiceError::Db(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            ApiError::Auth(e) => match e {
                AuthError::Validation(_) => StatusCode::BAD_REQUEST,
                AuthError::Conflict => StatusCode::CONFLICT,
                AuthError::NotFound => StatusCode::NOT_FOUND,
                AuthError::Unauthorized => StatusCode::UNAUTHORIZED,
                AuthError::Disabled => StatusCode::FORBIDDEN,
                AuthError::HashError(_) | AuthError::TokenError(_) | AuthError::Repository(_) => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            },
            ApiError::MissingToken => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }

    /// Stable numeric code for logs; auth failures keep their own 1xxx range.
    pub fn code(&self) -> u16 {
        match self {
            ApiError::Auth(e) => e.code(),
            ApiError::Service(e) => match e {
                ServiceError::Validation(_) => 2001,
                ServiceError::Fields(_) => 2002,
                ServiceError::NotFound(_) => 2003,
                ServiceError::Conflict(_) => 2004,
                ServiceError::Forbidden(_) => 2005,
                ServiceError::Unauthorized(_) => 2006,
                ServiceError::Db(_) => 2100,
            },
            ApiError::MissingToken => 3001,
            ApiError::Forbidden(_) => 3002,
            ApiError::BadRequest(_) => 3003,
        }
    }

    fn message_and_errors(&self) -> (String, Vec<FieldError>) {
        match self {
            ApiError::Service(ServiceError::Fields(errs)) => ("Validation failed".into(), errs.clone()),
            ApiError::Service(ServiceError::Db(_)) | ApiError::Auth(AuthError::Repository(_)) => {
                ("Internal server error".into(), Vec::new())
            }
            ApiError::Auth(AuthError::HashError(_)) | ApiError::Auth(AuthError::TokenError(_)) => {
                ("Internal server error".into(), Vec::new())
            }
            other => (other.to_string(), Vec::new()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let code = self.code();
        if status.is_server_error() {
            error!(code, error = %self, "request failed");
        } else {
            warn!(code, status = status.as_u16(), error = %self, "request rejected");
        }
        let (message, errors) = self.message_and_errors();
        (status, Json(ApiResponse::<()>::failure(message, errors))).into_response()
    }
}

/// `Json` extractor whose rejections use the error envelope.
pub struct ApiJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|e: JsonRejection| ApiError::BadRequest(e.body_text()))?;
        Ok(Self(value))
    }
}

/// `Path` extractor whose rejections use the error envelope.
pub struct ApiPath<T>(pub T);

#[async_trait]
impl<S, T> FromRequestParts<S> for ApiPath<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(value) = Path::<T>::from_request_parts(parts, state)
            .await
            .map_err(|e: PathRejection| ApiError::BadRequest(e.body_text()))?;
        Ok(Self(value))
    }
}

/// `Query` extractor whose rejections use the error envelope.
pub struct ApiQuery<T>(pub T);

#[async_trait]
impl<S, T> FromRequestParts<S> for ApiQuery<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|e: QueryRejection| ApiError::BadRequest(e.body_text()))?;
        Ok(Self(value))
    }
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("database unavailable: {0}")]
    Database(String),
    #[error(transparent)]
    Any(#[from] anyhow::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn service_errors_map_to_http_status() {
        assert_eq!(ApiError::from(ServiceError::not_found("challan")).status(), StatusCode::NOT_FOUND);
        assert_eq!(ApiError::from(ServiceError::Conflict("dup".into())).status(), StatusCode::CONFLICT);
        assert_eq!(ApiError::from(ServiceError::field("cnic", "bad")).status(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::from(ServiceError::Db("boom".into())).status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(ApiError::from(AuthError::Disabled).status(), StatusCode::FORBIDDEN);
        assert_eq!(ApiError::MissingToken.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn field_errors_are_carried_and_db_details_hidden() {
        let (msg, errs) = ApiError::from(ServiceError::field("plate_number", "required")).message_and_errors();
        assert_eq!(msg, "Validation failed");
        assert_eq!(errs[0].field, "plate_number");

        let (msg, errs) = ApiError::from(ServiceError::Db("password=hunter2".into())).message_and_errors();
        assert_eq!(msg, "Internal server error");
        assert!(errs.is_empty());
    }

    #[test]
    fn codes_are_stable() {
        assert_eq!(ApiError::from(AuthError::Unauthorized).code(), 1004);
        assert_eq!(ApiError::from(ServiceError::Conflict("x".into())).code(), 2004);
    }
}
