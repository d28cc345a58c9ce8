//! JWT claims extractor.

use crate::responses::ApiResponse;
use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use taskhive_core::{ErrorResponse, TaskhiveError, UserId};
use taskhive_security::Claims;

/// Extractor for authenticated user claims.
///
/// The auth middleware validates the bearer token and stores the claims in
/// the request extensions; this extractor surfaces them to handlers and
/// rejects the request when they are absent.
pub struct AuthenticatedUser(pub Claims);

impl AuthenticatedUser {
    /// Returns the authenticated user's id.
    pub fn user_id(&self) -> Result<UserId, AuthError> {
        self.0.user_id().ok_or_else(|| {
            AuthError(TaskhiveError::InvalidToken(
                "Missing user ID in token".to_string(),
            ))
        })
    }
}

impl std::ops::Deref for AuthenticatedUser {
    type Target = Claims;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Error type for authentication extraction.
pub struct AuthError(pub TaskhiveError);

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.0.status_code()).unwrap_or(StatusCode::UNAUTHORIZED);

        let error_response = ErrorResponse::from_error(&self.0);
        let body = Json(ApiResponse::<()>::error(error_response));

        (status, body).into_response()
    }
}

impl From<AuthError> for crate::responses::AppError {
    fn from(err: AuthError) -> Self {
        Self(err.0)
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
            .ok_or_else(|| {
                AuthError(TaskhiveError::Unauthorized(
                    "Missing authorization header".to_string(),
                ))
            })?;

        if !auth_header.starts_with("Bearer ") {
            return Err(AuthError(TaskhiveError::Unauthorized(
                "Invalid authorization format".to_string(),
            )));
        }

        // Claims are present only if the middleware accepted the token.
        let claims = parts.extensions.get::<Claims>().cloned().ok_or_else(|| {
            AuthError(TaskhiveError::Unauthorized(
                "Invalid or expired token".to_string(),
            ))
        })?;

        Ok(AuthenticatedUser(claims))
    }
}
