//! User registration and authentication controller.

use crate::{
    extractors::AuthenticatedUser,
    responses::{created, ok, ApiResult, AppError},
    state::AppState,
};
use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use taskhive_service::{LoginRequest, RegisterRequest, TokenResponse, UserResponse};
use tracing::debug;

/// Creates the user router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(register))
        .route("/token", post(login))
        .route("/me", get(current_user))
}

/// Register a new user.
#[utoipa::path(
    post,
    path = "/users",
    tag = "users",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User created", body = UserResponse),
        (status = 400, description = "Validation error"),
        (status = 409, description = "Username or email already exists")
    )
)]
pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<crate::responses::ApiResponse<UserResponse>>), AppError> {
    debug!("Registration request for: {}", request.username);

    let response = state.auth_service.register(request).await?;
    Ok(created(response))
}

/// Get an access token for a user.
#[utoipa::path(
    post,
    path = "/users/token",
    tag = "users",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Access token", body = TokenResponse),
        (status = 401, description = "Invalid credentials")
    )
)]
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> ApiResult<TokenResponse> {
    debug!("Login request for: {}", request.username);

    let response = state.auth_service.login(request).await?;
    ok(response)
}

/// Get the current authenticated user.
#[utoipa::path(
    get,
    path = "/users/me",
    tag = "users",
    responses(
        (status = 200, description = "Current user", body = UserResponse),
        (status = 401, description = "Not authenticated")
    ),
    security(("bearer_auth" = []))
)]
pub async fn current_user(
    State(state): State<AppState>,
    user: AuthenticatedUser,
) -> ApiResult<UserResponse> {
    debug!("Get current user: {}", user.username);

    let response = state.auth_service.current_user(&user.0).await?;
    ok(response)
}
