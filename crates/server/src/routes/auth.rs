use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use tracing::info;

use common::types::ApiResponse;
use models::role::RoleName;
use service::auth::domain::{
    AuthSession, AuthUser, ChangePasswordInput, ForgotPasswordInput, LoginInput, RegisterInput, ResetPasswordInput,
};

use crate::auth::{CurrentUser, AUTH_COOKIE};
use crate::errors::{ApiError, ApiJson};
use crate::routes::{created, ok, ApiResult, Created};
use crate::state::ServerState;

#[utoipa::path(post, path = "/Auth/login", tag = "auth", request_body = crate::openapi::LoginRequest, responses((status = 200, description = "Logged in; token also set as auth_token cookie"), (status = 401, description = "Invalid credentials"), (status = 403, description = "Account disabled")))]
pub async fn login(
    State(state): State<ServerState>,
    jar: CookieJar,
    ApiJson(input): ApiJson<LoginInput>,
) -> Result<(CookieJar, Json<ApiResponse<AuthSession>>), ApiError> {
    let session = state.auth.login(input).await?;
    let mut cookie = Cookie::new(AUTH_COOKIE, session.token.clone());
    cookie.set_path("/");
    cookie.set_http_only(true);
    cookie.set_secure(false);
    cookie.set_same_site(SameSite::Lax);
    Ok((jar.add(cookie), Json(ApiResponse::ok("Login successful", session))))
}

#[utoipa::path(post, path = "/Auth/logout", tag = "auth", responses((status = 204, description = "Cookie cleared")))]
pub async fn logout(jar: CookieJar) -> (CookieJar, StatusCode) {
    let mut cookie = Cookie::from(AUTH_COOKIE);
    cookie.set_path("/");
    (jar.remove(cookie), StatusCode::NO_CONTENT)
}

#[utoipa::path(post, path = "/Auth/register", tag = "auth", request_body = crate::openapi::RegisterRequest, responses((status = 201, description = "Registered"), (status = 400, description = "Validation failed"), (status = 403, description = "Admin only"), (status = 409, description = "Username or email taken")))]
pub async fn register(
    State(state): State<ServerState>,
    user: CurrentUser,
    ApiJson(input): ApiJson<RegisterInput>,
) -> Created<AuthUser> {
    user.require(&[RoleName::Admin])?;
    let created_user = state.auth.register(input).await?;
    info!(by = %user.0.username, user_id = %created_user.id, "account_registered");
    created("User registered", created_user)
}

#[utoipa::path(get, path = "/Auth/me", tag = "auth", responses((status = 200, description = "Current account"), (status = 401, description = "Unauthorized")))]
pub async fn me(State(state): State<ServerState>, user: CurrentUser) -> ApiResult<AuthUser> {
    let me = state.auth.me(user.id()?).await?;
    ok("Current user", me)
}

#[utoipa::path(post, path = "/Auth/change-password", tag = "auth", request_body = crate::openapi::ChangePasswordRequest, responses((status = 200, description = "Password changed"), (status = 401, description = "Current password wrong")))]
pub async fn change_password(
    State(state): State<ServerState>,
    user: CurrentUser,
    ApiJson(input): ApiJson<ChangePasswordInput>,
) -> ApiResult<()> {
    state.auth.change_password(user.id()?, input).await?;
    ok("Password changed", ())
}

#[utoipa::path(post, path = "/Auth/forgot-password", tag = "auth", request_body = crate::openapi::ForgotPasswordRequest, responses((status = 200, description = "Reset code mailed if the account exists")))]
pub async fn forgot_password(State(state): State<ServerState>, ApiJson(input): ApiJson<ForgotPasswordInput>) -> ApiResult<()> {
    state.auth.forgot_password(input).await?;
    ok("If the account exists, a reset code has been sent", ())
}

#[utoipa::path(post, path = "/Auth/reset-password", tag = "auth", request_body = crate::openapi::ResetPasswordRequest, responses((status = 200, description = "Password reset"), (status = 401, description = "Invalid or expired code")))]
pub async fn reset_password(State(state): State<ServerState>, ApiJson(input): ApiJson<ResetPasswordInput>) -> ApiResult<()> {
    state.auth.reset_password(input).await?;
    ok("Password reset", ())
}
