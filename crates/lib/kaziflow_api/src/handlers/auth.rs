//! Authentication request handlers.

use axum::Json;
use axum::extract::State;

use crate::AppState;
use crate::error::AppResult;
use crate::middleware::auth::CurrentAccount;
use crate::models::{
    AccountResponse, ChangePasswordRequest, LoginRequest, RegisterRequest, StatusResponse,
    TokenResponse, UpdateProfileRequest,
};
use crate::services::auth;

/// `POST /auth/register` — create a new account.
pub async fn register_handler(
    State(state): State<AppState>,
    Json(body): Json<RegisterRequest>,
) -> AppResult<Json<AccountResponse>> {
    let resp = auth::register(&state.pool, body).await?;
    Ok(Json(resp))
}

/// `POST /auth/login` — authenticate with email + password.
pub async fn login_handler(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> AppResult<Json<TokenResponse>> {
    let resp = auth::login(
        &state.pool,
        &body.email,
        &body.password,
        state.config.jwt_secret.as_bytes(),
    )
    .await?;
    Ok(Json(resp))
}

/// `GET /auth/me` — public projection of the caller.
pub async fn me_handler(
    axum::Extension(account): axum::Extension<CurrentAccount>,
) -> Json<AccountResponse> {
    Json(account.0.into())
}

/// `PATCH /auth/me` — update the caller's profile fields.
pub async fn update_me_handler(
    State(state): State<AppState>,
    axum::Extension(account): axum::Extension<CurrentAccount>,
    Json(body): Json<UpdateProfileRequest>,
) -> AppResult<Json<AccountResponse>> {
    let resp = auth::update_profile(&state.pool, &account.0, body).await?;
    Ok(Json(resp))
}

/// `POST /auth/change-password` — re-verifies the current password before
/// accepting the new one.
pub async fn change_password_handler(
    State(state): State<AppState>,
    axum::Extension(account): axum::Extension<CurrentAccount>,
    Json(body): Json<ChangePasswordRequest>,
) -> AppResult<Json<StatusResponse>> {
    let resp = auth::change_password(&state.pool, &account.0, body).await?;
    Ok(Json(resp))
}
