//! Authentication middleware — Bearer token extraction and account resolution.
//!
//! Every failure path (missing header, wrong scheme, bad/expired token,
//! vanished account) collapses into the same generic 401 so callers learn
//! nothing about which check failed.

use axum::http::header::AUTHORIZATION;
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use kaziflow_core::auth::guard;
use kaziflow_core::models::auth::Account;

use crate::AppState;
use crate::error::AppError;

/// The resolved caller, stored in request extensions.
#[derive(Debug, Clone)]
pub struct CurrentAccount(pub Account);

/// Axum middleware: extracts `Authorization: Bearer <token>`, resolves the
/// account through the authorization guard, and injects `CurrentAccount`
/// into request extensions.
pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| AppError::Unauthorized("Could not validate credentials".into()))?;

    let token = header
        .strip_prefix("Bearer ")
        .ok_or_else(|| AppError::Unauthorized("Could not validate credentials".into()))?;

    let account =
        guard::resolve_account(&state.pool, token, state.config.jwt_secret.as_bytes()).await?;

    request.extensions_mut().insert(CurrentAccount(account));

    Ok(next.run(request).await)
}
