//! Authentication service — registration/login/credential flows
//! delegating to `kaziflow_core::auth`.

use sqlx::PgPool;
use tracing::info;

use kaziflow_core::auth::jwt::issue_access_token;
use kaziflow_core::auth::password::{hash_password, verify_password};
use kaziflow_core::auth::{AuthError, queries};
use kaziflow_core::models::auth::{Account, NewAccount};

use crate::error::{AppError, AppResult};
use crate::models::{
    AccountResponse, ChangePasswordRequest, RegisterRequest, StatusResponse, TokenResponse,
    UpdateProfileRequest,
};

/// Minimum accepted password length.
const MIN_PASSWORD_CHARS: usize = 8;

fn validate_new_password(password: &str) -> AppResult<()> {
    if password.len() < MIN_PASSWORD_CHARS {
        return Err(AppError::Validation(format!(
            "Password must be at least {MIN_PASSWORD_CHARS} characters"
        )));
    }
    // the upper bound is enforced by the hasher itself
    Ok(())
}

/// Register a new account. Duplicate emails fail before any write; the
/// response is the public projection, never the credential.
pub async fn register(pool: &PgPool, req: RegisterRequest) -> AppResult<AccountResponse> {
    validate_new_password(&req.password)?;

    if queries::email_exists(pool, &req.email).await? {
        return Err(AuthError::DuplicateAccount.into());
    }

    let hashed_password = hash_password(&req.password)?;
    let account = queries::create_account(
        pool,
        &NewAccount {
            email: req.email,
            full_name: req.full_name,
            role: req.role,
            company_name: req.company_name,
            hashed_password,
        },
    )
    .await?;

    info!(email = %account.email, role = account.role.as_str(), "account registered");
    Ok(account.into())
}

/// Authenticate with email + password and issue a bearer token.
///
/// Unknown email and wrong password produce the identical error, so the
/// endpoint cannot be used to enumerate accounts.
pub async fn login(
    pool: &PgPool,
    email: &str,
    password: &str,
    jwt_secret: &[u8],
) -> AppResult<TokenResponse> {
    let account = match queries::find_account_by_email(pool, email).await? {
        None => return Err(AuthError::InvalidCredentials.into()),
        Some(a) => a,
    };

    if !verify_password(password, &account.hashed_password) {
        return Err(AuthError::InvalidCredentials.into());
    }

    let access_token = issue_access_token(&account.email, account.role, jwt_secret)?;
    Ok(TokenResponse {
        access_token,
        token_type: "bearer".to_string(),
    })
}

/// Update the caller's mutable profile fields.
pub async fn update_profile(
    pool: &PgPool,
    account: &Account,
    req: UpdateProfileRequest,
) -> AppResult<AccountResponse> {
    let updated = queries::update_profile(
        pool,
        account.id,
        req.full_name.as_deref(),
        req.company_name.as_deref(),
    )
    .await?;
    Ok(updated.into())
}

/// Change the caller's password. Requires re-verification of the current
/// password on top of the already-verified bearer token.
pub async fn change_password(
    pool: &PgPool,
    account: &Account,
    req: ChangePasswordRequest,
) -> AppResult<StatusResponse> {
    if !verify_password(&req.current_password, &account.hashed_password) {
        return Err(AuthError::InvalidCredentials.into());
    }

    validate_new_password(&req.new_password)?;
    let hashed = hash_password(&req.new_password)?;
    queries::update_password_hash(pool, account.id, &hashed).await?;

    info!(email = %account.email, "password changed");
    Ok(StatusResponse {
        status: "success".to_string(),
        message: "Password updated successfully".to_string(),
    })
}
