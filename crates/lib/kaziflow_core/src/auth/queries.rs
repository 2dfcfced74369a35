//! Account directory queries.

use sqlx::PgPool;
use uuid::Uuid;

use super::AuthError;
use crate::models::auth::{Account, NewAccount};

/// Fetch an account by email.
pub async fn find_account_by_email(
    pool: &PgPool,
    email: &str,
) -> Result<Option<Account>, AuthError> {
    let row = sqlx::query_as::<_, Account>(
        "SELECT id, email, full_name, role, company_name, hashed_password \
         FROM accounts WHERE email = $1",
    )
    .bind(email)
    .fetch_optional(pool)
    .await?;
    Ok(row)
}

/// Fetch an account by id.
pub async fn find_account_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Account>, AuthError> {
    let row = sqlx::query_as::<_, Account>(
        "SELECT id, email, full_name, role, company_name, hashed_password \
         FROM accounts WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(row)
}

/// Check whether an email is already registered.
pub async fn email_exists(pool: &PgPool, email: &str) -> Result<bool, AuthError> {
    let exists =
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM accounts WHERE email = $1)")
            .bind(email)
            .fetch_one(pool)
            .await?;
    Ok(exists)
}

/// Create a new account, returning the stored row.
pub async fn create_account(pool: &PgPool, new: &NewAccount) -> Result<Account, AuthError> {
    let row = sqlx::query_as::<_, Account>(
        "INSERT INTO accounts (email, full_name, role, company_name, hashed_password) \
         VALUES ($1, $2, $3, $4, $5) \
         RETURNING id, email, full_name, role, company_name, hashed_password",
    )
    .bind(&new.email)
    .bind(&new.full_name)
    .bind(new.role)
    .bind(&new.company_name)
    .bind(&new.hashed_password)
    .fetch_one(pool)
    .await?;
    Ok(row)
}

/// Update the mutable profile fields, returning the stored row.
/// `None` fields are left unchanged.
pub async fn update_profile(
    pool: &PgPool,
    id: Uuid,
    full_name: Option<&str>,
    company_name: Option<&str>,
) -> Result<Account, AuthError> {
    let row = sqlx::query_as::<_, Account>(
        "UPDATE accounts \
         SET full_name = COALESCE($2, full_name), \
             company_name = COALESCE($3, company_name) \
         WHERE id = $1 \
         RETURNING id, email, full_name, role, company_name, hashed_password",
    )
    .bind(id)
    .bind(full_name)
    .bind(company_name)
    .fetch_one(pool)
    .await?;
    Ok(row)
}

/// Replace an account's credential wholesale. Last committed write wins;
/// subsequent verifications see the new hash.
pub async fn update_password_hash(
    pool: &PgPool,
    id: Uuid,
    hashed_password: &str,
) -> Result<(), AuthError> {
    sqlx::query("UPDATE accounts SET hashed_password = $2 WHERE id = $1")
        .bind(id)
        .bind(hashed_password)
        .execute(pool)
        .await?;
    Ok(())
}

/// Count registered accounts (used by the seeder's already-populated check).
pub async fn account_count(pool: &PgPool) -> Result<i64, AuthError> {
    let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM accounts")
        .fetch_one(pool)
        .await?;
    Ok(count)
}
