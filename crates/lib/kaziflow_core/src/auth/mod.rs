//! Authentication and authorization logic.
//!
//! Provides password hashing, JWT management, the authorization guard,
//! and the account database queries shared across the API layer.

pub mod guard;
pub mod jwt;
pub mod password;
pub mod queries;

use thiserror::Error;

/// Authentication errors.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Login failed. Deliberately undifferentiated: unknown email and
    /// wrong password produce the same error.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Bearer token missing, invalid, expired, or referencing an account
    /// that no longer exists. Never reveals which check failed.
    #[error("Could not validate credentials")]
    Unauthenticated,

    /// Valid identity, insufficient role for the operation.
    #[error("Not authorized")]
    Forbidden,

    #[error("Email already registered")]
    DuplicateAccount,

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Token error: {0}")]
    TokenError(String),

    /// JWT_SECRET unset outside the development posture. Fatal at startup.
    #[error("JWT_SECRET is not set (required outside development)")]
    MissingSecret,

    #[error("Database error: {0}")]
    DbError(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}
