//! Authorization guard.
//!
//! Resolves a bearer token to a live account and enforces per-operation
//! role checks. Purely read-and-decide: no session or audit state is
//! touched here.

use sqlx::PgPool;

use super::{AuthError, jwt, queries};
use crate::models::auth::{Account, Role};

/// Resolve a bearer token to the account it references.
///
/// Verifies the token, then looks the subject up in the account
/// directory. An account deleted (or renamed) after issuance invalidates
/// every outstanding token referencing it.
pub async fn resolve_account(
    pool: &PgPool,
    token: &str,
    secret: &[u8],
) -> Result<Account, AuthError> {
    let claims = jwt::verify_access_token(token, secret).ok_or(AuthError::Unauthenticated)?;
    queries::find_account_by_email(pool, &claims.sub)
        .await?
        .ok_or(AuthError::Unauthenticated)
}

/// Per-operation role check against a permitted-role set.
///
/// Distinct from authentication failure: the caller is known, just not
/// allowed.
pub fn require_role(account: &Account, allowed: &[Role]) -> Result<(), AuthError> {
    if allowed.contains(&account.role) {
        Ok(())
    } else {
        Err(AuthError::Forbidden)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn account_with_role(role: Role) -> Account {
        Account {
            id: Uuid::new_v4(),
            email: "someone@x.com".into(),
            full_name: "Someone".into(),
            role,
            company_name: None,
            hashed_password: "$2b$10$irrelevant".into(),
        }
    }

    #[test]
    fn permitted_role_passes() {
        let bank = account_with_role(Role::Bank);
        assert!(require_role(&bank, &[Role::Bank, Role::Admin]).is_ok());
    }

    #[test]
    fn vendor_is_forbidden_from_bank_admin_operations() {
        let vendor = account_with_role(Role::Vendor);
        assert!(matches!(
            require_role(&vendor, &[Role::Bank, Role::Admin]),
            Err(AuthError::Forbidden)
        ));
    }

    #[test]
    fn empty_permitted_set_forbids_everyone() {
        let admin = account_with_role(Role::Admin);
        assert!(matches!(
            require_role(&admin, &[]),
            Err(AuthError::Forbidden)
        ));
    }
}
