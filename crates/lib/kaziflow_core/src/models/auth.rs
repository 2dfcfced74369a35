//! Account and session-token domain models.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Account role — closed set, drives every authorization decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "account_role", rename_all = "lowercase")]
pub enum Role {
    Vendor,
    Retailer,
    Bank,
    Admin,
}

impl Role {
    /// Lowercase wire/database spelling.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Vendor => "vendor",
            Role::Retailer => "retailer",
            Role::Bank => "bank",
            Role::Admin => "admin",
        }
    }
}

/// A registered account. `hashed_password` never leaves the backend;
/// public projections are built in the API layer.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Account {
    pub id: Uuid,
    pub email: String,
    pub full_name: String,
    pub role: Role,
    pub company_name: Option<String>,
    pub hashed_password: String,
}

/// Fields required to create an account. The credential arrives
/// pre-hashed — plaintext stops at the password hasher.
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub email: String,
    pub full_name: String,
    pub role: Role,
    pub company_name: Option<String>,
    pub hashed_password: String,
}

/// JWT claims embedded in access tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Subject — account email (standard JWT `sub` claim).
    pub sub: String,
    /// Account role at issuance time.
    pub role: Role,
    /// Expiry (unix timestamp).
    pub exp: i64,
    /// Issued at (unix timestamp).
    pub iat: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Role::Bank).unwrap(), "\"bank\"");
        assert_eq!(
            serde_json::from_str::<Role>("\"vendor\"").unwrap(),
            Role::Vendor
        );
    }

    #[test]
    fn role_rejects_unknown_values() {
        assert!(serde_json::from_str::<Role>("\"superuser\"").is_err());
    }

    #[test]
    fn claims_round_trip() {
        let claims = TokenClaims {
            sub: "v@x.com".into(),
            role: Role::Vendor,
            exp: 2_000_000_000,
            iat: 1_000_000_000,
        };
        let json = serde_json::to_string(&claims).unwrap();
        let back: TokenClaims = serde_json::from_str(&json).unwrap();
        assert_eq!(back.sub, "v@x.com");
        assert_eq!(back.role, Role::Vendor);
    }
}
