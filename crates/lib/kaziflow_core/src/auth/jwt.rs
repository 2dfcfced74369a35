//! JWT access-token generation and verification.
//!
//! Tokens are stateless HS256 assertions of (subject email, role, expiry).
//! There is no server-side revocation before expiry; a deleted account is
//! instead caught by the authorization guard's directory lookup.

use std::path::PathBuf;

use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use rand::distr::Alphanumeric;
use rand::{Rng, rng};
use tracing::info;

use super::AuthError;
use crate::models::auth::{Role, TokenClaims};

/// Access token lifetime: 30 minutes. This is the single process-wide
/// default; callers wanting a different lifetime use
/// [`issue_access_token_with_ttl`].
pub const ACCESS_TOKEN_TTL_SECS: i64 = 30 * 60;

/// Generate a signed JWT access token (HS256, 30 min expiry).
pub fn issue_access_token(email: &str, role: Role, secret: &[u8]) -> Result<String, AuthError> {
    issue_access_token_with_ttl(email, role, ACCESS_TOKEN_TTL_SECS, secret)
}

/// Generate a signed JWT access token with an explicit lifetime.
pub fn issue_access_token_with_ttl(
    email: &str,
    role: Role,
    ttl_secs: i64,
    secret: &[u8],
) -> Result<String, AuthError> {
    let now = Utc::now();
    let claims = TokenClaims {
        sub: email.to_string(),
        role,
        exp: (now + Duration::seconds(ttl_secs)).timestamp(),
        iat: now.timestamp(),
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret),
    )
    .map_err(|e| AuthError::TokenError(format!("jwt encode: {e}")))
}

/// Verify a JWT access token, returning the claims on success.
///
/// Bad signatures, missing claims, expiry, and outright garbage all map to
/// `None` — malformed input is a normal failure mode here, not an error.
pub fn verify_access_token(token: &str, secret: &[u8]) -> Option<TokenClaims> {
    let key = DecodingKey::from_secret(secret);
    let mut validation = Validation::default();
    validation.validate_exp = true;
    // expired means expired, no grace window
    validation.leeway = 0;
    decode::<TokenClaims>(token, &key, &validation)
        .ok()
        .map(|data| data.claims)
}

/// Resolve the JWT signing secret, loaded once at startup.
///
/// `JWT_SECRET` wins when set. In the development posture (`KAZI_ENV`
/// unset or `development`) a generated secret persisted under the platform
/// data dir is used instead; in any other posture a missing `JWT_SECRET`
/// is a hard startup failure. There is no compiled-in default.
pub fn resolve_jwt_secret() -> Result<String, AuthError> {
    if let Ok(secret) = std::env::var("JWT_SECRET")
        && !secret.is_empty()
    {
        return Ok(secret);
    }

    let posture = std::env::var("KAZI_ENV").unwrap_or_else(|_| "development".into());
    if posture != "development" {
        return Err(AuthError::MissingSecret);
    }

    // Development fallback: generate once and persist.
    let secret_path = jwt_secret_path();
    if let Ok(existing) = std::fs::read_to_string(&secret_path) {
        let trimmed = existing.trim();
        if !trimmed.is_empty() {
            return Ok(trimmed.to_string());
        }
    }
    let secret: String = rng()
        .sample_iter(&Alphanumeric)
        .take(64)
        .map(char::from)
        .collect();
    if let Some(parent) = secret_path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }
    let _ = std::fs::write(&secret_path, &secret);
    info!(path = %secret_path.display(), "generated new development JWT secret");
    Ok(secret)
}

/// Path to the persisted development JWT secret file.
fn jwt_secret_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("kaziflow")
        .join("jwt-secret")
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &[u8] = b"test-secret";

    #[test]
    fn round_trip_returns_subject_and_role() {
        let token = issue_access_token("v@x.com", Role::Vendor, SECRET).unwrap();
        let claims = verify_access_token(&token, SECRET).expect("valid token");
        assert_eq!(claims.sub, "v@x.com");
        assert_eq!(claims.role, Role::Vendor);
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn default_ttl_is_thirty_minutes() {
        let token = issue_access_token("b@x.com", Role::Bank, SECRET).unwrap();
        let claims = verify_access_token(&token, SECRET).unwrap();
        assert_eq!(claims.exp - claims.iat, ACCESS_TOKEN_TTL_SECS);
    }

    #[test]
    fn expired_token_fails_verification() {
        let token = issue_access_token_with_ttl("v@x.com", Role::Vendor, -1, SECRET).unwrap();
        assert!(verify_access_token(&token, SECRET).is_none());
    }

    #[test]
    fn wrong_secret_fails_verification() {
        let token = issue_access_token("v@x.com", Role::Vendor, SECRET).unwrap();
        assert!(verify_access_token(&token, b"other-secret").is_none());
    }

    #[test]
    fn tampered_signature_fails_verification() {
        let token = issue_access_token("v@x.com", Role::Vendor, SECRET).unwrap();
        let mut parts: Vec<String> = token.split('.').map(str::to_string).collect();
        assert_eq!(parts.len(), 3);
        let sig = parts[2].clone();
        let flipped = if sig.starts_with('A') { 'B' } else { 'A' };
        parts[2] = format!("{}{}", flipped, &sig[1..]);
        assert!(verify_access_token(&parts.join("."), SECRET).is_none());
    }

    #[test]
    fn tampered_payload_fails_verification() {
        let token = issue_access_token("v@x.com", Role::Vendor, SECRET).unwrap();
        let mut parts: Vec<String> = token.split('.').map(str::to_string).collect();
        let payload = parts[1].clone();
        let flipped = if payload.starts_with('A') { 'B' } else { 'A' };
        parts[1] = format!("{}{}", flipped, &payload[1..]);
        assert!(verify_access_token(&parts.join("."), SECRET).is_none());
    }

    #[test]
    fn garbage_input_fails_without_panicking() {
        assert!(verify_access_token("", SECRET).is_none());
        assert!(verify_access_token("not-a-jwt", SECRET).is_none());
        assert!(verify_access_token("a.b.c", SECRET).is_none());
    }

    #[test]
    fn token_missing_required_claims_fails() {
        // Signed with the right secret but without our claim set.
        #[derive(serde::Serialize)]
        struct Partial {
            sub: String,
            exp: i64,
        }
        let partial = Partial {
            sub: "v@x.com".into(),
            exp: (Utc::now() + Duration::seconds(60)).timestamp(),
        };
        let token = encode(
            &Header::default(),
            &partial,
            &EncodingKey::from_secret(SECRET),
        )
        .unwrap();
        assert!(verify_access_token(&token, SECRET).is_none());
    }
}
