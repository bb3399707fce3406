//! Token issuing and verification.
//!
//! Every verification failure (bad signature, malformed token, expired
//! token, unknown role) collapses into the same 401 with
//! [`UNAUTHORIZED_MESSAGE`]. The concrete reason is logged at debug level
//! only.

use chrono::{DateTime, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};

use officehub_config::JwtConfig;
use officehub_core::AppError;

use crate::claims::Claims;
use crate::role::Role;

/// The only message a client ever sees for an authentication failure.
pub const UNAUTHORIZED_MESSAGE: &str = "Not authorized, please sign in";

/// A freshly signed token and the instant it stops being accepted.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

pub fn issue_token(
    subject_id: &str,
    role: Role,
    jwt_config: &JwtConfig,
) -> Result<IssuedToken, AppError> {
    issue_token_at(subject_id, role, Utc::now(), jwt_config)
}

/// Signs a token as if it were issued at `issued_at`.
pub fn issue_token_at(
    subject_id: &str,
    role: Role,
    issued_at: DateTime<Utc>,
    jwt_config: &JwtConfig,
) -> Result<IssuedToken, AppError> {
    if jwt_config.secret.is_empty() {
        return Err(AppError::internal_error("JWT secret is not configured"));
    }

    let iat = issued_at.timestamp();
    let out_of_range = || AppError::internal_error("Token expiry is out of range");
    let exp = iat
        .checked_add(jwt_config.expiry_seconds)
        .ok_or_else(out_of_range)?;
    let expires_at = DateTime::<Utc>::from_timestamp(exp, 0).ok_or_else(out_of_range)?;

    let claims = Claims {
        subject_id: subject_id.to_string(),
        role,
        iat,
        exp,
    };

    let token = encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(jwt_config.secret.as_bytes()),
    )
    .map_err(|e| AppError::internal_error(format!("Failed to create token: {}", e)))?;

    Ok(IssuedToken { token, expires_at })
}

pub fn verify_token(token: &str, jwt_config: &JwtConfig) -> Result<Claims, AppError> {
    verify_token_at(token, Utc::now(), jwt_config)
}

/// Verifies signature and expiry against the supplied clock reading.
pub fn verify_token_at(
    token: &str,
    now: DateTime<Utc>,
    jwt_config: &JwtConfig,
) -> Result<Claims, AppError> {
    // Expiry is checked below against `now` with no leeway.
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = false;
    validation.leeway = 0;
    validation.set_required_spec_claims(&["exp"]);

    let claims = decode::<Claims>(
        token,
        &DecodingKey::from_secret(jwt_config.secret.as_bytes()),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|e| {
        tracing::debug!(reason = %e, "Rejected token");
        AppError::unauthorized(UNAUTHORIZED_MESSAGE)
    })?;

    if now.timestamp() >= claims.exp {
        tracing::debug!(subject_id = %claims.subject_id, exp = claims.exp, "Rejected expired token");
        return Err(AppError::unauthorized(UNAUTHORIZED_MESSAGE));
    }

    Ok(claims)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::role::ALL_ROLES;
    use chrono::Duration;
    use std::collections::HashMap;

    const SUBJECT: &str = "65f1c0ffee0000000000abcd";

    fn get_test_jwt_config() -> JwtConfig {
        JwtConfig {
            secret: "test-secret-key-at-least-32-characters-long".to_string(),
            expiry_seconds: 86_400,
        }
    }

    #[test]
    fn test_round_trip_for_every_role() {
        let config = get_test_jwt_config();

        for role in ALL_ROLES {
            let issued = issue_token(SUBJECT, *role, &config).unwrap();
            let claims = verify_token(&issued.token, &config).unwrap();

            assert_eq!(claims.subject_id, SUBJECT);
            assert_eq!(claims.role, *role);
            assert_eq!(claims.exp - claims.iat, 86_400);
        }
    }

    #[test]
    fn test_expires_at_matches_claim() {
        let config = get_test_jwt_config();
        let issued_at = DateTime::<Utc>::from_timestamp(1_700_000_000, 0).unwrap();

        let issued = issue_token_at(SUBJECT, Role::Admin, issued_at, &config).unwrap();
        assert_eq!(issued.expires_at, issued_at + Duration::days(1));
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let config = get_test_jwt_config();
        let issued_at = Utc::now() - Duration::days(2);

        let issued = issue_token_at(SUBJECT, Role::Employee, issued_at, &config).unwrap();
        let err = verify_token(&issued.token, &config).unwrap_err();

        assert_eq!(err.status.as_u16(), 401);
        assert_eq!(err.public_message(), UNAUTHORIZED_MESSAGE);
    }

    #[test]
    fn test_expiry_boundary_is_exclusive() {
        let config = get_test_jwt_config();
        let issued_at = DateTime::<Utc>::from_timestamp(1_700_000_000, 0).unwrap();
        let issued = issue_token_at(SUBJECT, Role::Manager, issued_at, &config).unwrap();

        let just_before = issued.expires_at - Duration::seconds(1);
        assert!(verify_token_at(&issued.token, just_before, &config).is_ok());
        assert!(verify_token_at(&issued.token, issued.expires_at, &config).is_err());
    }

    #[test]
    fn test_wrong_secret_is_rejected() {
        let config = get_test_jwt_config();
        let issued = issue_token(SUBJECT, Role::Admin, &config).unwrap();

        let wrong_config = JwtConfig {
            secret: "different-secret-key-at-least-32-characters".to_string(),
            expiry_seconds: 86_400,
        };
        assert!(verify_token(&issued.token, &wrong_config).is_err());
    }

    #[test]
    fn test_tampered_signature_is_rejected() {
        let config = get_test_jwt_config();
        let issued = issue_token(SUBJECT, Role::Employee, &config).unwrap();

        let (head, signature) = issued.token.rsplit_once('.').unwrap();
        let first = signature.chars().next().unwrap();
        let replacement = if first == 'A' { 'B' } else { 'A' };
        let tampered = format!("{head}.{replacement}{}", &signature[1..]);

        let err = verify_token(&tampered, &config).unwrap_err();
        assert_eq!(err.status.as_u16(), 401);
    }

    #[test]
    fn test_malformed_and_expired_look_identical() {
        let config = get_test_jwt_config();
        let expired = issue_token_at(SUBJECT, Role::Admin, Utc::now() - Duration::days(3), &config)
            .unwrap();

        let malformed = verify_token("not.a.token", &config).unwrap_err();
        let expired = verify_token(&expired.token, &config).unwrap_err();
        let empty = verify_token("", &config).unwrap_err();

        assert_eq!(malformed.public_message(), expired.public_message());
        assert_eq!(malformed.public_message(), empty.public_message());
        assert_eq!(malformed.status, expired.status);
    }

    #[test]
    fn test_payload_carries_only_minimal_claims() {
        let config = get_test_jwt_config();
        let issued = issue_token(SUBJECT, Role::Manager, &config).unwrap();

        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        let raw = decode::<HashMap<String, serde_json::Value>>(
            &issued.token,
            &DecodingKey::from_secret(config.secret.as_bytes()),
            &validation,
        )
        .unwrap()
        .claims;

        let mut keys: Vec<_> = raw.keys().cloned().collect();
        keys.sort();
        assert_eq!(keys, vec!["exp", "iat", "role", "subjectId"]);
    }

    #[test]
    fn test_empty_secret_cannot_sign() {
        let config = JwtConfig {
            secret: String::new(),
            expiry_seconds: 60,
        };
        let err = issue_token(SUBJECT, Role::Admin, &config).unwrap_err();
        assert_eq!(err.status.as_u16(), 500);
    }

    #[test]
    fn test_overflowing_expiry_is_an_error() {
        let config = JwtConfig {
            expiry_seconds: i64::MAX,
            ..get_test_jwt_config()
        };
        let err = issue_token(SUBJECT, Role::Employee, &config).unwrap_err();
        assert_eq!(err.status.as_u16(), 500);
        assert_eq!(err.error.to_string(), "Token expiry is out of range");
    }
}
