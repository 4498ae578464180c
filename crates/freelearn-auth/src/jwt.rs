//! JWT issuance and validation.
//!
//! Tokens are signed with HS256. Validation accepts only the HMAC family
//! (HS256/HS384/HS512) so a token that announces an asymmetric or `none`
//! algorithm in its header is rejected before any signature work happens.
//! Expiry is checked with zero leeway.

use chrono::{DateTime, TimeDelta, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use uuid::Uuid;

use freelearn_config::JwtConfig;

use crate::claims::Claims;

/// Why a token could not be issued or accepted.
///
/// Validation failures are kept distinct for logging; callers must treat
/// every one of them as "unauthenticated".
#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    #[error("Token signing key is not configured")]
    MissingSecret,
    #[error("Token lifetime of {0} seconds is out of range")]
    InvalidExpiry(i64),
    #[error("Failed to sign token: {0}")]
    Signing(#[source] jsonwebtoken::errors::Error),
    #[error("Invalid token signature")]
    InvalidSignature,
    #[error("Token has expired")]
    Expired,
    #[error("Unexpected token signing algorithm")]
    UnexpectedAlgorithm,
    #[error("Could not parse token")]
    Malformed,
}

impl TokenError {
    /// True for failures caused by the presented token rather than by the server.
    pub fn is_client_error(&self) -> bool {
        !matches!(
            self,
            TokenError::MissingSecret | TokenError::InvalidExpiry(_) | TokenError::Signing(_)
        )
    }
}

/// Issues a session token for `user_id`, valid from now.
pub fn issue_token(user_id: Uuid, email: &str, jwt_config: &JwtConfig) -> Result<String, TokenError> {
    issue_token_at(user_id, email, Utc::now(), jwt_config)
}

/// Issues a session token as if it had been created at `issued_at`.
pub fn issue_token_at(
    user_id: Uuid,
    email: &str,
    issued_at: DateTime<Utc>,
    jwt_config: &JwtConfig,
) -> Result<String, TokenError> {
    if !jwt_config.has_secret() {
        return Err(TokenError::MissingSecret);
    }

    let expires_at = Some(jwt_config.token_expiry)
        .filter(|secs| *secs > 0)
        .and_then(TimeDelta::try_seconds)
        .and_then(|lifetime| issued_at.checked_add_signed(lifetime))
        .ok_or(TokenError::InvalidExpiry(jwt_config.token_expiry))?;
    let claims = Claims {
        sub: user_id.to_string(),
        email: email.to_string(),
        exp: expires_at.timestamp(),
        iat: issued_at.timestamp(),
    };

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(jwt_config.secret.as_bytes()),
    )
    .map_err(TokenError::Signing)
}

/// Verifies signature, algorithm and expiry, returning the embedded claims.
pub fn validate_token(token: &str, jwt_config: &JwtConfig) -> Result<Claims, TokenError> {
    if !jwt_config.has_secret() {
        return Err(TokenError::MissingSecret);
    }

    decode::<Claims>(
        token,
        &DecodingKey::from_secret(jwt_config.secret.as_bytes()),
        &hmac_validation(),
    )
    .map(|data| data.claims)
    .map_err(|e| match e.kind() {
        ErrorKind::InvalidSignature => TokenError::InvalidSignature,
        ErrorKind::ExpiredSignature => TokenError::Expired,
        ErrorKind::InvalidAlgorithm | ErrorKind::InvalidAlgorithmName => {
            TokenError::UnexpectedAlgorithm
        }
        _ => TokenError::Malformed,
    })
}

fn hmac_validation() -> Validation {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.algorithms = vec![Algorithm::HS256, Algorithm::HS384, Algorithm::HS512];
    validation.leeway = 0;
    validation
}

#[cfg(test)]
mod tests {
    use super::*;

    fn get_test_jwt_config() -> JwtConfig {
        JwtConfig::with_secret("test-secret-key-at-least-32-characters-long")
    }

    #[test]
    fn test_issue_token_success() {
        let token = issue_token(Uuid::new_v4(), "test@example.com", &get_test_jwt_config()).unwrap();
        assert_eq!(token.split('.').count(), 3);
    }

    #[test]
    fn test_validate_token_success() {
        let config = get_test_jwt_config();
        let user_id = Uuid::new_v4();

        let token = issue_token(user_id, "test@example.com", &config).unwrap();
        let claims = validate_token(&token, &config).unwrap();

        assert_eq!(claims.sub, user_id.to_string());
        assert_eq!(claims.email, "test@example.com");
        assert_eq!(claims.exp - claims.iat, 86_400);
    }

    #[test]
    fn test_token_valid_just_before_expiry() {
        let config = get_test_jwt_config();
        let user_id = Uuid::new_v4();
        let issued_at = Utc::now() - TimeDelta::hours(23);

        let token = issue_token_at(user_id, "a@b.com", issued_at, &config).unwrap();
        assert!(validate_token(&token, &config).is_ok());
    }

    #[test]
    fn test_token_expired_after_24_hours() {
        let config = get_test_jwt_config();
        let issued_at = Utc::now() - TimeDelta::hours(24) - TimeDelta::seconds(5);

        let token = issue_token_at(Uuid::new_v4(), "a@b.com", issued_at, &config).unwrap();
        assert!(matches!(
            validate_token(&token, &config),
            Err(TokenError::Expired)
        ));
    }

    #[test]
    fn test_validate_token_wrong_secret() {
        let token = issue_token(Uuid::new_v4(), "test@example.com", &get_test_jwt_config()).unwrap();
        let wrong_config = JwtConfig::with_secret("different-secret-key-at-least-32-characters");

        assert!(matches!(
            validate_token(&token, &wrong_config),
            Err(TokenError::InvalidSignature)
        ));
    }

    #[test]
    fn test_tampered_signature_is_rejected() {
        let config = get_test_jwt_config();
        let token = issue_token(Uuid::new_v4(), "test@example.com", &config).unwrap();

        let signature_start = token.rfind('.').unwrap() + 1;
        let mut bytes = token.into_bytes();
        bytes[signature_start] = if bytes[signature_start] == b'A' { b'B' } else { b'A' };
        let tampered = String::from_utf8(bytes).unwrap();

        assert!(matches!(
            validate_token(&tampered, &config),
            Err(TokenError::InvalidSignature)
        ));
    }

    #[test]
    fn test_tampered_payload_is_rejected() {
        let config = get_test_jwt_config();
        let token = issue_token(Uuid::new_v4(), "test@example.com", &config).unwrap();
        let other = issue_token(Uuid::new_v4(), "other@example.com", &config).unwrap();

        let parts: Vec<&str> = token.split('.').collect();
        let other_parts: Vec<&str> = other.split('.').collect();
        let spliced = format!("{}.{}.{}", parts[0], other_parts[1], parts[2]);

        assert!(validate_token(&spliced, &config).is_err());
    }

    #[test]
    fn test_non_hmac_algorithm_is_rejected() {
        let config = get_test_jwt_config();
        let token = issue_token(Uuid::new_v4(), "test@example.com", &config).unwrap();
        let parts: Vec<&str> = token.split('.').collect();

        // {"alg":"RS256","typ":"JWT"}
        let rs256_header = "eyJhbGciOiJSUzI1NiIsInR5cCI6IkpXVCJ9";
        let forged = format!("{}.{}.{}", rs256_header, parts[1], parts[2]);

        assert!(matches!(
            validate_token(&forged, &config),
            Err(TokenError::UnexpectedAlgorithm)
        ));
    }

    #[test]
    fn test_garbage_is_malformed() {
        let config = get_test_jwt_config();
        assert!(matches!(
            validate_token("invalid-token", &config),
            Err(TokenError::Malformed)
        ));
    }

    #[test]
    fn test_unrepresentable_expiry_is_rejected() {
        for token_expiry in [i64::MAX, 0, -60] {
            let config = JwtConfig {
                token_expiry,
                ..get_test_jwt_config()
            };

            let err = issue_token(Uuid::new_v4(), "a@b.com", &config).unwrap_err();
            assert!(matches!(err, TokenError::InvalidExpiry(secs) if secs == token_expiry));
            assert!(!err.is_client_error());
        }
    }

    #[test]
    fn test_missing_secret() {
        let config = JwtConfig::with_secret("");

        assert!(matches!(
            issue_token(Uuid::new_v4(), "a@b.com", &config),
            Err(TokenError::MissingSecret)
        ));
        assert!(matches!(
            validate_token("a.b.c", &config),
            Err(TokenError::MissingSecret)
        ));
        assert!(!TokenError::MissingSecret.is_client_error());
        assert!(TokenError::Expired.is_client_error());
    }
}
