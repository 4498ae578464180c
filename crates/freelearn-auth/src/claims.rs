use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// JWT claims for session tokens.
///
/// # Fields
///
/// - `sub`: User ID (subject)
/// - `email`: User's email address at issuance
/// - `exp`: Token expiration timestamp
/// - `iat`: Token issued-at timestamp
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Claims {
    /// User ID (subject claim)
    pub sub: String,
    /// User's email address
    pub email: String,
    /// Token expiration timestamp (Unix timestamp)
    pub exp: i64,
    /// Token issued-at timestamp (Unix timestamp)
    pub iat: i64,
}

impl Claims {
    /// Parses the subject back into a user id.
    pub fn subject_id(&self) -> Option<Uuid> {
        Uuid::parse_str(&self.sub).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_claims_serialize() {
        let claims = Claims {
            sub: "user-id-123".to_string(),
            email: "test@example.com".to_string(),
            exp: 1234567890,
            iat: 1234567800,
        };
        let serialized = serde_json::to_string(&claims).unwrap();
        assert!(serialized.contains(r#""sub":"user-id-123""#));
        assert!(serialized.contains(r#""email":"test@example.com""#));
    }

    #[test]
    fn test_claims_deserialize() {
        let json = r#"{"sub":"user-id-456","email":"user@test.com","exp":9999999999,"iat":9999999900}"#;
        let claims: Claims = serde_json::from_str(json).unwrap();
        assert_eq!(claims.sub, "user-id-456");
        assert_eq!(claims.exp, 9999999999);
    }

    #[test]
    fn test_subject_id() {
        let id = Uuid::new_v4();
        let claims = Claims {
            sub: id.to_string(),
            email: "a@b.c".to_string(),
            exp: 0,
            iat: 0,
        };
        assert_eq!(claims.subject_id(), Some(id));

        let garbage = Claims {
            sub: "not-a-uuid".to_string(),
            ..claims
        };
        assert_eq!(garbage.subject_id(), None);
    }
}
