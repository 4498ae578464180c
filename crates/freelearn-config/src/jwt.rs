use crate::parse_or;

/// Token lifetime used when `JWT_EXPIRY` is not set: 24 hours.
pub const DEFAULT_TOKEN_EXPIRY: i64 = 86_400;

/// Longest accepted token lifetime: 365 days.
pub const MAX_TOKEN_EXPIRY: i64 = 31_536_000;

#[derive(Clone, Debug)]
pub struct JwtConfig {
    /// HMAC signing secret. Empty means "not configured": issuing and
    /// validating tokens both fail.
    pub secret: String,
    /// Token lifetime in seconds, within `1..=MAX_TOKEN_EXPIRY` when read
    /// from the environment.
    pub token_expiry: i64,
}

impl JwtConfig {
    pub fn from_env() -> Self {
        Self::from_vars(&|key: &str| std::env::var(key).ok())
    }

    pub fn from_vars<F>(var: &F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            secret: var("JWT_SECRET").unwrap_or_default(),
            token_expiry: Some(parse_or(var, "JWT_EXPIRY", DEFAULT_TOKEN_EXPIRY))
                .filter(|secs| (1..=MAX_TOKEN_EXPIRY).contains(secs))
                .unwrap_or(DEFAULT_TOKEN_EXPIRY),
        }
    }

    pub fn with_secret(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            token_expiry: DEFAULT_TOKEN_EXPIRY,
        }
    }

    pub fn has_secret(&self) -> bool {
        !self.secret.is_empty()
    }
}
