//! # Free Learn Auth
//!
//! Token types for the Free Learn API.
//!
//! - [`claims`]: the JWT claim set carried by every session token
//! - [`jwt`]: token issuance and validation
//!
//! Tokens are HS256 JWTs whose subject is the user id. They live for
//! [`JwtConfig::token_expiry`](freelearn_config::JwtConfig) seconds (24 hours by
//! default) and are never persisted: validity is purely signature plus expiry.
//!
//! # Example
//!
//! ```ignore
//! use freelearn_auth::{issue_token, validate_token};
//! use freelearn_config::JwtConfig;
//!
//! let config = JwtConfig::from_env();
//! let token = issue_token(user_id, "student@example.com", &config)?;
//! let claims = validate_token(&token, &config)?;
//! assert_eq!(claims.sub, user_id.to_string());
//! ```

pub mod claims;
pub mod jwt;

pub use claims::Claims;
pub use jwt::{TokenError, issue_token, issue_token_at, validate_token};
