//! # Free Learn Core
//!
//! Core types shared by every layer of the Free Learn API:
//!
//! - [`errors`]: the HTTP-facing [`AppError`] and the [`ErrorStatus`] trait that
//!   domain errors implement to pick their status code
//! - [`password`]: bcrypt password hashing and verification
//!
//! # Example
//!
//! ```ignore
//! use freelearn_core::{AppError, hash_password, verify_password};
//!
//! let hash = hash_password("secure_password")?;
//! assert!(verify_password("secure_password", &hash));
//!
//! let error = AppError::bad_request(anyhow::anyhow!("Invalid course ID"));
//! ```

pub mod errors;
pub mod password;

pub use errors::{AppError, ErrorStatus};
pub use password::{BCRYPT_COST, PasswordError, hash_password, verify_password};
