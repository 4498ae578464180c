//! User directory types.
//!
//! The DTOs live in `freelearn_models`; this module re-exports them and adds
//! the directory's error type.

use axum::http::StatusCode;
use tokio::task::JoinError;

use freelearn_auth::TokenError;
use freelearn_core::{ErrorStatus, PasswordError};
use freelearn_db::StoreError;

pub use freelearn_models::{
    EnrollRequest, LoginRequest, LoginResponse, MessageResponse, RegisterRequest,
    RegisterResponse, Role, User, UserId, normalize_email,
};

#[derive(Debug, thiserror::Error)]
pub enum UserError {
    #[error("User already exists")]
    AlreadyExists,
    #[error("User not found")]
    NotFound,
    #[error("Email not found")]
    EmailNotFound,
    #[error("Invalid credentials")]
    InvalidCredentials,
    #[error("Course not found")]
    CourseNotFound,
    #[error("Cannot access another user's courses")]
    NotOwnAccount,
    #[error(transparent)]
    Hashing(#[from] PasswordError),
    #[error("Failed to issue token: {0}")]
    Signing(#[source] TokenError),
    #[error("Database error: {0}")]
    Store(#[from] StoreError),
    #[error("Password task failed: {0}")]
    Task(#[from] JoinError),
}

impl ErrorStatus for UserError {
    fn status(&self) -> StatusCode {
        match self {
            UserError::AlreadyExists => StatusCode::CONFLICT,
            UserError::NotFound | UserError::CourseNotFound => StatusCode::NOT_FOUND,
            UserError::EmailNotFound | UserError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            UserError::NotOwnAccount => StatusCode::FORBIDDEN,
            UserError::Hashing(_)
            | UserError::Signing(_)
            | UserError::Store(_)
            | UserError::Task(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}
