//! User domain models and DTOs.
//!
//! A user is either a professor, who may publish courses, or a student. The
//! role is fixed at registration.

use crate::ids::{CourseId, UserId};
use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// The two kinds of account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Professor,
    Student,
}

impl Role {
    /// Maps the persisted `is_professor` flag onto a role.
    pub fn from_flag(is_professor: bool) -> Self {
        if is_professor {
            Role::Professor
        } else {
            Role::Student
        }
    }

    pub fn is_professor(self) -> bool {
        matches!(self, Role::Professor)
    }
}

/// A registered account.
///
/// `email` is always stored lowercase and `enrolled_course_ids` never holds
/// the same course twice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct User {
    pub id: UserId,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub role: Role,
    pub enrolled_course_ids: Vec<CourseId>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl User {
    /// Builds a fresh account with no enrollments.
    pub fn new(email: &str, password_hash: String, role: Role) -> Self {
        Self {
            id: UserId::new(),
            email: normalize_email(email),
            password_hash,
            role,
            enrolled_course_ids: Vec::new(),
            created_at: chrono::Utc::now(),
        }
    }

    pub fn is_enrolled_in(&self, course_id: CourseId) -> bool {
        self.enrolled_course_ids.contains(&course_id)
    }
}

/// Canonical form used for storage and lookup.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Strips surrounding whitespace so the email check sees what gets stored.
fn deserialize_trimmed<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    Ok(s.trim().to_string())
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct RegisterRequest {
    #[serde(deserialize_with = "deserialize_trimmed")]
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
    #[serde(default)]
    pub professor: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RegisterResponse {
    pub inserted_id: UserId,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[serde(deserialize_with = "deserialize_trimmed")]
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LoginResponse {
    pub token: String,
    pub user_id: UserId,
    pub professor: bool,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct EnrollRequest {
    pub course_id: CourseId,
}

/// Generic success body: `{"message": "..."}`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
