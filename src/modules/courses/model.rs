//! Course registry types.

use axum::http::StatusCode;

use freelearn_core::ErrorStatus;
use freelearn_db::StoreError;

pub use freelearn_models::{
    Course, CourseFields, CourseId, Lesson, MAX_SCORE, MIN_SCORE, MessageResponse, Module,
    RateCourseRequest, Rating, SearchParams, UpdateCourseRequest, UserId,
};

#[derive(Debug, thiserror::Error)]
pub enum CourseError {
    #[error("Course not found")]
    NotFound,
    #[error("Only the course creator can modify this course")]
    NotAuthorized,
    #[error("Score must be between 1 and 5")]
    ScoreOutOfRange,
    #[error("You cannot rate your own course")]
    SelfRating,
    #[error("User has already rated this course")]
    DuplicateRating,
    #[error("user_id does not match the authenticated user")]
    RaterMismatch,
    #[error("Search query must not be empty")]
    EmptyQuery,
    #[error("Database error: {0}")]
    Store(#[from] StoreError),
}

impl ErrorStatus for CourseError {
    fn status(&self) -> StatusCode {
        match self {
            CourseError::NotFound => StatusCode::NOT_FOUND,
            CourseError::NotAuthorized => StatusCode::FORBIDDEN,
            CourseError::ScoreOutOfRange | CourseError::RaterMismatch | CourseError::EmptyQuery => {
                StatusCode::BAD_REQUEST
            }
            CourseError::SelfRating | CourseError::DuplicateRating => StatusCode::CONFLICT,
            CourseError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}
