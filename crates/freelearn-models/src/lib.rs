//! # Free Learn Models
//!
//! Domain models and DTOs for the Free Learn API.
//!
//! # Modules
//!
//! - [`ids`]: strongly-typed ids for users and courses
//! - [`users`]: users, roles and the auth/enrollment DTOs
//! - [`courses`]: courses, modules, lessons, ratings and their DTOs
//!
//! # Example
//!
//! ```ignore
//! use freelearn_models::{Course, CourseFields, Role, UserId};
//!
//! let creator = UserId::new();
//! let course = Course::new(creator, fields);
//! assert!(course.is_created_by(creator));
//! ```

pub mod courses;
pub mod ids;
pub mod users;

pub use ids::{CourseId, UserId};

pub use users::{
    EnrollRequest, LoginRequest, LoginResponse, MessageResponse, RegisterRequest,
    RegisterResponse, Role, User, normalize_email,
};

pub use courses::{
    Course, CourseFields, Lesson, MAX_SCORE, MIN_SCORE, Module, RateCourseRequest, Rating,
    SearchParams, UpdateCourseRequest,
};
