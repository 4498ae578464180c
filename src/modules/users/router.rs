use axum::{
    Router,
    routing::{get, post},
};

use crate::modules::users::controller::{enroll_in_course, get_user_courses};
use crate::state::AppState;

/// Enrollment routes, mounted under `/courses` behind authentication.
pub fn init_users_router() -> Router<AppState> {
    Router::new()
        .route("/add-course-to-user/{id}", post(enroll_in_course))
        .route("/get-user-courses/{id}", get(get_user_courses))
}
