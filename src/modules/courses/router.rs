use axum::{
    Router,
    routing::{delete, get, post, put},
};

use crate::state::AppState;

use super::controller::{
    create_course, delete_course, get_course, list_courses, rate_course, search_courses,
    update_course,
};

/// Routes open to anonymous callers.
pub fn init_catalog_router() -> Router<AppState> {
    Router::new()
        .route("/get", get(list_courses))
        .route("/search", get(search_courses))
}

/// Routes for any authenticated caller, mounted under `/courses`.
pub fn init_courses_router() -> Router<AppState> {
    Router::new()
        .route("/get/{id}", get(get_course))
        .route("/rate/{id}", post(rate_course))
}

/// Routes that additionally require a professor, mounted under `/courses`.
pub fn init_professor_router() -> Router<AppState> {
    Router::new()
        .route("/post", post(create_course))
        .route("/update/{id}", put(update_course))
        .route("/delete/{id}", delete(delete_course))
}
