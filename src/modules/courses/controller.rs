use axum::Json;
use axum::extract::{Path, Query, State};
use tracing::instrument;

use freelearn_core::AppError;

use crate::middleware::auth::AuthUser;
use crate::middleware::role::RequireProfessor;
use crate::modules::auth::controller::ErrorResponse;
use crate::state::AppState;
use crate::validator::{ValidatedJson, parse_path_id};

use super::model::{
    Course, CourseFields, CourseId, MessageResponse, RateCourseRequest, SearchParams,
    UpdateCourseRequest,
};
use super::service::CourseService;

/// List every course
#[utoipa::path(
    get,
    path = "/get",
    responses(
        (status = 200, description = "All courses, oldest first", body = Vec<Course>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Courses"
)]
#[instrument(skip(state))]
pub async fn list_courses(State(state): State<AppState>) -> Result<Json<Vec<Course>>, AppError> {
    let courses = CourseService::list_courses(state.courses.as_ref())
        .await
        .map_err(AppError::domain)?;
    Ok(Json(courses))
}

/// Search courses by name or description
#[utoipa::path(
    get,
    path = "/search",
    params(SearchParams),
    responses(
        (status = 200, description = "Matching courses", body = Vec<Course>),
        (status = 400, description = "Missing or empty query", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Courses"
)]
#[instrument(skip(state))]
pub async fn search_courses(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<Course>>, AppError> {
    let query = params.q.unwrap_or_default();
    let courses = CourseService::search_courses(state.courses.as_ref(), &query)
        .await
        .map_err(AppError::domain)?;
    Ok(Json(courses))
}

/// Publish a new course
#[utoipa::path(
    post,
    path = "/courses/post",
    request_body = CourseFields,
    responses(
        (status = 200, description = "Course created", body = Course),
        (status = 400, description = "Bad request - validation error", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Professors only", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Courses"
)]
#[instrument(skip(state, professor, dto), fields(user.id = %professor.0.user_id))]
pub async fn create_course(
    State(state): State<AppState>,
    professor: RequireProfessor,
    ValidatedJson(dto): ValidatedJson<CourseFields>,
) -> Result<Json<Course>, AppError> {
    let course = CourseService::create_course(state.courses.as_ref(), professor.0.user_id, dto)
        .await
        .map_err(AppError::domain)?;
    Ok(Json(course))
}

/// Get a course by id
#[utoipa::path(
    get,
    path = "/courses/get/{id}",
    params(("id" = String, Path, description = "Course id")),
    responses(
        (status = 200, description = "The course", body = Course),
        (status = 400, description = "Invalid course id", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Course not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Courses"
)]
#[instrument(skip(state, _auth_user))]
pub async fn get_course(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<Course>, AppError> {
    let course_id: CourseId = parse_path_id(&id, "course")?;
    let course = CourseService::get_course(state.courses.as_ref(), course_id)
        .await
        .map_err(AppError::domain)?;
    Ok(Json(course))
}

/// Replace a course's content (creator only)
#[utoipa::path(
    put,
    path = "/courses/update/{id}",
    params(("id" = String, Path, description = "Course id")),
    request_body = UpdateCourseRequest,
    responses(
        (status = 200, description = "Course updated", body = MessageResponse),
        (status = 400, description = "Invalid id or body", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Not a professor or not the creator", body = ErrorResponse),
        (status = 404, description = "Course not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Courses"
)]
#[instrument(skip(state, professor, dto), fields(user.id = %professor.0.user_id))]
pub async fn update_course(
    State(state): State<AppState>,
    professor: RequireProfessor,
    Path(id): Path<String>,
    ValidatedJson(dto): ValidatedJson<UpdateCourseRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    let course_id: CourseId = parse_path_id(&id, "course")?;
    CourseService::update_course(state.courses.as_ref(), professor.0.user_id, course_id, dto.into())
        .await
        .map_err(AppError::domain)?;
    Ok(Json(MessageResponse::new("Course updated successfully")))
}

/// Delete a course (creator only)
#[utoipa::path(
    delete,
    path = "/courses/delete/{id}",
    params(("id" = String, Path, description = "Course id")),
    responses(
        (status = 200, description = "Course deleted", body = MessageResponse),
        (status = 400, description = "Invalid course id", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Not a professor or not the creator", body = ErrorResponse),
        (status = 404, description = "Course not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Courses"
)]
#[instrument(skip(state, professor), fields(user.id = %professor.0.user_id))]
pub async fn delete_course(
    State(state): State<AppState>,
    professor: RequireProfessor,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, AppError> {
    let course_id: CourseId = parse_path_id(&id, "course")?;
    CourseService::delete_course(state.courses.as_ref(), professor.0.user_id, course_id)
        .await
        .map_err(AppError::domain)?;
    Ok(Json(MessageResponse::new("Course deleted successfully")))
}

/// Rate a course
#[utoipa::path(
    post,
    path = "/courses/rate/{id}",
    params(("id" = String, Path, description = "Course id")),
    request_body = RateCourseRequest,
    responses(
        (status = 200, description = "Rating recorded", body = MessageResponse),
        (status = 400, description = "Invalid id, body, score or rater", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Course not found", body = ErrorResponse),
        (status = 409, description = "Own course or already rated", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Courses"
)]
#[instrument(skip(state, auth_user, dto), fields(user.id = %auth_user.user_id))]
pub async fn rate_course(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<String>,
    ValidatedJson(dto): ValidatedJson<RateCourseRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    let course_id: CourseId = parse_path_id(&id, "course")?;
    CourseService::rate_course(state.courses.as_ref(), auth_user.user_id, course_id, dto)
        .await
        .map_err(AppError::domain)?;
    Ok(Json(MessageResponse::new("Course rated successfully")))
}
