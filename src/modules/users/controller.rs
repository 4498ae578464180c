use axum::{
    Json,
    extract::{Path, State},
};
use tracing::instrument;

use freelearn_core::AppError;
use freelearn_models::Course;

use crate::middleware::auth::AuthUser;
use crate::modules::auth::controller::ErrorResponse;
use crate::modules::users::model::{EnrollRequest, MessageResponse, UserId};
use crate::modules::users::service::UserService;
use crate::state::AppState;
use crate::validator::{ValidatedJson, parse_path_id};

/// Enroll the caller in a course
#[utoipa::path(
    post,
    path = "/courses/add-course-to-user/{id}",
    params(("id" = String, Path, description = "User id; must be the caller")),
    request_body = EnrollRequest,
    responses(
        (status = 200, description = "Course added to user", body = MessageResponse),
        (status = 400, description = "Invalid id or body", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Acting on another user", body = ErrorResponse),
        (status = 404, description = "User or course not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
#[instrument(skip(state, auth_user, dto), fields(user.id = %auth_user.user_id))]
pub async fn enroll_in_course(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<String>,
    ValidatedJson(dto): ValidatedJson<EnrollRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    let user_id: UserId = parse_path_id(&id, "user")?;

    UserService::enroll(
        state.users.as_ref(),
        state.courses.as_ref(),
        auth_user.user_id,
        user_id,
        dto.course_id,
    )
    .await
    .map_err(AppError::domain)?;

    Ok(Json(MessageResponse::new("Course added to user successfully")))
}

/// List the courses the caller is enrolled in
#[utoipa::path(
    get,
    path = "/courses/get-user-courses/{id}",
    params(("id" = String, Path, description = "User id; must be the caller")),
    responses(
        (status = 200, description = "Enrolled courses", body = Vec<Course>),
        (status = 400, description = "Invalid user id", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Acting on another user", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
#[instrument(skip(state, auth_user), fields(user.id = %auth_user.user_id))]
pub async fn get_user_courses(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<Vec<Course>>, AppError> {
    let user_id: UserId = parse_path_id(&id, "user")?;

    let courses = UserService::list_enrolled_courses(
        state.users.as_ref(),
        state.courses.as_ref(),
        auth_user.user_id,
        user_id,
    )
    .await
    .map_err(AppError::domain)?;

    Ok(Json(courses))
}
