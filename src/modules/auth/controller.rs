use axum::Json;
use axum::extract::State;
use tracing::instrument;
use utoipa::ToSchema;

use freelearn_core::AppError;

use crate::modules::users::model::{LoginRequest, LoginResponse, RegisterRequest, RegisterResponse};
use crate::state::AppState;
use crate::validator::ValidatedJson;

use super::service::AuthService;

/// Body of every failed request.
#[derive(ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

/// Register a new professor or student account
#[utoipa::path(
    post,
    path = "/register",
    request_body = RegisterRequest,
    responses(
        (status = 200, description = "User registered successfully", body = RegisterResponse),
        (status = 400, description = "Bad request - malformed body or invalid email", body = ErrorResponse),
        (status = 409, description = "Email already registered", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip(state, dto))]
pub async fn register_user(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<RegisterRequest>,
) -> Result<Json<RegisterResponse>, AppError> {
    let inserted_id = AuthService::register_user(state.users.as_ref(), dto)
        .await
        .map_err(AppError::domain)?;

    Ok(Json(RegisterResponse { inserted_id }))
}

/// Login and receive a session token
#[utoipa::path(
    post,
    path = "/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 400, description = "Bad request - validation error", body = ErrorResponse),
        (status = 401, description = "Unknown email or wrong password", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip(state, dto))]
pub async fn login_user(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let response = AuthService::login_user(state.users.as_ref(), dto, &state.jwt_config)
        .await
        .map_err(AppError::domain)?;

    Ok(Json(response))
}
