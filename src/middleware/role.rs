//! Role-based authorization for professor-only routes.
//!
//! Two entry points share the same check:
//! 1. `require_professor`, a route layer for whole groups of routes
//! 2. `RequireProfessor`, an extractor for individual handlers

use axum::{
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::warn;

use freelearn_core::AppError;
use freelearn_models::Role;

use crate::middleware::auth::{AccessError, AuthUser};
use crate::state::AppState;

/// Fails with [`AccessError::NotProfessor`] unless the caller holds `required_role`.
///
/// Only professors are gated today; a student requirement is satisfied by any
/// authenticated caller.
pub fn check_role(auth_user: &AuthUser, required_role: Role) -> Result<(), AccessError> {
    match required_role {
        Role::Professor if !auth_user.is_professor() => Err(AccessError::NotProfessor),
        _ => Ok(()),
    }
}

/// Route layer admitting only authenticated professors.
///
/// ```rust,ignore
/// let professor_routes = Router::new()
///     .route("/post", post(create_course))
///     .route_layer(middleware::from_fn_with_state(state.clone(), require_professor));
/// ```
pub async fn require_professor(State(state): State<AppState>, req: Request, next: Next) -> Response {
    let (mut parts, body) = req.into_parts();

    let auth_user = match AuthUser::from_request_parts(&mut parts, &state).await {
        Ok(user) => user,
        Err(err) => return err.into_response(),
    };

    if let Err(err) = check_role(&auth_user, Role::Professor) {
        warn!(user.id = %auth_user.user_id, "Professor-only route refused");
        return AppError::domain(err).into_response();
    }

    next.run(Request::from_parts(parts, body)).await
}

/// Extractor that yields the caller only if they are a professor.
#[derive(Debug, Clone)]
pub struct RequireProfessor(pub AuthUser);

impl FromRequestParts<AppState> for RequireProfessor {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_user = AuthUser::from_request_parts(parts, state).await?;
        check_role(&auth_user, Role::Professor).map_err(AppError::domain)?;
        Ok(RequireProfessor(auth_user))
    }
}
