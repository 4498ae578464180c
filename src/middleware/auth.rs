use axum::{
    extract::{FromRequestParts, Request, State},
    http::{HeaderMap, StatusCode, header, request::Parts},
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::{debug, error, warn};

use freelearn_auth::{TokenError, validate_token};
use freelearn_core::{AppError, ErrorStatus};
use freelearn_db::StoreError;
use freelearn_models::{Role, UserId};

use crate::state::AppState;

/// Why a request was refused by the access layer.
#[derive(Debug, thiserror::Error)]
pub enum AccessError {
    #[error("No Authorization header provided")]
    MissingHeader,
    #[error("Invalid Authorization header format")]
    MalformedHeader,
    #[error("{0}")]
    InvalidToken(#[from] TokenError),
    #[error("User not found")]
    UserNotFound,
    #[error("Database error")]
    Store(#[source] StoreError),
    #[error("Access forbidden: professors only")]
    NotProfessor,
}

impl ErrorStatus for AccessError {
    fn status(&self) -> StatusCode {
        match self {
            AccessError::MissingHeader
            | AccessError::MalformedHeader
            | AccessError::InvalidToken(_)
            | AccessError::UserNotFound => StatusCode::UNAUTHORIZED,
            AccessError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AccessError::NotProfessor => StatusCode::FORBIDDEN,
        }
    }
}

/// The caller behind a validated bearer token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthUser {
    pub user_id: UserId,
    pub email: String,
    pub role: Role,
}

impl AuthUser {
    pub fn is_professor(&self) -> bool {
        self.role.is_professor()
    }
}

/// Splits `Bearer <token>` into its token. Anything other than exactly two
/// space-separated parts is rejected.
pub fn bearer_token(header_value: &str) -> Result<&str, AccessError> {
    let mut parts = header_value.split(' ');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(scheme), Some(token), None)
            if scheme.eq_ignore_ascii_case("Bearer") && !token.is_empty() =>
        {
            Ok(token)
        }
        _ => Err(AccessError::MalformedHeader),
    }
}

/// Validates the bearer token in `headers` and loads the user it names.
pub async fn resolve_user(headers: &HeaderMap, state: &AppState) -> Result<AuthUser, AccessError> {
    let header_value = headers
        .get(header::AUTHORIZATION)
        .ok_or(AccessError::MissingHeader)?
        .to_str()
        .map_err(|_| AccessError::MalformedHeader)?;

    let token = bearer_token(header_value)?;
    let claims = validate_token(token, &state.jwt_config)?;
    let user_id = claims
        .subject_id()
        .map(UserId::from)
        .ok_or(AccessError::InvalidToken(TokenError::Malformed))?;

    let user = state
        .users
        .find_by_id(user_id)
        .await
        .map_err(AccessError::Store)?
        .ok_or(AccessError::UserNotFound)?;

    Ok(AuthUser {
        user_id: user.id,
        email: user.email,
        role: user.role,
    })
}

/// Route layer that authenticates the request and stores the resulting
/// [`AuthUser`] in the request extensions for handlers and later layers.
pub async fn authenticate(State(state): State<AppState>, mut req: Request, next: Next) -> Response {
    let resolved = resolve_user(req.headers(), &state).await;
    match resolved {
        Ok(auth_user) => {
            debug!(user.id = %auth_user.user_id, "Request authenticated");
            req.extensions_mut().insert(auth_user);
            next.run(req).await
        }
        Err(err) => {
            match &err {
                AccessError::InvalidToken(token_err) if !token_err.is_client_error() => {
                    error!(error = %err, "Token validation is misconfigured")
                }
                _ => warn!(error = %err, path = %req.uri().path(), "Authentication failed"),
            }
            AppError::domain(err).into_response()
        }
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        if let Some(auth_user) = parts.extensions.get::<AuthUser>() {
            return Ok(auth_user.clone());
        }

        resolve_user(&parts.headers, state)
            .await
            .map_err(AppError::domain)
    }
}
