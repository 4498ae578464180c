use tracing::{debug, info, instrument, warn};

use freelearn_auth::issue_token;
use freelearn_config::JwtConfig;
use freelearn_core::{hash_password, verify_password};
use freelearn_db::UserRepository;

use crate::modules::users::model::{
    LoginRequest, LoginResponse, RegisterRequest, Role, User, UserError, UserId, normalize_email,
};

pub struct AuthService;

impl AuthService {
    /// Registers a new account and returns its id.
    ///
    /// The up-front email check gives the common case a cheap answer; the
    /// conditional insert is what actually guarantees uniqueness.
    #[instrument(skip(users, dto), fields(user.email = %dto.email, user.professor = dto.professor))]
    pub async fn register_user(
        users: &dyn UserRepository,
        dto: RegisterRequest,
    ) -> Result<UserId, UserError> {
        let email = normalize_email(&dto.email);

        if users.find_by_email(&email).await?.is_some() {
            warn!(user.email = %email, "Registration with existing email");
            return Err(UserError::AlreadyExists);
        }

        let password = dto.password;
        let password_hash = tokio::task::spawn_blocking(move || hash_password(&password)).await??;

        let user = User::new(&email, password_hash, Role::from_flag(dto.professor));
        if !users.insert_if_absent(&user).await? {
            warn!(user.email = %email, "Concurrent registration with same email");
            return Err(UserError::AlreadyExists);
        }

        info!(user.id = %user.id, user.role = ?user.role, "User registered");
        Ok(user.id)
    }

    #[instrument(skip(users, dto, jwt_config), fields(user.email = %dto.email))]
    pub async fn login_user(
        users: &dyn UserRepository,
        dto: LoginRequest,
        jwt_config: &JwtConfig,
    ) -> Result<LoginResponse, UserError> {
        let email = normalize_email(&dto.email);

        let user = users
            .find_by_email(&email)
            .await?
            .ok_or(UserError::EmailNotFound)?;

        let password = dto.password;
        let password_hash = user.password_hash.clone();
        let is_valid =
            tokio::task::spawn_blocking(move || verify_password(&password, &password_hash)).await?;

        if !is_valid {
            warn!(user.id = %user.id, "Login with wrong password");
            return Err(UserError::InvalidCredentials);
        }

        let token =
            issue_token(user.id.into_inner(), &user.email, jwt_config).map_err(UserError::Signing)?;

        debug!(user.id = %user.id, "Issued session token");
        Ok(LoginResponse {
            token,
            user_id: user.id,
            professor: user.role.is_professor(),
        })
    }
}
