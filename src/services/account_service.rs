use crate::auth::{self, JwtKeys};
use crate::error::{AppError, AppResult};
use crate::models::{User, UserRole};
use crate::repositories::UserRepository;
use crate::services::validation::{not_blank, not_blank_opt};
use garde::Validate;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[garde(email)]
    pub email: String,
    #[garde(length(max = 120), custom(not_blank))]
    pub name: String,
    #[garde(length(min = 8, max = 256))]
    pub password: String,
    #[garde(skip)]
    pub phone: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[garde(length(min = 1))]
    pub email: String,
    #[garde(length(min = 1))]
    pub password: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateUserRequest {
    #[garde(length(max = 120), custom(not_blank_opt))]
    pub name: Option<String>,
    #[garde(skip)]
    pub phone: Option<String>,
    #[garde(skip)]
    pub role: Option<UserRole>,
}

/// Token plus the account it was issued for
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: User,
}

/// Registration, login and back-office user management
pub struct AccountService {
    user_repo: Arc<UserRepository>,
    jwt: JwtKeys,
}

impl AccountService {
    pub fn new(user_repo: Arc<UserRepository>, jwt: JwtKeys) -> Self {
        Self { user_repo, jwt }
    }

    /// Create a `user`-role account and sign it in
    pub async fn register(&self, request: RegisterRequest) -> AppResult<AuthResponse> {
        request.validate()?;
        let email = request.email.trim().to_lowercase();

        if self.user_repo.find_by_email(&email).await?.is_some() {
            return Err(AppError::Conflict("An account with this email already exists".into()));
        }

        let password_hash = auth::hash_password(&request.password).await?;
        let user = self
            .user_repo
            .create(
                &email,
                request.name.trim(),
                &password_hash,
                UserRole::User,
                request.phone.as_deref(),
            )
            .await?;

        info!("Registered user {} ({})", user.email, user.id);
        let token = self.jwt.issue(&user)?;
        Ok(AuthResponse { token, user })
    }

    /// Check credentials; unknown email and wrong password look the same
    pub async fn login(&self, request: LoginRequest) -> AppResult<AuthResponse> {
        request.validate()?;
        let invalid = || AppError::Unauthorized("Invalid email or password".into());

        let user = self
            .user_repo
            .find_by_email(request.email.trim())
            .await?
            .ok_or_else(invalid)?;

        if !auth::verify_password(&request.password, &user.password_hash).await? {
            return Err(invalid());
        }

        info!("User {} signed in", user.id);
        let token = self.jwt.issue(&user)?;
        Ok(AuthResponse { token, user })
    }

    pub async fn get(&self, id: Uuid) -> AppResult<User> {
        self.user_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".into()))
    }

    pub async fn list(&self) -> AppResult<Vec<User>> {
        Ok(self.user_repo.list().await?)
    }

    pub async fn update(&self, id: Uuid, request: UpdateUserRequest) -> AppResult<User> {
        request.validate()?;
        self.user_repo
            .update(
                id,
                request.name.as_deref().map(str::trim),
                request.phone.as_deref(),
                request.role,
            )
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".into()))
    }

    /// Delete an account; admins cannot delete themselves
    pub async fn delete(&self, acting_user: Uuid, id: Uuid) -> AppResult<()> {
        if acting_user == id {
            return Err(AppError::Validation("You cannot delete your own account".into()));
        }
        if !self.user_repo.delete(id).await? {
            return Err(AppError::NotFound("User not found".into()));
        }
        info!("Deleted user {}", id);
        Ok(())
    }
}
