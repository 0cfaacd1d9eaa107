//! Authentication service
//!
//! Handles login and resolution of bearer tokens to active users.

use shop_common::AppError;
use shop_core::entities::User;
use shop_core::DomainError;
use tracing::{info, instrument, warn};

use crate::dto::{LoginRequest, TokenResponse};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Authentication service
pub struct AuthService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AuthService<'a> {
    /// Create a new AuthService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Login with email and password
    ///
    /// A disabled account is rejected before the password is checked, so the
    /// answer is the same whether or not the password was right.
    #[instrument(skip(self, request))]
    pub async fn login(&self, request: LoginRequest) -> ServiceResult<TokenResponse> {
        let email = User::normalize_email(&request.email);

        let user = self
            .ctx
            .user_repo()
            .find_by_email(&email)
            .await?
            .ok_or_else(|| {
                warn!("Login failed: unknown email");
                ServiceError::App(AppError::InvalidCredentials)
            })?;

        if !user.is_active {
            warn!(user_id = %user.id, "Login failed: account disabled");
            return Err(DomainError::AccountDisabled.into());
        }

        let digest = self
            .ctx
            .user_repo()
            .get_password(user.id)
            .await?
            .ok_or_else(|| {
                warn!(user_id = %user.id, "Login failed: no password stored");
                ServiceError::App(AppError::InvalidCredentials)
            })?;

        self.ctx
            .password_service()
            .verify_or_error(&request.password, &digest)
            .inspect_err(|_| warn!(user_id = %user.id, "Login failed: invalid password"))?;

        let token = self.ctx.jwt_service().generate_token(user.id, user.role)?;

        info!(user_id = %user.id, role = %user.role, "User logged in");
        Ok(TokenResponse { token })
    }

    /// Resolve a bearer token to the active user it names
    #[instrument(skip(self, token))]
    pub async fn authenticate(&self, token: &str) -> ServiceResult<User> {
        let claims = self.ctx.jwt_service().decode_token(token)?;
        let user_id = claims.user_id()?;

        let user = self
            .ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .ok_or(ServiceError::UnknownUser)?;

        if !user.is_active {
            return Err(DomainError::AccountDisabled.into());
        }

        Ok(user)
    }
}
