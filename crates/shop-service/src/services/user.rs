//! User service
//!
//! Registration, profile reads and updates, and account deactivation.

use shop_core::entities::{Cart, User};
use shop_core::{DomainError, Snowflake};
use tracing::{info, instrument, warn};

use crate::dto::{MessageResponse, RegisterRequest, UpdateUserRequest, UserResponse};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// User service
pub struct UserService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> UserService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Register a new user together with their empty cart
    #[instrument(skip(self, request), fields(role = ?request.role))]
    pub async fn register(&self, request: RegisterRequest) -> ServiceResult<UserResponse> {
        let role = request
            .role
            .ok_or_else(|| ServiceError::invalid_field("role", "Role is required"))?;
        let email = User::normalize_email(&request.email);

        if self.ctx.user_repo().email_exists(&email).await? {
            warn!("Registration rejected: email already in use");
            return Err(DomainError::EmailAlreadyExists.into());
        }

        let digest = self.ctx.password_service().hash(&request.password);
        let user = User::new(self.ctx.generate_id(), request.name, &email, role);
        let cart = Cart::new(self.ctx.generate_id(), user.id);

        self.ctx
            .user_repo()
            .create_with_cart(&user, &digest, &cart)
            .await?;

        info!(user_id = %user.id, role = %user.role, "User registered");
        Ok(UserResponse::from(&user))
    }

    /// List every user, active or not
    #[instrument(skip(self))]
    pub async fn list(&self) -> ServiceResult<Vec<UserResponse>> {
        let users = self.ctx.user_repo().find_all().await?;
        Ok(users.iter().map(UserResponse::from).collect())
    }

    #[instrument(skip(self))]
    pub async fn get(&self, user_id: Snowflake) -> ServiceResult<UserResponse> {
        let user = self.load(user_id).await?;
        Ok(UserResponse::from(&user))
    }

    /// Apply a partial update to the caller's own account
    #[instrument(skip(self, request))]
    pub async fn update(
        &self,
        actor_id: Snowflake,
        user_id: Snowflake,
        request: UpdateUserRequest,
    ) -> ServiceResult<UserResponse> {
        Self::ensure_self(actor_id, user_id)?;
        let mut user = self.load(user_id).await?;

        if let Some(name) = request.name.as_deref() {
            user.set_name(name);
        }

        if let Some(email) = request.email.as_deref() {
            let email = User::normalize_email(email);
            if email != user.email {
                if self.ctx.user_repo().email_exists(&email).await? {
                    warn!(user_id = %user_id, "Update rejected: email already in use");
                    return Err(DomainError::EmailAlreadyExists.into());
                }
                user.set_email(&email);
            }
        }

        let digest = request
            .password
            .as_deref()
            .map(|password| self.ctx.password_service().hash(password));
        self.ctx.user_repo().update(&user, digest.as_ref()).await?;
        if digest.is_some() {
            info!(user_id = %user_id, "Password changed");
        }

        info!(user_id = %user_id, "User updated");
        Ok(UserResponse::from(&user))
    }

    /// Soft delete the caller's own account. A seller's products go with it.
    #[instrument(skip(self))]
    pub async fn deactivate(
        &self,
        actor_id: Snowflake,
        user_id: Snowflake,
    ) -> ServiceResult<MessageResponse> {
        Self::ensure_self(actor_id, user_id)?;
        self.load(user_id).await?;

        let products = self.ctx.user_repo().deactivate(user_id).await?;

        info!(user_id = %user_id, products, "User deactivated");
        Ok(MessageResponse::new("User deactivated successfully"))
    }

    async fn load(&self, user_id: Snowflake) -> ServiceResult<User> {
        self.ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| DomainError::UserNotFound(user_id).into())
    }

    fn ensure_self(actor_id: Snowflake, user_id: Snowflake) -> ServiceResult<()> {
        if actor_id != user_id {
            return Err(ServiceError::forbidden("You can only modify your own account"));
        }
        Ok(())
    }
}
