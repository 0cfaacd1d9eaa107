//! User entity <-> model mapper

use shop_core::entities::{User, UserRole};
use shop_core::value_objects::{PasswordDigest, Snowflake};

use crate::models::{PasswordModel, UserModel};

impl From<UserModel> for User {
    fn from(model: UserModel) -> Self {
        User {
            id: Snowflake::new(model.id),
            name: model.name,
            email: model.email,
            // Column is CHECK-constrained to the known roles
            role: model.role.parse().unwrap_or(UserRole::Cliente),
            is_active: model.is_active,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

impl From<PasswordModel> for PasswordDigest {
    fn from(model: PasswordModel) -> Self {
        PasswordDigest::new(model.password_hash, model.password_salt)
    }
}
