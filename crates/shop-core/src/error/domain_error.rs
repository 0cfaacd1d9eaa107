//! Domain errors - error types for the domain layer

use thiserror::Error;

use crate::value_objects::Snowflake;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("User not found: {0}")]
    UserNotFound(Snowflake),

    #[error("Product not found: {0}")]
    ProductNotFound(Snowflake),

    #[error("Cart not found")]
    CartNotFound,

    #[error("Order not found: {0}")]
    OrderNotFound(Snowflake),

    #[error("Favorite not found")]
    FavoriteNotFound,

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Email already in use")]
    EmailAlreadyExists,

    #[error("Product not found in cart")]
    NotInCart,

    #[error("Cart is empty")]
    EmptyCart,

    // =========================================================================
    // Authorization Errors
    // =========================================================================
    #[error("This account is disabled")]
    AccountDisabled,

    #[error("Only sellers can perform this action")]
    NotSeller,

    #[error("Not the owner of this resource")]
    NotOwner,

    // =========================================================================
    // Conflict Errors
    // =========================================================================
    #[error("Product already in favorites")]
    FavoriteAlreadyExists,

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            // Not Found
            Self::UserNotFound(_) => "UNKNOWN_USER",
            Self::ProductNotFound(_) => "UNKNOWN_PRODUCT",
            Self::CartNotFound => "UNKNOWN_CART",
            Self::OrderNotFound(_) => "UNKNOWN_ORDER",
            Self::FavoriteNotFound => "UNKNOWN_FAVORITE",

            // Validation
            Self::ValidationError(_) => "VALIDATION_ERROR",
            Self::EmailAlreadyExists => "EMAIL_ALREADY_EXISTS",
            Self::NotInCart => "NOT_IN_CART",
            Self::EmptyCart => "EMPTY_CART",

            // Authorization
            Self::AccountDisabled => "ACCOUNT_DISABLED",
            Self::NotSeller => "NOT_SELLER",
            Self::NotOwner => "NOT_OWNER",

            // Conflict
            Self::FavoriteAlreadyExists => "FAVORITE_ALREADY_EXISTS",

            // Infrastructure
            Self::DatabaseError(_) => "DATABASE_ERROR",
            Self::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::UserNotFound(_)
                | Self::ProductNotFound(_)
                | Self::CartNotFound
                | Self::OrderNotFound(_)
                | Self::FavoriteNotFound
        )
    }

    /// Check if this is a validation error
    ///
    /// A duplicate email is reported as a bad request, not a conflict.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::ValidationError(_) | Self::EmailAlreadyExists | Self::NotInCart | Self::EmptyCart
        )
    }

    /// Check if this is an authorization error
    pub fn is_authorization(&self) -> bool {
        matches!(self, Self::AccountDisabled | Self::NotSeller | Self::NotOwner)
    }

    /// Check if this is a conflict error
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::FavoriteAlreadyExists)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        let err = DomainError::UserNotFound(Snowflake::new(1));
        assert_eq!(err.code(), "UNKNOWN_USER");

        assert_eq!(DomainError::FavoriteNotFound.code(), "UNKNOWN_FAVORITE");
        assert_eq!(
            DomainError::FavoriteAlreadyExists.code(),
            "FAVORITE_ALREADY_EXISTS"
        );
    }

    #[test]
    fn test_email_conflict_is_validation() {
        assert!(DomainError::EmailAlreadyExists.is_validation());
        assert!(!DomainError::EmailAlreadyExists.is_conflict());
    }

    #[test]
    fn test_is_not_found() {
        assert!(DomainError::ProductNotFound(Snowflake::new(1)).is_not_found());
        assert!(DomainError::CartNotFound.is_not_found());
        assert!(!DomainError::NotInCart.is_not_found());
    }

    #[test]
    fn test_is_authorization() {
        assert!(DomainError::AccountDisabled.is_authorization());
        assert!(DomainError::NotOwner.is_authorization());
        assert!(!DomainError::UserNotFound(Snowflake::new(1)).is_authorization());
    }

    #[test]
    fn test_error_display() {
        let err = DomainError::OrderNotFound(Snowflake::new(123));
        assert_eq!(err.to_string(), "Order not found: 123");
        assert_eq!(DomainError::EmptyCart.to_string(), "Cart is empty");
    }
}
