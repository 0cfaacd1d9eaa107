//! User entity - a customer or seller account

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::Snowflake;

/// Account role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum UserRole {
    /// Customer: browses, fills a cart, places orders and keeps favorites
    #[default]
    Cliente,
    /// Seller: manages a product catalog and reads the sales dashboard
    Vendedor,
}

impl UserRole {
    /// Storage/wire name of the role
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Cliente => "Cliente",
            Self::Vendedor => "Vendedor",
        }
    }

    #[inline]
    #[must_use]
    pub fn is_seller(self) -> bool {
        matches!(self, Self::Vendedor)
    }
}

impl std::str::FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Cliente" => Ok(Self::Cliente),
            "Vendedor" => Ok(Self::Vendedor),
            other => Err(format!("unknown role: {other}")),
        }
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// User account
///
/// Password material is kept out of the entity and travels as a
/// [`PasswordDigest`](crate::value_objects::PasswordDigest) only where needed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: Snowflake,
    pub name: String,
    pub email: String,
    pub role: UserRole,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new active user. The email is normalized.
    pub fn new(id: Snowflake, name: String, email: &str, role: UserRole) -> Self {
        let now = Utc::now();
        Self {
            id,
            name: name.trim().to_string(),
            email: Self::normalize_email(email),
            role,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    /// Trim and lowercase an email address for storage and lookup
    pub fn normalize_email(email: &str) -> String {
        email.trim().to_lowercase()
    }

    #[inline]
    pub fn is_seller(&self) -> bool {
        self.role.is_seller()
    }

    pub fn set_name(&mut self, name: &str) {
        self.name = name.trim().to_string();
        self.updated_at = Utc::now();
    }

    pub fn set_email(&mut self, email: &str) {
        self.email = Self::normalize_email(email);
        self.updated_at = Utc::now();
    }
}
