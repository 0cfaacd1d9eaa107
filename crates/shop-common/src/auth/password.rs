//! Password hashing and verification utilities
//!
//! PBKDF2-HMAC-SHA512 with a per-password random salt. The salt is stored
//! hex-encoded and its hex string (not the raw bytes) is fed to the KDF.

use pbkdf2::pbkdf2_hmac;
use rand::{rngs::OsRng, RngCore};
use sha2::Sha512;
use subtle::ConstantTimeEq;
use shop_core::PasswordDigest;

use crate::error::AppError;

/// Salt length in bytes before hex encoding
pub const SALT_LEN: usize = 16;

/// Derived key length in bytes before hex encoding
pub const HASH_LEN: usize = 64;

/// Default PBKDF2 iteration count
pub const DEFAULT_ITERATIONS: u32 = 100_000;

/// Derive the hex-encoded hash of `password` under `salt`
fn derive(password: &str, salt: &str, iterations: u32) -> [u8; HASH_LEN] {
    let mut out = [0u8; HASH_LEN];
    pbkdf2_hmac::<Sha512>(password.as_bytes(), salt.as_bytes(), iterations, &mut out);
    out
}

/// Hash a password with a freshly generated salt
pub fn hash_password(password: &str, iterations: u32) -> PasswordDigest {
    let mut salt = [0u8; SALT_LEN];
    OsRng.fill_bytes(&mut salt);
    let salt = hex::encode(salt);

    let hash = hex::encode(derive(password, &salt, iterations));
    PasswordDigest::new(hash, salt)
}

/// Verify a password against stored material.
///
/// A stored hash that is not valid hex never matches.
pub fn verify_password(password: &str, digest: &PasswordDigest, iterations: u32) -> bool {
    let Ok(expected) = hex::decode(&digest.hash) else {
        return false;
    };
    let actual = derive(password, &digest.salt, iterations);
    // Slices of different length compare unequal
    actual.as_slice().ct_eq(expected.as_slice()).into()
}

/// Password service for dependency injection
#[derive(Debug, Clone, Copy)]
pub struct PasswordService {
    iterations: u32,
}

impl Default for PasswordService {
    fn default() -> Self {
        Self::new(DEFAULT_ITERATIONS)
    }
}

impl PasswordService {
    /// Create a password service with the given PBKDF2 iteration count
    #[must_use]
    pub fn new(iterations: u32) -> Self {
        Self {
            iterations: iterations.max(1),
        }
    }

    #[must_use]
    pub fn iterations(&self) -> u32 {
        self.iterations
    }

    /// Hash a password. Every call uses a new salt.
    #[must_use]
    pub fn hash(&self, password: &str) -> PasswordDigest {
        hash_password(password, self.iterations)
    }

    #[must_use]
    pub fn verify(&self, password: &str, digest: &PasswordDigest) -> bool {
        verify_password(password, digest, self.iterations)
    }

    /// Verify a password and return an error if invalid
    ///
    /// # Errors
    /// Returns `AppError::InvalidCredentials` if the password doesn't match
    pub fn verify_or_error(&self, password: &str, digest: &PasswordDigest) -> Result<(), AppError> {
        if self.verify(password, digest) {
            Ok(())
        } else {
            Err(AppError::InvalidCredentials)
        }
    }
}
