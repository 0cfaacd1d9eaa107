//! Stored password material

use std::fmt;

/// Salted password hash as persisted alongside a user
///
/// Both fields are hex strings. The digest is never serialized and its
/// `Debug` output is redacted.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordDigest {
    pub hash: String,
    pub salt: String,
}

impl PasswordDigest {
    pub fn new(hash: impl Into<String>, salt: impl Into<String>) -> Self {
        Self {
            hash: hash.into(),
            salt: salt.into(),
        }
    }
}

impl fmt::Debug for PasswordDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PasswordDigest")
            .field("hash", &"<redacted>")
            .field("salt", &"<redacted>")
            .finish()
    }
}
