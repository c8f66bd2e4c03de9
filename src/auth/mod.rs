pub mod permissions;
pub mod token;

use sha2::{Digest, Sha256};

pub use permissions::{normalize, PermissionResolver};
pub use token::{decode_ignoring_expiry, issue, verify, Claims, TokenError};

/// Hex digest used for stored account passwords.
pub fn password_digest(password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(password.as_bytes());
    hex::encode(hasher.finalize())
}
