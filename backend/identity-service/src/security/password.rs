/// Password digests for the sign-in equality check
///
/// A digest is compared for equality only. It is not a protection boundary:
/// every user record lives in local storage next to the digest.
use sha2::{Digest, Sha256};

/// Hex-encoded SHA-256 of the password
pub fn digest_password(password: &str) -> String {
    hex::encode(Sha256::digest(password.as_bytes()))
}

/// Check a password against a stored digest
pub fn verify_password(password: &str, password_hash: &str) -> bool {
    digest_password(password) == password_hash
}
