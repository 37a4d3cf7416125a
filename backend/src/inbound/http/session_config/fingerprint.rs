//! Session key fingerprinting.
//!
//! A truncated SHA-256 of the signing material lets operators tell which key
//! is active without exposing it. The fingerprint is logged at startup.

use actix_web::cookie::Key;
use sha2::{Digest, Sha256};

/// Length of the fingerprint in bytes before hex encoding.
const FINGERPRINT_BYTES: usize = 8;

/// Lowercase hex fingerprint of the key's signing half.
///
/// # Examples
/// ```
/// use actix_web::cookie::Key;
/// use persons::inbound::http::session_config::key_fingerprint;
///
/// let fp = key_fingerprint(&Key::generate());
/// assert_eq!(fp.len(), 16);
/// ```
#[must_use]
pub fn key_fingerprint(key: &Key) -> String {
    let digest = Sha256::digest(key.signing());
    hex::encode(&digest[..FINGERPRINT_BYTES])
}
