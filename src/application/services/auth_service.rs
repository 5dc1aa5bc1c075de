//! Authentication service for create requests.

use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::error::AppError;
use serde_json::json;

type HmacSha256 = Hmac<Sha256>;

/// Checks presented credentials against the configured shared secret.
///
/// The presented key is MAC'd with HMAC-SHA256 (keyed by a value derived from
/// the secret) and checked with [`Mac::verify_slice`], a constant-time compare.
pub struct AuthService {
    expected_tag: Vec<u8>,
    mac_key: Vec<u8>,
}

impl AuthService {
    /// Creates a new authentication service.
    ///
    /// # Arguments
    ///
    /// - `secret_key` - value create requests must present (`SECRET_KEY`)
    pub fn new(secret_key: &str) -> Self {
        let mac_key = mac_key_for(secret_key);
        let expected_tag = tag(&mac_key, secret_key.as_bytes());

        Self {
            expected_tag,
            mac_key,
        }
    }

    /// Authenticates a presented key.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] if the key does not match.
    pub fn authenticate(&self, presented: &str) -> Result<(), AppError> {
        let mut mac = HmacSha256::new_from_slice(&self.mac_key)
            .expect("HMAC accepts any key length");
        mac.update(presented.as_bytes());

        mac.verify_slice(&self.expected_tag).map_err(|_| {
            AppError::unauthorized("Unauthorized", json!({ "reason": "Invalid key" }))
        })
    }
}

fn mac_key_for(secret_key: &str) -> Vec<u8> {
    tag(b"short-url/auth", secret_key.as_bytes())
}

fn tag(key: &[u8], message: &[u8]) -> Vec<u8> {
    let mut mac = HmacSha256::new_from_slice(key).expect("HMAC accepts any key length");
    mac.update(message);
    mac.finalize().into_bytes().to_vec()
}
