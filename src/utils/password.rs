//! Password encoding
//!
//! Stored format: `pbkdf2:sha256:<iterations>$<salt>$<hash>` with salt and
//! hash in unpadded URL-safe base64.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use hmac::Hmac;
use pbkdf2::pbkdf2;
use rand::RngCore;
use sha2::Sha256;
use crate::utils::errors::{EventHubError, Result};

type HmacSha256 = Hmac<Sha256>;

const KEY_LENGTH: usize = 32;
const SALT_LENGTH: usize = 16;
const SCHEME: &str = "pbkdf2:sha256";

/// Turns plain passwords into opaque stored values and checks them
pub trait PasswordEncoder: Send + Sync {
    fn encode(&self, raw: &str) -> Result<String>;

    fn matches(&self, raw: &str, encoded: &str) -> Result<bool>;
}

#[derive(Debug, Clone)]
pub struct Pbkdf2PasswordEncoder {
    iterations: u32,
}

impl Pbkdf2PasswordEncoder {
    pub fn new(iterations: u32) -> Self {
        Self { iterations }
    }

    fn derive(raw: &str, salt: &[u8], iterations: u32, out: &mut [u8]) -> Result<()> {
        pbkdf2::<HmacSha256>(raw.as_bytes(), salt, iterations, out)
            .map_err(|e| EventHubError::PasswordHash(e.to_string()))
    }
}

impl PasswordEncoder for Pbkdf2PasswordEncoder {
    fn encode(&self, raw: &str) -> Result<String> {
        let mut salt = [0u8; SALT_LENGTH];
        rand::thread_rng().fill_bytes(&mut salt);

        let mut key = [0u8; KEY_LENGTH];
        Self::derive(raw, &salt, self.iterations, &mut key)?;

        Ok(format!(
            "{}:{}${}${}",
            SCHEME,
            self.iterations,
            URL_SAFE_NO_PAD.encode(salt),
            URL_SAFE_NO_PAD.encode(key)
        ))
    }

    fn matches(&self, raw: &str, encoded: &str) -> Result<bool> {
        let malformed = || EventHubError::PasswordHash("malformed password hash".to_string());

        let mut parts = encoded.split('$');
        let (header, salt, hash) = match (parts.next(), parts.next(), parts.next(), parts.next()) {
            (Some(header), Some(salt), Some(hash), None) => (header, salt, hash),
            _ => return Err(malformed()),
        };
        let iterations: u32 = header
            .strip_prefix(SCHEME)
            .and_then(|rest| rest.strip_prefix(':'))
            .and_then(|n| n.parse().ok())
            .ok_or_else(malformed)?;
        let salt = URL_SAFE_NO_PAD.decode(salt).map_err(|_| malformed())?;
        let expected = URL_SAFE_NO_PAD.decode(hash).map_err(|_| malformed())?;

        let mut computed = vec![0u8; expected.len()];
        Self::derive(raw, &salt, iterations, &mut computed)?;

        // Compare without short-circuiting on the first differing byte
        let diff = computed
            .iter()
            .zip(expected.iter())
            .fold(0u8, |acc, (a, b)| acc | (a ^ b));
        Ok(diff == 0 && computed.len() == expected.len())
    }
}
