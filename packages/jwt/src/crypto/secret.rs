//! Shared HMAC signing secret

use crate::{
    algorithms::Algorithm,
    error::{JwtError, JwtResult},
};
use sigil_common::AuthConfig;
use std::fmt;
use std::sync::Arc;
use zeroize::Zeroizing;

/// HMAC key material
///
/// Cheap to clone (the bytes sit behind an `Arc`), wiped on drop, and never
/// printed by `Debug`.
#[derive(Clone)]
pub struct SigningSecret(Arc<Zeroizing<Vec<u8>>>);

impl SigningSecret {
    /// Wrap raw secret bytes. Empty secrets are rejected.
    pub fn new(secret: impl Into<Vec<u8>>) -> JwtResult<Self> {
        let secret = Zeroizing::new(secret.into());
        if secret.is_empty() {
            return Err(JwtError::InvalidKey("signing secret is empty"));
        }
        Ok(Self(Arc::new(secret)))
    }

    /// Secret configured for this process.
    pub fn from_config(config: &AuthConfig) -> JwtResult<Self> {
        Self::new(config.secret())
    }

    /// Secret length in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false; empty secrets cannot be constructed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether the secret meets the recommended length for `algorithm`.
    #[must_use]
    pub fn is_recommended_for(&self, algorithm: Algorithm) -> bool {
        self.len() >= algorithm.recommended_secret_len()
    }

    pub(crate) fn expose(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for SigningSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SigningSecret")
            .field(&format_args!("<{} bytes>", self.len()))
            .finish()
    }
}
