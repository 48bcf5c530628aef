//! Token value types

use crate::{algorithms::Algorithm, claims::Claims};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Token type tag written into every header.
pub const TOKEN_TYPE: &str = "JWT";

/// Token header
///
/// Both fields are required when decoding; extra members such as `kid` are
/// ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Header {
    alg: String,
    typ: String,
}

impl Header {
    /// Header for a token signed with `algorithm`.
    #[must_use]
    pub fn new(algorithm: Algorithm) -> Self {
        Self {
            alg: algorithm.as_str().to_string(),
            typ: TOKEN_TYPE.to_string(),
        }
    }

    /// Declared algorithm name, exactly as it appeared on the wire.
    #[must_use]
    pub fn alg(&self) -> &str {
        &self.alg
    }

    /// Declared token type.
    #[must_use]
    pub fn typ(&self) -> &str {
        &self.typ
    }
}

/// Encoded token: the dot-joined compact serialization
///
/// This is the only form that crosses a trust boundary. Nothing about it is
/// trusted until [`TokenService::authenticate`](crate::TokenService::authenticate)
/// turns it into a [`VerifiedToken`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct JwtToken(String);

impl JwtToken {
    /// Borrow the compact serialization.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Take the compact serialization.
    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }

    /// Size on the wire, in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the token text is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<String> for JwtToken {
    fn from(token: String) -> Self {
        Self(token)
    }
}

impl From<&str> for JwtToken {
    fn from(token: &str) -> Self {
        Self(token.to_string())
    }
}

impl AsRef<str> for JwtToken {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for JwtToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A token whose signature and claims have both been checked
///
/// Only the token service constructs this type, so holding one is proof that
/// verification succeeded. The claims view is read-only.
#[derive(Debug, Clone, PartialEq)]
pub struct VerifiedToken {
    header: Header,
    claims: Claims,
    signature: Vec<u8>,
    raw: JwtToken,
}

impl VerifiedToken {
    pub(crate) fn new(header: Header, claims: Claims, signature: Vec<u8>, raw: JwtToken) -> Self {
        Self {
            header,
            claims,
            signature,
            raw,
        }
    }

    /// Verified header.
    #[must_use]
    pub fn header(&self) -> &Header {
        &self.header
    }

    /// Verified claims.
    #[must_use]
    pub fn claims(&self) -> &Claims {
        &self.claims
    }

    /// MAC bytes carried by the token.
    #[must_use]
    pub fn signature(&self) -> &[u8] {
        &self.signature
    }

    /// The compact serialization that was verified.
    #[must_use]
    pub fn raw(&self) -> &JwtToken {
        &self.raw
    }

    /// Consume the token, keeping only its claims.
    #[must_use]
    pub fn into_claims(self) -> Claims {
        self.claims
    }
}

/// A decoded but **unverified** token
///
/// Produced by [`inspect`](crate::inspect) for diagnostics. Segments are
/// encoded, not encrypted, so anyone can read them; nothing read here should
/// drive an authorization decision.
#[derive(Debug, Clone, PartialEq)]
pub struct UnverifiedToken {
    header: Header,
    claims: Claims,
    signature: Vec<u8>,
}

impl UnverifiedToken {
    pub(crate) fn new(header: Header, claims: Claims, signature: Vec<u8>) -> Self {
        Self {
            header,
            claims,
            signature,
        }
    }

    /// Header as presented, not verified.
    #[must_use]
    pub fn untrusted_header(&self) -> &Header {
        &self.header
    }

    /// Claims as presented, not verified.
    #[must_use]
    pub fn untrusted_claims(&self) -> &Claims {
        &self.claims
    }

    /// Signature bytes as presented.
    #[must_use]
    pub fn untrusted_signature(&self) -> &[u8] {
        &self.signature
    }
}
