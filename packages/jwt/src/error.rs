//! Token error taxonomy
//!
//! Every rejection `authenticate` can produce is one of the first eight
//! variants. None of them carries claim values: at most the name of the
//! failing field.

use thiserror::Error;

/// Token operation result type
pub type JwtResult<T> = Result<T, JwtError>;

/// Token errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JwtError {
    /// Text is not valid unpadded Base64URL
    #[error("malformed base64url encoding")]
    MalformedEncoding,
    /// Wrong segment count, or a segment that cannot be decoded
    #[error("malformed token: {0}")]
    MalformedToken(&'static str),
    /// Header names an algorithm outside the verifier's accepted set
    #[error("unsupported algorithm: {0}")]
    UnsupportedAlgorithm(String),
    /// Signature mismatch (tampering, wrong secret or wrong algorithm)
    #[error("invalid token signature")]
    InvalidSignature,
    /// `exp` is in the past beyond the tolerated skew
    #[error("token has expired")]
    TokenExpired,
    /// `nbf` is in the future beyond the tolerated skew
    #[error("token is not yet valid")]
    TokenNotYetValid,
    /// `iss` differs from the expected issuer
    #[error("issuer mismatch")]
    IssuerMismatch,
    /// Expected audience is not among the token's audiences
    #[error("audience mismatch")]
    AudienceMismatch,
    /// A claim required by the validation options is absent
    ///
    /// Returned by `authenticate` for a correctly signed token without `exp`
    /// while expiry is required, so callers matching on [`kind`](Self::kind)
    /// see `missing_claim` alongside the verification failures.
    #[error("missing required claim: {0}")]
    MissingClaim(&'static str),
    /// Claims rejected at issue time
    #[error("invalid claims: {0}")]
    InvalidClaims(String),
    /// Unusable signing secret
    #[error("invalid key: {0}")]
    InvalidKey(&'static str),
    /// Background task was dropped before producing a result
    #[error("background task failed")]
    TaskFailed,
}

impl JwtError {
    /// Stable, machine-checkable code for this error
    ///
    /// Callers such as an HTTP layer map these to responses without
    /// matching on display strings. `authenticate` yields the verification
    /// kinds plus `missing_claim`; the rest come from issuing or async tasks.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            JwtError::MalformedEncoding => "malformed_encoding",
            JwtError::MalformedToken(_) => "malformed_token",
            JwtError::UnsupportedAlgorithm(_) => "unsupported_algorithm",
            JwtError::InvalidSignature => "invalid_signature",
            JwtError::TokenExpired => "token_expired",
            JwtError::TokenNotYetValid => "token_not_yet_valid",
            JwtError::IssuerMismatch => "issuer_mismatch",
            JwtError::AudienceMismatch => "audience_mismatch",
            JwtError::MissingClaim(_) => "missing_claim",
            JwtError::InvalidClaims(_) => "invalid_claims",
            JwtError::InvalidKey(_) => "invalid_key",
            JwtError::TaskFailed => "task_failed",
        }
    }

    /// Whether this error came out of the time-based claim checks
    #[inline]
    #[must_use]
    pub const fn is_temporal(&self) -> bool {
        matches!(self, JwtError::TokenExpired | JwtError::TokenNotYetValid)
    }

    /// Create an invalid claims error
    #[inline]
    #[must_use]
    pub fn invalid_claims(msg: impl Into<String>) -> Self {
        JwtError::InvalidClaims(msg.into())
    }

    /// Create an unsupported algorithm error
    #[inline]
    #[must_use]
    pub fn unsupported_algorithm(alg: &str) -> Self {
        JwtError::UnsupportedAlgorithm(alg.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_are_distinct() {
        let all = [
            JwtError::MalformedEncoding,
            JwtError::MalformedToken("segments"),
            JwtError::unsupported_algorithm("none"),
            JwtError::InvalidSignature,
            JwtError::TokenExpired,
            JwtError::TokenNotYetValid,
            JwtError::IssuerMismatch,
            JwtError::AudienceMismatch,
            JwtError::MissingClaim("exp"),
            JwtError::invalid_claims("reserved"),
            JwtError::InvalidKey("empty"),
            JwtError::TaskFailed,
        ];
        let mut kinds: Vec<_> = all.iter().map(JwtError::kind).collect();
        kinds.sort_unstable();
        kinds.dedup();
        assert_eq!(kinds.len(), all.len());
    }

    #[test]
    fn display_names_field_only() {
        assert_eq!(
            JwtError::MissingClaim("exp").to_string(),
            "missing required claim: exp"
        );
        assert_eq!(JwtError::InvalidSignature.to_string(), "invalid token signature");
        assert!(JwtError::TokenExpired.is_temporal());
        assert!(!JwtError::IssuerMismatch.is_temporal());
    }
}
