//! Claims validation options and the claims validator
//!
//! Runs only after the signature has been verified. Each check is
//! independent; [`ClaimsValidator::check`] reports the first failure and
//! [`ClaimsValidator::violations`] reports all of them. Neither exposes claim
//! values, only which check failed.

use crate::{
    claims::{Audience, Claims},
    error::{JwtError, JwtResult},
    profile::TokenProfile,
};
use sigil_common::AuthConfig;

/// JWT validation options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationOptions {
    /// Reject tokens without an `exp` claim.
    pub require_expiry: bool,
    /// Tolerance applied to `exp` and `nbf` comparisons.
    pub clock_skew_tolerance_seconds: u64,
    /// Expected issuer.
    pub expected_issuer: Option<String>,
    /// Expected audience; any one match is enough.
    pub expected_audience: Option<Audience>,
}

impl Default for ValidationOptions {
    fn default() -> Self {
        Self {
            require_expiry: true,
            clock_skew_tolerance_seconds: 0,
            expected_issuer: None,
            expected_audience: None,
        }
    }
}

impl ValidationOptions {
    /// Options derived from process configuration.
    #[must_use]
    pub fn from_config(config: &AuthConfig) -> Self {
        Self {
            require_expiry: true,
            clock_skew_tolerance_seconds: u64::try_from(config.clock_skew.num_seconds())
                .unwrap_or(0),
            expected_issuer: config.issuer.clone(),
            expected_audience: config.audience.clone().map(Audience::Single),
        }
    }

    /// Options matching tokens issued under `profile`.
    #[must_use]
    pub fn for_profile(profile: &TokenProfile) -> Self {
        Self {
            expected_issuer: profile.issuer().map(str::to_string),
            expected_audience: profile.audience().map(Audience::from),
            ..Self::default()
        }
    }

    /// Set whether `exp` must be present.
    #[must_use]
    pub fn require_expiry(mut self, required: bool) -> Self {
        self.require_expiry = required;
        self
    }

    /// Set the clock skew tolerance.
    #[must_use]
    pub fn with_clock_skew(mut self, seconds: u64) -> Self {
        self.clock_skew_tolerance_seconds = seconds;
        self
    }

    /// Set expected issuer.
    #[must_use]
    pub fn expect_issuer(mut self, issuer: impl Into<String>) -> Self {
        self.expected_issuer = Some(issuer.into());
        self
    }

    /// Set expected audience.
    #[must_use]
    pub fn expect_audience(mut self, audience: impl Into<Audience>) -> Self {
        self.expected_audience = Some(audience.into());
        self
    }

    fn skew(&self) -> i64 {
        i64::try_from(self.clock_skew_tolerance_seconds).unwrap_or(i64::MAX)
    }
}

/// Enforces time- and identity-based claim semantics
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClaimsValidator {
    options: ValidationOptions,
}

impl ClaimsValidator {
    /// Validator applying `options`.
    #[must_use]
    pub fn new(options: ValidationOptions) -> Self {
        Self { options }
    }

    /// Options in effect.
    #[must_use]
    pub fn options(&self) -> &ValidationOptions {
        &self.options
    }

    /// Check `claims` at `now` (unix seconds), stopping at the first failure.
    pub fn check(&self, claims: &Claims, now: i64) -> JwtResult<()> {
        self.check_expiry(claims, now)?;
        self.check_not_before(claims, now)?;
        self.check_issuer(claims)?;
        self.check_audience(claims)
    }

    /// Every failing check for `claims` at `now`.
    #[must_use]
    pub fn violations(&self, claims: &Claims, now: i64) -> Vec<JwtError> {
        [
            self.check_expiry(claims, now),
            self.check_not_before(claims, now),
            self.check_issuer(claims),
            self.check_audience(claims),
        ]
        .into_iter()
        .filter_map(Result::err)
        .collect()
    }

    fn check_expiry(&self, claims: &Claims, now: i64) -> JwtResult<()> {
        match claims.exp {
            Some(exp) if now > exp.saturating_add(self.options.skew()) => {
                Err(JwtError::TokenExpired)
            }
            Some(_) => Ok(()),
            None if self.options.require_expiry => Err(JwtError::MissingClaim("exp")),
            None => Ok(()),
        }
    }

    fn check_not_before(&self, claims: &Claims, now: i64) -> JwtResult<()> {
        match claims.nbf {
            Some(nbf) if now < nbf.saturating_sub(self.options.skew()) => {
                Err(JwtError::TokenNotYetValid)
            }
            _ => Ok(()),
        }
    }

    fn check_issuer(&self, claims: &Claims) -> JwtResult<()> {
        match &self.options.expected_issuer {
            Some(expected) if claims.iss.as_deref() != Some(expected.as_str()) => {
                Err(JwtError::IssuerMismatch)
            }
            _ => Ok(()),
        }
    }

    fn check_audience(&self, claims: &Claims) -> JwtResult<()> {
        let Some(expected) = &self.options.expected_audience else {
            return Ok(());
        };
        match &claims.aud {
            Some(aud) if aud.intersects(expected) => Ok(()),
            _ => Err(JwtError::AudienceMismatch),
        }
    }
}
