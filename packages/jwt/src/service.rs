//! Token service: issue and authenticate
//!
//! Composes the codec, the HMAC signer and the claims validator. The service
//! holds no per-token state; everything `authenticate` needs is re-derived
//! from the token text, the fixed algorithm, the secret and the clock.

use crate::{
    algorithms::Algorithm,
    base64url,
    claims::{Audience, Claims},
    codec,
    crypto::{self, SigningSecret},
    error::{JwtError, JwtResult},
    futures::{AuthenticateFuture, IssueFuture},
    profile::TokenProfile,
    types::{Header, JwtToken, VerifiedToken},
    validation::{ClaimsValidator, ValidationOptions},
};
use chrono::Duration;
use sigil_common::{AuthConfig, LoggingTransformer, SharedClock, SystemClock};
use std::{fmt, sync::Arc};
use tokio::sync::oneshot;

/// Lifetime applied by [`TokenService::issue_default`] unless overridden.
pub const DEFAULT_TTL_SECS: i64 = 15 * 60;

/// Issues and authenticates compact HMAC-signed tokens
///
/// Immutable after construction and cheap to clone; share it freely across
/// threads and tasks.
#[derive(Clone)]
pub struct TokenService {
    algorithm: Algorithm,
    secret: SigningSecret,
    validator: Arc<ClaimsValidator>,
    clock: SharedClock,
    default_ttl: Duration,
}

impl TokenService {
    /// Service signing and verifying with `algorithm` only.
    #[must_use]
    pub fn new(algorithm: Algorithm, secret: SigningSecret) -> Self {
        if !secret.is_recommended_for(algorithm) {
            tracing::warn!(
                alg = algorithm.as_str(),
                len = secret.len(),
                recommended = algorithm.recommended_secret_len(),
                "signing secret is shorter than recommended"
            );
        }
        Self {
            algorithm,
            secret,
            validator: Arc::new(ClaimsValidator::default()),
            clock: SystemClock::shared(),
            default_ttl: Duration::seconds(DEFAULT_TTL_SECS),
        }
    }

    /// HS256 service over raw secret bytes.
    pub fn hs256(secret: impl Into<Vec<u8>>) -> JwtResult<Self> {
        Ok(Self::new(Algorithm::Hs256, SigningSecret::new(secret)?))
    }

    /// HS256 service configured from process configuration.
    pub fn from_config(config: &AuthConfig) -> JwtResult<Self> {
        let service = Self::new(Algorithm::Hs256, SigningSecret::from_config(config)?)
            .with_validation(ValidationOptions::from_config(config))
            .with_default_ttl(config.access_ttl);
        Ok(service)
    }

    /// Replace the validation options used by [`authenticate`](Self::authenticate).
    #[must_use]
    pub fn with_validation(mut self, options: ValidationOptions) -> Self {
        self.validator = Arc::new(ClaimsValidator::new(options));
        self
    }

    /// Replace the clock.
    #[must_use]
    pub fn with_clock(mut self, clock: SharedClock) -> Self {
        self.clock = clock;
        self
    }

    /// Replace the default lifetime.
    #[must_use]
    pub fn with_default_ttl(mut self, ttl: Duration) -> Self {
        self.default_ttl = ttl;
        self
    }

    /// Signing algorithm; also the only algorithm accepted on verification.
    #[must_use]
    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    /// Validator applied by [`authenticate`](Self::authenticate).
    #[must_use]
    pub fn validator(&self) -> &ClaimsValidator {
        &self.validator
    }

    /// Default lifetime.
    #[must_use]
    pub fn default_ttl(&self) -> Duration {
        self.default_ttl
    }

    /// Sign `claims` into a token valid for `ttl`.
    ///
    /// `iat` defaults to now and `exp` to now + `ttl`. `iss` and `aud` default
    /// to what this service expects on verification. Values already set by the
    /// caller are kept.
    pub fn issue(&self, mut claims: Claims, ttl: Duration) -> JwtResult<JwtToken> {
        let now = self.clock.unix_seconds();
        let expected = self.validator.options();
        if claims.iss.is_none() {
            claims.iss.clone_from(&expected.expected_issuer);
        }
        if claims.aud.is_none() {
            claims.aud.clone_from(&expected.expected_audience);
        }
        if claims.exp.is_none() {
            if ttl <= Duration::zero() {
                return Err(JwtError::invalid_claims("ttl must be positive"));
            }
            claims.exp = Some(now.saturating_add(ttl.num_seconds()));
        }
        claims.iat.get_or_insert(now);

        let (header_segment, payload_segment) =
            codec::encode(&Header::new(self.algorithm), &claims)?;
        let signature = crypto::sign(
            self.algorithm,
            &self.secret,
            &header_segment,
            &payload_segment,
        )?;
        let token = codec::join(&header_segment, &payload_segment, &signature);

        tracing::debug!(
            alg = self.algorithm.as_str(),
            ttl = ttl.num_seconds(),
            size = token.len(),
            "token issued"
        );
        Ok(token)
    }

    /// Sign `claims` with the default lifetime.
    pub fn issue_default(&self, claims: Claims) -> JwtResult<JwtToken> {
        self.issue(claims, self.default_ttl)
    }

    /// Sign `claims` under `profile`, filling `iss`/`aud` when absent.
    pub fn issue_with_profile(
        &self,
        mut claims: Claims,
        profile: &TokenProfile,
    ) -> JwtResult<JwtToken> {
        if claims.iss.is_none() {
            claims.iss = profile.issuer().map(str::to_string);
        }
        if claims.aud.is_none() {
            claims.aud = profile.audience().map(Audience::from);
        }
        tracing::debug!(profile = profile.name(), "issuing profiled token");
        self.issue(claims, profile.ttl())
    }

    /// Verify `token` and validate its claims with the configured options.
    ///
    /// All-or-nothing: a token with a good signature but failing claims is
    /// rejected outright. A correctly signed token without `exp` fails with
    /// [`JwtError::MissingClaim`] unless expiry is optional.
    pub fn authenticate(&self, token: &str) -> JwtResult<VerifiedToken> {
        let result = self.verify_with(token, &self.validator);
        match &result {
            Ok(verified) => {
                let subject = verified.claims().sub.as_deref();
                LoggingTransformer::log_auth_event("token", subject, true);
            }
            Err(e) => LoggingTransformer::log_auth_event(e.kind(), None, false),
        }
        result
    }

    /// Verify `token` and validate its claims with `options`.
    pub fn authenticate_with(
        &self,
        token: &str,
        options: &ValidationOptions,
    ) -> JwtResult<VerifiedToken> {
        self.verify_with(token, &ClaimsValidator::new(options.clone()))
            .inspect_err(|e| tracing::debug!(reason = e.kind(), "token rejected"))
    }

    /// [`issue`](Self::issue) on a spawned task. Requires a Tokio runtime.
    pub fn issue_async(&self, claims: Claims, ttl: Duration) -> IssueFuture {
        let (tx, rx) = oneshot::channel();
        let service = self.clone();

        tokio::spawn(async move {
            let result = service.issue(claims, ttl);
            let _ = tx.send(result);
        });

        IssueFuture::new(rx)
    }

    /// [`authenticate`](Self::authenticate) on a spawned task. Requires a Tokio runtime.
    pub fn authenticate_async(&self, token: impl Into<String>) -> AuthenticateFuture {
        let (tx, rx) = oneshot::channel();
        let service = self.clone();
        let token = token.into();

        tokio::spawn(async move {
            let result = service.authenticate(&token);
            let _ = tx.send(result);
        });

        AuthenticateFuture::new(rx)
    }

    // Signature first, then header, then claims: nothing from the token is
    // parsed before the MAC over its text has been checked.
    fn verify_with(&self, token: &str, validator: &ClaimsValidator) -> JwtResult<VerifiedToken> {
        let segments = codec::split(token)?;
        let signature = codec::decode_signature(segments.signature)?;

        // Several spellings of the last character decode to the same bytes;
        // only the one `issue` produces is accepted.
        let authentic = crypto::verify(
            self.algorithm,
            &self.secret,
            segments.header,
            segments.payload,
            &signature,
        ) && base64url::is_canonical(segments.signature, &signature);
        if !authentic {
            return Err(JwtError::InvalidSignature);
        }

        let (header, _) = codec::decode_header(segments.header, &[self.algorithm])?;
        let claims = codec::decode_claims(segments.payload)?;
        validator.check(&claims, self.clock.unix_seconds())?;

        Ok(VerifiedToken::new(header, claims, signature, JwtToken::from(token)))
    }
}

impl fmt::Debug for TokenService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenService")
            .field("algorithm", &self.algorithm)
            .field("secret", &self.secret)
            .field("validator", &self.validator)
            .field("default_ttl", &self.default_ttl)
            .finish_non_exhaustive()
    }
}
