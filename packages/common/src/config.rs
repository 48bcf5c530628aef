//! Authentication configuration loaded from the process environment
//!
//! The signing secret and default lifetimes are opaque inputs to the token
//! and session crates; nothing in sigil generates or persists a secret.

use crate::error::{ConfigError, ConfigResult};
use chrono::Duration;
use std::fmt;
use zeroize::Zeroizing;

/// Environment variable holding the HMAC signing secret.
pub const ENV_SECRET: &str = "JWT_SECRET";
/// Environment variable for the access-token lifetime in seconds.
pub const ENV_ACCESS_TTL: &str = "JWT_ACCESS_TTL_SECS";
/// Environment variable for the refresh-token lifetime in seconds.
pub const ENV_REFRESH_TTL: &str = "JWT_REFRESH_TTL_SECS";
/// Environment variable for the sliding session lifetime in seconds.
pub const ENV_SESSION_TTL: &str = "SESSION_TTL_SECS";
/// Environment variable for the accepted clock skew in seconds.
pub const ENV_CLOCK_SKEW: &str = "JWT_CLOCK_SKEW_SECS";
/// Environment variable for the expected `iss` claim.
pub const ENV_ISSUER: &str = "JWT_ISSUER";
/// Environment variable for the expected `aud` claim.
pub const ENV_AUDIENCE: &str = "JWT_AUDIENCE";

const DEFAULT_ACCESS_TTL_SECS: i64 = 15 * 60;
const DEFAULT_REFRESH_TTL_SECS: i64 = 7 * 24 * 60 * 60;
const DEFAULT_SESSION_TTL_SECS: i64 = 30 * 60;

/// Opaque configuration inputs for token issuance and session handling
#[derive(Clone)]
pub struct AuthConfig {
    secret: Zeroizing<Vec<u8>>,
    /// Lifetime of access tokens.
    pub access_ttl: Duration,
    /// Lifetime of refresh tokens.
    pub refresh_ttl: Duration,
    /// Sliding-window lifetime of sessions.
    pub session_ttl: Duration,
    /// Tolerance applied to `exp`/`nbf` comparisons.
    pub clock_skew: Duration,
    /// Expected issuer, if any.
    pub issuer: Option<String>,
    /// Expected audience, if any.
    pub audience: Option<String>,
}

impl AuthConfig {
    /// Configuration with the given secret and default lifetimes.
    pub fn new(secret: impl Into<Vec<u8>>) -> ConfigResult<Self> {
        let secret = Zeroizing::new(secret.into());
        if secret.is_empty() {
            return Err(ConfigError::EmptySecret);
        }
        Ok(Self {
            secret,
            access_ttl: Duration::seconds(DEFAULT_ACCESS_TTL_SECS),
            refresh_ttl: Duration::seconds(DEFAULT_REFRESH_TTL_SECS),
            session_ttl: Duration::seconds(DEFAULT_SESSION_TTL_SECS),
            clock_skew: Duration::zero(),
            issuer: None,
            audience: None,
        })
    }

    /// Load configuration from the process environment.
    pub fn from_env() -> ConfigResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key/value source.
    pub fn from_lookup<F>(lookup: F) -> ConfigResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let secret = lookup(ENV_SECRET).ok_or(ConfigError::MissingSecret(ENV_SECRET))?;
        let mut config = Self::new(secret.into_bytes())?;

        if let Some(secs) = seconds(&lookup, ENV_ACCESS_TTL)? {
            config.access_ttl = secs;
        }
        if let Some(secs) = seconds(&lookup, ENV_REFRESH_TTL)? {
            config.refresh_ttl = secs;
        }
        if let Some(secs) = seconds(&lookup, ENV_SESSION_TTL)? {
            config.session_ttl = secs;
        }
        if let Some(secs) = seconds(&lookup, ENV_CLOCK_SKEW)? {
            config.clock_skew = secs;
        }
        config.issuer = lookup(ENV_ISSUER).filter(|v| !v.is_empty());
        config.audience = lookup(ENV_AUDIENCE).filter(|v| !v.is_empty());

        tracing::debug!(
            access_ttl = config.access_ttl.num_seconds(),
            session_ttl = config.session_ttl.num_seconds(),
            clock_skew = config.clock_skew.num_seconds(),
            "auth configuration loaded"
        );
        Ok(config)
    }

    /// Raw signing secret bytes.
    #[must_use]
    pub fn secret(&self) -> &[u8] {
        &self.secret
    }

    /// Override the access-token lifetime.
    #[must_use]
    pub fn with_access_ttl(mut self, ttl: Duration) -> Self {
        self.access_ttl = ttl;
        self
    }

    /// Override the session lifetime.
    #[must_use]
    pub fn with_session_ttl(mut self, ttl: Duration) -> Self {
        self.session_ttl = ttl;
        self
    }

    /// Override the clock skew tolerance.
    #[must_use]
    pub fn with_clock_skew(mut self, skew: Duration) -> Self {
        self.clock_skew = skew;
        self
    }

    /// Set the expected issuer.
    #[must_use]
    pub fn with_issuer(mut self, issuer: impl Into<String>) -> Self {
        self.issuer = Some(issuer.into());
        self
    }

    /// Set the expected audience.
    #[must_use]
    pub fn with_audience(mut self, audience: impl Into<String>) -> Self {
        self.audience = Some(audience.into());
        self
    }
}

impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("secret", &"<redacted>")
            .field("access_ttl", &self.access_ttl)
            .field("refresh_ttl", &self.refresh_ttl)
            .field("session_ttl", &self.session_ttl)
            .field("clock_skew", &self.clock_skew)
            .field("issuer", &self.issuer)
            .field("audience", &self.audience)
            .finish()
    }
}

fn seconds<F>(lookup: &F, key: &'static str) -> ConfigResult<Option<Duration>>
where
    F: Fn(&str) -> Option<String>,
{
    let Some(raw) = lookup(key) else {
        return Ok(None);
    };
    raw.trim()
        .parse::<u32>()
        .map(|secs| Some(Duration::seconds(i64::from(secs))))
        .map_err(|_| ConfigError::InvalidValue { key, value: raw })
}
