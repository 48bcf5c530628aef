//! Named token profiles (access, refresh)
//!
//! A profile fixes the lifetime, issuer and audience a token is minted with.
//! Access and refresh tokens share a secret but carry different audiences,
//! so a refresh token is rejected where an access token is expected.

use chrono::Duration;
use sigil_common::AuthConfig;

/// Default access-token audience.
pub const ACCESS_AUDIENCE: &str = "sigil-access";
/// Default refresh-token audience.
pub const REFRESH_AUDIENCE: &str = "sigil-refresh";

/// Lifetime, issuer and audience for one class of token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenProfile {
    name: &'static str,
    ttl: Duration,
    issuer: Option<String>,
    audience: Option<String>,
}

impl TokenProfile {
    /// Custom profile.
    #[must_use]
    pub fn new(name: &'static str, ttl: Duration) -> Self {
        Self {
            name,
            ttl,
            issuer: None,
            audience: None,
        }
    }

    /// Short-lived access token: 15 minutes.
    #[must_use]
    pub fn access() -> Self {
        Self::new("access", Duration::minutes(15)).with_audience(ACCESS_AUDIENCE)
    }

    /// Long-lived refresh token: 7 days.
    #[must_use]
    pub fn refresh() -> Self {
        Self::new("refresh", Duration::days(7)).with_audience(REFRESH_AUDIENCE)
    }

    /// Access profile with lifetime and issuer taken from `config`.
    #[must_use]
    pub fn access_from_config(config: &AuthConfig) -> Self {
        Self::access()
            .with_ttl(config.access_ttl)
            .with_optional_issuer(config.issuer.clone())
    }

    /// Refresh profile with lifetime and issuer taken from `config`.
    #[must_use]
    pub fn refresh_from_config(config: &AuthConfig) -> Self {
        Self::refresh()
            .with_ttl(config.refresh_ttl)
            .with_optional_issuer(config.issuer.clone())
    }

    /// Override the lifetime.
    #[must_use]
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    /// Stamp tokens with `issuer`.
    #[must_use]
    pub fn with_issuer(mut self, issuer: impl Into<String>) -> Self {
        self.issuer = Some(issuer.into());
        self
    }

    /// Stamp tokens with `audience`.
    #[must_use]
    pub fn with_audience(mut self, audience: impl Into<String>) -> Self {
        self.audience = Some(audience.into());
        self
    }

    fn with_optional_issuer(mut self, issuer: Option<String>) -> Self {
        self.issuer = issuer;
        self
    }

    /// Profile name, for logs.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Token lifetime.
    #[must_use]
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Issuer stamped into tokens.
    #[must_use]
    pub fn issuer(&self) -> Option<&str> {
        self.issuer.as_deref()
    }

    /// Audience stamped into tokens.
    #[must_use]
    pub fn audience(&self) -> Option<&str> {
        self.audience.as_deref()
    }
}
