//! # Sigil - Stateless Tokens and a Stateful Baseline
//!
//! Compact HMAC-signed tokens, plus an in-memory session store to compare
//! them against.
//!
//! ## Features
//!
//! - `jwt` - token codec, signer, claims validation and [`TokenService`]
//! - `session` - [`SessionStore`] with sliding idle expiry
//!
//! Both are enabled by default.
//!
//! ## Example
//!
//! ```rust,no_run
//! use sigil::{Claims, Sigil, UserData};
//!
//! # fn main() -> sigil::Result<()> {
//! let config = Sigil::config_from_env()?;
//!
//! // Stateless: the token carries the claims; the server keeps nothing.
//! let tokens = Sigil::tokens(&config)?;
//! let token = tokens.issue_default(Claims::builder().subject("alice").build())?;
//! let claims = tokens.authenticate(token.as_str())?.into_claims();
//!
//! // Stateful: the client carries an id; the server keeps the record.
//! let sessions = Sigil::sessions(&config);
//! let id = sessions.create(UserData::new(1).with_username("alice"))?;
//! let session = sessions.validate(&id)?;
//! # let _ = (claims, session);
//! # Ok(())
//! # }
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

mod error;

pub use error::{Error, Result};
pub use sigil_common::{
    AuthConfig, Clock, ConfigError, LoggingTransformer, ManualClock, SharedClock, SystemClock,
};

#[cfg(feature = "jwt")]
#[cfg_attr(docsrs, doc(cfg(feature = "jwt")))]
pub use sigil_jwt::{
    Algorithm, Audience, Claims, ClaimsBuilder, ClaimsValidator, JwtError, JwtResult, JwtToken,
    SigningSecret, TokenProfile, TokenService, UnverifiedToken, ValidationOptions, VerifiedToken,
    inspect,
};

#[cfg(feature = "jwt")]
#[cfg_attr(docsrs, doc(cfg(feature = "jwt")))]
pub use sigil_jwt as jwt;

#[cfg(feature = "session")]
#[cfg_attr(docsrs, doc(cfg(feature = "session")))]
pub use sigil_session::{
    Session, SessionConfig, SessionError, SessionId, SessionResult, SessionStats, SessionStore,
    UserData,
};

#[cfg(feature = "session")]
#[cfg_attr(docsrs, doc(cfg(feature = "session")))]
pub use sigil_session as session;

/// Main entry point
pub struct Sigil;

impl Sigil {
    /// Load [`AuthConfig`] from the process environment (`JWT_SECRET`, TTLs, skew).
    pub fn config_from_env() -> Result<AuthConfig> {
        Ok(AuthConfig::from_env()?)
    }

    /// Token service configured from `config`.
    #[cfg(feature = "jwt")]
    pub fn tokens(config: &AuthConfig) -> Result<TokenService> {
        Ok(TokenService::from_config(config)?)
    }

    /// Session store configured from `config`, on the system clock.
    #[cfg(feature = "session")]
    #[must_use]
    pub fn sessions(config: &AuthConfig) -> SessionStore {
        SessionStore::from_config(config)
    }
}
