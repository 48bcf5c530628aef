//! Compact, HMAC-signed JSON Web Tokens
//!
//! This crate provides:
//! - Unpadded Base64URL and the three-segment compact codec
//! - HMAC-SHA2 signing and constant-time verification (`HS256`, `HS384`, `HS512`)
//! - Claims validation (expiry, not-before, issuer, audience) with clock skew
//! - [`TokenService`], which composes the above into `issue` and `authenticate`
//!
//! A verifying context is fixed to one algorithm; the `alg` header is checked
//! against it, never used to choose it.
//!
//! ```no_run
//! use sigil_jwt::{Claims, TokenService};
//! use chrono::Duration;
//!
//! # fn main() -> sigil_jwt::JwtResult<()> {
//! let service = TokenService::hs256("a-32-byte-secret-for-hs256-use!!")?;
//! let token = service.issue(Claims::builder().subject("alice").build(), Duration::minutes(15))?;
//! let verified = service.authenticate(token.as_str())?;
//! assert_eq!(verified.claims().sub.as_deref(), Some("alice"));
//! # Ok(())
//! # }
//! ```

mod algorithms;
pub mod base64url;
mod claims;
pub mod codec;
pub mod crypto;
mod error;
mod futures;
mod profile;
mod service;
mod types;
mod validation;

pub use algorithms::Algorithm;
pub use claims::{Audience, Claims, ClaimsBuilder, RESERVED_CLAIMS};
pub use codec::inspect;
pub use crypto::SigningSecret;
pub use error::{JwtError, JwtResult};
pub use futures::{AuthenticateFuture, IssueFuture};
pub use profile::{ACCESS_AUDIENCE, REFRESH_AUDIENCE, TokenProfile};
pub use service::{DEFAULT_TTL_SECS, TokenService};
pub use types::{Header, JwtToken, TOKEN_TYPE, UnverifiedToken, VerifiedToken};
pub use validation::{ClaimsValidator, ValidationOptions};
