//! Token signing primitives

mod hmac;
mod secret;

pub use self::hmac::{sign, verify};
pub use self::secret::SigningSecret;
