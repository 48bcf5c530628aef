//! Unpadded Base64URL (RFC 4648 §5) as used by every token segment
//!
//! The transform is encoding-agnostic: it maps arbitrary bytes to text in the
//! alphabet `[A-Za-z0-9_-]` and back. Padding is never emitted and never
//! accepted. Unused bits in the final character are ignored on decode, so
//! decoding is not injective; callers that need the exact spelling compare
//! against [`encode`] of the decoded bytes.

use crate::error::{JwtError, JwtResult};
use base64::{
    Engine as _, alphabet,
    engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig},
};

const ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new()
        .with_encode_padding(false)
        .with_decode_padding_mode(DecodePaddingMode::RequireNone)
        .with_decode_allow_trailing_bits(true),
);

/// Encode bytes as unpadded Base64URL text.
#[inline]
#[must_use]
pub fn encode(bytes: impl AsRef<[u8]>) -> String {
    ENGINE.encode(bytes)
}

/// Decode unpadded Base64URL text.
///
/// Fails with [`JwtError::MalformedEncoding`] on any character outside the
/// URL-safe alphabet (including `=`) or on an impossible length.
pub fn decode(text: &str) -> JwtResult<Vec<u8>> {
    if !text.bytes().all(is_url_safe) {
        return Err(JwtError::MalformedEncoding);
    }
    ENGINE.decode(text).map_err(|_| JwtError::MalformedEncoding)
}

/// Whether `text` is exactly how [`encode`] spells `bytes`.
#[inline]
#[must_use]
pub fn is_canonical(text: &str, bytes: &[u8]) -> bool {
    text.len() == encoded_len(bytes.len()) && ENGINE.encode(bytes) == text
}

/// Exact length of the encoding of `len` input bytes.
#[inline]
#[must_use]
pub const fn encoded_len(len: usize) -> usize {
    let full = (len / 3) * 4;
    match len % 3 {
        0 => full,
        1 => full + 2,
        _ => full + 3,
    }
}

#[inline]
const fn is_url_safe(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || byte == b'-' || byte == b'_'
}
