//! HMAC-SHA2 signing and verification over the wire-encoded segments
//!
//! The MAC input is the ASCII text `header_segment || "." || payload_segment`,
//! never the decoded JSON. Re-encoding a payload, even with different
//! whitespace, therefore invalidates its signature.

use super::secret::SigningSecret;
use crate::{
    algorithms::Algorithm,
    error::{JwtError, JwtResult},
};
use hmac::{Hmac, Mac, digest::KeyInit};
use sha2::{Sha256, Sha384, Sha512};
use subtle::ConstantTimeEq;

type HmacSha256 = Hmac<Sha256>;
type HmacSha384 = Hmac<Sha384>;
type HmacSha512 = Hmac<Sha512>;

/// Compute the signature of a token's first two segments.
pub fn sign(
    algorithm: Algorithm,
    secret: &SigningSecret,
    header_segment: &str,
    payload_segment: &str,
) -> JwtResult<Vec<u8>> {
    mac(
        algorithm,
        secret.expose(),
        &[header_segment.as_bytes(), b".".as_slice(), payload_segment.as_bytes()],
    )
}

/// Check a signature against a token's first two segments.
///
/// The comparison runs in constant time with respect to the signature
/// contents; any mismatch, including a length mismatch, yields `false`.
#[must_use]
pub fn verify(
    algorithm: Algorithm,
    secret: &SigningSecret,
    header_segment: &str,
    payload_segment: &str,
    signature: &[u8],
) -> bool {
    match sign(algorithm, secret, header_segment, payload_segment) {
        Ok(expected) => expected.as_slice().ct_eq(signature).into(),
        Err(_) => false,
    }
}

pub(crate) fn mac(algorithm: Algorithm, key: &[u8], message: &[&[u8]]) -> JwtResult<Vec<u8>> {
    match algorithm {
        Algorithm::Hs256 => mac_with::<HmacSha256>(key, message),
        Algorithm::Hs384 => mac_with::<HmacSha384>(key, message),
        Algorithm::Hs512 => mac_with::<HmacSha512>(key, message),
    }
}

fn mac_with<M>(key: &[u8], message: &[&[u8]]) -> JwtResult<Vec<u8>>
where
    M: Mac + KeyInit,
{
    let mut mac = <M as Mac>::new_from_slice(key)
        .map_err(|_| JwtError::InvalidKey("invalid HMAC key length"))?;
    for part in message {
        mac.update(part);
    }
    Ok(mac.finalize().into_bytes().to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;
    use hex_literal::hex;

    // RFC 4231 test case 1
    #[test]
    fn rfc4231_case_1() {
        let key = [0x0b_u8; 20];
        let tag = mac(Algorithm::Hs256, &key, &[b"Hi There".as_slice()]).unwrap();
        assert_eq!(
            tag,
            hex!("b0344c61d8db38535ca8afceaf0bf12b881dc200c9833da726e9376c2e32cff7")
        );
    }

    // RFC 4231 test case 2, message fed in pieces
    #[test]
    fn rfc4231_case_2_split_input() {
        let tag = mac(
            Algorithm::Hs256,
            b"Jefe",
            &[b"what do ya want ".as_slice(), b"for nothing?".as_slice()],
        )
        .unwrap();
        assert_eq!(
            tag,
            hex!("5bdcc146bf60754e6a042426089575c75a003f089d2739839dec58b964ec3843")
        );
    }

    #[test]
    fn signature_covers_dot_joined_segments() {
        let secret = SigningSecret::new("k").unwrap();
        let signed = sign(Algorithm::Hs256, &secret, "aGVhZA", "Ym9keQ").unwrap();
        let direct = mac(Algorithm::Hs256, b"k", &[b"aGVhZA.Ym9keQ".as_slice()]).unwrap();
        assert_eq!(signed, direct);
    }

    #[test]
    fn output_length_follows_algorithm() {
        let secret = SigningSecret::new("k").unwrap();
        assert_eq!(sign(Algorithm::Hs256, &secret, "a", "b").unwrap().len(), 32);
        assert_eq!(sign(Algorithm::Hs384, &secret, "a", "b").unwrap().len(), 48);
        assert_eq!(sign(Algorithm::Hs512, &secret, "a", "b").unwrap().len(), 64);
    }

    #[test]
    fn verify_rejects_mismatches() {
        let secret = SigningSecret::new("k").unwrap();
        let other = SigningSecret::new("k2").unwrap();
        let sig = sign(Algorithm::Hs256, &secret, "a", "b").unwrap();

        assert!(verify(Algorithm::Hs256, &secret, "a", "b", &sig));
        assert!(!verify(Algorithm::Hs256, &other, "a", "b", &sig));
        assert!(!verify(Algorithm::Hs256, &secret, "a", "c", &sig));
        assert!(!verify(Algorithm::Hs384, &secret, "a", "b", &sig));
        assert!(!verify(Algorithm::Hs256, &secret, "a", "b", &sig[..31]));
        assert!(!verify(Algorithm::Hs256, &secret, "a", "b", &[]));
    }
}
