//! Compact serialization: `base64url(header) "." base64url(claims) "." base64url(mac)`
//!
//! Segments are encoded, not encrypted. The codec never hides claim contents;
//! integrity comes entirely from the signature over the encoded text.

use crate::{
    algorithms::Algorithm,
    base64url,
    claims::Claims,
    error::{JwtError, JwtResult},
    types::{Header, JwtToken, UnverifiedToken},
};

/// The three borrowed segments of a compact token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segments<'a> {
    /// Encoded header.
    pub header: &'a str,
    /// Encoded claims.
    pub payload: &'a str,
    /// Encoded signature.
    pub signature: &'a str,
}

/// Serialize and encode a header and claim set.
///
/// Each part is serialized exactly once; the returned segments are the bytes
/// that get signed and the bytes that get transmitted.
pub fn encode(header: &Header, claims: &Claims) -> JwtResult<(String, String)> {
    if let Some(name) = claims.reserved_collision() {
        return Err(JwtError::invalid_claims(format!(
            "custom claim `{name}` shadows a registered claim"
        )));
    }

    let header_json = serde_json::to_vec(header)
        .map_err(|e| JwtError::invalid_claims(format!("header serialization failed: {e}")))?;
    let claims_json = serde_json::to_vec(claims)
        .map_err(|e| JwtError::invalid_claims(format!("claims serialization failed: {e}")))?;

    Ok((base64url::encode(header_json), base64url::encode(claims_json)))
}

/// Join encoded segments and raw signature bytes into a token.
#[must_use]
pub fn join(header_segment: &str, payload_segment: &str, signature: &[u8]) -> JwtToken {
    let signature_segment = base64url::encode(signature);
    let mut token = String::with_capacity(
        header_segment.len() + payload_segment.len() + signature_segment.len() + 2,
    );
    token.push_str(header_segment);
    token.push('.');
    token.push_str(payload_segment);
    token.push('.');
    token.push_str(&signature_segment);
    JwtToken::from(token)
}

/// Split a token into exactly three non-empty segments.
pub fn split(token: &str) -> JwtResult<Segments<'_>> {
    let mut parts = token.split('.');
    match (parts.next(), parts.next(), parts.next(), parts.next()) {
        (Some(header), Some(payload), Some(signature), None)
            if !header.is_empty() && !payload.is_empty() && !signature.is_empty() =>
        {
            Ok(Segments {
                header,
                payload,
                signature,
            })
        }
        _ => Err(JwtError::MalformedToken("expected three non-empty segments")),
    }
}

/// Decode a header and check its algorithm against the accepted set.
pub fn decode_header(segment: &str, accepted: &[Algorithm]) -> JwtResult<(Header, Algorithm)> {
    let header = decode_header_unchecked(segment)?;
    match Algorithm::from_name(header.alg()) {
        Some(alg) if accepted.contains(&alg) => Ok((header, alg)),
        _ => Err(JwtError::unsupported_algorithm(&truncate(header.alg(), 16))),
    }
}

/// Decode a claims segment.
pub fn decode_claims(segment: &str) -> JwtResult<Claims> {
    let bytes = base64url::decode(segment).map_err(|_| JwtError::MalformedToken("payload"))?;
    serde_json::from_slice(&bytes).map_err(|_| JwtError::MalformedToken("payload"))
}

/// Decode a signature segment into raw MAC bytes.
pub fn decode_signature(segment: &str) -> JwtResult<Vec<u8>> {
    base64url::decode(segment).map_err(|_| JwtError::MalformedToken("signature"))
}

/// Decode every segment without verifying anything.
///
/// For diagnostics only: see [`UnverifiedToken`].
pub fn inspect(token: &str) -> JwtResult<UnverifiedToken> {
    let segments = split(token)?;
    let header = decode_header_unchecked(segments.header)?;
    let claims = decode_claims(segments.payload)?;
    let signature = decode_signature(segments.signature)?;
    Ok(UnverifiedToken::new(header, claims, signature))
}

fn decode_header_unchecked(segment: &str) -> JwtResult<Header> {
    let bytes = base64url::decode(segment).map_err(|_| JwtError::MalformedToken("header"))?;
    serde_json::from_slice(&bytes).map_err(|_| JwtError::MalformedToken("header"))
}

fn truncate(value: &str, max_chars: usize) -> String {
    value.chars().take(max_chars).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const HS256_HEADER: &str = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9";

    fn segment(value: serde_json::Value) -> String {
        base64url::encode(serde_json::to_vec(&value).unwrap())
    }

    #[test]
    fn header_encodes_canonically() {
        let (header, _) = encode(&Header::new(Algorithm::Hs256), &Claims::new()).unwrap();
        assert_eq!(header, HS256_HEADER);
    }

    #[test]
    fn empty_claims_encode_to_empty_object() {
        let (_, payload) = encode(&Header::new(Algorithm::Hs256), &Claims::new()).unwrap();
        assert_eq!(base64url::decode(&payload).unwrap(), b"{}");
    }

    #[test]
    fn encode_rejects_reserved_custom_claims() {
        let claims = Claims::builder().custom("iat", 0).build();
        let err = encode(&Header::new(Algorithm::Hs256), &claims).unwrap_err();
        assert!(matches!(err, JwtError::InvalidClaims(_)));
    }

    #[test]
    fn split_requires_three_non_empty_segments() {
        let err = JwtError::MalformedToken("expected three non-empty segments");
        assert_eq!(split(""), Err(err.clone()));
        assert_eq!(split("not-a-token"), Err(err.clone()));
        assert_eq!(split("a.b"), Err(err.clone()));
        assert_eq!(split("a.b.c.d"), Err(err.clone()));
        assert_eq!(split("a..c"), Err(err.clone()));
        assert_eq!(split(".b.c"), Err(err.clone()));
        assert_eq!(split("a.b."), Err(err));

        let segments = split("a.b.c").unwrap();
        assert_eq!(
            (segments.header, segments.payload, segments.signature),
            ("a", "b", "c")
        );
    }

    #[test]
    fn join_then_split() {
        let token = join("aGVhZA", "Ym9keQ", &[0xfb, 0xff]);
        assert_eq!(token.as_str(), "aGVhZA.Ym9keQ.-_8");
        let segments = split(token.as_str()).unwrap();
        assert_eq!(decode_signature(segments.signature).unwrap(), vec![0xfb, 0xff]);
    }

    #[test]
    fn decode_header_checks_required_fields() {
        let no_typ = segment(json!({"alg": "HS256"}));
        assert_eq!(
            decode_header(&no_typ, &[Algorithm::Hs256]),
            Err(JwtError::MalformedToken("header"))
        );

        let no_alg = segment(json!({"typ": "JWT"}));
        assert_eq!(
            decode_header(&no_alg, &[Algorithm::Hs256]),
            Err(JwtError::MalformedToken("header"))
        );

        assert_eq!(
            decode_header("%%%", &[Algorithm::Hs256]),
            Err(JwtError::MalformedToken("header"))
        );
    }

    #[test]
    fn decode_header_checks_accepted_algorithms() {
        let (header, alg) = decode_header(HS256_HEADER, &[Algorithm::Hs256]).unwrap();
        assert_eq!(alg, Algorithm::Hs256);
        assert_eq!(header.typ(), "JWT");

        assert_eq!(
            decode_header(HS256_HEADER, &[Algorithm::Hs512]),
            Err(JwtError::unsupported_algorithm("HS256"))
        );

        let none = segment(json!({"alg": "none", "typ": "JWT"}));
        assert_eq!(
            decode_header(&none, &Algorithm::ALL),
            Err(JwtError::unsupported_algorithm("none"))
        );
    }

    #[test]
    fn decode_header_ignores_extra_members() {
        let with_kid = segment(json!({"alg": "HS384", "typ": "JWT", "kid": "k1"}));
        let (header, alg) = decode_header(&with_kid, &Algorithm::ALL).unwrap();
        assert_eq!(alg, Algorithm::Hs384);
        assert_eq!(header.alg(), "HS384");
    }

    #[test]
    fn decode_claims_rejects_non_objects_and_bad_types() {
        assert_eq!(
            decode_claims(&segment(json!([1, 2, 3]))),
            Err(JwtError::MalformedToken("payload"))
        );
        assert_eq!(
            decode_claims(&segment(json!({"nbf": "soon"}))),
            Err(JwtError::MalformedToken("payload"))
        );
        assert_eq!(
            decode_claims(&base64url::encode("{not json")),
            Err(JwtError::MalformedToken("payload"))
        );
    }

    #[test]
    fn inspect_reads_claims_without_a_secret() {
        let claims = Claims::builder().subject("alice").custom("role", "admin").build();
        let (h, p) = encode(&Header::new(Algorithm::Hs256), &claims).unwrap();
        let token = join(&h, &p, b"not-a-real-signature");

        let unverified = inspect(token.as_str()).unwrap();
        assert_eq!(unverified.untrusted_claims(), &claims);
        assert_eq!(unverified.untrusted_header().alg(), "HS256");
        assert_eq!(unverified.untrusted_signature(), b"not-a-real-signature");
    }
}
