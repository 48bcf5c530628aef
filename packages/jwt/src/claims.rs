//! Claim sets and the claims builder

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Registered claim names with fixed semantic types.
pub const RESERVED_CLAIMS: [&str; 7] = ["iss", "sub", "aud", "exp", "nbf", "iat", "jti"];

/// `aud` claim: a single audience or a set of audiences
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Audience {
    /// One audience, serialized as a bare string.
    Single(String),
    /// Several audiences, serialized as an array.
    Many(Vec<String>),
}

impl Audience {
    /// Whether `audience` is (or is among) this claim's audiences.
    #[must_use]
    pub fn contains(&self, audience: &str) -> bool {
        match self {
            Audience::Single(aud) => aud == audience,
            Audience::Many(auds) => auds.iter().any(|aud| aud == audience),
        }
    }

    /// Iterate over every audience value.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        let values: &[String] = match self {
            Audience::Single(aud) => std::slice::from_ref(aud),
            Audience::Many(auds) => auds,
        };
        values.iter().map(String::as_str)
    }

    /// Whether any of `expected` is among this claim's audiences.
    #[must_use]
    pub fn intersects(&self, expected: &Audience) -> bool {
        expected.iter().any(|aud| self.contains(aud))
    }
}

impl From<&str> for Audience {
    fn from(aud: &str) -> Self {
        Audience::Single(aud.to_string())
    }
}

impl From<String> for Audience {
    fn from(aud: String) -> Self {
        Audience::Single(aud)
    }
}

impl From<Vec<String>> for Audience {
    fn from(auds: Vec<String>) -> Self {
        Audience::Many(auds)
    }
}

/// A token's claim set
///
/// Registered claims are typed fields; every other name lives in `custom`
/// and passes through unvalidated. With `serde_json`'s `preserve_order`
/// feature, custom claims keep their insertion order on the wire.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    /// Issuer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iss: Option<String>,
    /// Subject.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,
    /// Audience.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aud: Option<Audience>,
    /// Expiry (unix seconds).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,
    /// Not before (unix seconds).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nbf: Option<i64>,
    /// Issued at (unix seconds).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,
    /// Token ID.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jti: Option<String>,
    /// Application-defined claims.
    #[serde(flatten)]
    pub custom: Map<String, Value>,
}

impl Claims {
    /// Empty claim set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start building a claim set.
    #[must_use]
    pub fn builder() -> ClaimsBuilder {
        ClaimsBuilder::new()
    }

    /// Application-defined claim by name.
    #[must_use]
    pub fn custom_claim(&self, name: &str) -> Option<&Value> {
        self.custom.get(name)
    }

    /// First custom claim whose name shadows a registered claim.
    pub(crate) fn reserved_collision(&self) -> Option<&str> {
        self.custom
            .keys()
            .map(String::as_str)
            .find(|name| RESERVED_CLAIMS.contains(name))
    }
}

/// Builder for [`Claims`]
#[derive(Debug, Clone, Default)]
pub struct ClaimsBuilder {
    claims: Claims,
}

impl ClaimsBuilder {
    /// Create new claims builder
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set subject claim
    #[must_use]
    pub fn subject(mut self, sub: impl Into<String>) -> Self {
        self.claims.sub = Some(sub.into());
        self
    }

    /// Set issuer claim
    #[must_use]
    pub fn issuer(mut self, iss: impl Into<String>) -> Self {
        self.claims.iss = Some(iss.into());
        self
    }

    /// Set a single audience
    #[must_use]
    pub fn audience(mut self, aud: impl Into<String>) -> Self {
        self.claims.aud = Some(Audience::Single(aud.into()));
        self
    }

    /// Set several audiences
    #[must_use]
    pub fn audiences<I, S>(mut self, auds: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.claims.aud = Some(Audience::Many(auds.into_iter().map(Into::into).collect()));
        self
    }

    /// Set an absolute expiry (unix seconds)
    ///
    /// Left unset, the token service derives `exp` from the issue TTL.
    #[must_use]
    pub fn expires_at(mut self, exp: i64) -> Self {
        self.claims.exp = Some(exp);
        self
    }

    /// Set not-before (unix seconds)
    #[must_use]
    pub fn not_before(mut self, nbf: i64) -> Self {
        self.claims.nbf = Some(nbf);
        self
    }

    /// Set issued-at (unix seconds)
    #[must_use]
    pub fn issued_at(mut self, iat: i64) -> Self {
        self.claims.iat = Some(iat);
        self
    }

    /// Set token ID
    #[must_use]
    pub fn jwt_id(mut self, jti: impl Into<String>) -> Self {
        self.claims.jti = Some(jti.into());
        self
    }

    /// Set a random (UUID v4) token ID
    #[must_use]
    pub fn random_jwt_id(self) -> Self {
        self.jwt_id(uuid::Uuid::new_v4().to_string())
    }

    /// Set an application-defined claim
    ///
    /// Registered names are rejected when the token is issued.
    #[must_use]
    pub fn custom(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.claims.custom.insert(name.into(), value.into());
        self
    }

    /// Build the claims
    #[must_use]
    pub fn build(self) -> Claims {
        self.claims
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn registered_claims_are_typed_and_custom_claims_flattened() {
        let claims = Claims::builder()
            .subject("alice")
            .issuer("sigil-auth")
            .audience("sigil-users")
            .expires_at(1_700_000_900)
            .custom("userId", 123)
            .custom("role", "user")
            .build();

        let value = serde_json::to_value(&claims).unwrap();
        assert_eq!(
            value,
            json!({
                "iss": "sigil-auth",
                "sub": "alice",
                "aud": "sigil-users",
                "exp": 1_700_000_900,
                "userId": 123,
                "role": "user",
            })
        );
    }

    #[test]
    fn custom_claims_keep_insertion_order() {
        let claims = Claims::builder()
            .custom("zeta", 1)
            .custom("alpha", 2)
            .build();
        assert_eq!(serde_json::to_string(&claims).unwrap(), r#"{"zeta":1,"alpha":2}"#);
    }

    #[test]
    fn audience_accepts_string_or_array() {
        let single: Claims = serde_json::from_str(r#"{"aud":"api"}"#).unwrap();
        assert_eq!(single.aud, Some(Audience::Single("api".into())));

        let many: Claims = serde_json::from_str(r#"{"aud":["api","web"]}"#).unwrap();
        let aud = many.aud.unwrap();
        assert!(aud.contains("web"));
        assert!(!aud.contains("admin"));
        assert!(aud.intersects(&Audience::Many(vec!["admin".into(), "api".into()])));
    }

    #[test]
    fn wrongly_typed_registered_claim_fails_to_parse() {
        assert!(serde_json::from_str::<Claims>(r#"{"exp":"tomorrow"}"#).is_err());
        assert!(serde_json::from_str::<Claims>(r#"{"sub":42}"#).is_err());
    }

    #[test]
    fn nested_custom_values_pass_through() {
        let claims: Claims =
            serde_json::from_str(r#"{"permissions":["read","write"],"meta":{"tier":2}}"#).unwrap();
        assert_eq!(claims.custom_claim("permissions"), Some(&json!(["read", "write"])));
        assert_eq!(claims.custom_claim("meta"), Some(&json!({"tier": 2})));
        assert!(claims.reserved_collision().is_none());
    }

    #[test]
    fn reserved_names_in_custom_are_detected() {
        let claims = Claims::builder().custom("exp", "never").build();
        assert_eq!(claims.reserved_collision(), Some("exp"));
    }

    #[test]
    fn random_jwt_ids_differ() {
        let first = Claims::builder().random_jwt_id().build();
        let second = Claims::builder().random_jwt_id().build();
        assert!(first.jti.is_some());
        assert_ne!(first.jti, second.jti);
    }
}
