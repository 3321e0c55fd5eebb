//! HS256 bearer token codec.
//!
//! `decode` verifies the signature over the exact header+claims bytes before
//! any claim is read, then checks expiry against the supplied clock. It has no
//! side effects and no I/O, so the same token and instant always produce the
//! same result.

use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, errors::ErrorKind};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::services::auth::roles::{RoleClaim, RoleSet};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TokenError {
    #[error("malformed token")]
    Malformed,
    #[error("invalid token signature")]
    InvalidSignature,
    #[error("token expired")]
    Expired,
}

/// Raw claims as found in the token payload.
///
/// The role claim is accepted under `roles` or `role`, as a string or a list.
#[derive(Debug, Clone, Deserialize)]
struct AccessTokenClaims {
    #[serde(default)]
    sub: Option<String>,
    #[serde(default)]
    iat: Option<i64>,
    #[serde(default)]
    exp: Option<i64>,
    #[serde(default)]
    roles: Option<RoleClaim>,
    #[serde(default)]
    role: Option<RoleClaim>,
}

#[derive(Debug, Serialize)]
struct IssuedClaims<'a> {
    sub: &'a str,
    roles: &'a [String],
    iat: i64,
    exp: i64,
}

/// Verified claims, ready for the rest of the application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Claims {
    pub subject: String,
    pub roles: RoleSet,
    pub issued_at: Option<i64>,
    pub expires_at: Option<i64>,
}

#[derive(Clone)]
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    leeway_seconds: i64,
}

impl std::fmt::Debug for TokenCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Do not print key material
        f.debug_struct("TokenCodec")
            .field("algorithm", &Algorithm::HS256)
            .field("leeway_seconds", &self.leeway_seconds)
            .finish()
    }
}

impl TokenCodec {
    pub fn new(secret: &[u8], leeway_seconds: u64) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry is checked against an explicit clock in `decode_at`.
        validation.validate_exp = false;
        validation.validate_aud = false;
        validation.required_spec_claims.clear();

        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
            leeway_seconds: i64::try_from(leeway_seconds).unwrap_or(i64::MAX),
        }
    }

    pub fn decode(&self, token: &str) -> Result<Claims, TokenError> {
        self.decode_at(token, chrono::Utc::now().timestamp())
    }

    /// Verify and decode `token` as seen at `now` (unix seconds).
    pub fn decode_at(&self, token: &str, now: i64) -> Result<Claims, TokenError> {
        let data = jsonwebtoken::decode::<AccessTokenClaims>(token, &self.decoding_key, &self.validation)
            .map_err(map_jwt_error)?;
        let raw = data.claims;

        let subject = match raw.sub {
            Some(sub) if !sub.trim().is_empty() => sub,
            _ => return Err(TokenError::Malformed),
        };

        if let Some(exp) = raw.exp
            && now >= exp.saturating_add(self.leeway_seconds)
        {
            return Err(TokenError::Expired);
        }

        let mut roles = raw.roles.map(RoleClaim::into_role_set).unwrap_or_default();
        if let Some(role) = raw.role {
            roles.extend(role.into_role_set());
        }

        Ok(Claims {
            subject,
            roles,
            issued_at: raw.iat,
            expires_at: raw.exp,
        })
    }

    /// Sign a token valid for `ttl_seconds` from now.
    pub fn issue(
        &self,
        subject: &str,
        roles: &[String],
        ttl_seconds: i64,
    ) -> Result<String, jsonwebtoken::errors::Error> {
        let now = chrono::Utc::now().timestamp();
        self.issue_at(subject, roles, now, now.saturating_add(ttl_seconds))
    }

    pub fn issue_at(
        &self,
        subject: &str,
        roles: &[String],
        issued_at: i64,
        expires_at: i64,
    ) -> Result<String, jsonwebtoken::errors::Error> {
        let mut header = Header::new(Algorithm::HS256);
        header.typ = Some("JWT".to_string());

        let claims = IssuedClaims {
            sub: subject,
            roles,
            iat: issued_at,
            exp: expires_at,
        };

        jsonwebtoken::encode(&header, &claims, &self.encoding_key)
    }
}

fn map_jwt_error(error: jsonwebtoken::errors::Error) -> TokenError {
    match error.kind() {
        // A well-formed token that was not produced with our key/algorithm.
        ErrorKind::InvalidSignature | ErrorKind::InvalidAlgorithm => TokenError::InvalidSignature,
        ErrorKind::ExpiredSignature => TokenError::Expired,
        _ => TokenError::Malformed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::Engine as _;
    use base64::engine::general_purpose::URL_SAFE_NO_PAD;

    use crate::services::auth::roles::Role;

    const SECRET: &[u8] = b"0123456789abcdef0123456789abcdef-menu";
    const NOW: i64 = 1_760_000_000;

    fn codec() -> TokenCodec {
        TokenCodec::new(SECRET, 0)
    }

    fn roles(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    fn sign_raw(payload: serde_json::Value, secret: &[u8], alg: Algorithm) -> String {
        jsonwebtoken::encode(&Header::new(alg), &payload, &EncodingKey::from_secret(secret))
            .expect("test token")
    }

    #[test]
    fn decodes_subject_and_normalized_roles() {
        let token = codec()
            .issue_at("admin", &roles(&["ADMIN", "ROLE_USER"]), NOW, NOW + 3600)
            .unwrap();

        let claims = codec().decode_at(&token, NOW).unwrap();

        assert_eq!(claims.subject, "admin");
        assert_eq!(claims.roles, RoleSet::from_raw(["ROLE_ADMIN", "ROLE_USER"]));
        assert_eq!(claims.issued_at, Some(NOW));
        assert_eq!(claims.expires_at, Some(NOW + 3600));
    }

    #[test]
    fn role_claim_as_single_string_is_accepted() {
        let token = sign_raw(
            serde_json::json!({"sub": "alice", "role": "ADMIN", "exp": NOW + 60}),
            SECRET,
            Algorithm::HS256,
        );

        let claims = codec().decode_at(&token, NOW).unwrap();
        assert!(claims.roles.contains(&Role::admin()));
        assert_eq!(claims.roles.len(), 1);
    }

    #[test]
    fn roles_and_role_claims_are_merged() {
        let token = sign_raw(
            serde_json::json!({"sub": "alice", "roles": ["USER"], "role": "ROLE_ADMIN"}),
            SECRET,
            Algorithm::HS256,
        );

        let claims = codec().decode_at(&token, NOW).unwrap();
        assert_eq!(claims.roles, RoleSet::from_raw(["ADMIN", "USER"]));
    }

    #[test]
    fn token_without_roles_yields_empty_set() {
        let token = codec().issue_at("bob", &[], NOW, NOW + 60).unwrap();
        let claims = codec().decode_at(&token, NOW).unwrap();
        assert!(claims.roles.is_empty());
    }

    #[test]
    fn wrong_secret_is_invalid_signature() {
        let other = TokenCodec::new(b"another-secret-another-secret-xx", 0);
        let token = other.issue_at("admin", &roles(&["ADMIN"]), NOW, NOW + 60).unwrap();

        assert_eq!(codec().decode_at(&token, NOW), Err(TokenError::InvalidSignature));
    }

    #[test]
    fn tampered_claims_are_invalid_signature() {
        let token = codec().issue_at("user", &roles(&["USER"]), NOW, NOW + 60).unwrap();
        let mut parts: Vec<&str> = token.split('.').collect();
        let forged = URL_SAFE_NO_PAD.encode(
            serde_json::json!({"sub": "user", "roles": ["ADMIN"], "exp": NOW + 60}).to_string(),
        );
        parts[1] = &forged;
        let tampered = parts.join(".");

        assert_eq!(codec().decode_at(&tampered, NOW), Err(TokenError::InvalidSignature));
    }

    #[test]
    fn other_algorithm_is_rejected() {
        let token = sign_raw(
            serde_json::json!({"sub": "admin", "exp": NOW + 60}),
            SECRET,
            Algorithm::HS512,
        );

        assert_eq!(codec().decode_at(&token, NOW), Err(TokenError::InvalidSignature));
    }

    #[test]
    fn token_issued_two_hours_ago_with_one_minute_expiry_is_expired() {
        let issued = NOW - 2 * 3600;
        let token = codec().issue_at("admin", &roles(&["ADMIN"]), issued, issued + 60).unwrap();

        assert_eq!(codec().decode_at(&token, NOW), Err(TokenError::Expired));
    }

    #[test]
    fn expiry_boundary_is_exclusive() {
        let token = codec().issue_at("admin", &[], NOW - 10, NOW).unwrap();
        assert_eq!(codec().decode_at(&token, NOW), Err(TokenError::Expired));
        assert!(codec().decode_at(&token, NOW - 1).is_ok());
    }

    #[test]
    fn leeway_extends_expiry() {
        let token = codec().issue_at("admin", &[], NOW - 100, NOW - 10).unwrap();

        assert_eq!(codec().decode_at(&token, NOW), Err(TokenError::Expired));
        assert!(TokenCodec::new(SECRET, 30).decode_at(&token, NOW).is_ok());
    }

    #[test]
    fn token_without_exp_does_not_expire() {
        let token = sign_raw(serde_json::json!({"sub": "admin"}), SECRET, Algorithm::HS256);
        assert!(codec().decode_at(&token, i64::MAX - 1).is_ok());
    }

    #[test]
    fn missing_or_blank_subject_is_malformed() {
        let no_sub = sign_raw(serde_json::json!({"exp": NOW + 60}), SECRET, Algorithm::HS256);
        let blank = sign_raw(serde_json::json!({"sub": "  "}), SECRET, Algorithm::HS256);

        assert_eq!(codec().decode_at(&no_sub, NOW), Err(TokenError::Malformed));
        assert_eq!(codec().decode_at(&blank, NOW), Err(TokenError::Malformed));
    }

    #[test]
    fn unparseable_tokens_are_malformed() {
        for token in ["", "not-a-jwt", "a.b", "a.b.c", "!!!.???.***"] {
            assert_eq!(
                codec().decode_at(token, NOW),
                Err(TokenError::Malformed),
                "token {token:?}"
            );
        }
    }

    #[test]
    fn role_claim_of_wrong_type_is_malformed() {
        let token = sign_raw(
            serde_json::json!({"sub": "admin", "roles": 42}),
            SECRET,
            Algorithm::HS256,
        );
        assert_eq!(codec().decode_at(&token, NOW), Err(TokenError::Malformed));
    }

    #[test]
    fn issue_produces_currently_valid_token() {
        let token = codec().issue("carol", &roles(&["USER"]), 60).unwrap();
        let claims = codec().decode(&token).unwrap();
        assert_eq!(claims.subject, "carol");
    }

    #[test]
    fn debug_does_not_leak_key_material() {
        let out = format!("{:?}", codec());
        assert!(!out.contains("0123456789abcdef"));
    }
}
