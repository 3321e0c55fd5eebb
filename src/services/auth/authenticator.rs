//! Bearer authentication for one request.
//!
//! NoHeader / NotBearer / bad token / provider rejection all end in
//! `AuthOutcome::Unauthenticated`; this is a normal outcome, not an error, and
//! the request always continues. Only the authorization gate rejects.
//!
//! ```text
//! header? ── no ──────────────────────────────▶ Unauthenticated(NoHeader)
//!   │ scheme != Bearer ───────────────────────▶ Unauthenticated(NotBearer)
//!   ▼
//! decode ── err ──────────────────────────────▶ Unauthenticated(InvalidToken)
//!   │ (optional) provider validate ── no/err ─▶ Unauthenticated(RejectedByAuthService)
//!   ▼
//! roles empty? ── yes ─▶ directory lookup (bounded; failure ⇒ no roles)
//!   ▼
//! Authenticated(principal)
//! ```
use std::{sync::Arc, time::Duration};

use axum::http::{HeaderMap, header};
use thiserror::Error;
use tracing::{debug, warn};

use crate::services::auth::auth_client::AuthServiceClient;
use crate::services::auth::context::Principal;
use crate::services::auth::directory::IdentityDirectory;
use crate::services::auth::roles::RoleSet;
use crate::services::auth::token_codec::{TokenCodec, TokenError};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Unauthenticated {
    #[error("no authorization header")]
    NoHeader,
    #[error("authorization scheme is not bearer")]
    NotBearer,
    #[error(transparent)]
    InvalidToken(#[from] TokenError),
    #[error("token rejected by auth service")]
    RejectedByAuthService,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthOutcome {
    Authenticated(Principal),
    Unauthenticated(Unauthenticated),
}

impl AuthOutcome {
    pub fn into_principal(self) -> Option<Principal> {
        match self {
            AuthOutcome::Authenticated(principal) => Some(principal),
            AuthOutcome::Unauthenticated(_) => None,
        }
    }
}

/// Extract the token from `Authorization: Bearer <token>`.
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, Unauthenticated> {
    let value = headers
        .get(header::AUTHORIZATION)
        .ok_or(Unauthenticated::NoHeader)?
        .to_str()
        .map_err(|_| Unauthenticated::NotBearer)?;

    let (scheme, token) = value.split_once(' ').ok_or(Unauthenticated::NotBearer)?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return Err(Unauthenticated::NotBearer);
    }

    Ok(token.trim())
}

pub struct Authenticator {
    codec: TokenCodec,
    directory: Arc<dyn IdentityDirectory>,
    remote_validation: Option<AuthServiceClient>,
    lookup_timeout: Duration,
}

impl std::fmt::Debug for Authenticator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Authenticator")
            .field("codec", &self.codec)
            .field("directory", &self.directory.backend_name())
            .field("remote_validation", &self.remote_validation.is_some())
            .field("lookup_timeout", &self.lookup_timeout)
            .finish()
    }
}

impl Authenticator {
    pub fn new(
        codec: TokenCodec,
        directory: Arc<dyn IdentityDirectory>,
        lookup_timeout: Duration,
    ) -> Self {
        Self {
            codec,
            directory,
            remote_validation: None,
            lookup_timeout,
        }
    }

    /// Additionally require the identity provider to accept every token.
    pub fn with_remote_validation(mut self, client: AuthServiceClient) -> Self {
        self.remote_validation = Some(client);
        self
    }

    pub async fn authenticate(&self, headers: &HeaderMap) -> AuthOutcome {
        let token = match bearer_token(headers) {
            Ok(token) => token,
            Err(reason) => return AuthOutcome::Unauthenticated(reason),
        };

        let claims = match self.codec.decode(token) {
            Ok(claims) => claims,
            Err(err) => {
                warn!(error = %err, "bearer token rejected");
                return AuthOutcome::Unauthenticated(err.into());
            }
        };

        if let Some(client) = &self.remote_validation {
            match client.validate(token).await {
                Ok(true) => {}
                Ok(false) => {
                    warn!(subject = %claims.subject, "auth service rejected token");
                    return AuthOutcome::Unauthenticated(Unauthenticated::RejectedByAuthService);
                }
                Err(err) => {
                    warn!(subject = %claims.subject, error = %err, "auth service validation failed");
                    return AuthOutcome::Unauthenticated(Unauthenticated::RejectedByAuthService);
                }
            }
        }

        let roles = if claims.roles.is_empty() {
            self.directory_roles(&claims.subject, token).await
        } else {
            claims.roles
        };

        AuthOutcome::Authenticated(Principal::new(claims.subject, roles))
    }

    async fn directory_roles(&self, subject: &str, token: &str) -> RoleSet {
        let backend = self.directory.backend_name();
        let lookup = self.directory.lookup(subject, token);

        match tokio::time::timeout(self.lookup_timeout, lookup).await {
            Ok(Ok(Some(identity))) => identity.roles,
            Ok(Ok(None)) => {
                debug!(subject = %subject, backend, "subject not in directory");
                RoleSet::new()
            }
            Ok(Err(err)) => {
                warn!(subject = %subject, backend, error = %err, "directory lookup failed");
                RoleSet::new()
            }
            Err(_) => {
                warn!(subject = %subject, backend, timeout = ?self.lookup_timeout, "directory lookup timed out");
                RoleSet::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use axum::http::HeaderValue;

    use super::*;
    use crate::services::auth::directory::{DirectoryError, Identity, StaticDirectory};
    use crate::services::auth::roles::Role;

    const SECRET: &[u8] = b"authenticator-test-secret-0123456789";

    struct SlowDirectory;

    #[async_trait]
    impl IdentityDirectory for SlowDirectory {
        fn backend_name(&self) -> &'static str {
            "slow"
        }

        async fn lookup(&self, subject: &str, _: &str) -> Result<Option<Identity>, DirectoryError> {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok(Some(Identity {
                username: subject.to_string(),
                roles: RoleSet::from_raw(["ADMIN"]),
            }))
        }
    }

    struct BrokenDirectory;

    #[async_trait]
    impl IdentityDirectory for BrokenDirectory {
        fn backend_name(&self) -> &'static str {
            "broken"
        }

        async fn lookup(&self, _: &str, _: &str) -> Result<Option<Identity>, DirectoryError> {
            Err(DirectoryError::UnexpectedStatus(500))
        }
    }

    #[derive(Default)]
    struct CountingDirectory {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl IdentityDirectory for CountingDirectory {
        fn backend_name(&self) -> &'static str {
            "counting"
        }

        async fn lookup(&self, _: &str, _: &str) -> Result<Option<Identity>, DirectoryError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(None)
        }
    }

    fn authenticator(directory: Arc<dyn IdentityDirectory>) -> Authenticator {
        Authenticator::new(
            TokenCodec::new(SECRET, 0),
            directory,
            Duration::from_millis(50),
        )
    }

    fn static_admin_directory() -> Arc<dyn IdentityDirectory> {
        Arc::new(StaticDirectory::new([("admin", vec!["ADMIN".to_string()])]))
    }

    fn headers_with(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    fn token(subject: &str, roles: &[&str]) -> String {
        let roles: Vec<String> = roles.iter().map(|r| r.to_string()).collect();
        TokenCodec::new(SECRET, 0).issue(subject, &roles, 300).unwrap()
    }

    #[tokio::test]
    async fn missing_header_is_unauthenticated() {
        let auth = authenticator(static_admin_directory());
        let outcome = auth.authenticate(&HeaderMap::new()).await;
        assert_eq!(outcome, AuthOutcome::Unauthenticated(Unauthenticated::NoHeader));
    }

    #[tokio::test]
    async fn non_bearer_scheme_is_unauthenticated() {
        let auth = authenticator(static_admin_directory());

        for value in ["Basic YWRtaW46cGFzc3dvcmQ=", "Bearer", "Token abc"] {
            let outcome = auth.authenticate(&headers_with(value)).await;
            assert_eq!(
                outcome,
                AuthOutcome::Unauthenticated(Unauthenticated::NotBearer),
                "header {value:?}"
            );
        }
    }

    #[tokio::test]
    async fn bearer_scheme_is_case_insensitive() {
        assert_eq!(bearer_token(&headers_with("bearer abc")), Ok("abc"));
        assert_eq!(bearer_token(&headers_with("Bearer  abc ")), Ok("abc"));
    }

    #[tokio::test]
    async fn invalid_token_is_unauthenticated() {
        let auth = authenticator(static_admin_directory());
        let outcome = auth.authenticate(&headers_with("Bearer not.a.token")).await;
        assert_eq!(
            outcome,
            AuthOutcome::Unauthenticated(Unauthenticated::InvalidToken(TokenError::Malformed))
        );
    }

    #[tokio::test]
    async fn token_signed_with_other_secret_is_unauthenticated() {
        let forged = TokenCodec::new(b"some-other-secret-0123456789abcdef", 0)
            .issue("admin", &["ADMIN".to_string()], 300)
            .unwrap();
        let auth = authenticator(static_admin_directory());

        let outcome = auth.authenticate(&headers_with(&format!("Bearer {forged}"))).await;
        assert_eq!(
            outcome,
            AuthOutcome::Unauthenticated(Unauthenticated::InvalidToken(TokenError::InvalidSignature))
        );
    }

    #[tokio::test]
    async fn token_roles_win_and_skip_directory() {
        let directory = Arc::new(CountingDirectory::default());
        let auth = authenticator(directory.clone());

        let outcome = auth
            .authenticate(&headers_with(&format!("Bearer {}", token("alice", &["USER"]))))
            .await;

        let principal = outcome.into_principal().unwrap();
        assert_eq!(principal.username, "alice");
        assert_eq!(principal.roles, RoleSet::from_raw(["USER"]));
        assert_eq!(directory.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn empty_token_roles_fall_back_to_directory() {
        let auth = authenticator(static_admin_directory());

        let outcome = auth
            .authenticate(&headers_with(&format!("Bearer {}", token("admin", &[]))))
            .await;

        let principal = outcome.into_principal().unwrap();
        assert!(principal.has_role(&Role::admin()));
    }

    #[tokio::test]
    async fn unknown_subject_is_authenticated_without_roles() {
        let auth = authenticator(static_admin_directory());

        let outcome = auth
            .authenticate(&headers_with(&format!("Bearer {}", token("mallory", &[]))))
            .await;

        let principal = outcome.into_principal().unwrap();
        assert_eq!(principal.username, "mallory");
        assert!(principal.roles.is_empty());
    }

    #[tokio::test]
    async fn slow_directory_times_out_to_no_roles() {
        let auth = authenticator(Arc::new(SlowDirectory));

        let started = std::time::Instant::now();
        let outcome = auth
            .authenticate(&headers_with(&format!("Bearer {}", token("admin", &[]))))
            .await;

        assert!(started.elapsed() < Duration::from_secs(2));
        let principal = outcome.into_principal().unwrap();
        assert!(principal.roles.is_empty());
    }

    #[tokio::test]
    async fn failing_directory_degrades_to_no_roles() {
        let auth = authenticator(Arc::new(BrokenDirectory));

        let outcome = auth
            .authenticate(&headers_with(&format!("Bearer {}", token("admin", &[]))))
            .await;

        let principal = outcome.into_principal().unwrap();
        assert!(principal.roles.is_empty());
    }
}
