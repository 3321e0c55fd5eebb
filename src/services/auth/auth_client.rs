//! HTTP client for the external identity provider.
//!
//! Only two calls are used, both forwarding the caller's bearer token:
//! - `GET {base}/profile`  → `{ "email": ..., "role": ... }`
//! - `GET {base}/validate` → 2xx when the provider still accepts the token
//!
//! Every request is bounded by the client timeout; callers turn errors into
//! "no roles" / "unauthenticated".
use std::time::Duration;

use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;
use url::Url;

use crate::services::auth::directory::DirectoryError;
use crate::services::auth::roles::{RoleClaim, RoleSet};

#[derive(Debug, Error)]
pub enum AuthClientError {
    #[error("invalid auth service url: {0}")]
    Url(#[from] url::ParseError),
    #[error("failed to build http client: {0}")]
    Http(#[from] reqwest::Error),
}

#[derive(Debug, Clone, Deserialize)]
pub struct Profile {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub role: Option<RoleClaim>,
    #[serde(default)]
    pub roles: Option<RoleClaim>,
}

impl Profile {
    pub fn role_set(&self) -> RoleSet {
        let mut set = self.role.clone().map(RoleClaim::into_role_set).unwrap_or_default();
        if let Some(roles) = self.roles.clone() {
            set.extend(roles.into_role_set());
        }
        set
    }
}

#[derive(Debug, Clone)]
pub struct AuthServiceClient {
    http: reqwest::Client,
    profile_url: Url,
    validate_url: Url,
}

impl AuthServiceClient {
    pub fn new(base_url: &Url, timeout: Duration) -> Result<Self, AuthClientError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;

        // `Url::join` replaces the last segment unless the base ends with '/'
        let mut base = base_url.clone();
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }

        Ok(Self {
            http,
            profile_url: base.join("profile")?,
            validate_url: base.join("validate")?,
        })
    }

    /// Fetch the profile for the token holder. 401/403/404 mean "no profile".
    pub async fn profile(&self, bearer: &str) -> Result<Option<Profile>, DirectoryError> {
        let resp = self
            .http
            .get(self.profile_url.clone())
            .bearer_auth(bearer)
            .send()
            .await?;

        match resp.status() {
            s if s.is_success() => Ok(Some(resp.json::<Profile>().await?)),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN | StatusCode::NOT_FOUND => Ok(None),
            other => Err(DirectoryError::UnexpectedStatus(other.as_u16())),
        }
    }

    /// Ask the provider whether it still accepts the token.
    pub async fn validate(&self, bearer: &str) -> Result<bool, DirectoryError> {
        let resp = self
            .http
            .get(self.validate_url.clone())
            .bearer_auth(bearer)
            .send()
            .await?;

        match resp.status() {
            s if s.is_success() => Ok(true),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Ok(false),
            other => Err(DirectoryError::UnexpectedStatus(other.as_u16())),
        }
    }
}
