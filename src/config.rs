/*
 * Responsibility
 * - Load settings from the environment (.env via dotenvy, then env vars)
 * - Validate them up front (missing/invalid ⇒ startup fails)
 */
use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use thiserror::Error;
use url::Url;

/// Minimum decoded length of the HS256 shared secret.
pub const MIN_SECRET_BYTES: usize = 32;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Production,
}

impl AppEnv {
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.unwrap_or("development").to_ascii_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            _ => Self::Development,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing configuration: {0}")]
    Missing(&'static str),
    #[error("invalid configuration: {0}")]
    Invalid(&'static str),
}

#[derive(Clone)]
pub struct Config {
    pub addr: SocketAddr,
    pub app_env: AppEnv,
    pub cors_allowed_origins: Vec<String>,

    pub jwt_secret: Vec<u8>,
    pub token_leeway_seconds: u64,

    pub auth_service_url: Option<Url>,
    pub auth_service_timeout: Duration,
    pub remote_token_validation: bool,
    pub directory_users: Vec<(String, Vec<String>)>,

    pub request_timeout: Duration,
    pub body_limit_bytes: usize,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Do not print the secret
        f.debug_struct("Config")
            .field("addr", &self.addr)
            .field("app_env", &self.app_env)
            .field("cors_allowed_origins", &self.cors_allowed_origins)
            .field("token_leeway_seconds", &self.token_leeway_seconds)
            .field("auth_service_url", &self.auth_service_url.as_ref().map(Url::as_str))
            .field("auth_service_timeout", &self.auth_service_timeout)
            .field("remote_token_validation", &self.remote_token_validation)
            .field("directory_users", &self.directory_users.len())
            .field("request_timeout", &self.request_timeout)
            .field("body_limit_bytes", &self.body_limit_bytes)
            .finish()
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_vars(|key| std::env::var(key).ok())
    }

    pub fn from_vars<F>(var: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port: u16 = parse_or(&var, "PORT", 3000)?;
        let addr: SocketAddr = SocketAddr::from_str(&format!("0.0.0.0:{}", port))
            .map_err(|_| ConfigError::Invalid("PORT"))?;

        let app_env = AppEnv::parse(var("APP_ENV").as_deref());

        let cors_allowed_origins = var("CORS_ALLOWED_ORIGINS")
            .unwrap_or_default()
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>();

        let jwt_secret = decode_secret(
            &var("JWT_SECRET").ok_or(ConfigError::Missing("JWT_SECRET"))?,
        )?;
        let token_leeway_seconds = parse_or(&var, "TOKEN_LEEWAY_SECONDS", 0)?;

        let auth_service_url = var("AUTH_SERVICE_URL")
            .filter(|s| !s.trim().is_empty())
            .map(|s| Url::parse(s.trim()).map_err(|_| ConfigError::Invalid("AUTH_SERVICE_URL")))
            .transpose()?;
        let auth_service_timeout =
            Duration::from_millis(parse_or(&var, "AUTH_SERVICE_TIMEOUT_MS", 2000)?);
        let remote_token_validation = parse_or(&var, "REMOTE_TOKEN_VALIDATION", false)?;
        if remote_token_validation && auth_service_url.is_none() {
            return Err(ConfigError::Missing("AUTH_SERVICE_URL"));
        }

        let directory_users = parse_directory_users(&var("DIRECTORY_USERS").unwrap_or_default())?;

        let request_timeout = Duration::from_secs(parse_or(&var, "REQUEST_TIMEOUT_SECONDS", 30)?);
        let body_limit_bytes = parse_or(&var, "BODY_LIMIT_BYTES", 1024 * 1024)?;

        Ok(Self {
            addr,
            app_env,
            cors_allowed_origins,
            jwt_secret,
            token_leeway_seconds,
            auth_service_url,
            auth_service_timeout,
            remote_token_validation,
            directory_users,
            request_timeout,
            body_limit_bytes,
        })
    }
}

fn parse_or<F, T>(var: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match var(key) {
        Some(raw) if !raw.trim().is_empty() => {
            raw.trim().parse().map_err(|_| ConfigError::Invalid(key))
        }
        _ => Ok(default),
    }
}

/// Decode the base64 `JWT_SECRET`.
pub fn decode_secret(raw: &str) -> Result<Vec<u8>, ConfigError> {
    let bytes = STANDARD
        .decode(raw.trim())
        .map_err(|_| ConfigError::Invalid("JWT_SECRET"))?;
    if bytes.len() < MIN_SECRET_BYTES {
        return Err(ConfigError::Invalid("JWT_SECRET"));
    }
    Ok(bytes)
}

/// `name=ROLE,ROLE;name2=ROLE`
fn parse_directory_users(raw: &str) -> Result<Vec<(String, Vec<String>)>, ConfigError> {
    raw.split(';')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(|entry| {
            let (name, roles) = entry
                .split_once('=')
                .ok_or(ConfigError::Invalid("DIRECTORY_USERS"))?;
            let name = name.trim();
            if name.is_empty() {
                return Err(ConfigError::Invalid("DIRECTORY_USERS"));
            }
            let roles = roles
                .split(',')
                .map(|r| r.trim().to_string())
                .filter(|r| !r.is_empty())
                .collect();
            Ok((name.to_string(), roles))
        })
        .collect()
}
