/// Factory: build `Authenticator` from application `Config`.
use std::sync::Arc;

use crate::config::Config;
use crate::error::AppError;
use crate::services::auth::Authenticator;
use crate::services::auth::auth_client::AuthServiceClient;
use crate::services::auth::directory::{IdentityDirectory, RemoteDirectory, StaticDirectory};
use crate::services::auth::token_codec::TokenCodec;

pub fn build_authenticator(config: &Config) -> Result<Arc<Authenticator>, AppError> {
    let codec = TokenCodec::new(&config.jwt_secret, config.token_leeway_seconds);

    let client = config
        .auth_service_url
        .as_ref()
        .map(|url| AuthServiceClient::new(url, config.auth_service_timeout))
        .transpose()
        .map_err(|err| {
            tracing::error!(error = %err, "failed to build auth service client");
            AppError::Internal
        })?;

    let directory: Arc<dyn IdentityDirectory> = match &client {
        Some(client) => Arc::new(RemoteDirectory::new(client.clone())),
        None => Arc::new(StaticDirectory::new(config.directory_users.clone())),
    };
    tracing::info!(backend = directory.backend_name(), "identity directory ready");

    let mut auth = Authenticator::new(codec, directory, config.auth_service_timeout);
    if config.remote_token_validation
        && let Some(client) = client
    {
        auth = auth.with_remote_validation(client);
    }

    Ok(Arc::new(auth))
}
