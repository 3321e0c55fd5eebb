use async_trait::async_trait;

use crate::services::auth::auth_client::AuthServiceClient;
use crate::services::auth::directory::{DirectoryError, Identity, IdentityDirectory};

/// Identity-provider backed directory (`GET profile` with the bearer forwarded).
#[derive(Debug, Clone)]
pub struct RemoteDirectory {
    client: AuthServiceClient,
}

impl RemoteDirectory {
    pub fn new(client: AuthServiceClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl IdentityDirectory for RemoteDirectory {
    fn backend_name(&self) -> &'static str {
        "auth-service"
    }

    async fn lookup(&self, subject: &str, bearer: &str) -> Result<Option<Identity>, DirectoryError> {
        let Some(profile) = self.client.profile(bearer).await? else {
            return Ok(None);
        };

        if let Some(email) = profile.email.as_deref()
            && email != subject
        {
            tracing::debug!(subject = %subject, email = %email, "profile email differs from token subject");
        }

        Ok(Some(Identity {
            username: subject.to_string(),
            roles: profile.role_set(),
        }))
    }
}
