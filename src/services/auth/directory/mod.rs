//! Principal name → stored identity lookups.
//!
//! The authenticator consults a directory only when a verified token carries
//! no roles of its own. Every backend failure is reported as an error and the
//! caller degrades to "no roles"; a directory never decides authentication.
use async_trait::async_trait;
use thiserror::Error;

use crate::services::auth::roles::RoleSet;

mod in_memory;
mod remote;

pub use in_memory::StaticDirectory;
pub use remote::RemoteDirectory;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub username: String,
    pub roles: RoleSet,
}

#[derive(Debug, Error)]
pub enum DirectoryError {
    #[error("directory transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("directory returned unexpected status {0}")]
    UnexpectedStatus(u16),
}

#[async_trait]
pub trait IdentityDirectory: Send + Sync {
    // Backend name, for logs.
    fn backend_name(&self) -> &'static str;

    // `bearer` is the raw token of the current request, for backends that
    // forward it to the identity provider.
    //
    // Returns:
    // - Ok(Some(identity)) => known principal
    // - Ok(None)           => unknown principal
    // - Err(_)             => backend failure
    async fn lookup(&self, subject: &str, bearer: &str) -> Result<Option<Identity>, DirectoryError>;
}
