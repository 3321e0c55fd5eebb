use std::collections::HashMap;

use async_trait::async_trait;

use crate::services::auth::directory::{DirectoryError, Identity, IdentityDirectory};
use crate::services::auth::roles::RoleSet;

/// Directory seeded once at startup (`DIRECTORY_USERS`), read-only afterwards.
#[derive(Debug, Clone, Default)]
pub struct StaticDirectory {
    users: HashMap<String, RoleSet>,
}

impl StaticDirectory {
    pub fn new<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (S, Vec<String>)>,
        S: Into<String>,
    {
        let users = entries
            .into_iter()
            .map(|(name, roles)| (name.into(), RoleSet::from_raw(roles)))
            .collect();
        Self { users }
    }
}

#[async_trait]
impl IdentityDirectory for StaticDirectory {
    fn backend_name(&self) -> &'static str {
        "static"
    }

    async fn lookup(&self, subject: &str, _bearer: &str) -> Result<Option<Identity>, DirectoryError> {
        Ok(self.users.get(subject).map(|roles| Identity {
            username: subject.to_string(),
            roles: roles.clone(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::auth::roles::Role;

    #[tokio::test]
    async fn known_user_resolves_normalized_roles() {
        let dir = StaticDirectory::new([("admin", vec!["ADMIN".to_string()])]);

        let identity = dir.lookup("admin", "ignored").await.unwrap().unwrap();
        assert_eq!(identity.username, "admin");
        assert!(identity.roles.contains(&Role::admin()));
    }

    #[tokio::test]
    async fn unknown_user_is_none() {
        let dir = StaticDirectory::new([("admin", vec!["ADMIN".to_string()])]);
        assert!(dir.lookup("mallory", "ignored").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn empty_directory_knows_nobody() {
        let dir = StaticDirectory::default();
        assert!(dir.lookup("admin", "").await.unwrap().is_none());
    }
}
