//! Role identifiers and the canonical role set carried by a principal.
//!
//! Every role that enters the process (token claim, directory entry, endpoint
//! requirement) goes through [`Role::new`], so comparisons downstream never
//! have to care about the raw claim shape or the `ROLE_` marker.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

pub const ROLE_PREFIX: &str = "ROLE_";

/// A normalized role identifier, always carrying the `ROLE_` prefix.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Role(String);

impl Role {
    /// Normalize a raw role name. Blank input yields `None`.
    pub fn new(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return None;
        }
        if trimmed.starts_with(ROLE_PREFIX) {
            if trimmed.len() == ROLE_PREFIX.len() {
                return None;
            }
            return Some(Self(trimmed.to_string()));
        }
        Some(Self(format!("{ROLE_PREFIX}{trimmed}")))
    }

    pub fn admin() -> Self {
        Self(format!("{ROLE_PREFIX}ADMIN"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Ordered, de-duplicated set of roles.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RoleSet(BTreeSet<Role>);

impl RoleSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_raw<I, S>(raw: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self(raw.into_iter().filter_map(|r| Role::new(r.as_ref())).collect())
    }

    pub fn contains(&self, role: &Role) -> bool {
        self.0.contains(role)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn extend(&mut self, other: RoleSet) {
        self.0.extend(other.0);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Role> {
        self.0.iter()
    }
}

impl FromIterator<Role> for RoleSet {
    fn from_iter<T: IntoIterator<Item = Role>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Role claim as it appears on the wire: a single string or a list of strings.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum RoleClaim {
    One(String),
    Many(Vec<String>),
}

impl RoleClaim {
    pub fn into_role_set(self) -> RoleSet {
        match self {
            RoleClaim::One(role) => RoleSet::from_raw([role]),
            RoleClaim::Many(roles) => RoleSet::from_raw(roles),
        }
    }
}
