//! Users and the requester of a PDF.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::ids::UserId;

/// An authenticated site user and the capabilities they hold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    #[serde(default)]
    pub capabilities: BTreeSet<String>,
}

impl User {
    #[must_use]
    pub fn new(id: UserId) -> Self {
        Self {
            id,
            capabilities: BTreeSet::new(),
        }
    }

    #[must_use]
    pub fn with_capability(mut self, capability: impl Into<String>) -> Self {
        self.capabilities.insert(capability.into());
        self
    }

    #[must_use]
    pub fn has_capability(&self, capability: &str) -> bool {
        self.capabilities.contains(capability)
    }

    /// Returns true if the user holds at least one of `capabilities`.
    #[must_use]
    pub fn has_any_capability<S: AsRef<str>>(&self, capabilities: &[S]) -> bool {
        capabilities.iter().any(|c| self.has_capability(c.as_ref()))
    }
}

/// Who is asking for the PDF.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", tag = "kind")]
pub enum Requester {
    #[default]
    Anonymous,
    User(User),
}

impl Requester {
    /// Returns the authenticated user, if any.
    #[must_use]
    pub fn user(&self) -> Option<&User> {
        match self {
            Self::Anonymous => None,
            Self::User(user) => Some(user),
        }
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::User(_))
    }
}
