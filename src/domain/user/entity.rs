//! User entity and related types

use serde::{Deserialize, Serialize};

/// Store-assigned numeric user identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(u64);

impl UserId {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get the inner numeric value
    pub fn value(&self) -> u64 {
        self.0
    }

    /// The identifier following this one, `None` once the id space is used up
    pub fn next(&self) -> Option<Self> {
        self.0.checked_add(1).map(Self)
    }
}

impl From<u64> for UserId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A registered (or about to be registered) user.
///
/// Equality compares id, name and email. A user without an id has not been
/// persisted yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    id: Option<UserId>,
    name: String,
    email: String,
}

impl User {
    /// Create an unsaved user; the store assigns the id
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            email: email.into(),
        }
    }

    /// Create a user carrying an existing id
    pub fn with_id(id: UserId, name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: Some(id),
            name: name.into(),
            email: email.into(),
        }
    }

    /// Attach a store-assigned id
    pub fn assign_id(mut self, id: UserId) -> Self {
        self.id = Some(id);
        self
    }

    pub fn id(&self) -> Option<UserId> {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }
}
