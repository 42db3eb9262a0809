//! In-memory user repository implementation

use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

use crate::domain::user::{User, UserId, UserRepository};
use crate::domain::DomainError;

/// Ordered user records plus the id counter shared by the stores
#[derive(Debug, Clone, serde::Serialize)]
pub(crate) struct UserTable {
    /// `None` once every id has been handed out
    #[serde(skip_serializing_if = "Option::is_none")]
    next_id: Option<UserId>,
    users: Vec<User>,
}

fn first_id() -> UserId {
    UserId::new(1)
}

impl Default for UserTable {
    fn default() -> Self {
        Self::new()
    }
}

impl UserTable {
    pub(crate) fn new() -> Self {
        Self {
            next_id: Some(first_id()),
            users: Vec::new(),
        }
    }

    /// Seed users keep their ids; unsaved ones are numbered after the highest seed id
    pub(crate) fn with_users(users: Vec<User>) -> Result<Self, DomainError> {
        let mut seen = HashSet::new();
        let mut highest = None;

        for id in users.iter().filter_map(User::id) {
            if !seen.insert(id) {
                return Err(DomainError::invalid_id(format!(
                    "User ID '{}' is used more than once",
                    id
                )));
            }
            highest = highest.max(Some(id));
        }

        let mut table = Self {
            next_id: highest.map_or(Some(first_id()), |id: UserId| id.next()),
            users: Vec::with_capacity(users.len()),
        };

        for user in users {
            let user = if user.is_persisted() {
                user
            } else {
                let id = table.take_id()?;
                user.assign_id(id)
            };
            table.users.push(user);
        }

        Ok(table)
    }

    /// Move the counter forward to `stored` if it lags behind; never backwards
    pub(crate) fn advance_counter(mut self, stored: Option<UserId>) -> Self {
        if let (Some(current), Some(stored)) = (self.next_id, stored) {
            if stored > current {
                self.next_id = Some(stored);
            }
        }
        self
    }

    pub(crate) fn users(&self) -> &[User] {
        &self.users
    }

    pub(crate) fn find_by_email(&self, email: &str) -> Option<&User> {
        self.users.iter().find(|u| u.email() == email)
    }

    fn take_id(&mut self) -> Result<UserId, DomainError> {
        let id = self
            .next_id
            .ok_or_else(|| DomainError::storage("User ID space exhausted"))?;
        self.next_id = id.next();
        Ok(id)
    }

    pub(crate) fn insert(&mut self, user: User) -> Result<User, DomainError> {
        if let Some(id) = user.id() {
            return Err(DomainError::invalid_id(format!(
                "New user already carries ID '{}'",
                id
            )));
        }

        if self.find_by_email(user.email()).is_some() {
            return Err(DomainError::duplicate_email(user.email()));
        }

        let user = user.assign_id(self.take_id()?);
        self.users.push(user.clone());

        Ok(user)
    }

    pub(crate) fn replace(&mut self, user: &User) -> Result<User, DomainError> {
        let id = user
            .id()
            .ok_or_else(|| DomainError::invalid_id("Cannot update a user without an ID"))?;

        let email_taken = self
            .users
            .iter()
            .any(|u| u.email() == user.email() && u.id() != Some(id));

        if email_taken {
            return Err(DomainError::duplicate_email(user.email()));
        }

        let slot = self
            .users
            .iter_mut()
            .find(|u| u.id() == Some(id))
            .ok_or_else(|| DomainError::not_found(format!("User '{}' not found", id)))?;

        *slot = user.clone();

        Ok(user.clone())
    }
}

/// In-memory implementation of UserRepository
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    table: Arc<RwLock<UserTable>>,
}

impl InMemoryUserRepository {
    /// Create a new empty repository
    pub fn new() -> Self {
        Self {
            table: Arc::new(RwLock::new(UserTable::new())),
        }
    }

    /// Create a repository with initial users
    pub fn with_users(users: Vec<User>) -> Result<Self, DomainError> {
        Ok(Self {
            table: Arc::new(RwLock::new(UserTable::with_users(users)?)),
        })
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_all(&self) -> Result<Vec<User>, DomainError> {
        let table = self.table.read().await;
        Ok(table.users().to_vec())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let table = self.table.read().await;
        Ok(table.find_by_email(email).cloned())
    }

    async fn save(&self, user: User) -> Result<User, DomainError> {
        let mut table = self.table.write().await;
        let saved = table.insert(user)?;

        debug!(id = ?saved.id(), email = %saved.email(), "Stored user in memory");

        Ok(saved)
    }

    async fn update(&self, user: &User) -> Result<User, DomainError> {
        let mut table = self.table.write().await;
        table.replace(user)
    }
}
