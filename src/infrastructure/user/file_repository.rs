//! JSON file backed user repository

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::sync::RwLock;
use tracing::{debug, info};

use super::repository::UserTable;
use crate::domain::user::{User, UserId, UserRepository};
use crate::domain::DomainError;

/// On-disk document as written by hand or by an older build
#[derive(Debug, serde::Deserialize)]
struct StoredUsers {
    #[serde(default)]
    next_id: Option<UserId>,
    #[serde(default)]
    users: Vec<User>,
}

/// User repository persisted as a single JSON document.
///
/// The whole table is held in memory and rewritten on every mutation. Writes
/// go to a temporary sibling first and are renamed over the target.
#[derive(Debug)]
pub struct JsonFileUserRepository {
    path: PathBuf,
    table: RwLock<UserTable>,
}

impl JsonFileUserRepository {
    /// Open the store at `path`, starting empty when the file does not exist
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, DomainError> {
        let path = path.into();

        let table = match tokio::fs::read_to_string(&path).await {
            Ok(contents) => Self::load_table(&path, &contents)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                info!(path = %path.display(), "User file not found, starting empty");
                UserTable::new()
            }
            Err(e) => {
                return Err(DomainError::storage(format!(
                    "Failed to read '{}': {}",
                    path.display(),
                    e
                )));
            }
        };

        Ok(Self {
            path,
            table: RwLock::new(table),
        })
    }

    /// Number stored users that lack an id and keep the counter past every id on file
    fn load_table(path: &Path, contents: &str) -> Result<UserTable, DomainError> {
        let stored: StoredUsers = serde_json::from_str(contents).map_err(|e| {
            DomainError::storage(format!("Failed to parse '{}': {}", path.display(), e))
        })?;

        let table = UserTable::with_users(stored.users).map_err(|e| {
            DomainError::storage(format!("Invalid user file '{}': {}", path.display(), e))
        })?;

        Ok(table.advance_counter(stored.next_id))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn persist(&self, table: &UserTable) -> Result<(), DomainError> {
        let contents = serde_json::to_string_pretty(table)
            .map_err(|e| DomainError::storage(format!("Failed to serialize users: {}", e)))?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                DomainError::storage(format!("Failed to create '{}': {}", parent.display(), e))
            })?;
        }

        let tmp_path = self.path.with_extension("json.tmp");

        tokio::fs::write(&tmp_path, contents).await.map_err(|e| {
            DomainError::storage(format!("Failed to write '{}': {}", tmp_path.display(), e))
        })?;

        tokio::fs::rename(&tmp_path, &self.path).await.map_err(|e| {
            DomainError::storage(format!("Failed to replace '{}': {}", self.path.display(), e))
        })?;

        debug!(path = %self.path.display(), users = table.users().len(), "Persisted users");

        Ok(())
    }
}

#[async_trait]
impl UserRepository for JsonFileUserRepository {
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

        // Memory only changes once the file write succeeds
        let mut next = table.clone();
        let saved = next.insert(user)?;
        self.persist(&next).await?;
        *table = next;

        Ok(saved)
    }

    async fn update(&self, user: &User) -> Result<User, DomainError> {
        let mut table = self.table.write().await;

        let mut next = table.clone();
        let updated = next.replace(user)?;
        self.persist(&next).await?;
        *table = next;

        Ok(updated)
    }
}
