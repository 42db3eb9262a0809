//! User Registry
//!
//! Validated user registration and updates over a pluggable repository:
//! - Name and email rules enforced before any mutation
//! - Tagged errors distinguishing invalid input from duplicate emails
//! - In-memory and JSON file backed stores

pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use crate::config::AppConfig;

use std::sync::Arc;

use crate::config::{StorageBackend, StorageConfig};
use crate::domain::{DomainError, UserRepository};
use crate::infrastructure::user::{InMemoryUserRepository, JsonFileUserRepository, UserService};
use tracing::info;

/// Build the repository selected by the storage configuration
pub async fn create_repository(
    config: &StorageConfig,
) -> Result<Arc<dyn UserRepository>, DomainError> {
    info!("Storage backend: {:?}", config.backend);

    let repository: Arc<dyn UserRepository> = match config.backend {
        StorageBackend::Memory => Arc::new(InMemoryUserRepository::new()),
        StorageBackend::File => {
            if config.path.trim().is_empty() {
                return Err(DomainError::configuration(
                    "storage.path is required for the file backend",
                ));
            }
            Arc::new(JsonFileUserRepository::open(&config.path).await?)
        }
    };

    Ok(repository)
}

/// Create a user service over the configured repository
pub async fn create_user_service(
    config: &StorageConfig,
) -> Result<UserService<dyn UserRepository>, DomainError> {
    let repository = create_repository(config).await?;
    Ok(UserService::new(repository))
}
