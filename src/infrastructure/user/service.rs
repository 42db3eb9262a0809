//! User service for validated registration and updates

use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use crate::domain::user::{validate_email, validate_name, User, UserId, UserRepository};
use crate::domain::DomainError;

/// User service enforcing name and email rules before touching the repository
#[derive(Debug)]
pub struct UserService<R: UserRepository + ?Sized> {
    repository: Arc<R>,
}

impl<R: UserRepository + ?Sized> UserService<R> {
    /// Create a new user service
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// List every user exactly as the repository returns them
    #[instrument(skip(self))]
    pub async fn get_all_users(&self) -> Result<Vec<User>, DomainError> {
        let users = self.repository.find_all().await?;
        debug!(count = users.len(), "Listed users");
        Ok(users)
    }

    /// Register a new user.
    ///
    /// Fails with [`DomainError::InvalidInput`] on a malformed name or email
    /// and with [`DomainError::DuplicateEmail`] when the email is on file;
    /// `save` is only called once all checks pass.
    pub async fn create_user(&self, name: &str, email: &str) -> Result<User, DomainError> {
        info!(name = %name, email = %email, "Creating user");

        Self::validate(name, email)?;

        if self.repository.email_exists(email).await? {
            warn!(email = %email, "Rejected user with duplicate email");
            return Err(DomainError::duplicate_email(email));
        }

        let user = self.repository.save(User::new(name, email)).await?;

        info!(id = ?user.id(), "User created");

        Ok(user)
    }

    /// Replace the name and email of the user with the given id
    pub async fn update_user(
        &self,
        id: UserId,
        name: &str,
        email: &str,
    ) -> Result<User, DomainError> {
        info!(id = %id, name = %name, email = %email, "Updating user");

        Self::validate(name, email)?;

        self.repository
            .update(&User::with_id(id, name, email))
            .await
    }

    fn validate(name: &str, email: &str) -> Result<(), DomainError> {
        validate_name(name)
            .and_then(|()| validate_email(email))
            .map_err(|e| {
                warn!(error = %e, "Rejected user input");
                DomainError::from(e)
            })
    }
}
