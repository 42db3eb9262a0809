//! User repository trait

use async_trait::async_trait;
use std::fmt::Debug;

use super::entity::User;
use crate::domain::DomainError;

/// Repository trait for user storage
#[async_trait]
pub trait UserRepository: Send + Sync + Debug {
    /// List all users in store order
    async fn find_all(&self) -> Result<Vec<User>, DomainError>;

    /// Get a user by their email address
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError>;

    /// Persist a new user; the returned copy carries the assigned id
    async fn save(&self, user: User) -> Result<User, DomainError>;

    /// Replace an existing user identified by its id
    async fn update(&self, user: &User) -> Result<User, DomainError>;

    /// Check if an email is already on file
    async fn email_exists(&self, email: &str) -> Result<bool, DomainError> {
        Ok(self.find_by_email(email).await?.is_some())
    }
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use std::sync::Arc;
    use tokio::sync::RwLock;

    use crate::domain::user::UserId;

    /// Recording repository double.
    ///
    /// Lookups are answered from the seeded users only; `save` and `update`
    /// calls are recorded verbatim and never change what lookups return.
    #[derive(Debug, Default)]
    pub struct MockUserRepository {
        users: Vec<User>,
        lookups: Arc<RwLock<Vec<String>>>,
        saved: Arc<RwLock<Vec<User>>>,
        updated: Arc<RwLock<Vec<User>>>,
        should_fail: Arc<RwLock<bool>>,
    }

    impl MockUserRepository {
        /// Create a mock answering lookups from the given users
        pub fn with_users(users: Vec<User>) -> Self {
            Self {
                users,
                ..Self::default()
            }
        }

        /// Set whether operations should fail
        pub async fn set_should_fail(&self, fail: bool) {
            *self.should_fail.write().await = fail;
        }

        /// Emails passed to `find_by_email`, in call order
        pub async fn lookups(&self) -> Vec<String> {
            self.lookups.read().await.clone()
        }

        /// Users passed to `save`, in call order
        pub async fn saved(&self) -> Vec<User> {
            self.saved.read().await.clone()
        }

        /// Users passed to `update`, in call order
        pub async fn updated(&self) -> Vec<User> {
            self.updated.read().await.clone()
        }

        async fn check_should_fail(&self) -> Result<(), DomainError> {
            if *self.should_fail.read().await {
                return Err(DomainError::storage("Mock repository configured to fail"));
            }
            Ok(())
        }
    }

    #[async_trait]
    impl UserRepository for MockUserRepository {
        async fn find_all(&self) -> Result<Vec<User>, DomainError> {
            self.check_should_fail().await?;
            Ok(self.users.clone())
        }

        async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
            self.lookups.write().await.push(email.to_string());
            self.check_should_fail().await?;
            Ok(self.users.iter().find(|u| u.email() == email).cloned())
        }

        async fn save(&self, user: User) -> Result<User, DomainError> {
            self.saved.write().await.push(user.clone());
            self.check_should_fail().await?;

            let next = self
                .users
                .iter()
                .filter_map(User::id)
                .max()
                .map_or(Some(UserId::new(1)), |id| id.next())
                .ok_or_else(|| DomainError::storage("User ID space exhausted"))?;

            Ok(user.assign_id(next))
        }

        async fn update(&self, user: &User) -> Result<User, DomainError> {
            self.updated.write().await.push(user.clone());
            self.check_should_fail().await?;
            Ok(user.clone())
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        fn seeded() -> MockUserRepository {
            MockUserRepository::with_users(vec![
                User::with_id(UserId::new(1), "Jack", "jack1@mail.com"),
                User::with_id(UserId::new(2), "John", "john@mail.com"),
            ])
        }

        #[tokio::test]
        async fn test_find_by_email_records_lookup() {
            let repo = seeded();

            let found = repo.find_by_email("john@mail.com").await.unwrap();
            assert_eq!(found.unwrap().id(), Some(UserId::new(2)));

            let missing = repo.find_by_email("nobody@mail.com").await.unwrap();
            assert!(missing.is_none());

            assert_eq!(repo.lookups().await, vec!["john@mail.com", "nobody@mail.com"]);
        }

        #[tokio::test]
        async fn test_save_records_and_assigns_id() {
            let repo = seeded();
            let user = User::new("Anna", "anna@mail.com");

            let saved = repo.save(user.clone()).await.unwrap();

            assert_eq!(saved.id(), Some(UserId::new(3)));
            assert_eq!(repo.saved().await, vec![user]);
            assert_eq!(repo.find_all().await.unwrap().len(), 2);
        }

        #[tokio::test]
        async fn test_update_records_call() {
            let repo = seeded();
            let user = User::with_id(UserId::new(1), "Jack", "jack@mail.com");

            repo.update(&user).await.unwrap();

            assert_eq!(repo.updated().await, vec![user]);
        }

        #[tokio::test]
        async fn test_should_fail() {
            let repo = seeded();
            repo.set_should_fail(true).await;

            assert!(repo.find_all().await.is_err());
            assert!(repo.email_exists("jack1@mail.com").await.is_err());
        }
    }
}
