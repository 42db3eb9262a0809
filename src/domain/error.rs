use thiserror::Error;

use super::user::UserValidationError;

/// Core domain errors
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Invalid input: {0}")]
    InvalidInput(#[from] UserValidationError),

    #[error("Duplicate email: '{email}' is already registered")]
    DuplicateEmail { email: String },

    #[error("Not found: {message}")]
    NotFound { message: String },

    #[error("Invalid ID: {message}")]
    InvalidId { message: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Storage error: {message}")]
    Storage { message: String },
}

impl DomainError {
    pub fn duplicate_email(email: impl Into<String>) -> Self {
        Self::DuplicateEmail {
            email: email.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    pub fn invalid_id(message: impl Into<String>) -> Self {
        Self::InvalidId {
            message: message.into(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }

    /// True when a name or email failed its format rule
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Self::InvalidInput(_))
    }

    /// True when the email is already on file
    pub fn is_duplicate_email(&self) -> bool {
        matches!(self, Self::DuplicateEmail { .. })
    }
}
