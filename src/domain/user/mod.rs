//! User domain
//!
//! This module provides domain types and traits for user registration,
//! including the user entity, input validation, and the repository trait.

mod entity;
mod repository;
mod validation;

pub use entity::{User, UserId};
pub use repository::UserRepository;
pub use validation::{validate_email, validate_name, UserValidationError};

#[cfg(test)]
pub use repository::mock::MockUserRepository;
