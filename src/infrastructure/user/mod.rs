//! User infrastructure module
//!
//! This module provides the user service along with in-memory and
//! JSON file backed repository implementations.

mod file_repository;
mod repository;
mod service;

pub use file_repository::JsonFileUserRepository;
pub use repository::InMemoryUserRepository;
pub use service::UserService;
