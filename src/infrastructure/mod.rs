//! Infrastructure layer - Repository implementations, services and logging

pub mod logging;
pub mod user;
