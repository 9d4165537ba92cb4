//! # Taskboard Shared Library
//!
//! This crate contains the data layer and business logic shared by the
//! Taskboard API server and any future binaries.
//!
//! ## Module Organization
//!
//! - `db`: Connection pool and migration runner
//! - `models`: Database records and their SQL operations
//! - `services`: Business rules and transactional boundaries
//! - `password`: Argon2id password hashing
//! - `error`: Domain error type shared by all services

pub mod db;
pub mod error;
pub mod models;
pub mod password;
pub mod services;

/// Current version of the Taskboard shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
