//! # portal-adapter-storage-sqlite-sqlx
//!
//! `SQLite` persistence adapter using [sqlx](https://docs.rs/sqlx).
//!
//! ## Responsibilities
//! - Implement the [`UserRepository`](portal_app::ports::UserRepository) port
//! - Manage `SQLite` connection pool lifecycle
//! - Run database migrations (using sqlx embedded migrations)
//! - Map between domain users and `users` table rows
//!
//! ## Dependency rule
//! Depends on `portal-app` (for port traits) and `portal-domain` (for domain types).
//! The `app` and `domain` crates must never reference this adapter.

pub mod error;
pub mod pool;
pub mod user_repo;

pub use error::StorageError;
pub use pool::{Config, Database};
pub use user_repo::SqliteUserRepository;
