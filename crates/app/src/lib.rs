//! # portal-app
//!
//! Application layer — use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define the driven port [`UserRepository`](ports::UserRepository) that
//!   storage adapters implement (find all, find by id, save, delete by id)
//! - Define the driving use-cases in [`UserService`](services::user_service::UserService):
//!   list, get, create, update and delete users
//! - Enforce validation before anything reaches storage
//!
//! ## Dependency rule
//! Depends on `portal-domain` only. Never imports adapter crates. Adapters
//! depend on *this* crate, not the reverse.

pub mod ports;
pub mod services;
