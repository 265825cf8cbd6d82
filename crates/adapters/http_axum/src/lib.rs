//! # portal-adapter-http-axum
//!
//! HTTP adapter built on [axum](https://docs.rs/axum).
//!
//! ## Responsibilities
//! - Serve the **user JSON API** under `/user`
//!   (`getAllUsers`, `getUserById`, `addUser`, `updateUser`, `deleteUser`)
//! - Map HTTP requests into [`UserService`](portal_app::services::user_service::UserService)
//!   calls (driving adapter), converting between the wire model and the domain
//! - Translate every failure into the structured error body
//!   `{timestamp, status, error, message, path}` in one place ([`error`])
//!
//! ## Dependency rule
//! Depends on `portal-app` (for port traits and services) and `portal-domain`
//! (for domain types used in request/response mapping). Never leaks axum types
//! into the domain.

pub mod api;
pub mod error;
pub mod router;
pub mod state;
