//! # portal-domain
//!
//! Pure domain model for the portal user records service.
//!
//! ## Responsibilities
//! - Foundational types: the typed [`UserId`](id::UserId) and the error
//!   conventions shared by every layer
//! - Define the **User** record (name, email, organisational band)
//! - Contain all invariant enforcement (required fields, email syntax)
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod id;
pub mod user;
