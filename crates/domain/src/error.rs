//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into [`PortalError`]
//! via `From`, so `?` works across port boundaries.

use std::fmt;

use crate::id::UserId;

/// Base error shared by the domain, application and adapter layers.
#[derive(Debug, thiserror::Error)]
pub enum PortalError {
    /// One or more fields of a user record failed validation.
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// The requested user does not exist.
    #[error(transparent)]
    NotFound(#[from] NotFoundError),

    /// The backing store failed.
    #[error("{0}")]
    Storage(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// A single failed field check on a [`User`](crate::user::User).
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum FieldError {
    #[error("Username is required")]
    BlankName,
    #[error("Email is required")]
    BlankEmail,
    #[error("Invalid email format")]
    InvalidEmail,
    #[error("User band is required")]
    BlankBand,
}

impl FieldError {
    /// Name of the offending field.
    #[must_use]
    pub fn field(self) -> &'static str {
        match self {
            Self::BlankName => "name",
            Self::BlankEmail | Self::InvalidEmail => "email",
            Self::BlankBand => "band",
        }
    }
}

/// Every field check that failed for one record, in field order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    errors: Vec<FieldError>,
}

impl ValidationError {
    /// Build from the collected failures, or `None` when nothing failed.
    #[must_use]
    pub fn from_errors(errors: Vec<FieldError>) -> Option<Self> {
        if errors.is_empty() {
            None
        } else {
            Some(Self { errors })
        }
    }

    #[must_use]
    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    #[must_use]
    pub fn contains(&self, error: FieldError) -> bool {
        self.errors.contains(&error)
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, error) in self.errors.iter().enumerate() {
            if index > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{}: {error}", error.field())?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}

/// Lookup of a user id that has no matching record.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("User not found with id: {id}")]
pub struct NotFoundError {
    pub id: UserId,
}
