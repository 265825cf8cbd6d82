//! Typed user identifier.

use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Storage-assigned identifier of a [`User`](crate::user::User).
///
/// The default value `0` means "not assigned yet"; the store hands out
/// positive ids on insert.
#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct UserId(i32);

impl UserId {
    /// Identifier carried by records that have not been persisted.
    pub const UNASSIGNED: Self = Self(0);

    /// Wrap a raw integer id.
    #[must_use]
    pub const fn new(value: i32) -> Self {
        Self(value)
    }

    /// Access the inner integer.
    #[must_use]
    pub const fn get(self) -> i32 {
        self.0
    }

    #[must_use]
    pub const fn is_assigned(self) -> bool {
        self.0 != 0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for UserId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse().map(Self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_default_to_unassigned() {
        let id = UserId::default();
        assert_eq!(id, UserId::UNASSIGNED);
        assert!(!id.is_assigned());
    }

    #[test]
    fn should_parse_integer_text() {
        let id: UserId = "42".parse().unwrap();
        assert_eq!(id.get(), 42);
        assert!(id.is_assigned());
    }

    #[test]
    fn should_return_error_when_parsing_non_numeric_text() {
        assert!(UserId::from_str("abc").is_err());
    }

    #[test]
    fn should_serialize_as_plain_integer() {
        let json = serde_json::to_string(&UserId::new(7)).unwrap();
        assert_eq!(json, "7");
    }
}
