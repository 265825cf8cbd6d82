//! User — the single record type managed by the service.

use serde::{Deserialize, Serialize};

use crate::error::{FieldError, PortalError, ValidationError};
use crate::id::UserId;

/// A person known to the portal, with their organisational band.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
    /// Free-form level code such as `L2`.
    pub band: String,
}

impl User {
    /// Create a builder for constructing a [`User`].
    #[must_use]
    pub fn builder() -> UserBuilder {
        UserBuilder::default()
    }

    /// Check domain invariants, collecting every failing field.
    ///
    /// A blank email is reported as [`FieldError::BlankEmail`] only; the
    /// syntax check runs on non-blank values.
    ///
    /// # Errors
    ///
    /// Returns [`PortalError::Validation`] listing each failed check.
    pub fn validate(&self) -> Result<(), PortalError> {
        let mut errors = Vec::new();
        if self.name.trim().is_empty() {
            errors.push(FieldError::BlankName);
        }
        if self.email.trim().is_empty() {
            errors.push(FieldError::BlankEmail);
        } else if !is_valid_email(&self.email) {
            errors.push(FieldError::InvalidEmail);
        }
        if self.band.trim().is_empty() {
            errors.push(FieldError::BlankBand);
        }

        match ValidationError::from_errors(errors) {
            Some(err) => Err(err.into()),
            None => Ok(()),
        }
    }

    /// Return a copy carrying the given id.
    #[must_use]
    pub fn with_id(mut self, id: UserId) -> Self {
        self.id = id;
        self
    }
}

/// Syntactic email check: `local@domain` with a dotted, hostname-like domain.
#[must_use]
pub fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.is_empty() || domain.contains('@') {
        return false;
    }
    if local.starts_with('.') || local.ends_with('.') || local.contains("..") {
        return false;
    }
    if !local.chars().all(is_local_part_char) {
        return false;
    }
    domain.split('.').all(|label| {
        !label.is_empty()
            && !label.starts_with('-')
            && !label.ends_with('-')
            && label.chars().all(|c| c.is_alphanumeric() || c == '-')
    })
}

/// Unquoted local-part characters: RFC 5322 `atext`, non-ASCII, and `.`.
fn is_local_part_char(c: char) -> bool {
    !c.is_ascii() || c.is_ascii_alphanumeric() || "!#$%&'*+-/=?^_`{|}~.".contains(c)
}

/// Step-by-step builder for [`User`].
#[derive(Debug, Default)]
pub struct UserBuilder {
    id: Option<UserId>,
    name: Option<String>,
    email: Option<String>,
    band: Option<String>,
}

impl UserBuilder {
    #[must_use]
    pub fn id(mut self, id: UserId) -> Self {
        self.id = Some(id);
        self
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    #[must_use]
    pub fn band(mut self, band: impl Into<String>) -> Self {
        self.band = Some(band.into());
        self
    }

    /// Consume the builder, validate, and return a [`User`].
    ///
    /// An id that was never set stays [`UserId::UNASSIGNED`].
    ///
    /// # Errors
    ///
    /// Returns [`PortalError::Validation`] if any field is missing, blank,
    /// or the email is malformed.
    pub fn build(self) -> Result<User, PortalError> {
        let user = User {
            id: self.id.unwrap_or_default(),
            name: self.name.unwrap_or_default(),
            email: self.email.unwrap_or_default(),
            band: self.band.unwrap_or_default(),
        };
        user.validate()?;
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn john() -> UserBuilder {
        User::builder()
            .name("John Doe")
            .email("john.doe@example.com")
            .band("L2")
    }

    fn field_errors(result: Result<User, PortalError>) -> Vec<FieldError> {
        match result {
            Err(PortalError::Validation(err)) => err.errors().to_vec(),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn should_build_valid_user_when_all_fields_provided() {
        let user = john().build().unwrap();
        assert_eq!(user.id, UserId::UNASSIGNED);
        assert_eq!(user.name, "John Doe");
        assert_eq!(user.email, "john.doe@example.com");
        assert_eq!(user.band, "L2");
    }

    #[test]
    fn should_keep_explicit_id() {
        let user = john().id(UserId::new(5)).build().unwrap();
        assert_eq!(user.id, UserId::new(5));
    }

    #[test]
    fn should_report_every_missing_field() {
        let errors = field_errors(User::builder().build());
        assert_eq!(
            errors,
            vec![
                FieldError::BlankName,
                FieldError::BlankEmail,
                FieldError::BlankBand
            ]
        );
    }

    #[test]
    fn should_treat_whitespace_only_as_blank() {
        let errors = field_errors(john().name("   ").band("\t").build());
        assert_eq!(errors, vec![FieldError::BlankName, FieldError::BlankBand]);
    }

    #[test]
    fn should_reject_malformed_email() {
        let errors = field_errors(john().email("not-an-email").build());
        assert_eq!(errors, vec![FieldError::InvalidEmail]);
    }

    #[test]
    fn should_accept_common_email_shapes() {
        for email in [
            "a@b.co",
            "first.last+tag@sub.example.org",
            "user@localhost",
            "x_y@my-host.io",
            "o'brien@example.ie",
            "{team}|ops~1@example.com",
        ] {
            assert!(is_valid_email(email), "{email} should be valid");
        }
    }

    #[test]
    fn should_reject_broken_email_shapes() {
        for email in [
            "plain",
            "@example.com",
            "user@",
            "user@@example.com",
            "a@b@c.com",
            "user name@example.com",
            ".user@example.com",
            "us..er@example.com",
            "user@example..com",
            "user@-example.com",
            "user@exa_mple.com",
            "a,b@x.com",
            "a<b>@x.com",
            "a(b)@x.com",
            "a\"b@x.com",
            "a;b@x.com",
            "a[b]@x.com",
            "a\\b@x.com",
        ] {
            assert!(!is_valid_email(email), "{email} should be invalid");
        }
    }

    #[test]
    fn should_replace_id_with_with_id() {
        let user = john().build().unwrap().with_id(UserId::new(3));
        assert_eq!(user.id.get(), 3);
    }
}
