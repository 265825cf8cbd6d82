//! User service — use-cases for managing user records.

use portal_domain::error::{NotFoundError, PortalError};
use portal_domain::id::UserId;
use portal_domain::user::User;

use crate::ports::UserRepository;

/// Application service for user CRUD operations.
pub struct UserService<R> {
    repo: R,
}

impl<R: UserRepository> UserService<R> {
    /// Create a new service backed by the given repository.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// List every user.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn list_users(&self) -> Result<Vec<User>, PortalError> {
        tracing::info!("listing users");
        self.repo.find_all().await
    }

    /// Look up a user by id.
    ///
    /// Absence is not an error here; callers decide how to report it.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn find_user(&self, id: UserId) -> Result<Option<User>, PortalError> {
        tracing::info!(user_id = %id, "fetching user");
        self.repo.find_by_id(id).await
    }

    /// Create a new user after validating domain invariants.
    ///
    /// Any id carried by `user` is discarded; the store assigns a fresh one.
    ///
    /// # Errors
    ///
    /// Returns [`PortalError::Validation`] if invariants fail (nothing is
    /// written), or a storage error propagated from the repository.
    pub async fn create_user(&self, user: User) -> Result<User, PortalError> {
        tracing::info!("creating user");
        user.validate()?;
        let created = self.repo.save(user.with_id(UserId::UNASSIGNED)).await?;
        tracing::debug!(user_id = %created.id, "user created");
        Ok(created)
    }

    /// Overwrite a user with the given values.
    ///
    /// No existence check is made: an id with no matching row creates one.
    ///
    /// # Errors
    ///
    /// Returns [`PortalError::Validation`] if invariants fail, or a
    /// storage error from the repository.
    pub async fn update_user(&self, user: User) -> Result<User, PortalError> {
        tracing::info!(user_id = %user.id, "updating user");
        user.validate()?;
        self.repo.save(user).await
    }

    /// Delete a user by id and return its last known values.
    ///
    /// # Errors
    ///
    /// Returns [`PortalError::NotFound`] when no user with `id` exists,
    /// or a storage error from the repository.
    pub async fn delete_user(&self, id: UserId) -> Result<User, PortalError> {
        tracing::info!(user_id = %id, "deleting user");
        let user = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or(NotFoundError { id })?;
        self.repo.delete_by_id(id).await?;
        Ok(user)
    }
}
