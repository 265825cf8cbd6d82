//! Storage port — repository trait for user persistence.

use std::future::Future;

use portal_domain::error::PortalError;
use portal_domain::id::UserId;
use portal_domain::user::User;

/// Persistence capability for [`User`] records.
///
/// Each method maps to a single statement against the backing store; no
/// transaction spans two calls.
pub trait UserRepository {
    /// Every stored user, in storage-defined order.
    fn find_all(&self) -> impl Future<Output = Result<Vec<User>, PortalError>> + Send;

    /// The user with `id`, or `None`.
    fn find_by_id(
        &self,
        id: UserId,
    ) -> impl Future<Output = Result<Option<User>, PortalError>> + Send;

    /// Insert or overwrite.
    ///
    /// An unassigned id inserts a new row and returns the user with the
    /// freshly assigned id. An assigned id overwrites the matching row, or
    /// creates it under that id when absent.
    fn save(&self, user: User) -> impl Future<Output = Result<User, PortalError>> + Send;

    /// Remove the row with `id`. Deleting an absent id is not an error.
    fn delete_by_id(&self, id: UserId) -> impl Future<Output = Result<(), PortalError>> + Send;
}
