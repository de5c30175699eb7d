//! Repository trait definitions.

use async_trait::async_trait;
use roster_core::{Interface, RosterResult, User, UserId};

/// User repository trait.
///
/// Every multi-row read is ordered by id ascending.
#[async_trait]
pub trait UserRepository: Interface + Send + Sync {
    /// Finds a user by ID.
    async fn find_by_id(&self, id: UserId) -> RosterResult<Option<User>>;

    /// Finds every user.
    async fn find_all(&self) -> RosterResult<Vec<User>>;

    /// Finds the users that exist among `ids`.
    async fn find_all_by_ids(&self, ids: &[UserId]) -> RosterResult<Vec<User>>;

    /// Finds users whose last name contains `fragment` (case-sensitive).
    async fn find_by_last_name_containing(&self, fragment: &str) -> RosterResult<Vec<User>>;

    /// Inserts a user without an id, or overwrites the row of a user with one.
    ///
    /// Returns the stored user carrying its identifier. Saving a user whose id
    /// has no row fails with `NotFound`.
    async fn save(&self, user: &User) -> RosterResult<User>;

    /// Deletes a user by ID, returning whether a row was removed.
    async fn delete_by_id(&self, id: UserId) -> RosterResult<bool>;

    /// Deletes every user among `ids`, returning the number removed.
    async fn delete_all_by_ids(&self, ids: &[UserId]) -> RosterResult<u64>;

    /// Checks if a user exists.
    async fn exists_by_id(&self, id: UserId) -> RosterResult<bool>;

    /// Counts all users.
    async fn count(&self) -> RosterResult<u64>;
}
