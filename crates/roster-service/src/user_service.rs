//! User service trait definition.

use crate::dto::DeleteOutcome;
use async_trait::async_trait;
use roster_core::{Interface, RosterResult, User, UserId};

/// User service trait.
#[cfg_attr(any(test, feature = "mocks"), mockall::automock)]
#[async_trait]
pub trait UserService: Interface + Send + Sync {
    /// Lists users whose last name contains `last_name`; empty lists everyone.
    async fn search_users_by_last_name(&self, last_name: &str) -> RosterResult<Vec<User>>;

    /// Lists every user.
    async fn get_all_users(&self) -> RosterResult<Vec<User>>;

    /// Gets a user by ID. Absence is not an error.
    async fn get_user_by_id(&self, id: UserId) -> RosterResult<Option<User>>;

    /// Gets one slot per requested ID, in request order.
    async fn get_users_by_ids(&self, ids: &[UserId]) -> RosterResult<Vec<Option<User>>>;

    /// Finds the users that exist among `ids`, ordered by ID.
    async fn find_users_by_ids(&self, ids: &[UserId]) -> RosterResult<Vec<User>>;

    /// Validates and inserts a new user. Any incoming ID is discarded.
    async fn register_user(&self, user: User) -> RosterResult<User>;

    /// Validates and overwrites an existing user. The ID is required.
    async fn update_user(&self, user: User) -> RosterResult<User>;

    /// Validates and upserts a user.
    async fn save_user(&self, user: User) -> RosterResult<User>;

    /// Deletes a user if it exists.
    async fn delete_user(&self, id: UserId) -> RosterResult<DeleteOutcome>;

    /// Deletes every existing user among `ids`, returning how many were removed.
    async fn delete_users_by_ids(&self, ids: &[UserId]) -> RosterResult<u64>;

    /// Checks if a user exists.
    async fn user_exists(&self, id: UserId) -> RosterResult<bool>;

    /// Counts all users.
    async fn count_users(&self) -> RosterResult<u64>;
}
