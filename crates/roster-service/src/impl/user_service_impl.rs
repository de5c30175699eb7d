//! User service implementation.

use crate::dto::DeleteOutcome;
use crate::user_service::UserService;
use async_trait::async_trait;
use roster_core::{RosterError, RosterResult, User, UserId, ValidateExt};
use roster_repository::UserRepository;
use shaku::Component;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// User service backed by a [`UserRepository`].
#[derive(Component)]
#[shaku(interface = UserService)]
pub struct UserServiceImpl {
    #[shaku(inject)]
    user_repository: Arc<dyn UserRepository>,
}

impl UserServiceImpl {
    /// Creates a new user service.
    pub fn new(user_repository: Arc<dyn UserRepository>) -> Self {
        Self { user_repository }
    }

    async fn validate_and_save(&self, user: &User) -> RosterResult<User> {
        if let Err(e) = user.validate_request() {
            error!("Rejected user record: {}", e);
            return Err(e);
        }
        self.user_repository.save(user).await
    }
}

#[async_trait]
impl UserService for UserServiceImpl {
    async fn search_users_by_last_name(&self, last_name: &str) -> RosterResult<Vec<User>> {
        info!("Searching users with last name containing: {}", last_name);

        let users = self
            .user_repository
            .find_by_last_name_containing(last_name)
            .await?;

        info!("Found {} users with last name containing: {}", users.len(), last_name);
        Ok(users)
    }

    async fn get_all_users(&self) -> RosterResult<Vec<User>> {
        debug!("Listing all users");
        self.user_repository.find_all().await
    }

    async fn get_user_by_id(&self, id: UserId) -> RosterResult<Option<User>> {
        info!("Fetching user with ID: {}", id);

        let user = self.user_repository.find_by_id(id).await?;
        match &user {
            Some(found) => debug!("User found: {:?}", found),
            None => warn!("User with ID {} not found.", id),
        }
        Ok(user)
    }

    async fn get_users_by_ids(&self, ids: &[UserId]) -> RosterResult<Vec<Option<User>>> {
        let found = self.find_users_by_ids(ids).await?;

        let by_id: HashMap<UserId, User> = found
            .into_iter()
            .filter_map(|user| user.id.map(|id| (id, user)))
            .collect();

        let slots = ids.iter().map(|id| by_id.get(id).cloned()).collect();

        Ok(slots)
    }

    async fn find_users_by_ids(&self, ids: &[UserId]) -> RosterResult<Vec<User>> {
        info!("Fetching users with IDs: {:?}", ids);

        let users = self.user_repository.find_all_by_ids(ids).await?;

        info!("Found {} users for the given IDs.", users.len());
        Ok(users)
    }

    async fn register_user(&self, user: User) -> RosterResult<User> {
        info!("Registering new user: {}", user.full_name());

        let saved = self.validate_and_save(&user.without_id()).await?;

        if let Some(id) = saved.id {
            info!("User registered with ID: {}", id);
        }
        Ok(saved)
    }

    async fn update_user(&self, user: User) -> RosterResult<User> {
        let Some(id) = user.id else {
            error!("Attempted to update user with null ID.");
            return Err(RosterError::MissingIdentifier("user"));
        };

        info!("Updating user with ID: {}", id);
        let saved = self.validate_and_save(&user).await?;

        info!("User with ID {} updated successfully.", id);
        Ok(saved)
    }

    async fn save_user(&self, user: User) -> RosterResult<User> {
        info!("Saving or updating user: {:?}", user);

        let saved = self.validate_and_save(&user).await?;

        info!("User saved or updated successfully.");
        Ok(saved)
    }

    async fn delete_user(&self, id: UserId) -> RosterResult<DeleteOutcome> {
        info!("Deleting user with ID: {}", id);

        if !self.user_repository.exists_by_id(id).await? {
            warn!("User with ID {} does not exist.", id);
            return Ok(DeleteOutcome::NotFound);
        }

        // A concurrent delete between the check and here still reports absence.
        if self.user_repository.delete_by_id(id).await? {
            info!("User with ID {} deleted successfully.", id);
            Ok(DeleteOutcome::Deleted)
        } else {
            warn!("User with ID {} does not exist.", id);
            Ok(DeleteOutcome::NotFound)
        }
    }

    async fn delete_users_by_ids(&self, ids: &[UserId]) -> RosterResult<u64> {
        if ids.is_empty() {
            warn!("No IDs provided for bulk delete.");
            return Ok(0);
        }

        info!("Deleting users with IDs: {:?}", ids);
        let removed = self.user_repository.delete_all_by_ids(ids).await?;

        info!("Users with IDs {:?} deleted successfully ({} removed).", ids, removed);
        Ok(removed)
    }

    async fn user_exists(&self, id: UserId) -> RosterResult<bool> {
        self.user_repository.exists_by_id(id).await
    }

    async fn count_users(&self) -> RosterResult<u64> {
        self.user_repository.count().await
    }
}

impl std::fmt::Debug for UserServiceImpl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserServiceImpl").finish_non_exhaustive()
    }
}
