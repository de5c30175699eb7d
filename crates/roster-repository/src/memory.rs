//! In-memory user repository.
//!
//! Mirrors the SQLite repository's ordering and id assignment, for tests and
//! for running the service layer without a database.

use crate::traits::UserRepository;
use async_trait::async_trait;
use roster_core::{RosterError, RosterResult, User, UserId};
use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

#[derive(Debug, Default)]
struct Store {
    users: BTreeMap<UserId, User>,
    last_id: i64,
}

/// In-memory user repository backed by an ordered map.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    store: Mutex<Store>,
}

impl InMemoryUserRepository {
    /// Creates an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a repository pre-populated with `users`, assigning ids in order.
    pub fn with_users(users: Vec<User>) -> RosterResult<Self> {
        let repo = Self::new();
        {
            let mut store = repo.lock()?;
            for user in users {
                store.last_id += 1;
                let id = UserId(store.last_id);
                store.users.insert(id, user.with_id(id));
            }
        }
        Ok(repo)
    }

    fn lock(&self) -> RosterResult<MutexGuard<'_, Store>> {
        self.store
            .lock()
            .map_err(|_| RosterError::internal("user store lock poisoned"))
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_id(&self, id: UserId) -> RosterResult<Option<User>> {
        Ok(self.lock()?.users.get(&id).cloned())
    }

    async fn find_all(&self) -> RosterResult<Vec<User>> {
        Ok(self.lock()?.users.values().cloned().collect())
    }

    async fn find_all_by_ids(&self, ids: &[UserId]) -> RosterResult<Vec<User>> {
        Ok(self
            .lock()?
            .users
            .values()
            .filter(|u| u.id.is_some_and(|id| ids.contains(&id)))
            .cloned()
            .collect())
    }

    async fn find_by_last_name_containing(&self, fragment: &str) -> RosterResult<Vec<User>> {
        Ok(self
            .lock()?
            .users
            .values()
            .filter(|u| u.last_name.contains(fragment))
            .cloned()
            .collect())
    }

    async fn save(&self, user: &User) -> RosterResult<User> {
        let mut store = self.lock()?;
        let id = match user.id {
            Some(id) if store.users.contains_key(&id) => id,
            Some(id) => return Err(RosterError::not_found("User", id)),
            None => {
                store.last_id += 1;
                UserId(store.last_id)
            }
        };
        let saved = user.clone().with_id(id);
        store.users.insert(id, saved.clone());
        Ok(saved)
    }

    async fn delete_by_id(&self, id: UserId) -> RosterResult<bool> {
        Ok(self.lock()?.users.remove(&id).is_some())
    }

    async fn delete_all_by_ids(&self, ids: &[UserId]) -> RosterResult<u64> {
        let mut store = self.lock()?;
        let removed = ids
            .iter()
            .filter(|id| store.users.remove(*id).is_some())
            .count();
        Ok(removed as u64)
    }

    async fn exists_by_id(&self, id: UserId) -> RosterResult<bool> {
        Ok(self.lock()?.users.contains_key(&id))
    }

    async fn count(&self) -> RosterResult<u64> {
        Ok(self.lock()?.users.len() as u64)
    }
}
