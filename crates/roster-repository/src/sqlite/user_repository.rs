//! SQLite user repository implementation.

use crate::{traits::UserRepository, DatabasePoolInterface};
use async_trait::async_trait;
use roster_core::{RosterError, RosterResult, User, UserId};
use shaku::Component;
use sqlx::{types::Json, FromRow};
use std::sync::Arc;
use tracing::debug;

const USER_COLUMNS: &str =
    "id, first_name, last_name, email, contact_number, address, company_name";

/// SQLite user repository implementation.
#[derive(Component, Clone)]
#[shaku(interface = UserRepository)]
pub struct SqliteUserRepository {
    #[shaku(inject)]
    pool: Arc<dyn DatabasePoolInterface>,
}

impl SqliteUserRepository {
    /// Creates a new SQLite user repository.
    #[must_use]
    pub fn new(pool: Arc<dyn DatabasePoolInterface>) -> Self {
        Self { pool }
    }

    async fn insert(&self, user: &User) -> RosterResult<User> {
        let result = sqlx::query(
            r#"
            INSERT INTO app_user (first_name, last_name, email, contact_number, address, company_name)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(&user.email)
        .bind(&user.contact_number)
        .bind(&user.address)
        .bind(&user.company_name)
        .execute(self.pool.inner())
        .await?;

        let id = UserId(result.last_insert_rowid());
        debug!("Inserted user with id: {}", id);
        Ok(user.clone().with_id(id))
    }

    async fn update(&self, id: UserId, user: &User) -> RosterResult<User> {
        let result = sqlx::query(
            r#"
            UPDATE app_user
            SET first_name = ?, last_name = ?, email = ?, contact_number = ?,
                address = ?, company_name = ?
            WHERE id = ?
            "#,
        )
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(&user.email)
        .bind(&user.contact_number)
        .bind(&user.address)
        .bind(&user.company_name)
        .bind(id.into_inner())
        .execute(self.pool.inner())
        .await?;

        if result.rows_affected() == 0 {
            return Err(RosterError::not_found("User", id));
        }

        debug!("Updated user with id: {}", id);
        Ok(user.clone().with_id(id))
    }
}

/// Database row representation of a user.
#[derive(Debug, FromRow)]
struct UserRow {
    id: i64,
    first_name: String,
    last_name: String,
    email: String,
    contact_number: String,
    address: String,
    company_name: String,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        User {
            id: Some(UserId(row.id)),
            first_name: row.first_name,
            last_name: row.last_name,
            email: row.email,
            contact_number: row.contact_number,
            address: row.address,
            company_name: row.company_name,
        }
    }
}

fn into_users(rows: Vec<UserRow>) -> Vec<User> {
    rows.into_iter().map(User::from).collect()
}

/// Encodes ids as one JSON array parameter, expanded with `json_each`.
///
/// Keeps batch statements at a single bound variable regardless of batch size.
fn id_array(ids: &[UserId]) -> Json<Vec<i64>> {
    Json(ids.iter().map(|id| id.into_inner()).collect())
}

#[async_trait]
impl UserRepository for SqliteUserRepository {
    async fn find_by_id(&self, id: UserId) -> RosterResult<Option<User>> {
        debug!("Finding user by id: {}", id);

        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM app_user WHERE id = ?"
        ))
        .bind(id.into_inner())
        .fetch_optional(self.pool.inner())
        .await?;

        Ok(row.map(User::from))
    }

    async fn find_all(&self) -> RosterResult<Vec<User>> {
        debug!("Finding all users");

        let rows = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM app_user ORDER BY id"
        ))
        .fetch_all(self.pool.inner())
        .await?;

        Ok(into_users(rows))
    }

    async fn find_all_by_ids(&self, ids: &[UserId]) -> RosterResult<Vec<User>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        debug!("Finding users by {} ids", ids.len());

        let rows = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM app_user \
             WHERE id IN (SELECT value FROM json_each(?)) ORDER BY id"
        ))
        .bind(id_array(ids))
        .fetch_all(self.pool.inner())
        .await?;

        Ok(into_users(rows))
    }

    async fn find_by_last_name_containing(&self, fragment: &str) -> RosterResult<Vec<User>> {
        debug!("Finding users with last name containing: {}", fragment);

        let rows = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM app_user WHERE instr(last_name, ?) > 0 ORDER BY id"
        ))
        .bind(fragment)
        .fetch_all(self.pool.inner())
        .await?;

        Ok(into_users(rows))
    }

    async fn save(&self, user: &User) -> RosterResult<User> {
        match user.id {
            None => self.insert(user).await,
            Some(id) => self.update(id, user).await,
        }
    }

    async fn delete_by_id(&self, id: UserId) -> RosterResult<bool> {
        debug!("Deleting user by id: {}", id);

        let result = sqlx::query("DELETE FROM app_user WHERE id = ?")
            .bind(id.into_inner())
            .execute(self.pool.inner())
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_all_by_ids(&self, ids: &[UserId]) -> RosterResult<u64> {
        if ids.is_empty() {
            return Ok(0);
        }
        debug!("Deleting users by {} ids", ids.len());

        let result =
            sqlx::query("DELETE FROM app_user WHERE id IN (SELECT value FROM json_each(?))")
                .bind(id_array(ids))
                .execute(self.pool.inner())
                .await?;

        Ok(result.rows_affected())
    }

    async fn exists_by_id(&self, id: UserId) -> RosterResult<bool> {
        let result: Option<i64> = sqlx::query_scalar("SELECT 1 FROM app_user WHERE id = ? LIMIT 1")
            .bind(id.into_inner())
            .fetch_optional(self.pool.inner())
            .await?;

        Ok(result.is_some())
    }

    async fn count(&self) -> RosterResult<u64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM app_user")
            .fetch_one(self.pool.inner())
            .await?;

        Ok(u64::try_from(count).unwrap_or_default())
    }
}
