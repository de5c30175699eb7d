//! Dependency injection module using Shaku.
//!
//! `RosterModule` wires the SQLite pool, the user repository, and the user
//! service for a single-process deployment.

use roster_config::DatabaseConfig;
use roster_core::RosterResult;
use roster_repository::{
    DatabasePool, DatabasePoolInterface, DatabasePoolParameters, SqliteUserRepository,
    UserRepository,
};
use roster_service::{UserService, UserServiceImpl};
use shaku::{module, HasComponent};
use std::sync::Arc;
use tracing::info;

// Full stack with a local SQLite database.
module! {
    pub RosterModule {
        components = [
            DatabasePool,
            SqliteUserRepository,
            UserServiceImpl,
        ],
        providers = [],
    }
}

/// Builds the module around an already opened pool.
pub fn build_module(pool: &DatabasePool) -> Arc<RosterModule> {
    let module = RosterModule::builder()
        .with_component_parameters::<DatabasePool>(DatabasePoolParameters { pool: pool.pool() })
        .build();

    info!("Dependency injection module built");
    Arc::new(module)
}

/// Opens the database, migrates it when configured, and builds the module.
pub async fn connect_module(config: &DatabaseConfig) -> RosterResult<Arc<RosterModule>> {
    let pool = DatabasePool::new(config).await?;

    if config.run_migrations {
        pool.run_migrations().await?;
    } else {
        info!("Skipping database migrations");
    }

    Ok(build_module(&pool))
}

/// Resolves the components the server needs by name.
pub trait ServiceResolver {
    /// Resolves the user service.
    fn user_service(&self) -> Arc<dyn UserService>;

    /// Resolves the user repository.
    fn user_repository(&self) -> Arc<dyn UserRepository>;

    /// Resolves the database pool.
    fn database_pool(&self) -> Arc<dyn DatabasePoolInterface>;
}

impl ServiceResolver for RosterModule {
    fn user_service(&self) -> Arc<dyn UserService> {
        self.resolve()
    }

    fn user_repository(&self) -> Arc<dyn UserRepository> {
        self.resolve()
    }

    fn database_pool(&self) -> Arc<dyn DatabasePoolInterface> {
        self.resolve()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use roster_core::{User, UserId};

    fn memory_config() -> DatabaseConfig {
        DatabaseConfig {
            url: "sqlite::memory:".to_string(),
            ..DatabaseConfig::default()
        }
    }

    #[test]
    fn test_has_component_trait_bounds() {
        fn _assert_has_user_service<T: HasComponent<dyn UserService>>() {}
        fn _assert_has_user_repository<T: HasComponent<dyn UserRepository>>() {}
        fn _assert_has_database_pool<T: HasComponent<dyn DatabasePoolInterface>>() {}

        _assert_has_user_service::<RosterModule>();
        _assert_has_user_repository::<RosterModule>();
        _assert_has_database_pool::<RosterModule>();
    }

    #[tokio::test]
    async fn test_connected_module_serves_users() {
        let module = connect_module(&memory_config()).await.unwrap();
        let service = module.user_service();

        let saved = service
            .register_user(User::new("John", "Cena", "john@example.com", "5551234567", "1 Main St", "WWE"))
            .await
            .unwrap();

        assert_eq!(saved.id, Some(UserId(1)));
        assert_eq!(service.count_users().await.unwrap(), 1);
        assert!(module.user_repository().exists_by_id(UserId(1)).await.unwrap());
    }

    #[tokio::test]
    async fn test_resolved_pool_is_shared() {
        let module = connect_module(&memory_config()).await.unwrap();

        module.database_pool().health_check().await.unwrap();
        assert_eq!(module.user_repository().count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_skipped_migrations_leave_schema_absent() {
        let config = DatabaseConfig {
            run_migrations: false,
            ..memory_config()
        };
        let module = connect_module(&config).await.unwrap();

        assert!(module.user_service().count_users().await.is_err());
    }
}
