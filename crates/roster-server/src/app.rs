//! Application builder.

use crate::di::{connect_module, RosterModule, ServiceResolver};
use crate::startup::{print_startup_info, shutdown_signal};
use axum::Router;
use roster_config::AppConfig;
use roster_core::{RosterError, RosterResult};
use roster_repository::DatabaseHealthCheck;
use roster_web::{create_router, AppState, ViewRenderer};
use std::future::Future;
use std::sync::Arc;
use tracing::info;

/// Application builder for constructing the server.
pub struct AppBuilder {
    config: Option<AppConfig>,
}

impl AppBuilder {
    /// Creates a new application builder.
    pub fn new() -> Self {
        Self { config: None }
    }

    /// Sets the configuration.
    pub fn with_config(mut self, config: AppConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Connects the database and assembles the router.
    pub async fn build(self) -> RosterResult<App> {
        let config = self.config.unwrap_or_default();
        let module = connect_module(&config.database).await?;
        let router = build_router(&module, &config);

        Ok(App {
            config,
            module,
            router,
        })
    }
}

impl Default for AppBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builds the HTTP router from a wired module.
pub fn build_router(module: &RosterModule, config: &AppConfig) -> Router {
    let state = AppState::from_module(module, ViewRenderer::new(&config.views))
        .with_health_check(Arc::new(DatabaseHealthCheck::new(module.database_pool())));

    create_router(state, &config.server)
}

/// A fully wired application, ready to serve.
pub struct App {
    config: AppConfig,
    module: Arc<RosterModule>,
    router: Router,
}

impl App {
    /// Returns the configuration the app was built with.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Returns a clone of the router.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Serves until Ctrl+C or SIGTERM.
    pub async fn run(self) -> RosterResult<()> {
        self.run_until(shutdown_signal()).await
    }

    /// Serves until `shutdown` resolves, then closes the database pool.
    pub async fn run_until<F>(self, shutdown: F) -> RosterResult<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let addr = self.config.server.addr();
        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .map_err(|e| RosterError::Internal(format!("Failed to bind {}: {}", addr, e)))?;

        info!("Starting HTTP server on http://{}", addr);
        print_startup_info(&self.config);

        let result = axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown)
            .await
            .map_err(|e| RosterError::Internal(format!("HTTP server error: {}", e)));

        self.module.database_pool().close().await;
        info!("Server shutdown complete");
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::Request, http::StatusCode};
    use roster_config::DatabaseConfig;
    use tower::ServiceExt;

    fn memory_config() -> AppConfig {
        AppConfig {
            database: DatabaseConfig {
                url: "sqlite::memory:".to_string(),
                ..DatabaseConfig::default()
            },
            ..AppConfig::default()
        }
    }

    #[test]
    fn test_app_builder_default() {
        let builder = AppBuilder::default();
        assert!(builder.config.is_none());
    }

    #[test]
    fn test_app_builder_with_config() {
        let builder = AppBuilder::new().with_config(memory_config());
        assert!(builder.config.is_some());
    }

    #[tokio::test]
    async fn test_built_app_is_ready() {
        let app = AppBuilder::new()
            .with_config(memory_config())
            .build()
            .await
            .unwrap();

        assert_eq!(app.config().server.port, 8080);

        let response = app
            .router()
            .oneshot(Request::builder().uri("/ready").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_run_until_stops_on_shutdown() {
        let mut config = memory_config();
        config.server.host = "127.0.0.1".to_string();
        config.server.port = 0;

        let app = AppBuilder::new().with_config(config).build().await.unwrap();

        app.run_until(async {}).await.unwrap();
    }
}
