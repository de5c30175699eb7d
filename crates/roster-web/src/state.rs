//! Application state for Axum handlers.

use crate::views::ViewRenderer;
use roster_core::HealthCheck;
use roster_service::UserService;
use shaku::{HasComponent, Module};
use std::sync::Arc;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<dyn UserService>,
    pub views: Arc<ViewRenderer>,
    pub health_checks: Vec<Arc<dyn HealthCheck>>,
}

impl AppState {
    /// Creates a new application state.
    pub fn new(user_service: Arc<dyn UserService>, views: ViewRenderer) -> Self {
        Self {
            user_service,
            views: Arc::new(views),
            health_checks: Vec::new(),
        }
    }

    /// Creates the state by resolving services from a Shaku module.
    pub fn from_module<M>(module: &M, views: ViewRenderer) -> Self
    where
        M: Module + HasComponent<dyn UserService>,
    {
        Self::new(module.resolve(), views)
    }

    /// Adds a readiness check consulted by `/ready`.
    #[must_use]
    pub fn with_health_check(mut self, check: Arc<dyn HealthCheck>) -> Self {
        self.health_checks.push(check);
        self
    }
}
