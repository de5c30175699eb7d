//! # Roster Web
//!
//! Server-rendered web layer using Axum for Roster.
//! Provides the user management pages, flash notices, and health checks.

pub mod controllers;
pub mod extractors;
pub mod flash;
pub mod middleware;
pub mod responses;
pub mod router;
pub mod state;
pub mod views;

pub use router::*;
pub use state::*;
pub use views::ViewRenderer;
