//! # Roster Server Library
//!
//! Dependency injection wiring, application assembly, and startup
//! utilities for the Roster server binary.

pub mod app;
pub mod di;
pub mod startup;
