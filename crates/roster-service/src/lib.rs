//! # Roster Service
//!
//! Business logic service layer for Roster.
//! Validates user records, guards updates and deletes, and logs around
//! every repository call.

pub mod dto;
pub mod r#impl;
pub mod mappers;
pub mod user_service;

pub use dto::*;
pub use r#impl::UserServiceImpl;
pub use user_service::*;
