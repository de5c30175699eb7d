//! # Roster Repository
//!
//! Data access for the `app_user` table:
//!
//! ```text
//! Service
//!   ↓  Arc<dyn UserRepository>      (domain interface)
//! SqliteUserRepository              (SQLx queries)
//!   ↓  Arc<dyn DatabasePoolInterface>
//! SQLite
//! ```
//!
//! [`InMemoryUserRepository`] implements the same interface without a
//! database.

pub mod memory;
pub mod pool;
pub mod sqlite;
pub mod traits;

pub use memory::InMemoryUserRepository;
pub use pool::*;
pub use sqlite::*;
pub use traits::*;
