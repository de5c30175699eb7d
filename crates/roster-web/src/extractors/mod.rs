//! Request parameter types and extractors.

mod page;
mod params;

pub use page::*;
pub use params::*;
