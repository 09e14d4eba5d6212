//! Error handling for lazydocs
//!
//! Error types, the crate result alias, and path-context helpers.

pub mod context;
pub mod types;

pub use context::ResultExt;
pub use types::{ErrorSeverity, LazydocsError, Result};
