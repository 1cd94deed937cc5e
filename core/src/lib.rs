//! Todo Core Library
//!
//! This crate provides the domain model, validation rules, error taxonomy,
//! and trait interfaces for the todo item service. All other crates depend
//! on the types and interfaces defined here.
//!
//! # Architecture
//!
//! - [`models`] - The `Item` entity
//! - [`error`] - Error types and result handling
//! - [`validation`] - The `Validatable` contract and field rules
//! - [`repository`] - Repository and transaction traits for persistence
//! - [`protocol`] - Handler trait and request parameter types
//!
//! # Example
//!
//! ```rust
//! use todo_core::{CreateItemParams, UpdateItemParams, Validatable};
//!
//! let create = CreateItemParams::new("first todo");
//! create.validate().unwrap();
//!
//! // Zero ID and empty title are both reported
//! let err = UpdateItemParams::new(0, "").validate().unwrap_err();
//! assert!(err.is_validation());
//! ```

pub mod error;
pub mod models;
pub mod protocol;
pub mod repository;
pub mod validation;

// Re-export commonly used types at the crate root for convenience
pub use error::{Result, TodoError};
pub use models::Item;
pub use protocol::{CreateItemParams, HealthStatus, TodoHandler, UpdateItemParams};
pub use repository::{ItemRepository, ItemTransaction};
pub use validation::{ItemValidator, Validatable, ValidationErrors, MAX_TITLE_LENGTH};

/// Current version of the core crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Current crate name
pub const CRATE_NAME: &str = env!("CARGO_PKG_NAME");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[allow(clippy::const_is_empty)]
    fn test_crate_constants() {
        assert!(!VERSION.is_empty());
        assert_eq!(CRATE_NAME, "todo-core");
    }

    #[test]
    fn test_re_exports() {
        let error = TodoError::not_found_id(1);
        assert!(error.is_not_found());
        assert_eq!(MAX_TITLE_LENGTH, 200);
    }
}
