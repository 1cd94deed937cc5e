use thiserror::Error;

use crate::validation::ValidationErrors;

/// Result type alias for todo operations
pub type Result<T> = std::result::Result<T, TodoError>;

/// Error types for the todo item service.
///
/// These cover every failure mode between the HTTP boundary and storage:
/// parameter validation, missing rows, and database or transaction failures.
/// The HTTP layer decides how each variant is presented to callers.
///
/// # Examples
///
/// ```rust
/// use todo_core::error::TodoError;
///
/// let not_found = TodoError::not_found_id(42);
/// assert!(not_found.is_not_found());
///
/// let db = TodoError::Database("disk I/O error".to_string());
/// assert!(db.is_database());
/// assert!(!db.is_client_error());
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TodoError {
    /// No item matched the given identifier
    #[error("Item not found: {0}")]
    NotFound(String),

    /// One or more parameter fields failed validation
    #[error("Validation error: {0}")]
    Validation(ValidationErrors),

    /// Connection, statement, or transaction failure
    #[error("Database error: {0}")]
    Database(String),

    /// The operation was abandoned before it completed
    #[error("Operation cancelled: {0}")]
    Cancelled(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Internal system error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl TodoError {
    /// Create a not found error for an item ID
    pub fn not_found_id(id: i64) -> Self {
        Self::NotFound(format!("Item with ID {id} not found"))
    }

    /// Create a database error tagged with the failed operation
    pub fn database(operation: &str, cause: impl std::fmt::Display) -> Self {
        Self::Database(format!("failed to {operation}: {cause}"))
    }

    /// Check if this error indicates a not found condition
    pub fn is_not_found(&self) -> bool {
        matches!(self, TodoError::NotFound(_))
    }

    /// Check if this error indicates a validation problem
    pub fn is_validation(&self) -> bool {
        matches!(self, TodoError::Validation(_))
    }

    /// Check if this error indicates a database problem
    pub fn is_database(&self) -> bool {
        matches!(self, TodoError::Database(_))
    }

    /// Check if this error indicates cancellation
    pub fn is_cancelled(&self) -> bool {
        matches!(self, TodoError::Cancelled(_))
    }

    /// Client-caused errors are never retried and never reach storage
    pub fn is_client_error(&self) -> bool {
        self.is_validation()
    }
}

impl From<ValidationErrors> for TodoError {
    fn from(errors: ValidationErrors) -> Self {
        TodoError::Validation(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let error = TodoError::not_found_id(42);
        assert_eq!(error, TodoError::NotFound("Item with ID 42 not found".to_string()));
        assert!(error.is_not_found());

        let error = TodoError::database("begin transaction", "pool timed out");
        assert_eq!(
            error,
            TodoError::Database("failed to begin transaction: pool timed out".to_string())
        );
    }

    #[test]
    fn test_error_display() {
        let error = TodoError::NotFound("Item with ID 3 not found".to_string());
        assert_eq!(format!("{error}"), "Item not found: Item with ID 3 not found");

        let mut errors = ValidationErrors::new();
        errors.add("title", "cannot be blank");
        let error = TodoError::from(errors);
        assert_eq!(format!("{error}"), "Validation error: title: cannot be blank.");
    }

    #[test]
    fn test_error_predicates() {
        assert!(TodoError::NotFound("x".to_string()).is_not_found());
        assert!(!TodoError::Database("x".to_string()).is_not_found());

        assert!(TodoError::Validation(ValidationErrors::new()).is_validation());
        assert!(TodoError::Validation(ValidationErrors::new()).is_client_error());

        assert!(TodoError::Database("x".to_string()).is_database());
        assert!(!TodoError::Internal("x".to_string()).is_database());

        assert!(TodoError::Cancelled("x".to_string()).is_cancelled());
        assert!(!TodoError::Cancelled("x".to_string()).is_client_error());
    }
}
