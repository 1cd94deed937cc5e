use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

use crate::error::{Result, TodoError};

/// Upper bound on title length, in Unicode scalar values (inclusive)
pub const MAX_TITLE_LENGTH: usize = 200;

/// Message for a required field that is empty or zero
pub const MSG_REQUIRED: &str = "cannot be blank";

/// A parameter type that can check its own field constraints.
///
/// The HTTP layer calls `validate` on every bound parameter before any
/// storage access happens.
pub trait Validatable {
    /// Check every field and report all violations at once
    fn validate(&self) -> Result<()>;
}

/// Field-level validation failures, keyed by field name.
///
/// Each field carries the message of the first rule it violated. Display
/// joins the entries in field order, e.g. `id: cannot be blank; title: cannot be blank.`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(BTreeMap<String, String>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a violation; a field keeps its first message
    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0
            .entry(field.to_string())
            .or_insert_with(|| message.into());
    }

    /// Record the outcome of a field rule
    pub fn check(&mut self, field: &str, outcome: std::result::Result<(), String>) {
        if let Err(message) = outcome {
            self.add(field, message);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Message recorded for a field, if it failed
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    /// Names of all failing fields, sorted
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// `Ok(())` when nothing failed, otherwise a validation error
    pub fn into_result(self) -> Result<()> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(TodoError::Validation(self))
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return Ok(());
        }
        let joined = self
            .0
            .iter()
            .map(|(field, message)| format!("{field}: {message}"))
            .collect::<Vec<_>>()
            .join("; ");
        write!(f, "{joined}.")
    }
}

impl std::error::Error for ValidationErrors {}

/// Field rules for item parameters
pub struct ItemValidator;

impl ItemValidator {
    /// Validate an item title
    ///
    /// Titles must:
    /// - Be non-empty (whitespace-only titles are accepted)
    /// - Be at most 200 Unicode scalar values long
    pub fn validate_title(title: &str) -> std::result::Result<(), String> {
        if title.is_empty() {
            return Err(MSG_REQUIRED.to_string());
        }

        if title.chars().count() > MAX_TITLE_LENGTH {
            return Err(format!(
                "the length must be no more than {MAX_TITLE_LENGTH}"
            ));
        }

        Ok(())
    }

    /// Validate an item ID taken from a request
    ///
    /// The ID must be present, i.e. non-zero. Negative IDs pass here and
    /// simply match no row.
    pub fn validate_id(id: i64) -> std::result::Result<(), String> {
        if id == 0 {
            return Err(MSG_REQUIRED.to_string());
        }
        Ok(())
    }
}
