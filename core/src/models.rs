use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A persisted todo item.
///
/// Items are created with a title; the storage layer assigns the `id` and the
/// `updated_at` timestamp. Only the title can change afterwards, and every
/// change refreshes the timestamp.
///
/// # Examples
///
/// ```rust
/// use todo_core::models::Item;
/// use chrono::Utc;
///
/// let item = Item {
///     id: 1,
///     title: "first todo".to_string(),
///     updated_at: Utc::now(),
/// };
///
/// assert!(item.has_valid_id());
/// assert_eq!(item.title_length(), 10);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Item {
    /// Auto-increment primary key, never reused
    pub id: i64,
    /// Item title, 1-200 code points
    pub title: String,
    /// Set on insert and refreshed on every update
    pub updated_at: DateTime<Utc>,
}

impl Item {
    /// Create an item value (used by tests and in-memory stores)
    pub fn new(id: i64, title: impl Into<String>, updated_at: DateTime<Utc>) -> Self {
        Self {
            id,
            title: title.into(),
            updated_at,
        }
    }

    /// Storage-assigned ids are strictly positive
    pub fn has_valid_id(&self) -> bool {
        self.id > 0
    }

    /// Title length in Unicode scalar values
    pub fn title_length(&self) -> usize {
        self.title.chars().count()
    }
}
