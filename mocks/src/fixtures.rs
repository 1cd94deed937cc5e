//! Standard test fixtures for consistent testing
//!
//! Provides pre-built test data including:
//! - A single standard item
//! - Bulk items with ascending IDs
//! - The titles used by the end-to-end scenario

use chrono::{Duration, Utc};
use todo_core::{CreateItemParams, Item, UpdateItemParams};

/// Titles created, in order, by the standard scenario
pub const SCENARIO_TITLES: [&str; 2] = ["first todo", "second todo"];

/// Title the scenario gives item 1 when updating it
pub const SCENARIO_UPDATED_TITLE: &str = "updated first todo";

/// Create a basic test item with sensible defaults
pub fn create_test_item() -> Item {
    Item::new(1, "Test Item", Utc::now())
}

/// Create test item with a specific title
pub fn create_test_item_with_title(title: &str) -> Item {
    let mut item = create_test_item();
    item.title = title.to_string();
    item
}

/// Create multiple items with IDs 1..=count, oldest first
pub fn create_test_items(count: usize) -> Vec<Item> {
    let now = Utc::now();
    (1..=count)
        .map(|i| {
            Item::new(
                i as i64,
                format!("Test Item {i}"),
                now - Duration::seconds((count - i) as i64),
            )
        })
        .collect()
}

/// Parameters for creating an item
pub fn create_params(title: &str) -> CreateItemParams {
    CreateItemParams::new(title)
}

/// Parameters for updating an item
pub fn update_params(id: i64, title: &str) -> UpdateItemParams {
    UpdateItemParams::new(id, title)
}

/// A title exactly at the length limit
pub fn max_length_title() -> String {
    "x".repeat(todo_core::MAX_TITLE_LENGTH)
}

/// A title one code point over the length limit
pub fn oversized_title() -> String {
    "x".repeat(todo_core::MAX_TITLE_LENGTH + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_test_items_are_ordered() {
        let items = create_test_items(3);
        assert_eq!(items.iter().map(|i| i.id).collect::<Vec<_>>(), vec![1, 2, 3]);
        assert!(items[0].updated_at <= items[2].updated_at);
    }

    #[test]
    fn test_title_bounds() {
        assert_eq!(max_length_title().chars().count(), 200);
        assert_eq!(oversized_title().chars().count(), 201);
    }
}
