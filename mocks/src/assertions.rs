//! Custom assertion helpers for testing
//!
//! Provides specialized assertions for:
//! - Item equality with clear error messages
//! - List ordering and contents

use todo_core::Item;

/// Assert items are equal ignoring timestamps
pub fn assert_item_equals(actual: &Item, expected: &Item) {
    assert_eq!(actual.id, expected.id, "Item IDs don't match");
    assert_eq!(actual.title, expected.title, "Item titles don't match");
    // Note: timestamps are ignored in this assertion
}

/// Assert IDs are strictly ascending
pub fn assert_ids_ascending(items: &[Item]) {
    for pair in items.windows(2) {
        assert!(
            pair[0].id < pair[1].id,
            "Items not in ascending ID order: {} before {}",
            pair[0].id,
            pair[1].id
        );
    }
}

/// Assert a list holds exactly these `(id, title)` pairs, in order
pub fn assert_items_match(items: &[Item], expected: &[(i64, &str)]) {
    let actual: Vec<(i64, &str)> = items
        .iter()
        .map(|item| (item.id, item.title.as_str()))
        .collect();
    assert_eq!(actual, expected, "Item list doesn't match expected");
}

/// Assert an update kept the ID, replaced the title, and did not move the timestamp back
pub fn assert_updated_from(before: &Item, after: &Item, new_title: &str) {
    assert_eq!(after.id, before.id, "Update changed the item ID");
    assert_eq!(after.title, new_title, "Update did not replace the title");
    assert!(
        after.updated_at >= before.updated_at,
        "updated_at moved backwards: {} -> {}",
        before.updated_at,
        after.updated_at
    );
}
