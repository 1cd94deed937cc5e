//! Random test data generators using the fake crate
//!
//! Provides realistic random titles and property-based testing strategies
//! for valid and invalid titles.

use chrono::Utc;
use fake::faker::lorem::en::Sentence;
use fake::Fake;
use proptest::prelude::*;
use rand::Rng;
use todo_core::{Item, MAX_TITLE_LENGTH};

/// Generate a realistic item title
pub fn generate_title() -> String {
    let title: String = Sentence(2..8).fake();
    title.chars().take(MAX_TITLE_LENGTH).collect()
}

/// Generate a random item with a realistic title
pub fn generate_random_item() -> Item {
    let id = rand::thread_rng().gen_range(1..99_999);
    Item::new(id, generate_title(), Utc::now())
}

/// Generate `count` distinct realistic titles
pub fn generate_titles(count: usize) -> Vec<String> {
    (0..count)
        .map(|i| format!("{} #{i}", generate_title()))
        .map(|title| title.chars().take(MAX_TITLE_LENGTH).collect())
        .collect()
}

/// Strategy for titles that pass validation: 1..=200 arbitrary code points
pub fn valid_title_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec(any::<char>(), 1..=MAX_TITLE_LENGTH)
        .prop_map(|chars| chars.into_iter().collect())
}

/// Strategy for titles that are too long by at least one code point
pub fn oversized_title_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec(any::<char>(), MAX_TITLE_LENGTH + 1..=MAX_TITLE_LENGTH * 2)
        .prop_map(|chars| chars.into_iter().collect())
}
