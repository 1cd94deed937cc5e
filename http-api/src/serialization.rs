//! Serialization utilities for HTTP responses
//!
//! Handles conversion between internal `Item` values and the public JSON shape.

use chrono::SecondsFormat;
use serde::{Deserialize, Serialize};
use todo_core::Item;

/// Public JSON shape of an item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemResponse {
    pub id: i64,
    pub title: String,
    /// RFC 3339, UTC, millisecond precision
    pub updated_at: String,
}

impl From<&Item> for ItemResponse {
    fn from(item: &Item) -> Self {
        Self {
            id: item.id,
            title: item.title.clone(),
            updated_at: item.updated_at.to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }
}

/// Body of `GET /api/todo`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetResponse {
    pub items: Vec<ItemResponse>,
}

/// Body of `POST /api/todo` and `PUT /api/todo/:id`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemEnvelope {
    pub item: ItemResponse,
}

pub type PostResponse = ItemEnvelope;
pub type PutResponse = ItemEnvelope;

/// Project a single item
pub fn into_item_response(item: &Item) -> ItemResponse {
    ItemResponse::from(item)
}

/// Project a list of items, preserving order
pub fn into_item_responses(items: &[Item]) -> Vec<ItemResponse> {
    items.iter().map(ItemResponse::from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_item_projection() {
        let updated_at = Utc.with_ymd_and_hms(2024, 3, 1, 12, 30, 0).unwrap();
        let item = Item::new(3, "write tests", updated_at);

        let response = into_item_response(&item);
        assert_eq!(response.id, 3);
        assert_eq!(response.title, "write tests");
        assert_eq!(response.updated_at, "2024-03-01T12:30:00.000Z");
    }

    #[test]
    fn test_projection_preserves_order() {
        let now = Utc::now();
        let items = vec![Item::new(1, "a", now), Item::new(2, "b", now), Item::new(3, "c", now)];

        let ids: Vec<i64> = into_item_responses(&items).iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert!(into_item_responses(&[]).is_empty());
    }

    #[test]
    fn test_envelope_shape() {
        let item = Item::new(1, "first todo", Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap());
        let json = serde_json::to_value(PostResponse {
            item: into_item_response(&item),
        })
        .unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "item": {"id": 1, "title": "first todo", "updated_at": "2024-01-01T00:00:00.000Z"}
            })
        );
    }
}
