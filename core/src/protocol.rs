use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::{
    error::Result,
    models::Item,
    validation::{ItemValidator, Validatable, ValidationErrors},
};

/// Handler trait for the todo operations
///
/// Each operation follows bind → validate → transact → respond. Parameters
/// arrive already bound; implementations validate them before touching
/// storage.
#[async_trait]
pub trait TodoHandler: Send + Sync {
    /// List all items
    async fn list_items(&self) -> Result<Vec<Item>>;

    /// Create an item in its own transaction
    async fn create_item(&self, params: CreateItemParams) -> Result<Item>;

    /// Update an item's title in its own transaction
    async fn update_item(&self, params: UpdateItemParams) -> Result<Item>;

    /// Report service health
    async fn health_check(&self) -> Result<HealthStatus>;
}

/// Parameters for creating an item; also the JSON body of create and update requests
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CreateItemParams {
    #[serde(default)]
    pub title: String,
}

impl CreateItemParams {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
        }
    }
}

impl Validatable for CreateItemParams {
    fn validate(&self) -> Result<()> {
        let mut errors = ValidationErrors::new();
        errors.check("title", ItemValidator::validate_title(&self.title));
        errors.into_result()
    }
}

/// Parameters for updating an item
///
/// The ID comes from the request path, the title from the body.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct UpdateItemParams {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub title: String,
}

impl UpdateItemParams {
    pub fn new(id: i64, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
        }
    }

    /// Combine a path ID with a bound body
    pub fn from_body(id: i64, body: CreateItemParams) -> Self {
        Self {
            id,
            title: body.title,
        }
    }
}

impl Validatable for UpdateItemParams {
    fn validate(&self) -> Result<()> {
        let mut errors = ValidationErrors::new();
        errors.check("id", ItemValidator::validate_id(self.id));
        errors.check("title", ItemValidator::validate_title(&self.title));
        errors.into_result()
    }
}

/// Health status reported by `/health`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    pub database: bool,
    pub timestamp: chrono::DateTime<chrono::Utc>,
    pub version: String,
}

impl Default for HealthStatus {
    fn default() -> Self {
        Self {
            status: "unknown".to_string(),
            database: false,
            timestamp: chrono::Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

impl HealthStatus {
    pub fn healthy() -> Self {
        Self {
            status: "ok".to_string(),
            database: true,
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_params_validation() {
        assert!(CreateItemParams::new("first todo").validate().is_ok());

        let err = CreateItemParams::new("").validate().unwrap_err();
        match err {
            crate::TodoError::Validation(errors) => {
                assert_eq!(errors.get("title"), Some("cannot be blank"));
                assert_eq!(errors.len(), 1);
            }
            other => panic!("expected validation error, got {other:?}"),
        }

        assert!(CreateItemParams::new("x".repeat(201)).validate().is_err());
    }

    #[test]
    fn test_update_params_collects_all_violations() {
        let err = UpdateItemParams::new(0, "").validate().unwrap_err();
        match err {
            crate::TodoError::Validation(errors) => {
                assert_eq!(errors.len(), 2);
                assert_eq!(errors.to_string(), "id: cannot be blank; title: cannot be blank.");
            }
            other => panic!("expected validation error, got {other:?}"),
        }

        assert!(UpdateItemParams::new(1, "updated").validate().is_ok());
    }

    #[test]
    fn test_missing_title_deserializes_to_blank() {
        let params: CreateItemParams = serde_json::from_str("{}").unwrap();
        assert_eq!(params.title, "");
        assert!(params.validate().is_err());
    }

    #[test]
    fn test_from_body() {
        let params = UpdateItemParams::from_body(5, CreateItemParams::new("renamed"));
        assert_eq!(params, UpdateItemParams::new(5, "renamed"));
    }

    #[test]
    fn test_health_status() {
        let health = HealthStatus::healthy();
        assert_eq!(health.status, "ok");
        assert!(health.database);
        assert_eq!(HealthStatus::default().status, "unknown");
    }
}
