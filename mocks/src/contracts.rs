//! Contract test helpers for validating trait implementations
//!
//! Provides standardized tests that any `ItemRepository` implementation
//! should pass. Each check only relies on items it created itself, so the
//! suite can run against a repository that already holds data.

use crate::assertions::{assert_ids_ascending, assert_updated_from};
use todo_core::{ItemRepository, ItemTransaction};

/// Test any ItemRepository implementation with the full contract suite
pub async fn test_repository_contract<R: ItemRepository>(repo: &R) {
    test_health_check_contract(repo).await;
    test_create_contract(repo).await;
    test_list_contract(repo).await;
    test_update_contract(repo).await;
    test_update_missing_contract(repo).await;
    test_rollback_contract(repo).await;
}

/// Health check passes on a working repository
pub async fn test_health_check_contract<R: ItemRepository>(repo: &R) {
    assert!(
        repo.health_check().await.is_ok(),
        "Health check should pass for healthy repository"
    );
}

/// Created items get fresh, increasing, positive IDs
pub async fn test_create_contract<R: ItemRepository>(repo: &R) {
    let previous_max = repo
        .list_items()
        .await
        .expect("List should succeed")
        .iter()
        .map(|item| item.id)
        .max()
        .unwrap_or(0);

    let mut tx = repo.begin().await.expect("Begin should succeed");
    let first = tx
        .create_item("contract create one")
        .await
        .expect("Create should succeed");
    let second = tx
        .create_item("contract create two")
        .await
        .expect("Create should succeed");
    tx.commit().await.expect("Commit should succeed");

    assert!(first.id > 0, "Created item should have positive ID");
    assert!(first.id > previous_max, "Created item should get a fresh ID");
    assert!(second.id > first.id, "IDs should increase with each insert");
    assert_eq!(first.title, "contract create one");
    assert_eq!(second.title, "contract create two");
}

/// Listing returns committed items in ascending ID order
pub async fn test_list_contract<R: ItemRepository>(repo: &R) {
    let titles = ["contract list a", "contract list b", "contract list c"];
    let mut created = Vec::new();
    for title in titles {
        let mut tx = repo.begin().await.expect("Begin should succeed");
        created.push(tx.create_item(title).await.expect("Create should succeed"));
        tx.commit().await.expect("Commit should succeed");
    }

    let listed = repo.list_items().await.expect("List should succeed");
    assert_ids_ascending(&listed);

    let tail: Vec<&str> = listed
        .iter()
        .filter(|item| created.iter().any(|c| c.id == item.id))
        .map(|item| item.title.as_str())
        .collect();
    assert_eq!(tail, titles, "Created items should list in creation order");
}

/// Updating replaces only the target's title and keeps time moving forward
pub async fn test_update_contract<R: ItemRepository>(repo: &R) {
    let mut tx = repo.begin().await.expect("Begin should succeed");
    let target = tx.create_item("contract update target").await.expect("Create should succeed");
    let bystander = tx
        .create_item("contract update bystander")
        .await
        .expect("Create should succeed");
    tx.commit().await.expect("Commit should succeed");

    let mut tx = repo.begin().await.expect("Begin should succeed");
    let updated = tx
        .update_item(target.id, "contract update renamed")
        .await
        .expect("Update should succeed");
    tx.commit().await.expect("Commit should succeed");

    assert_updated_from(&target, &updated, "contract update renamed");

    let listed = repo.list_items().await.expect("List should succeed");
    let still = listed
        .iter()
        .find(|item| item.id == bystander.id)
        .expect("Bystander should still exist");
    assert_eq!(still, &bystander, "Update should not touch other items");
}

/// Updating a missing ID reports NotFound
pub async fn test_update_missing_contract<R: ItemRepository>(repo: &R) {
    let mut tx = repo.begin().await.expect("Begin should succeed");
    let result = tx.update_item(i64::MAX, "nobody home").await;
    assert!(
        result.as_ref().is_err_and(|e| e.is_not_found()),
        "Updating a missing item should be NotFound, got {result:?}"
    );
}

/// Writes vanish when a transaction is rolled back or dropped
pub async fn test_rollback_contract<R: ItemRepository>(repo: &R) {
    let before = repo.list_items().await.expect("List should succeed");

    let mut tx = repo.begin().await.expect("Begin should succeed");
    tx.create_item("contract rolled back").await.expect("Create should succeed");
    tx.rollback().await.expect("Rollback should succeed");

    {
        let mut tx = repo.begin().await.expect("Begin should succeed");
        tx.create_item("contract dropped").await.expect("Create should succeed");
    }

    let after = repo.list_items().await.expect("List should succeed");
    assert_eq!(before, after, "Uncommitted writes should not be visible");
}
