//! Mock implementation of the ItemRepository trait
//!
//! Provides a thread-safe in-memory repository with:
//! - One-shot error injection per operation
//! - Artificial latency for cancellation tests
//! - Call tracking and transaction accounting for verification
//! - Transaction semantics: writes stay private until commit

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::Mutex;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use std::time::Duration;
use todo_core::{Item, ItemRepository, ItemTransaction, Result, TodoError};

/// Operations that can have an error injected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MockOperation {
    List,
    Begin,
    Create,
    Update,
    Commit,
    Rollback,
    HealthCheck,
}

/// How transactions were released
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TransactionStats {
    pub begun: u64,
    pub committed: u64,
    pub rolled_back: u64,
}

impl TransactionStats {
    /// Transactions begun but not yet released
    pub fn open(&self) -> u64 {
        self.begun - self.committed - self.rolled_back
    }
}

#[derive(Debug)]
struct MockState {
    items: BTreeMap<i64, Item>,
    next_id: i64,
    injected: HashMap<MockOperation, TodoError>,
    latency: Option<Duration>,
    call_history: Vec<String>,
    stats: TransactionStats,
}

impl MockState {
    fn with_items(items: Vec<Item>) -> Self {
        let next_id = items.iter().map(|item| item.id).max().unwrap_or(0) + 1;
        Self {
            items: items.into_iter().map(|item| (item.id, item)).collect(),
            next_id,
            injected: HashMap::new(),
            latency: None,
            call_history: Vec::new(),
            stats: TransactionStats::default(),
        }
    }
}

/// Mock implementation of ItemRepository for testing
///
/// Clones share state, so a test can keep one handle for assertions while
/// the code under test owns another.
#[derive(Debug, Clone)]
pub struct MockItemRepository {
    state: Arc<Mutex<MockState>>,
}

impl Default for MockItemRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl MockItemRepository {
    /// Create a new empty mock repository
    pub fn new() -> Self {
        Self::with_items(Vec::new())
    }

    /// Create mock repository with pre-populated items
    pub fn with_items(items: Vec<Item>) -> Self {
        Self {
            state: Arc::new(Mutex::new(MockState::with_items(items))),
        }
    }

    /// Make the next call of `operation` fail with `error`
    pub fn inject_error(&self, operation: MockOperation, error: TodoError) {
        self.state.lock().injected.insert(operation, error);
    }

    /// Clear all pending error injections
    pub fn clear_errors(&self) {
        self.state.lock().injected.clear();
    }

    /// Delay every operation by `latency`
    pub fn set_latency(&self, latency: Duration) {
        self.state.lock().latency = Some(latency);
    }

    /// Committed items in ID order
    pub fn items(&self) -> Vec<Item> {
        self.state.lock().items.values().cloned().collect()
    }

    /// Transaction accounting so far
    pub fn transaction_stats(&self) -> TransactionStats {
        self.state.lock().stats
    }

    /// Get history of called methods
    pub fn call_history(&self) -> Vec<String> {
        self.state.lock().call_history.clone()
    }

    /// Clear call history
    pub fn clear_history(&self) {
        self.state.lock().call_history.clear();
    }

    /// Assert method was called
    pub fn assert_called(&self, method: &str) {
        let history = self.call_history();
        assert!(
            history.iter().any(|call| call.starts_with(method)),
            "Method '{method}' was not called. Call history: {history:?}"
        );
    }

    /// Assert method was never called
    pub fn assert_not_called(&self, method: &str) {
        let history = self.call_history();
        assert!(
            !history.iter().any(|call| call.starts_with(method)),
            "Method '{method}' was called. Call history: {history:?}"
        );
    }

    /// Assert no storage access happened at all
    pub fn assert_untouched(&self) {
        let history = self.call_history();
        assert!(history.is_empty(), "Repository was accessed: {history:?}");
    }

    async fn enter(state: &Arc<Mutex<MockState>>, operation: MockOperation, call: String) -> Result<()> {
        let latency = {
            let mut guard = state.lock();
            guard.call_history.push(call);
            guard.latency
        };
        if let Some(latency) = latency {
            tokio::time::sleep(latency).await;
        }
        match state.lock().injected.remove(&operation) {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl ItemRepository for MockItemRepository {
    type Transaction = MockItemTransaction;

    async fn list_items(&self) -> Result<Vec<Item>> {
        Self::enter(&self.state, MockOperation::List, "list_items()".to_string()).await?;
        Ok(self.items())
    }

    async fn begin(&self) -> Result<MockItemTransaction> {
        Self::enter(&self.state, MockOperation::Begin, "begin()".to_string()).await?;
        self.state.lock().stats.begun += 1;
        Ok(MockItemTransaction {
            state: self.state.clone(),
            pending: BTreeMap::new(),
            released: false,
        })
    }

    async fn health_check(&self) -> Result<()> {
        Self::enter(&self.state, MockOperation::HealthCheck, "health_check()".to_string()).await
    }
}

/// Transaction handle for [`MockItemRepository`]
///
/// Writes are staged locally and applied on commit. Dropping the handle
/// unreleased counts as a rollback.
#[derive(Debug)]
pub struct MockItemTransaction {
    state: Arc<Mutex<MockState>>,
    pending: BTreeMap<i64, Item>,
    released: bool,
}

impl MockItemTransaction {
    fn release(&mut self, committed: bool) {
        if self.released {
            return;
        }
        self.released = true;
        let mut state = self.state.lock();
        if committed {
            state.stats.committed += 1;
            let writes = std::mem::take(&mut self.pending);
            state.items.extend(writes);
        } else {
            state.stats.rolled_back += 1;
            self.pending.clear();
        }
    }
}

#[async_trait]
impl ItemTransaction for MockItemTransaction {
    async fn create_item(&mut self, title: &str) -> Result<Item> {
        MockItemRepository::enter(&self.state, MockOperation::Create, format!("create_item(title={title})")).await?;

        let id = {
            let mut state = self.state.lock();
            let id = state.next_id;
            state.next_id += 1;
            id
        };
        let item = Item::new(id, title, Utc::now());
        self.pending.insert(id, item.clone());
        Ok(item)
    }

    async fn update_item(&mut self, id: i64, title: &str) -> Result<Item> {
        MockItemRepository::enter(&self.state, MockOperation::Update, format!("update_item(id={id})")).await?;

        let current = match self.pending.get(&id) {
            Some(item) => Some(item.clone()),
            None => self.state.lock().items.get(&id).cloned(),
        };
        let mut item = current.ok_or_else(|| TodoError::not_found_id(id))?;
        item.title = title.to_string();
        item.updated_at = item.updated_at.max(Utc::now());
        self.pending.insert(id, item.clone());
        Ok(item)
    }

    async fn commit(self) -> Result<()> {
        let mut this = self;
        if let Err(error) =
            MockItemRepository::enter(&this.state, MockOperation::Commit, "commit()".to_string()).await
        {
            this.release(false);
            return Err(error);
        }
        this.release(true);
        Ok(())
    }

    async fn rollback(self) -> Result<()> {
        let mut this = self;
        let outcome =
            MockItemRepository::enter(&this.state, MockOperation::Rollback, "rollback()".to_string()).await;
        this.release(false);
        outcome
    }
}

impl Drop for MockItemTransaction {
    fn drop(&mut self) {
        if !self.released {
            self.state.lock().call_history.push("rollback(drop)".to_string());
            self.release(false);
        }
    }
}
