//! Mock implementations and test utilities for the todo item service
//!
//! This crate provides the testing infrastructure shared by the other crates:
//! - An in-memory `ItemRepository` with error injection, latency, and
//!   transaction accounting
//! - Standard fixtures and random data generators
//! - Property-based testing strategies for titles
//! - Custom assertion helpers
//! - Contract tests every repository implementation must pass

pub mod assertions;
pub mod contracts;
pub mod fixtures;
pub mod generators;
pub mod repository;

pub use assertions::*;
pub use contracts::*;
pub use fixtures::*;
pub use generators::*;
pub use repository::{MockItemRepository, MockItemTransaction, MockOperation, TransactionStats};
