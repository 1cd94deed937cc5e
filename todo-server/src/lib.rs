//! Todo Server Library
//!
//! Configuration loading, logging setup and application wiring for the
//! todo item HTTP service. The binary in `main.rs` is a thin shell over
//! these pieces.

pub mod config;
pub mod setup;
pub mod telemetry;

pub use config::{Config, ConfigOverrides};
pub use setup::{create_repository, create_server, ensure_database_directory, initialize_app, App};
pub use telemetry::init_telemetry;
