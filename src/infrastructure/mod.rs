//! Infrastructure layer - Framework implementations
//!
//! This layer contains:
//! - Database connection and schema creation (db)
//! - HTTP server setup (server)
//! - Configuration loading (config)
//! - Ambient transactions (transaction)
//! - Store error classification (store_errors)
//! - Repository implementations (repositories)
//! - Application state (state)

pub mod config;
pub mod db;
pub mod repositories;
pub mod server;
pub mod state;
pub mod store_errors;
pub mod transaction;

pub use repositories::*;
pub use state::AppState;
pub use transaction::{StoreHandle, TransactionManager, TransactionResolver};
