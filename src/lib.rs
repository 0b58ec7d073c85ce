//! Outlay - expense ledger persistence and budget-evaluation core
//!
//! This library provides the durable core of a personal expense tracker:
//! validated storage of expense records and a monthly budget value, pure
//! aggregation over ledger snapshots, and threshold-based budget alerts
//! handed to a pluggable notification sink. All state lives in two keys of
//! an on-disk key-value layout; there is no server and no multi-user
//! concern.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Core data models (expense records, ids, categories)
//! - `storage`: JSON file storage layer (the ledger store)
//! - `services`: Business logic layer (ledger facade, budget alerts)
//! - `evaluator`: Pure spending aggregates and threshold classification
//!
//! # Example
//!
//! ```rust,ignore
//! use outlay::config::OutlayPaths;
//! use outlay::models::NewExpense;
//! use outlay::services::LedgerService;
//! use outlay::storage::Storage;
//!
//! let paths = OutlayPaths::new()?;
//! let storage = Storage::new(paths)?;
//! let ledger = LedgerService::new(&storage);
//!
//! ledger.save_expense(NewExpense::new("Lunch", 12.50, "Food"))?;
//! let snapshot = ledger.get_expenses();
//! ```

pub mod config;
pub mod error;
pub mod evaluator;
pub mod models;
pub mod services;
pub mod storage;

pub use error::{OutlayError, OutlayResult};
