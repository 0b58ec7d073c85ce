//! Core data models for the expense ledger

pub mod category;
pub mod expense;
pub mod ids;

pub use category::SUGGESTED_CATEGORIES;
pub use expense::{ExpenseRecord, NewExpense};
pub use ids::ExpenseId;
