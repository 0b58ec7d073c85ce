//! Storage layer for the expense ledger
//!
//! Two logical keys in a key-value layout on disk: the expense collection
//! (expenses.json) and the monthly budget scalar (budget.txt). All writes
//! are atomic (temp file + rename).

pub mod budget;
pub mod expenses;
pub mod file_io;

pub use budget::BudgetRepository;
pub use expenses::ExpenseRepository;
pub use file_io::{write_json_atomic, write_text_atomic};

use crate::config::paths::OutlayPaths;
use crate::error::{OutlayError, OutlayResult};

/// Main storage coordinator that provides access to both repositories
pub struct Storage {
    paths: OutlayPaths,
    pub expenses: ExpenseRepository,
    pub budget: BudgetRepository,
}

impl Storage {
    /// Create a new Storage instance
    pub fn new(paths: OutlayPaths) -> Result<Self, OutlayError> {
        // Ensure directories exist
        paths.ensure_directories()?;

        Ok(Self {
            expenses: ExpenseRepository::new(paths.expenses_file()),
            budget: BudgetRepository::new(paths.budget_file()),
            paths,
        })
    }

    /// Get the paths configuration
    pub fn paths(&self) -> &OutlayPaths {
        &self.paths
    }

    /// Remove the expense collection key; the budget scalar is unaffected
    pub fn clear_all_data(&self) -> OutlayResult<()> {
        self.expenses.clear()
    }
}
