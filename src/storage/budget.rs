//! Monthly budget scalar repository
//!
//! The budget is a single non-negative number persisted as a plain decimal
//! string under its own key (budget.txt). No history is kept, only the
//! current value; it defaults to zero when absent.

use std::path::PathBuf;

use tracing::{error, warn};

use crate::error::OutlayResult;

use super::file_io::{read_text, write_text_atomic};

/// Repository for the monthly budget value
pub struct BudgetRepository {
    path: PathBuf,
}

impl BudgetRepository {
    /// Create a new budget repository backed by the given file
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Persist the monthly budget
    ///
    /// Non-finite and negative amounts are coerced to zero before writing.
    pub fn set(&self, amount: f64) -> OutlayResult<()> {
        let valid = if amount.is_finite() && amount > 0.0 {
            amount
        } else {
            0.0
        };

        write_text_atomic(&self.path, &valid.to_string()).map_err(|e| {
            error!(path = %self.path.display(), error = %e, "failed to persist monthly budget");
            e
        })
    }

    /// Read the monthly budget, defaulting to zero when absent or unparsable
    pub fn get(&self) -> f64 {
        let contents = match read_text(&self.path) {
            Ok(Some(contents)) => contents,
            Ok(None) => return 0.0,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "failed to read monthly budget, defaulting to zero");
                return 0.0;
            }
        };

        match contents.trim().parse::<f64>() {
            Ok(value) if value.is_finite() => value,
            _ => {
                warn!(path = %self.path.display(), "stored budget is not a number, defaulting to zero");
                0.0
            }
        }
    }
}
