//! Expense record model
//!
//! Records are immutable once persisted: the store supports create, read,
//! and delete, but no update.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::ExpenseId;
use crate::error::{OutlayError, OutlayResult};

/// A single logged expense
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseRecord {
    /// Unique identifier, assigned at creation time
    pub id: ExpenseId,

    /// What the money was spent on
    pub item: String,

    /// Amount in currency units, always finite and positive
    pub amount: f64,

    /// Free-text category label
    pub category: String,

    /// When the expense occurred (stored as an ISO-8601 string)
    pub date: DateTime<Utc>,
}

impl fmt::Display for ExpenseRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {:.2} ({})",
            self.date.format("%Y-%m-%d"),
            self.item,
            self.amount,
            self.category
        )
    }
}

/// A candidate expense supplied by the caller, possibly missing `id` and `date`
#[derive(Debug, Clone, Default)]
pub struct NewExpense {
    pub item: String,
    pub amount: f64,
    pub category: String,
    /// Defaults to the current time when absent
    pub date: Option<DateTime<Utc>>,
    /// Assigned from a high-resolution timestamp when absent
    pub id: Option<String>,
}

impl NewExpense {
    /// Create a candidate for an expense occurring now
    pub fn new(item: impl Into<String>, amount: f64, category: impl Into<String>) -> Self {
        Self {
            item: item.into(),
            amount,
            category: category.into(),
            date: None,
            id: None,
        }
    }

    /// Set an explicit occurrence date
    pub fn on(mut self, date: DateTime<Utc>) -> Self {
        self.date = Some(date);
        self
    }

    /// Validate and normalize the candidate into a persistable record
    ///
    /// String fields are trimmed. Rejects empty `item` or `category` and
    /// non-finite or non-positive amounts.
    pub fn into_record(self) -> OutlayResult<ExpenseRecord> {
        let item = self.item.trim().to_string();
        if item.is_empty() {
            return Err(OutlayError::invalid_field("item", "must not be empty"));
        }

        let category = self.category.trim().to_string();
        if category.is_empty() {
            return Err(OutlayError::invalid_field("category", "must not be empty"));
        }

        if !self.amount.is_finite() {
            return Err(OutlayError::invalid_field("amount", "must be a finite number"));
        }
        if self.amount <= 0.0 {
            return Err(OutlayError::invalid_field("amount", "must be positive"));
        }

        let id = match self.id {
            Some(raw) if !raw.trim().is_empty() => ExpenseId::from_string(raw.trim()),
            _ => ExpenseId::new(),
        };

        Ok(ExpenseRecord {
            id,
            item,
            amount: self.amount,
            category,
            date: self.date.unwrap_or_else(Utc::now),
        })
    }
}
