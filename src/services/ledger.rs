//! Ledger service
//!
//! Validated CRUD facade over the storage layer. This is the only writer of
//! durable state; the UI and the evaluator only ever see snapshots handed
//! out by `get_expenses`.

use tracing::debug;

use crate::error::OutlayResult;
use crate::models::{ExpenseId, ExpenseRecord, NewExpense};
use crate::storage::Storage;

/// Service for ledger management
pub struct LedgerService<'a> {
    storage: &'a Storage,
}

impl<'a> LedgerService<'a> {
    /// Create a new ledger service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Validate and persist a candidate expense
    ///
    /// The candidate's string fields are trimmed and an id is assigned when
    /// absent. Returns the record as persisted. Fails with `Validation`
    /// before any write when the candidate is malformed, and with `Storage`
    /// when the write itself fails.
    pub fn save_expense(&self, candidate: NewExpense) -> OutlayResult<ExpenseRecord> {
        let record = candidate.into_record()?;

        self.storage.expenses.append(record.clone())?;
        debug!(id = %record.id, amount = record.amount, "expense saved");

        Ok(record)
    }

    /// Read the full expense snapshot
    ///
    /// Never fails: storage problems on the read path degrade to an empty
    /// collection.
    pub fn get_expenses(&self) -> Vec<ExpenseRecord> {
        self.storage.expenses.get_all()
    }

    /// Delete the record with the given id
    ///
    /// Deleting an id that does not exist is a no-op, not an error.
    pub fn delete_expense(&self, id: &ExpenseId) -> OutlayResult<()> {
        let removed = self.storage.expenses.delete(id)?;
        debug!(id = %id, removed, "expense delete requested");
        Ok(())
    }

    /// Overwrite the monthly budget value
    pub fn set_monthly_budget(&self, amount: f64) -> OutlayResult<()> {
        self.storage.budget.set(amount)
    }

    /// Read the monthly budget, zero when unset
    pub fn monthly_budget(&self) -> f64 {
        self.storage.budget.get()
    }

    /// Remove all expense records; the budget value is kept
    pub fn clear_all_data(&self) -> OutlayResult<()> {
        self.storage.clear_all_data()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::OutlayPaths;
    use chrono::{TimeZone, Utc};
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = OutlayPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths).unwrap();
        (temp_dir, storage)
    }

    #[test]
    fn test_save_then_get_round_trips() {
        let (_temp_dir, storage) = create_test_storage();
        let service = LedgerService::new(&storage);

        let date = Utc.with_ymd_and_hms(2024, 1, 15, 12, 0, 0).unwrap();
        let saved = service
            .save_expense(NewExpense::new("Lunch", 12.5, "Food").on(date))
            .unwrap();

        let snapshot = service.get_expenses();
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot[0], saved);
        assert_eq!(snapshot[0].amount, 12.5);
        assert_eq!(snapshot[0].date, date);
    }

    #[test]
    fn test_save_rejects_invalid_candidate() {
        let (_temp_dir, storage) = create_test_storage();
        let service = LedgerService::new(&storage);

        let err = service
            .save_expense(NewExpense::new("", 12.5, "Food"))
            .unwrap_err();
        assert!(err.is_validation());

        // Nothing was persisted
        assert!(service.get_expenses().is_empty());
    }

    #[test]
    fn test_delete_by_id() {
        let (_temp_dir, storage) = create_test_storage();
        let service = LedgerService::new(&storage);

        let first = service
            .save_expense(NewExpense::new("Lunch", 12.5, "Food"))
            .unwrap();
        let mut second = NewExpense::new("Taxi", 8.0, "Transport");
        second.id = Some("9999999999999".to_string());
        service.save_expense(second).unwrap();

        service.delete_expense(&first.id).unwrap();

        let snapshot = service.get_expenses();
        assert_eq!(snapshot.len(), 1);
        assert!(snapshot.iter().all(|r| r.id != first.id));
    }

    #[test]
    fn test_delete_unknown_id_does_not_error() {
        let (_temp_dir, storage) = create_test_storage();
        let service = LedgerService::new(&storage);

        service
            .save_expense(NewExpense::new("Lunch", 12.5, "Food"))
            .unwrap();

        service.delete_expense(&ExpenseId::from("missing")).unwrap();
        assert_eq!(service.get_expenses().len(), 1);
    }

    #[test]
    fn test_budget_round_trip() {
        let (_temp_dir, storage) = create_test_storage();
        let service = LedgerService::new(&storage);

        assert_eq!(service.monthly_budget(), 0.0);

        service.set_monthly_budget(1500.0).unwrap();
        assert_eq!(service.monthly_budget(), 1500.0);
    }

    #[test]
    fn test_clear_all_data_keeps_budget() {
        let (_temp_dir, storage) = create_test_storage();
        let service = LedgerService::new(&storage);

        service
            .save_expense(NewExpense::new("Lunch", 12.5, "Food"))
            .unwrap();
        service.set_monthly_budget(800.0).unwrap();

        service.clear_all_data().unwrap();

        assert!(service.get_expenses().is_empty());
        assert_eq!(service.monthly_budget(), 800.0);
    }
}
