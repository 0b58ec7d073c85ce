//! Expense collection repository
//!
//! Persists the full expense collection under a single JSON key
//! (expenses.json). Every mutation follows the same shape: read the entire
//! collection, change it in memory, rewrite the whole file. Collections are
//! small enough that the O(n) rewrite per insert is acceptable.
//!
//! Reads never fail outward: a missing file yields an empty collection and
//! corrupted payloads are logged and treated as empty. Writes propagate
//! storage failures, since silently dropping a write would corrupt user
//! trust in the ledger.

use std::path::PathBuf;
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, error, warn};

use crate::error::{OutlayError, OutlayResult};
use crate::models::{ExpenseId, ExpenseRecord};

use super::file_io::write_json_atomic;

/// Repository for expense record persistence
pub struct ExpenseRepository {
    path: PathBuf,
    /// Serializes mutations so two writers cannot race the full-file rewrite
    write_lock: Mutex<()>,
}

/// Raw on-disk record shape, tolerant of partially written or drifted data
#[derive(Debug, Default, Deserialize)]
struct RawExpense {
    #[serde(default)]
    id: Option<Value>,
    #[serde(default)]
    item: Option<String>,
    #[serde(default)]
    amount: Option<Value>,
    #[serde(default)]
    category: Option<String>,
    #[serde(default)]
    date: Option<String>,
}

impl RawExpense {
    /// Coerce a raw record into a well-formed one, filling damaged fields
    /// with safe defaults
    fn coerce(self) -> ExpenseRecord {
        let id = match self.id {
            Some(Value::String(s)) if !s.trim().is_empty() => ExpenseId::from_string(s),
            Some(Value::Number(n)) => ExpenseId::from_string(n.to_string()),
            _ => ExpenseId::new(),
        };

        let amount = match self.amount {
            Some(Value::Number(n)) => n.as_f64().filter(|a| a.is_finite()).unwrap_or(0.0),
            Some(Value::String(s)) => s.trim().parse::<f64>().ok().filter(|a| a.is_finite()).unwrap_or(0.0),
            _ => 0.0,
        };

        let date = self
            .date
            .as_deref()
            .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
            .map(|d| d.with_timezone(&Utc))
            .unwrap_or_else(Utc::now);

        ExpenseRecord {
            id,
            item: self.item.unwrap_or_default(),
            amount,
            category: self.category.unwrap_or_default(),
            date,
        }
    }
}

impl ExpenseRepository {
    /// Create a new expense repository backed by the given file
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            write_lock: Mutex::new(()),
        }
    }

    /// Read the full collection
    ///
    /// Missing file yields an empty collection. A payload that cannot be
    /// parsed, or that is not a JSON array, is logged and treated as empty
    /// rather than raised.
    pub fn get_all(&self) -> Vec<ExpenseRecord> {
        if !self.path.exists() {
            return Vec::new();
        }

        let contents = match std::fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "failed to read expense collection, treating as empty");
                return Vec::new();
            }
        };

        let payload: Value = match serde_json::from_str(&contents) {
            Ok(payload) => payload,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "expense collection is not valid JSON, treating as empty");
                return Vec::new();
            }
        };

        let items = match payload {
            Value::Array(items) => items,
            other => {
                warn!(
                    path = %self.path.display(),
                    found = other_type_name(&other),
                    "expense collection is not an array, treating as empty"
                );
                return Vec::new();
            }
        };

        items
            .into_iter()
            .map(|item| {
                serde_json::from_value::<RawExpense>(item)
                    .unwrap_or_default()
                    .coerce()
            })
            .collect()
    }

    /// Append a record and rewrite the whole collection
    pub fn append(&self, record: ExpenseRecord) -> OutlayResult<()> {
        let _guard = self.lock()?;

        let mut records = self.get_all();
        records.push(record);

        self.write_all(&records)?;
        debug!(count = records.len(), "expense collection rewritten");
        Ok(())
    }

    /// Remove the record whose id matches exactly, rewriting the remainder
    ///
    /// Returns whether a record was removed. An unknown id is a no-op, not
    /// an error.
    pub fn delete(&self, id: &ExpenseId) -> OutlayResult<bool> {
        let _guard = self.lock()?;

        let records = self.get_all();
        let before = records.len();

        let remaining: Vec<ExpenseRecord> =
            records.into_iter().filter(|r| &r.id != id).collect();
        let removed = remaining.len() < before;

        self.write_all(&remaining)?;
        debug!(id = %id, removed, "expense delete processed");
        Ok(removed)
    }

    /// Remove the expense collection key entirely
    ///
    /// The budget scalar is unaffected. Primarily a reset/testing hook.
    pub fn clear(&self) -> OutlayResult<()> {
        let _guard = self.lock()?;

        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => {
                let err = OutlayError::Storage(format!(
                    "Failed to remove {}: {}",
                    self.path.display(),
                    e
                ));
                error!(path = %self.path.display(), error = %e, "failed to clear expense collection");
                Err(err)
            }
        }
    }

    /// Count records currently persisted
    pub fn count(&self) -> usize {
        self.get_all().len()
    }

    fn write_all(&self, records: &[ExpenseRecord]) -> OutlayResult<()> {
        write_json_atomic(&self.path, &records).map_err(|e| {
            error!(path = %self.path.display(), error = %e, "failed to persist expense collection");
            e
        })
    }

    fn lock(&self) -> OutlayResult<std::sync::MutexGuard<'_, ()>> {
        self.write_lock
            .lock()
            .map_err(|e| OutlayError::Storage(format!("Failed to acquire write lock: {}", e)))
    }
}

fn other_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NewExpense;
    use chrono::TimeZone;
    use tempfile::TempDir;

    fn create_test_repo() -> (TempDir, ExpenseRepository) {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("expenses.json");
        let repo = ExpenseRepository::new(path);
        (temp_dir, repo)
    }

    fn sample_record(item: &str, amount: f64) -> ExpenseRecord {
        NewExpense::new(item, amount, "Food")
            .on(Utc.with_ymd_and_hms(2024, 1, 15, 9, 0, 0).unwrap())
            .into_record()
            .unwrap()
    }

    #[test]
    fn test_missing_file_is_empty() {
        let (_temp_dir, repo) = create_test_repo();
        assert!(repo.get_all().is_empty());
    }

    #[test]
    fn test_append_and_get() {
        let (_temp_dir, repo) = create_test_repo();

        let record = sample_record("Lunch", 12.5);
        let id = record.id.clone();
        repo.append(record).unwrap();

        let records = repo.get_all();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, id);
        assert_eq!(records[0].amount, 12.5);
    }

    #[test]
    fn test_amount_and_date_round_trip() {
        let (_temp_dir, repo) = create_test_repo();

        let date = Utc.with_ymd_and_hms(2024, 3, 7, 18, 45, 30).unwrap();
        let record = NewExpense::new("Dinner", 38.75, "Food")
            .on(date)
            .into_record()
            .unwrap();
        repo.append(record.clone()).unwrap();

        let loaded = &repo.get_all()[0];
        assert_eq!(loaded.amount, 38.75);
        assert_eq!(loaded.date, date);
        assert_eq!(loaded, &record);
    }

    #[test]
    fn test_delete_removes_matching_id() {
        let (_temp_dir, repo) = create_test_repo();

        let keep = sample_record("Lunch", 12.5);
        let drop = sample_record("Taxi", 8.0);
        let drop_id = drop.id.clone();

        repo.append(keep).unwrap();
        repo.append(drop).unwrap();

        assert!(repo.delete(&drop_id).unwrap());

        let records = repo.get_all();
        assert_eq!(records.len(), 1);
        assert!(records.iter().all(|r| r.id != drop_id));
    }

    #[test]
    fn test_delete_unknown_id_is_noop() {
        let (_temp_dir, repo) = create_test_repo();
        repo.append(sample_record("Lunch", 12.5)).unwrap();

        let removed = repo.delete(&ExpenseId::from("does-not-exist")).unwrap();
        assert!(!removed);
        assert_eq!(repo.count(), 1);
    }

    #[test]
    fn test_delete_last_record_leaves_empty_collection() {
        let (_temp_dir, repo) = create_test_repo();

        let record = sample_record("Lunch", 12.5);
        let id = record.id.clone();
        repo.append(record).unwrap();

        assert!(repo.delete(&id).unwrap());
        assert!(repo.get_all().is_empty());
        // The key still exists, holding an empty array
        assert!(repo.count() == 0);
    }

    #[test]
    fn test_non_array_payload_reads_as_empty() {
        let (temp_dir, repo) = create_test_repo();
        std::fs::write(
            temp_dir.path().join("expenses.json"),
            r#"{"not": "an array"}"#,
        )
        .unwrap();

        assert!(repo.get_all().is_empty());
    }

    #[test]
    fn test_garbage_payload_reads_as_empty() {
        let (temp_dir, repo) = create_test_repo();
        std::fs::write(temp_dir.path().join("expenses.json"), "not json at all").unwrap();

        assert!(repo.get_all().is_empty());
    }

    #[test]
    fn test_drifted_records_are_coerced() {
        let (temp_dir, repo) = create_test_repo();
        std::fs::write(
            temp_dir.path().join("expenses.json"),
            r#"[
                {"item": "Lunch", "category": "Food"},
                {"id": 1704067200000, "item": "Taxi", "amount": "8.5", "category": "Transport", "date": "2024-01-01T08:00:00Z"},
                {"id": "x1", "item": "Book", "amount": "garbage", "category": "Other", "date": "not a date"}
            ]"#,
        )
        .unwrap();

        let records = repo.get_all();
        assert_eq!(records.len(), 3);

        // Missing id/amount/date filled with defaults
        assert!(!records[0].id.as_str().is_empty());
        assert_eq!(records[0].amount, 0.0);

        // Numeric id stringified, numeric-string amount parsed
        assert_eq!(records[1].id.as_str(), "1704067200000");
        assert_eq!(records[1].amount, 8.5);

        // Unparsable amount and date fall back to 0 / now
        assert_eq!(records[2].amount, 0.0);
        assert!(records[2].date <= Utc::now());
    }

    #[test]
    fn test_clear_removes_key() {
        let (_temp_dir, repo) = create_test_repo();
        repo.append(sample_record("Lunch", 12.5)).unwrap();

        repo.clear().unwrap();
        assert!(repo.get_all().is_empty());

        // Clearing again is fine
        repo.clear().unwrap();
    }
}
