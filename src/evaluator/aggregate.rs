//! Spending aggregation over ledger snapshots
//!
//! Pure functions over a slice of records; no storage access.
//!
//! Two different definitions of "period" are in play and both are
//! deliberate: the daily sum matches records by calendar-date equality,
//! while the trailing-week sum uses a rolling distance from "now". Today's
//! spend and trailing-week spend are independently meaningful to the user.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use std::collections::HashMap;

use crate::evaluator::threshold::days_in_month;
use crate::models::ExpenseRecord;

/// One 7-day (or shorter, at the end of a month) slice of a calendar month
#[derive(Debug, Clone, PartialEq)]
pub struct WeekBucket {
    /// First day of the bucket
    pub start: NaiveDate,
    /// Last day of the bucket, inclusive
    pub end: NaiveDate,
    /// Sum of record amounts dated inside the bucket
    pub total: f64,
}

/// Per-day spending total
#[derive(Debug, Clone, PartialEq)]
pub struct DayTotal {
    pub day: NaiveDate,
    pub total: f64,
}

/// Per-category spending summary
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryTotal {
    pub category: String,
    pub total: f64,
    pub count: usize,
}

/// Sum amounts over records whose timestamp falls within `[start, end]`
pub fn sum_in_range(
    records: &[ExpenseRecord],
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> f64 {
    records
        .iter()
        .filter(|r| r.date >= start && r.date <= end)
        .map(|r| r.amount)
        .sum()
}

/// Sum amounts over records dated on the given calendar day
///
/// Calendar-date equality, not a 24-hour rolling window.
pub fn spent_on_day(records: &[ExpenseRecord], day: NaiveDate) -> f64 {
    records
        .iter()
        .filter(|r| r.date.date_naive() == day)
        .map(|r| r.amount)
        .sum()
}

/// Sum amounts over records within a rolling 7-day window around `now`
///
/// A record is inside the window when its absolute time distance from
/// `now`, converted to whole days by ceiling division, is at most 7.
pub fn spent_in_trailing_week(records: &[ExpenseRecord], now: DateTime<Utc>) -> f64 {
    records
        .iter()
        .filter(|r| whole_day_distance(now, r.date) <= 7)
        .map(|r| r.amount)
        .sum()
}

/// Partition a calendar month into consecutive 7-day buckets from the 1st
///
/// The final bucket is truncated to the month's last day, so months whose
/// length is not a multiple of 7 end with a shorter bucket. Unrepresentable
/// year/month input yields no buckets.
pub fn weekly_buckets(records: &[ExpenseRecord], year: i32, month: u32) -> Vec<WeekBucket> {
    let Some(first_day) = NaiveDate::from_ymd_opt(year, month, 1) else {
        return Vec::new();
    };
    let Some(last_day) = first_day
        .checked_add_signed(Duration::days(i64::from(days_in_month(first_day)) - 1))
    else {
        return Vec::new();
    };

    let mut buckets = Vec::new();
    let mut start = first_day;

    while start <= last_day {
        let end = start
            .checked_add_signed(Duration::days(6))
            .map_or(last_day, |d| d.min(last_day));

        let total = records
            .iter()
            .filter(|r| {
                let day = r.date.date_naive();
                day >= start && day <= end
            })
            .map(|r| r.amount)
            .sum();

        buckets.push(WeekBucket { start, end, total });

        match start.checked_add_signed(Duration::days(7)) {
            Some(next) => start = next,
            None => break,
        }
    }

    buckets
}

/// Per-day totals for the last seven calendar days ending on `today`
///
/// Oldest day first; days without spending appear with a zero total.
pub fn daily_series(records: &[ExpenseRecord], today: NaiveDate) -> Vec<DayTotal> {
    (0..7)
        .rev()
        .filter_map(|offset| today.checked_sub_signed(Duration::days(offset)))
        .map(|day| DayTotal {
            day,
            total: spent_on_day(records, day),
        })
        .collect()
}

/// Group records by category, largest total first
pub fn category_totals(records: &[ExpenseRecord]) -> Vec<CategoryTotal> {
    let mut grouped: HashMap<&str, (f64, usize)> = HashMap::new();
    for record in records {
        let entry = grouped.entry(record.category.as_str()).or_insert((0.0, 0));
        entry.0 += record.amount;
        entry.1 += 1;
    }

    let mut totals: Vec<CategoryTotal> = grouped
        .into_iter()
        .map(|(category, (total, count))| CategoryTotal {
            category: category.to_string(),
            total,
            count,
        })
        .collect();

    totals.sort_by(|a, b| b.total.total_cmp(&a.total).then(a.category.cmp(&b.category)));
    totals
}

/// Sum over the entire snapshot
pub fn total_spent(records: &[ExpenseRecord]) -> f64 {
    records.iter().map(|r| r.amount).sum()
}

/// Monthly budget minus everything spent so far (negative when overspent)
pub fn remaining_budget(monthly_budget: f64, records: &[ExpenseRecord]) -> f64 {
    monthly_budget - total_spent(records)
}

/// Snapshot of the records dated on one calendar day
pub fn expenses_on_day(records: &[ExpenseRecord], day: NaiveDate) -> Vec<ExpenseRecord> {
    records
        .iter()
        .filter(|r| r.date.date_naive() == day)
        .cloned()
        .collect()
}

fn whole_day_distance(now: DateTime<Utc>, then: DateTime<Utc>) -> i64 {
    let seconds = (now - then).num_seconds().abs();
    (seconds + 86_399) / 86_400
}
