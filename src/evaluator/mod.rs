//! Budget evaluator
//!
//! Pure, stateless computation over ledger snapshots: spending aggregates
//! and budget threshold classification. No storage access and no side
//! effects; callers pass in the records and budget value they already hold.

pub mod aggregate;
pub mod threshold;

pub use aggregate::{
    category_totals, daily_series, expenses_on_day, remaining_budget, spent_in_trailing_week,
    spent_on_day, sum_in_range, total_spent, weekly_buckets, CategoryTotal, DayTotal, WeekBucket,
};
pub use threshold::{
    classify, days_in_month, monthly_to_daily, monthly_to_weekly, BudgetLevel, WARNING_RATIO,
};
