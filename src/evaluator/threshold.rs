//! Budget threshold classification
//!
//! Pure functions deriving a three-level signal from spend vs. allotted
//! budget, plus the monthly-to-daily and monthly-to-weekly conversions.

use chrono::{Datelike, NaiveDate};

/// Fraction of the budget at which spending starts to warn
pub const WARNING_RATIO: f64 = 0.80;

/// Three-level budget threshold signal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BudgetLevel {
    /// Spending is comfortably inside the budget
    Normal,
    /// Spending has reached 80% of the budget
    Warning,
    /// Spending has reached or passed the budget
    Exceeded,
}

/// Classify current spending against a budget
///
/// Always `Normal` when the budget or the spend is not positive: a zero
/// budget means nothing was allotted, and a zero spend warrants no alert.
pub fn classify(current: f64, budget: f64) -> BudgetLevel {
    if !current.is_finite() || !budget.is_finite() || budget <= 0.0 || current <= 0.0 {
        return BudgetLevel::Normal;
    }

    if current >= budget {
        BudgetLevel::Exceeded
    } else if current / budget >= WARNING_RATIO {
        BudgetLevel::Warning
    } else {
        BudgetLevel::Normal
    }
}

/// Number of days in the calendar month containing `date` (28-31)
pub fn days_in_month(date: NaiveDate) -> u32 {
    let (year, month) = (date.year(), date.month());
    let next_month_first = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    };

    match next_month_first.and_then(|d| d.pred_opt()) {
        Some(last_day) => last_day.day(),
        // Only reachable at the edge of chrono's representable range
        None => 30,
    }
}

/// Daily allowance: the monthly budget spread over the actual days of the
/// reference date's calendar month
pub fn monthly_to_daily(monthly_budget: f64, reference_date: NaiveDate) -> f64 {
    monthly_budget / f64::from(days_in_month(reference_date))
}

/// Weekly allowance: a fixed month/4 approximation, not calendar-accurate
pub fn monthly_to_weekly(monthly_budget: f64) -> f64 {
    monthly_budget / 4.0
}
