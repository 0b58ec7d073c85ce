//! Budget alert composition and dispatch
//!
//! Turns threshold classifications into notification messages and hands
//! them to an abstract sink. Delivery and display are entirely the sink's
//! concern; this module decides *whether* to notify and *what* to say.

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::config::Settings;
use crate::evaluator::{
    classify, monthly_to_daily, monthly_to_weekly, spent_in_trailing_week, spent_on_day,
    BudgetLevel,
};
use crate::models::ExpenseRecord;

/// The period a notice refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Timeframe {
    Daily,
    Weekly,
}

impl Timeframe {
    /// Capitalized label for notice titles
    pub fn label(&self) -> &'static str {
        match self {
            Self::Daily => "Daily",
            Self::Weekly => "Weekly",
        }
    }
}

/// How urgent a notice is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Warning,
    Critical,
}

/// Structured type tag carried alongside the message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    BudgetAlert,
    BudgetWarning,
}

impl NoticeKind {
    /// Wire form of the tag
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::BudgetAlert => "budget_alert",
            Self::BudgetWarning => "budget_warning",
        }
    }
}

/// A composed budget notification
#[derive(Debug, Clone, PartialEq)]
pub struct BudgetNotice {
    pub title: String,
    pub body: String,
    pub severity: Severity,
    pub kind: NoticeKind,
    pub timeframe: Timeframe,
}

/// Receiver for composed notices
///
/// Implementations own scheduling, permissions, and display.
pub trait NotificationSink {
    fn deliver(&self, notice: &BudgetNotice);
}

/// Service composing budget notices from ledger snapshots
pub struct AlertService {
    currency_symbol: String,
}

impl AlertService {
    /// Create an alert service using the configured currency symbol
    pub fn new(settings: &Settings) -> Self {
        Self {
            currency_symbol: settings.currency_symbol.clone(),
        }
    }

    /// Evaluate both budget timeframes after a save and notify the sink
    ///
    /// Checks today's spend against the daily allowance and the trailing
    /// week's spend against the weekly allowance. Nothing is delivered for
    /// timeframes at `Normal`.
    pub fn check_after_save<S: NotificationSink>(
        &self,
        records: &[ExpenseRecord],
        monthly_budget: f64,
        now: DateTime<Utc>,
        sink: &S,
    ) {
        let today = now.date_naive();

        let daily_spend = spent_on_day(records, today);
        let daily_budget = monthly_to_daily(monthly_budget, today);
        if let Some(notice) = self.evaluate(daily_spend, daily_budget, Timeframe::Daily) {
            sink.deliver(&notice);
        }

        let weekly_spend = spent_in_trailing_week(records, now);
        let weekly_budget = monthly_to_weekly(monthly_budget);
        if let Some(notice) = self.evaluate(weekly_spend, weekly_budget, Timeframe::Weekly) {
            sink.deliver(&notice);
        }
    }

    /// Compose a notice for one timeframe, or nothing at `Normal`
    pub fn evaluate(&self, current: f64, budget: f64, timeframe: Timeframe) -> Option<BudgetNotice> {
        let level = classify(current, budget);
        debug!(?level, ?timeframe, current, budget, "budget threshold evaluated");

        match level {
            BudgetLevel::Normal => None,
            BudgetLevel::Exceeded => Some(self.exceeded_notice(current, budget, timeframe)),
            BudgetLevel::Warning => Some(self.warning_notice(current, budget, timeframe)),
        }
    }

    fn exceeded_notice(&self, current: f64, budget: f64, timeframe: Timeframe) -> BudgetNotice {
        let sym = &self.currency_symbol;
        let body = match timeframe {
            Timeframe::Daily => format!(
                "You've exceeded your daily budget of {sym}{budget:.2}. Today's spending: {sym}{current:.2}"
            ),
            Timeframe::Weekly => format!(
                "Weekly budget exceeded! You've spent {sym}{current:.2} out of your {sym}{budget:.2} weekly budget."
            ),
        };

        BudgetNotice {
            title: format!("{} Budget Alert!", timeframe.label()),
            body,
            severity: Severity::Critical,
            kind: NoticeKind::BudgetAlert,
            timeframe,
        }
    }

    fn warning_notice(&self, current: f64, budget: f64, timeframe: Timeframe) -> BudgetNotice {
        let sym = &self.currency_symbol;
        let percentage = current / budget * 100.0;
        let body = match timeframe {
            Timeframe::Daily => format!(
                "You're close to your daily limit! You've used {percentage:.1}% of today's budget ({sym}{current:.2}/{sym}{budget:.2})"
            ),
            Timeframe::Weekly => format!(
                "Weekly budget update: You've used {percentage:.1}% of this week's budget ({sym}{current:.2}/{sym}{budget:.2})"
            ),
        };

        BudgetNotice {
            title: format!("{} Budget Warning", timeframe.label()),
            body,
            severity: Severity::Warning,
            kind: NoticeKind::BudgetWarning,
            timeframe,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NewExpense;
    use chrono::TimeZone;
    use std::cell::RefCell;

    struct RecordingSink {
        delivered: RefCell<Vec<BudgetNotice>>,
    }

    impl RecordingSink {
        fn new() -> Self {
            Self {
                delivered: RefCell::new(Vec::new()),
            }
        }
    }

    impl NotificationSink for RecordingSink {
        fn deliver(&self, notice: &BudgetNotice) {
            self.delivered.borrow_mut().push(notice.clone());
        }
    }

    fn service() -> AlertService {
        AlertService::new(&Settings::default())
    }

    #[test]
    fn test_exceeded_daily_notice() {
        let notice = service().evaluate(12.0, 10.0, Timeframe::Daily).unwrap();

        assert_eq!(notice.severity, Severity::Critical);
        assert_eq!(notice.kind, NoticeKind::BudgetAlert);
        assert_eq!(notice.kind.as_str(), "budget_alert");
        assert_eq!(notice.title, "Daily Budget Alert!");
        assert!(notice.body.contains("RM10.00"));
        assert!(notice.body.contains("RM12.00"));
    }

    #[test]
    fn test_warning_weekly_notice() {
        let notice = service().evaluate(85.0, 100.0, Timeframe::Weekly).unwrap();

        assert_eq!(notice.severity, Severity::Warning);
        assert_eq!(notice.kind, NoticeKind::BudgetWarning);
        assert_eq!(notice.title, "Weekly Budget Warning");
        assert!(notice.body.contains("85.0%"));
        assert!(notice.body.contains("RM85.00/RM100.00"));
    }

    #[test]
    fn test_normal_produces_nothing() {
        assert!(service().evaluate(10.0, 100.0, Timeframe::Daily).is_none());
        // Guards: no budget, no spend
        assert!(service().evaluate(50.0, 0.0, Timeframe::Daily).is_none());
        assert!(service().evaluate(0.0, 100.0, Timeframe::Weekly).is_none());
    }

    #[test]
    fn test_check_after_save_delivers_both_timeframes() {
        // 310 monthly over January: daily allowance 10, weekly allowance 77.5
        let now = Utc.with_ymd_and_hms(2024, 1, 8, 12, 0, 0).unwrap();
        let records = vec![
            NewExpense::new("Groceries", 50.0, "Food")
                .on(Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap())
                .into_record()
                .unwrap(),
            NewExpense::new("Dinner", 30.0, "Food")
                .on(now)
                .into_record()
                .unwrap(),
        ];

        let sink = RecordingSink::new();
        service().check_after_save(&records, 310.0, now, &sink);

        let delivered = sink.delivered.borrow();
        // Daily: 30 spent vs 10 allowance -> exceeded. Weekly: 80 vs 77.5 -> exceeded.
        assert_eq!(delivered.len(), 2);
        assert_eq!(delivered[0].timeframe, Timeframe::Daily);
        assert_eq!(delivered[0].severity, Severity::Critical);
        assert_eq!(delivered[1].timeframe, Timeframe::Weekly);
        assert_eq!(delivered[1].severity, Severity::Critical);
    }

    #[test]
    fn test_check_after_save_quiet_under_budget() {
        let now = Utc.with_ymd_and_hms(2024, 1, 8, 12, 0, 0).unwrap();
        let records = vec![NewExpense::new("Coffee", 2.0, "Food")
            .on(now)
            .into_record()
            .unwrap()];

        let sink = RecordingSink::new();
        service().check_after_save(&records, 310.0, now, &sink);

        assert!(sink.delivered.borrow().is_empty());
    }

    #[test]
    fn test_no_alerts_without_budget() {
        let now = Utc.with_ymd_and_hms(2024, 1, 8, 12, 0, 0).unwrap();
        let records = vec![NewExpense::new("Dinner", 500.0, "Food")
            .on(now)
            .into_record()
            .unwrap()];

        let sink = RecordingSink::new();
        service().check_after_save(&records, 0.0, now, &sink);

        assert!(sink.delivered.borrow().is_empty());
    }
}
