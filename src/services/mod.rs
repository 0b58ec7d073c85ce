//! Service layer for the expense ledger
//!
//! The service layer provides business logic on top of the storage layer:
//! candidate validation, snapshot reads, and budget alert composition.

pub mod alerts;
pub mod ledger;

pub use alerts::{AlertService, BudgetNotice, NotificationSink, NoticeKind, Severity, Timeframe};
pub use ledger::LedgerService;
