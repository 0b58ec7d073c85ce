//! Suggested expense categories
//!
//! The storage layer treats categories as free text; this list only feeds
//! category pickers in a capture UI.

/// Categories offered by default when logging an expense
pub const SUGGESTED_CATEGORIES: [&str; 5] = ["Food", "Transport", "Shopping", "Bills", "Other"];

/// Check whether a label matches one of the suggested categories
pub fn is_suggested(category: &str) -> bool {
    SUGGESTED_CATEGORIES
        .iter()
        .any(|c| c.eq_ignore_ascii_case(category.trim()))
}
