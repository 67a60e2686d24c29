//! Domain errors for report computation
//!
//! Transport failures stay `anyhow` errors with context; these are the
//! conditions the report logic itself refuses to paper over.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ReportError {
    /// Configured budget name matches no budget visible to the token
    #[error("Budget '{name}' not found. Run `budget-reports budgets` to list available budgets")]
    BudgetNotFound { name: String },

    /// Configured category group has no counterpart in the budget
    #[error("Category group '{name}' not found in budget. Check [[category_groups]] in config.toml")]
    UnmatchedGroup { name: String },

    /// Malformed or out-of-range input
    #[error("Invalid value: {0}")]
    Validation(String),
}
