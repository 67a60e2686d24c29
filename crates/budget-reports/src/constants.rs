//! Centralized constants for the budget report tool
//!
//! Budget-specific settings (token, budget name, groups) live in config.toml.

// =============================================================================
// API Endpoints
// =============================================================================

/// YNAB API base URL
pub const YNAB_API_BASE: &str = "https://api.ynab.com/v1";

/// Default HTTP request timeout
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

// =============================================================================
// Units
// =============================================================================

/// Milliunits per currency unit (YNAB stores $1.00 as 1000)
pub const MILLIUNITS_PER_UNIT: i64 = 1000;

/// Months per year, for monthly income projection
pub const MONTHS_PER_YEAR: i64 = 12;

/// Currency symbol used by the report formatter
pub const CURRENCY_SYMBOL: &str = "$";

// =============================================================================
// Category Group Naming Convention
// =============================================================================

/// Prefix expected on budgeted-mode group names
pub const FIXED_GROUP_PREFIX: &str = "Fixed";

/// Prefix expected on activity-mode group names
pub const FLEX_GROUP_PREFIX: &str = "Flex";

// =============================================================================
// File Names
// =============================================================================

/// Default config file path
pub const CONFIG_FILENAME: &str = "config.toml";

/// Month sentinel understood by the months endpoint
pub const CURRENT_MONTH: &str = "current";
