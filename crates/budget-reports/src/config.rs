//! Configuration for the budget report tool

use anyhow::{Context, Result};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::collections::{BTreeSet, HashSet};
use std::path::Path;
use std::str::FromStr;

use crate::constants;
use crate::error::ReportError;

// =============================================================================
// File-based Configuration (config.toml)
// =============================================================================

/// Configuration loaded from config.toml
#[derive(Debug, Deserialize)]
pub struct FileConfig {
    pub api_keys: ApiKeys,
    pub budget: BudgetSection,
    #[serde(default)]
    pub category_groups: Vec<CategoryGroupConfig>,
    #[serde(default)]
    pub http: Option<HttpConfig>,
}

/// API keys section
#[derive(Debug, Deserialize)]
pub struct ApiKeys {
    /// YNAB personal access token
    pub ynab: String,
}

/// Budget section
#[derive(Debug, Deserialize)]
pub struct BudgetSection {
    /// Budget name as shown in YNAB
    pub name: String,
    /// Accounts that count toward retirement savings
    #[serde(default)]
    pub retirement_account_names: Vec<String>,
    /// Annual withdrawal rate, e.g. 0.04
    pub safe_withdrawal_rate: f64,
}

/// Optional HTTP overrides
#[derive(Debug, Default, Deserialize)]
pub struct HttpConfig {
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

/// Which raw category field a group's expenses are read from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountingMode {
    /// Planned spend (fixed bills)
    Budgeted,
    /// Actual outflow (flexible spending)
    Activity,
}

/// Essential/nonessential tag for the essential-spending subtotal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Classification {
    Essential,
    Nonessential,
}

/// One `[[category_groups]]` entry
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CategoryGroupConfig {
    pub name: String,
    pub accounting_mode: AccountingMode,
    pub classification: Classification,
}

impl FileConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::parse(&content)
    }

    /// Parse configuration from TOML text
    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).with_context(|| {
            "Failed to parse config.toml. Check for:\n\
             - Missing required fields (api_keys.ynab, budget.name, budget.safe_withdrawal_rate)\n\
             - accounting_mode other than \"budgeted\" or \"activity\"\n\
             - classification other than \"essential\" or \"nonessential\"\n\n\
             See config.toml.example for the expected format."
        })
    }
}

// =============================================================================
// Runtime Configuration
// =============================================================================

/// Validated configuration for one report run
#[derive(Debug, Clone)]
pub struct Config {
    /// YNAB personal access token
    pub access_token: String,
    /// Budget to report on
    pub budget_name: String,
    /// Retirement account allowlist
    pub retirement_account_names: BTreeSet<String>,
    /// Category groups to include, in report order
    pub category_groups: Vec<CategoryGroupConfig>,
    /// Annual withdrawal rate
    pub safe_withdrawal_rate: Decimal,
    /// API base URL
    pub base_url: String,
    /// Per-request timeout
    pub request_timeout_secs: u64,
}

impl Config {
    /// Create config from file config and optional access token override
    pub fn from_file(
        file_config: &FileConfig,
        access_token: Option<String>,
    ) -> Result<Self, ReportError> {
        let access_token = access_token.unwrap_or_else(|| file_config.api_keys.ynab.clone());
        if access_token.trim().is_empty() {
            return Err(ReportError::Validation(
                "api_keys.ynab must not be empty".to_string(),
            ));
        }

        let budget = &file_config.budget;
        if budget.name.trim().is_empty() {
            return Err(ReportError::Validation(
                "budget.name must not be empty".to_string(),
            ));
        }

        let safe_withdrawal_rate = parse_rate(budget.safe_withdrawal_rate)?;

        let mut seen = HashSet::new();
        for group in &file_config.category_groups {
            if !seen.insert(group.name.as_str()) {
                return Err(ReportError::Validation(format!(
                    "category group '{}' is configured more than once",
                    group.name
                )));
            }
        }

        let http = file_config.http.as_ref();

        Ok(Self {
            access_token,
            budget_name: budget.name.clone(),
            retirement_account_names: budget.retirement_account_names.iter().cloned().collect(),
            category_groups: file_config.category_groups.clone(),
            safe_withdrawal_rate,
            base_url: http
                .and_then(|h| h.base_url.clone())
                .unwrap_or_else(|| constants::YNAB_API_BASE.to_string())
                .trim_end_matches('/')
                .to_string(),
            request_timeout_secs: http
                .and_then(|h| h.request_timeout_secs)
                .unwrap_or(constants::DEFAULT_REQUEST_TIMEOUT_SECS),
        })
    }

    /// Groups whose names don't follow the Fixed/Flex naming convention.
    ///
    /// Purely advisory: the declared accounting_mode is what the report uses.
    pub fn naming_warnings(&self) -> Vec<String> {
        self.category_groups
            .iter()
            .filter_map(|group| {
                let expected = match group.accounting_mode {
                    AccountingMode::Budgeted => constants::FIXED_GROUP_PREFIX,
                    AccountingMode::Activity => constants::FLEX_GROUP_PREFIX,
                };
                if group.name.starts_with(expected) {
                    None
                } else {
                    Some(format!(
                        "category group '{}' uses {:?} accounting but its name doesn't start with '{}'",
                        group.name, group.accounting_mode, expected
                    ))
                }
            })
            .collect()
    }
}

/// Convert the configured rate to a `Decimal`, keeping the digits as written
fn parse_rate(rate: f64) -> Result<Decimal, ReportError> {
    if !rate.is_finite() || !(0.0..=1.0).contains(&rate) {
        return Err(ReportError::Validation(format!(
            "budget.safe_withdrawal_rate must be between 0 and 1 (got {})",
            rate
        )));
    }

    // f64 Display prints the shortest round-trip form, so 0.04 stays 0.04
    Decimal::from_str(&rate.to_string()).map_err(|e| {
        ReportError::Validation(format!("budget.safe_withdrawal_rate {}: {}", rate, e))
    })
}

/// Mask an access token for safe logging
pub fn mask_token(token: &str) -> String {
    let visible: String = token.chars().take(4).collect();
    if token.chars().count() <= 8 {
        "****".to_string()
    } else {
        format!("{}****", visible)
    }
}
