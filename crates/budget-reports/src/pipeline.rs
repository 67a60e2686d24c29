//! Report run: fetch, reduce, format
//!
//! Fetches are issued one at a time, each awaited before the next. Both
//! reports are fully computed before anything is returned for printing.

use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::accounts::{select_retirement_accounts, sum_balances, unmatched_names};
use crate::categories::resolve_groups;
use crate::config::Config;
use crate::error::ReportError;
use crate::expenditure::{
    ExpenditureReport, compute_expenditure_report, values_from_groups, values_from_month,
};
use crate::month::MonthSelector;
use crate::reports::{ExpenditureSummary, ReportOutput, RetirementSummary};
use crate::retirement::{RetirementReport, compute_retirement_report};
use crate::ynab::BudgetService;

/// Which reports a run produces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum ReportKind {
    #[default]
    All,
    Retirement,
    Expenses,
}

impl ReportKind {
    fn includes_retirement(self) -> bool {
        matches!(self, ReportKind::All | ReportKind::Retirement)
    }

    fn includes_expenses(self) -> bool {
        matches!(self, ReportKind::All | ReportKind::Expenses)
    }
}

/// Look up the configured budget's id by exact name (first match wins)
pub async fn find_budget_id<S: BudgetService>(service: &S, budget_name: &str) -> Result<String> {
    let budgets = service
        .list_budgets()
        .await
        .context("Failed to list budgets")?;

    budgets
        .into_iter()
        .find(|budget| budget.name == budget_name)
        .map(|budget| budget.id)
        .ok_or_else(|| {
            ReportError::BudgetNotFound {
                name: budget_name.to_string(),
            }
            .into()
        })
}

/// Sum the retirement accounts and project income
pub async fn retirement_report<S: BudgetService>(
    service: &S,
    config: &Config,
    budget_id: &str,
) -> Result<RetirementReport> {
    info!("Fetching accounts...");
    let accounts = service
        .list_accounts(budget_id)
        .await
        .with_context(|| format!("Failed to fetch accounts for budget '{}'", config.budget_name))?;

    for name in unmatched_names(&accounts, &config.retirement_account_names) {
        warn!("retirement account '{}' not found in budget; skipping it", name);
    }

    let selected = select_retirement_accounts(&accounts, &config.retirement_account_names);
    if selected.is_empty() {
        warn!("no retirement accounts matched; retirement balance will be $0.00");
    }
    info!("  {} retirement account(s) selected", selected.len());

    let total_balance = sum_balances(&selected);
    Ok(compute_retirement_report(total_balance, config.safe_withdrawal_rate)?)
}

/// Aggregate configured category groups into monthly expenses.
///
/// With no month, each group's own categories are used as the service
/// returns them. With a month, that month's category rows are fetched and
/// attributed to groups by id.
pub async fn expenditure_report<S: BudgetService>(
    service: &S,
    config: &Config,
    budget_id: &str,
    month: Option<MonthSelector>,
) -> Result<ExpenditureReport> {
    info!("Fetching category groups...");
    let remote_groups = service
        .list_category_groups(budget_id)
        .await
        .with_context(|| {
            format!(
                "Failed to fetch category groups for budget '{}'",
                config.budget_name
            )
        })?;

    let resolved = resolve_groups(&remote_groups, &config.category_groups)?;

    let values = match month {
        None => values_from_groups(&resolved),
        Some(month) => {
            info!("Fetching categories for {}...", month);
            let month_categories = service
                .get_month_categories(budget_id, month)
                .await
                .with_context(|| format!("Failed to fetch categories for month {}", month))?;
            values_from_month(&resolved, &month_categories)
        }
    };

    Ok(compute_expenditure_report(&values))
}

/// Run the selected reports against one budget
pub async fn run<S: BudgetService>(
    service: &S,
    config: &Config,
    kind: ReportKind,
    month: Option<MonthSelector>,
) -> Result<ReportOutput> {
    for warning in config.naming_warnings() {
        warn!("{}", warning);
    }

    info!("Looking up budget '{}'...", config.budget_name);
    let budget_id = find_budget_id(service, &config.budget_name).await?;

    let mut output = ReportOutput::default();

    if kind.includes_retirement() {
        let report = retirement_report(service, config, &budget_id).await?;
        output.retirement = Some(RetirementSummary::from(&report));
    }

    if kind.includes_expenses() {
        let report = expenditure_report(service, config, &budget_id, month).await?;
        output.expenditure = Some(ExpenditureSummary::new(&report, month));
    }

    Ok(output)
}
