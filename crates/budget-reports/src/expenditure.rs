//! Monthly expense aggregation
//!
//! Each configured group contributes either its budgeted amounts (fixed
//! bills, known in advance) or its actual outflow (flexible spending). The
//! declared `accounting_mode` decides which; the group name is never parsed.

use rust_decimal::Decimal;
use std::collections::HashMap;
use tracing::{debug, warn};

use crate::categories::{ResolvedPair, bucket_month_categories, group_id_lookup};
use crate::config::{AccountingMode, Classification};
use crate::units::{outflow_to_spend, to_decimal};
use crate::ynab::RemoteCategory;

/// Expense total for one configured group
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedGroup {
    pub name: String,
    pub classification: Classification,
    pub total_value: Decimal,
}

/// Essential and overall monthly expenses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpenditureReport {
    pub essential_total: Decimal,
    pub grand_total: Decimal,
}

/// Sum the field selected by `mode`. No categories sums to zero.
pub fn compute_group_value(mode: AccountingMode, categories: &[&RemoteCategory]) -> Decimal {
    categories
        .iter()
        .map(|category| match mode {
            AccountingMode::Budgeted => to_decimal(category.budgeted),
            AccountingMode::Activity => outflow_to_spend(category.activity),
        })
        .sum()
}

/// Group totals using each group's own categories (category groups endpoint)
pub fn values_from_groups(resolved: &[ResolvedPair<'_>]) -> Vec<ResolvedGroup> {
    resolved
        .iter()
        .map(|(config, group)| {
            let categories: Vec<&RemoteCategory> = group.categories.iter().collect();
            resolve_group(&config.name, config.accounting_mode, config.classification, &categories)
        })
        .collect()
}

/// Group totals using month-scoped category rows, attributed by group id
pub fn values_from_month(
    resolved: &[ResolvedPair<'_>],
    month_categories: &[RemoteCategory],
) -> Vec<ResolvedGroup> {
    let lookup = group_id_lookup(resolved);
    let mut buckets: HashMap<String, Vec<&RemoteCategory>> =
        bucket_month_categories(month_categories, &lookup);

    resolved
        .iter()
        .map(|(config, _)| {
            let categories = buckets.remove(&config.name).unwrap_or_default();
            resolve_group(&config.name, config.accounting_mode, config.classification, &categories)
        })
        .collect()
}

fn resolve_group(
    name: &str,
    mode: AccountingMode,
    classification: Classification,
    categories: &[&RemoteCategory],
) -> ResolvedGroup {
    if categories.is_empty() {
        warn!("category group '{}' has no categories; counting it as $0.00", name);
    }

    for category in categories {
        debug!(
            "  {} / {}: budgeted {} activity {}",
            name,
            category.name,
            to_decimal(category.budgeted),
            to_decimal(category.activity)
        );
    }

    ResolvedGroup {
        name: name.to_string(),
        classification,
        total_value: compute_group_value(mode, categories),
    }
}

/// Combine group totals into essential and overall expenses
pub fn compute_expenditure_report(groups: &[ResolvedGroup]) -> ExpenditureReport {
    if groups.is_empty() {
        warn!("no category groups configured; expenses will be $0.00");
    } else if !groups
        .iter()
        .any(|g| g.classification == Classification::Essential)
    {
        warn!("no essential category groups configured; essential expenses will be $0.00");
    }

    for group in groups {
        debug!("{} ({:?}): {}", group.name, group.classification, group.total_value);
    }

    let essential_total = groups
        .iter()
        .filter(|g| g.classification == Classification::Essential)
        .map(|g| g.total_value)
        .sum();
    let grand_total = groups.iter().map(|g| g.total_value).sum();

    ExpenditureReport {
        essential_total,
        grand_total,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::categories::resolve_groups;
    use crate::config::CategoryGroupConfig;
    use crate::ynab::RemoteCategoryGroup;
    use rust_decimal_macros::dec;

    fn category(group_id: &str, budgeted: i64, activity: i64) -> RemoteCategory {
        RemoteCategory {
            category_group_id: group_id.to_string(),
            name: String::new(),
            budgeted,
            activity,
        }
    }

    fn resolved(name: &str, classification: Classification, total: Decimal) -> ResolvedGroup {
        ResolvedGroup {
            name: name.to_string(),
            classification,
            total_value: total,
        }
    }

    #[test]
    fn test_activity_mode_inverts_outflow() {
        let a = category("g", 0, -5_000);
        let b = category("g", 0, -3_000);
        assert_eq!(compute_group_value(AccountingMode::Activity, &[&a, &b]), dec!(8.00));
    }

    #[test]
    fn test_budgeted_mode_uses_budgeted() {
        let a = category("g", 120_000, -99_000);
        assert_eq!(compute_group_value(AccountingMode::Budgeted, &[&a]), dec!(120.00));
    }

    #[test]
    fn test_empty_group_is_zero() {
        assert_eq!(compute_group_value(AccountingMode::Activity, &[]), Decimal::ZERO);
    }

    #[test]
    fn test_expenditure_report() {
        let groups = vec![
            resolved("Fixed Essential", Classification::Essential, dec!(100)),
            resolved("Flex Nonessential", Classification::Nonessential, dec!(50)),
        ];
        let report = compute_expenditure_report(&groups);
        assert_eq!(report.essential_total, dec!(100));
        assert_eq!(report.grand_total, dec!(150));
    }

    #[test]
    fn test_expenditure_report_without_essentials() {
        let groups = vec![resolved("Flex Nonessential", Classification::Nonessential, dec!(42.5))];
        let report = compute_expenditure_report(&groups);
        assert_eq!(report.essential_total, Decimal::ZERO);
        assert_eq!(report.grand_total, dec!(42.5));

        let empty = compute_expenditure_report(&[]);
        assert_eq!(empty.grand_total, Decimal::ZERO);
    }

    #[test]
    fn test_declared_mode_wins_over_name_prefix() {
        // Named like a fixed group but declared as activity
        let remote = vec![RemoteCategoryGroup {
            id: "g1".to_string(),
            name: "Fixed Essential".to_string(),
            categories: vec![category("g1", 1_500_000, -1_200_000)],
        }];
        let configs = vec![CategoryGroupConfig {
            name: "Fixed Essential".to_string(),
            accounting_mode: AccountingMode::Activity,
            classification: Classification::Essential,
        }];

        let pairs = resolve_groups(&remote, &configs).unwrap();
        let values = values_from_groups(&pairs);
        assert_eq!(values[0].total_value, dec!(1200));
    }

    #[test]
    fn test_values_from_month_attributes_by_id() {
        let remote = vec![
            RemoteCategoryGroup {
                id: "g1".to_string(),
                name: "Fixed Essential".to_string(),
                categories: vec![],
            },
            RemoteCategoryGroup {
                id: "g2".to_string(),
                name: "Flex Essential".to_string(),
                categories: vec![],
            },
        ];
        let configs = vec![
            CategoryGroupConfig {
                name: "Fixed Essential".to_string(),
                accounting_mode: AccountingMode::Budgeted,
                classification: Classification::Essential,
            },
            CategoryGroupConfig {
                name: "Flex Essential".to_string(),
                accounting_mode: AccountingMode::Activity,
                classification: Classification::Essential,
            },
        ];
        let month_rows = vec![
            category("g1", 1_000_000, -1_000_000),
            category("g2", 400_000, -325_500),
            category("g2", 100_000, 20_000),
            category("unconfigured", 7_000_000, -7_000_000),
        ];

        let pairs = resolve_groups(&remote, &configs).unwrap();
        let values = values_from_month(&pairs, &month_rows);

        assert_eq!(values.len(), 2);
        assert_eq!(values[0].name, "Fixed Essential");
        assert_eq!(values[0].total_value, dec!(1000));
        assert_eq!(values[1].total_value, dec!(305.5));

        let report = compute_expenditure_report(&values);
        assert_eq!(report.essential_total, dec!(1305.5));
        assert_eq!(report.grand_total, dec!(1305.5));
    }
}
