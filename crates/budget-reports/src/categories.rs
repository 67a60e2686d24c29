//! Category group resolution
//!
//! Matches configured groups to the budget's category groups by name. The
//! months endpoint only reports `category_group_id`, so month-scoped rows are
//! attributed through an id -> configured-name table built from the match.

use std::collections::HashMap;

use crate::config::CategoryGroupConfig;
use crate::error::ReportError;
use crate::ynab::{RemoteCategory, RemoteCategoryGroup};

/// A configured group paired with the remote group it matched
pub type ResolvedPair<'a> = (&'a CategoryGroupConfig, &'a RemoteCategoryGroup);

/// Match every configured group to a remote group by exact name.
///
/// Returns pairs in config order. The first configured group with no remote
/// counterpart is an error. Duplicate remote names resolve to the first.
pub fn resolve_groups<'a>(
    remote_groups: &'a [RemoteCategoryGroup],
    configs: &'a [CategoryGroupConfig],
) -> Result<Vec<ResolvedPair<'a>>, ReportError> {
    configs
        .iter()
        .map(|config| {
            remote_groups
                .iter()
                .find(|group| group.name == config.name)
                .map(|group| (config, group))
                .ok_or_else(|| ReportError::UnmatchedGroup {
                    name: config.name.clone(),
                })
        })
        .collect()
}

/// Remote group id -> configured group name, for configured groups only
pub fn group_id_lookup(resolved: &[ResolvedPair<'_>]) -> HashMap<String, String> {
    resolved
        .iter()
        .map(|(config, group)| (group.id.clone(), config.name.clone()))
        .collect()
}

/// Partition month-scoped category rows by configured group name.
///
/// Rows belonging to unconfigured groups are dropped. Configured groups with
/// no rows are absent from the map.
pub fn bucket_month_categories<'a>(
    categories: &'a [RemoteCategory],
    lookup: &HashMap<String, String>,
) -> HashMap<String, Vec<&'a RemoteCategory>> {
    let mut buckets: HashMap<String, Vec<&RemoteCategory>> = HashMap::new();

    for category in categories {
        if let Some(name) = lookup.get(&category.category_group_id) {
            buckets.entry(name.clone()).or_default().push(category);
        }
    }

    buckets
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{AccountingMode, Classification};

    fn config(name: &str, mode: AccountingMode) -> CategoryGroupConfig {
        CategoryGroupConfig {
            name: name.to_string(),
            accounting_mode: mode,
            classification: Classification::Essential,
        }
    }

    fn category(group_id: &str, budgeted: i64, activity: i64) -> RemoteCategory {
        RemoteCategory {
            category_group_id: group_id.to_string(),
            name: String::new(),
            budgeted,
            activity,
        }
    }

    fn group(id: &str, name: &str) -> RemoteCategoryGroup {
        RemoteCategoryGroup {
            id: id.to_string(),
            name: name.to_string(),
            categories: vec![category(id, 1_000, -1_000)],
        }
    }

    fn remote() -> Vec<RemoteCategoryGroup> {
        vec![
            group("g0", "Internal Master Category"),
            group("g1", "Fixed Essential"),
            group("g2", "Flex Essential"),
            group("g3", "Savings Goals"),
        ]
    }

    #[test]
    fn test_resolve_one_entry_per_config() {
        let remote = remote();
        let configs = vec![
            config("Flex Essential", AccountingMode::Activity),
            config("Fixed Essential", AccountingMode::Budgeted),
        ];

        let resolved = resolve_groups(&remote, &configs).unwrap();
        assert_eq!(resolved.len(), 2);
        assert_eq!(resolved[0].0.name, "Flex Essential");
        assert_eq!(resolved[0].1.id, "g2");
        assert_eq!(resolved[1].1.id, "g1");
    }

    #[test]
    fn test_resolve_unmatched_group() {
        let remote = remote();
        let configs = vec![
            config("Fixed Essential", AccountingMode::Budgeted),
            config("Fixed Nonessential", AccountingMode::Budgeted),
        ];

        let err = resolve_groups(&remote, &configs).unwrap_err();
        assert_eq!(
            err,
            ReportError::UnmatchedGroup {
                name: "Fixed Nonessential".to_string()
            }
        );
    }

    #[test]
    fn test_resolve_is_case_sensitive() {
        let remote = remote();
        let configs = vec![config("fixed essential", AccountingMode::Budgeted)];
        assert!(resolve_groups(&remote, &configs).is_err());
    }

    #[test]
    fn test_resolve_duplicate_remote_names_takes_first() {
        let mut remote = remote();
        remote.push(group("g9", "Fixed Essential"));
        let configs = vec![config("Fixed Essential", AccountingMode::Budgeted)];

        let resolved = resolve_groups(&remote, &configs).unwrap();
        assert_eq!(resolved[0].1.id, "g1");
    }

    #[test]
    fn test_lookup_and_bucketing() {
        let remote = remote();
        let configs = vec![
            config("Fixed Essential", AccountingMode::Budgeted),
            config("Flex Essential", AccountingMode::Activity),
        ];
        let resolved = resolve_groups(&remote, &configs).unwrap();
        let lookup = group_id_lookup(&resolved);

        assert_eq!(lookup.len(), 2);
        assert_eq!(lookup["g1"], "Fixed Essential");
        assert!(!lookup.contains_key("g3"));

        let month_rows = vec![
            category("g1", 100_000, 0),
            category("g3", 5_000, 0),
            category("g1", 20_000, -20_000),
        ];
        let buckets = bucket_month_categories(&month_rows, &lookup);

        assert_eq!(buckets["Fixed Essential"].len(), 2);
        assert!(!buckets.contains_key("Flex Essential"));
        assert_eq!(buckets.values().map(Vec::len).sum::<usize>(), 2);
    }
}
