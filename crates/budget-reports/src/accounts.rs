//! Retirement account selection

use rust_decimal::Decimal;
use std::collections::BTreeSet;

use crate::units::to_decimal;
use crate::ynab::Account;

/// Accounts whose name is on the retirement allowlist, in source order
pub fn select_retirement_accounts<'a>(
    accounts: &'a [Account],
    names: &BTreeSet<String>,
) -> Vec<&'a Account> {
    accounts
        .iter()
        .filter(|account| names.contains(&account.name))
        .collect()
}

/// Allowlisted names that matched no account
pub fn unmatched_names<'a>(accounts: &[Account], names: &'a BTreeSet<String>) -> Vec<&'a str> {
    names
        .iter()
        .filter(|name| !accounts.iter().any(|account| &account.name == *name))
        .map(String::as_str)
        .collect()
}

/// Total balance in currency units. Empty input sums to zero.
pub fn sum_balances(accounts: &[&Account]) -> Decimal {
    accounts
        .iter()
        .map(|account| to_decimal(account.balance))
        .sum()
}
