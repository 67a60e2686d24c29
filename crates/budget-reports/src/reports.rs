//! Report rendering (currency strings and console summary)

use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;
use std::str::FromStr;

use crate::constants::CURRENCY_SYMBOL;
use crate::error::ReportError;
use crate::expenditure::ExpenditureReport;
use crate::month::MonthSelector;
use crate::retirement::RetirementReport;

/// Retirement report ready for display
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RetirementSummary {
    pub total_balance: String,
    pub annual_income: String,
    pub monthly_income: String,
}

/// Expense report ready for display
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExpenditureSummary {
    /// "this month" or e.g. "in May 2024"
    pub period: String,
    pub essential_expenses: String,
    pub total_expenses: String,
}

/// Everything one run prints
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReportOutput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retirement: Option<RetirementSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expenditure: Option<ExpenditureSummary>,
}

impl From<&RetirementReport> for RetirementSummary {
    fn from(report: &RetirementReport) -> Self {
        Self {
            total_balance: format_currency(report.total_balance),
            annual_income: format_currency(report.annual_income),
            monthly_income: format_currency(report.monthly_income),
        }
    }
}

impl ExpenditureSummary {
    pub fn new(report: &ExpenditureReport, month: Option<MonthSelector>) -> Self {
        let period = match month {
            Some(MonthSelector::Month(date)) => format!("in {}", date.format("%B %Y")),
            Some(MonthSelector::Current) | None => "this month".to_string(),
        };

        Self {
            period,
            essential_expenses: format_currency(report.essential_total),
            total_expenses: format_currency(report.grand_total),
        }
    }
}

// =============================================================================
// Currency Formatting
// =============================================================================

/// Format as US dollars: `$1,234.56`, `-$12.00`
pub fn format_currency(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let sign = if rounded < Decimal::ZERO { "-" } else { "" };

    let digits = format!("{:.2}", rounded.abs());
    let (whole, cents) = digits.split_once('.').unwrap_or((digits.as_str(), "00"));

    format!("{}{}{}.{}", sign, CURRENCY_SYMBOL, group_thousands(whole), cents)
}

/// Parse a string produced by `format_currency`
#[allow(dead_code)]
pub fn parse_currency(s: &str) -> Result<Decimal, ReportError> {
    let trimmed = s.trim();
    let (negative, rest) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed),
    };
    let rest = rest.strip_prefix(CURRENCY_SYMBOL).unwrap_or(rest);

    let value = Decimal::from_str(&rest.replace(',', ""))
        .map_err(|_| ReportError::Validation(format!("currency amount '{}'", s)))?;

    Ok(if negative { -value } else { value })
}

fn group_thousands(whole: &str) -> String {
    let mut out = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

// =============================================================================
// Console Output
// =============================================================================

/// Print the retirement income report
pub fn print_retirement(summary: &RetirementSummary) {
    println!();
    println!("RETIREMENT:");
    println!("  Total retirement funds:     {:>16}", summary.total_balance);
    println!("  Annual retirement income:   {:>16}", summary.annual_income);
    println!("  Monthly retirement income:  {:>16}", summary.monthly_income);
}

/// Print the expense report
pub fn print_expenditure(summary: &ExpenditureSummary) {
    let essential_label = format!("Essential expenses {}:", summary.period);
    let total_label = format!("Total expenses {}:", summary.period);
    let width = essential_label.len().max(total_label.len()) + 2;

    println!();
    println!("EXPENSES:");
    println!("  {:<width$}{:>16}", essential_label, summary.essential_expenses, width = width);
    println!("  {:<width$}{:>16}", total_label, summary.total_expenses, width = width);
}

/// Print every report in the output
pub fn print_all(output: &ReportOutput) {
    if let Some(retirement) = &output.retirement {
        print_retirement(retirement);
    }
    if let Some(expenditure) = &output.expenditure {
        print_expenditure(expenditure);
    }
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(dec!(0)), "$0.00");
        assert_eq!(format_currency(dec!(8)), "$8.00");
        assert_eq!(format_currency(dec!(999.999)), "$1,000.00");
        assert_eq!(format_currency(dec!(1234567.891)), "$1,234,567.89");
        assert_eq!(format_currency(dec!(-1234.5)), "-$1,234.50");
        assert_eq!(format_currency(dec!(100000)), "$100,000.00");
    }

    #[test]
    fn test_format_rounds_half_away_from_zero() {
        assert_eq!(format_currency(dec!(0.005)), "$0.01");
        assert_eq!(format_currency(dec!(-0.005)), "-$0.01");
        assert_eq!(format_currency(dec!(-0.004)), "$0.00");
    }

    #[test]
    fn test_format_then_parse_within_a_cent() {
        let samples = [
            dec!(0),
            dec!(333.3333333),
            dec!(-42.125),
            dec!(1234567.891),
            dec!(0.001),
            dec!(-987654321.555),
        ];
        for amount in samples {
            let parsed = parse_currency(&format_currency(amount)).unwrap();
            assert!(
                (parsed - amount).abs() <= dec!(0.01),
                "{} -> {}",
                amount,
                parsed
            );
        }
    }

    #[test]
    fn test_parse_currency_rejects_garbage() {
        assert!(parse_currency("$twelve").is_err());
    }

    #[test]
    fn test_retirement_summary() {
        let report = RetirementReport {
            total_balance: dec!(100000),
            annual_income: dec!(4000),
            monthly_income: dec!(4000) / dec!(12),
        };
        let summary = RetirementSummary::from(&report);
        assert_eq!(summary.total_balance, "$100,000.00");
        assert_eq!(summary.annual_income, "$4,000.00");
        assert_eq!(summary.monthly_income, "$333.33");
    }

    #[test]
    fn test_expenditure_summary_period() {
        let report = ExpenditureReport {
            essential_total: dec!(100),
            grand_total: dec!(150),
        };

        let current = ExpenditureSummary::new(&report, None);
        assert_eq!(current.period, "this month");
        assert_eq!(current.total_expenses, "$150.00");

        let may = MonthSelector::Month(NaiveDate::from_ymd_opt(2024, 5, 1).unwrap());
        let summary = ExpenditureSummary::new(&report, Some(may));
        assert_eq!(summary.period, "in May 2024");
    }

    #[test]
    fn test_json_skips_missing_reports() {
        let output = ReportOutput {
            retirement: None,
            expenditure: Some(ExpenditureSummary {
                period: "this month".to_string(),
                essential_expenses: "$1.00".to_string(),
                total_expenses: "$2.00".to_string(),
            }),
        };
        let json = serde_json::to_string(&output).unwrap();
        assert!(!json.contains("retirement"));
        assert!(json.contains("\"total_expenses\":\"$2.00\""));
    }
}
