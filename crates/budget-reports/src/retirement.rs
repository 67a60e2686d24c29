//! Retirement income projection
//!
//! Applies a safe withdrawal rate to the combined retirement balance:
//! annual income = balance * rate, monthly income = annual / 12.

use rust_decimal::Decimal;

use crate::constants::MONTHS_PER_YEAR;
use crate::error::ReportError;

/// Projected retirement income
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetirementReport {
    pub total_balance: Decimal,
    pub annual_income: Decimal,
    pub monthly_income: Decimal,
}

/// Project income from a total balance and withdrawal rate.
///
/// A negative balance has no meaningful withdrawal projection and is rejected.
pub fn compute_retirement_report(
    total_balance: Decimal,
    safe_withdrawal_rate: Decimal,
) -> Result<RetirementReport, ReportError> {
    if total_balance < Decimal::ZERO {
        return Err(ReportError::Validation(format!(
            "retirement balance is negative ({}); check retirement_account_names",
            total_balance
        )));
    }
    if safe_withdrawal_rate < Decimal::ZERO {
        return Err(ReportError::Validation(format!(
            "safe withdrawal rate is negative ({})",
            safe_withdrawal_rate
        )));
    }

    let annual_income = total_balance * safe_withdrawal_rate;
    let monthly_income = annual_income / Decimal::from(MONTHS_PER_YEAR);

    Ok(RetirementReport {
        total_balance,
        annual_income,
        monthly_income,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_four_percent_rule() {
        let report = compute_retirement_report(dec!(100000), dec!(0.04)).unwrap();
        assert_eq!(report.total_balance, dec!(100000));
        assert_eq!(report.annual_income, dec!(4000));
        assert_eq!(report.monthly_income.round_dp(2), dec!(333.33));
    }

    #[test]
    fn test_zero_balance() {
        let report = compute_retirement_report(Decimal::ZERO, dec!(0.04)).unwrap();
        assert!(report.annual_income.is_zero());
        assert!(report.monthly_income.is_zero());
    }

    #[test]
    fn test_rejects_negative_balance() {
        assert!(matches!(
            compute_retirement_report(dec!(-1), dec!(0.04)),
            Err(ReportError::Validation(_))
        ));
    }

    #[test]
    fn test_rejects_negative_rate() {
        assert!(compute_retirement_report(dec!(1000), dec!(-0.01)).is_err());
    }
}
