//! Month selection for the month-scoped expense report

use chrono::{Datelike, NaiveDate};
use std::fmt;
use std::io::{self, BufRead, Write};
use std::str::FromStr;

use crate::constants::CURRENT_MONTH;
use crate::error::ReportError;

/// Budget month to report on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonthSelector {
    /// Whatever month the service considers current
    Current,
    /// First day of a specific month
    Month(NaiveDate),
}

impl MonthSelector {
    /// Select the month containing `date` (day truncated to the 1st)
    pub fn containing(date: NaiveDate) -> Self {
        // with_day(1) cannot fail for a valid date
        MonthSelector::Month(date.with_day(1).unwrap_or(date))
    }
}

impl fmt::Display for MonthSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MonthSelector::Current => write!(f, "{}", CURRENT_MONTH),
            MonthSelector::Month(date) => write!(f, "{}", date.format("%Y-%m-%d")),
        }
    }
}

impl FromStr for MonthSelector {
    type Err = ReportError;

    /// Accepts "current", "YYYY-MM" or "YYYY-MM-DD"
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case(CURRENT_MONTH) {
            return Ok(MonthSelector::Current);
        }

        let date = NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .or_else(|_| NaiveDate::parse_from_str(&format!("{}-01", s), "%Y-%m-%d"))
            .map_err(|_| {
                ReportError::Validation(format!(
                    "month '{}' - use 'current', YYYY-MM or YYYY-MM-DD",
                    s
                ))
            })?;

        Ok(MonthSelector::containing(date))
    }
}

/// Ask for a month on stdin. A blank answer means the current month.
pub fn prompt_for_month() -> anyhow::Result<MonthSelector> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("Month to report (YYYY-MM, blank for current): ");
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            // EOF - nothing more to read
            return Ok(MonthSelector::Current);
        }

        if line.trim().is_empty() {
            return Ok(MonthSelector::Current);
        }

        match line.parse() {
            Ok(month) => return Ok(month),
            Err(e) => eprintln!("  {}", e),
        }
    }
}
