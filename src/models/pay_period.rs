//! Payroll period model.
//!
//! This module contains the [`PayrollPeriod`] type: a calendar month
//! identified as year and month and written as `"YYYY-MM"`.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// A calendar month over which attendance, leave and overtime are aggregated.
///
/// # Example
///
/// ```
/// use payroll_engine::models::PayrollPeriod;
/// use chrono::NaiveDate;
///
/// let period: PayrollPeriod = "2024-02".parse().unwrap();
///
/// assert_eq!(period.start_date(), NaiveDate::from_ymd_opt(2024, 2, 1).unwrap());
/// assert_eq!(period.end_date(), NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
/// assert!(period.contains_date(NaiveDate::from_ymd_opt(2024, 2, 15).unwrap()));
/// assert_eq!(period.to_string(), "2024-02");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PayrollPeriod {
    year: i32,
    month: u32,
    start: NaiveDate,
    end: NaiveDate,
}

impl PayrollPeriod {
    /// Creates a period for the given year and month.
    ///
    /// Returns `InvalidPeriod` if the month is outside 1..=12 or the year is
    /// outside the supported calendar range.
    pub fn new(year: i32, month: u32) -> EngineResult<Self> {
        let invalid = |message: &str| EngineError::InvalidPeriod {
            value: format!("{:04}-{:02}", year, month),
            message: message.to_string(),
        };

        if !(1..=12).contains(&month) {
            return Err(invalid("month must be between 1 and 12"));
        }

        let start =
            NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(|| invalid("year out of range"))?;
        let (next_year, next_month) = if month == 12 {
            (year + 1, 1)
        } else {
            (year, month + 1)
        };
        let end = NaiveDate::from_ymd_opt(next_year, next_month, 1)
            .and_then(|first_of_next| first_of_next.pred_opt())
            .ok_or_else(|| invalid("year out of range"))?;

        Ok(Self {
            year,
            month,
            start,
            end,
        })
    }

    /// Returns the calendar year.
    pub fn year(&self) -> i32 {
        self.year
    }

    /// Returns the calendar month (1-12).
    pub fn month(&self) -> u32 {
        self.month
    }

    /// Returns the first day of the period.
    pub fn start_date(&self) -> NaiveDate {
        self.start
    }

    /// Returns the last day of the period.
    pub fn end_date(&self) -> NaiveDate {
        self.end
    }

    /// Checks if a given date falls within this period (inclusive).
    pub fn contains_date(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }
}

impl fmt::Display for PayrollPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for PayrollPeriod {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |message: &str| EngineError::InvalidPeriod {
            value: s.to_string(),
            message: message.to_string(),
        };

        let (year, month) = s
            .trim()
            .split_once('-')
            .ok_or_else(|| invalid("expected format YYYY-MM"))?;

        if year.len() != 4 || month.is_empty() || month.len() > 2 {
            return Err(invalid("expected format YYYY-MM"));
        }

        let year: i32 = year.parse().map_err(|_| invalid("year is not a number"))?;
        let month: u32 = month.parse().map_err(|_| invalid("month is not a number"))?;

        Self::new(year, month).map_err(|_| invalid("month must be between 1 and 12"))
    }
}

impl TryFrom<String> for PayrollPeriod {
    type Error = EngineError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<PayrollPeriod> for String {
    fn from(period: PayrollPeriod) -> Self {
        period.to_string()
    }
}
