//! Holiday and night-shift lookups used by the overtime rule.
//!
//! The calculator never decides on its own whether a date is a holiday or
//! whether a shift counts as a night shift. Both questions go through the
//! [`HolidayCalendar`] and [`ShiftPolicy`] traits, which the host supplies.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::WorkShift;

/// A named holiday.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Holiday {
    /// The date of the holiday.
    pub date: NaiveDate,
    /// The name of the holiday.
    pub name: String,
}

/// Answers whether a date is a holiday.
pub trait HolidayCalendar: Send + Sync {
    /// Returns true if `date` is a holiday.
    fn is_holiday(&self, date: NaiveDate) -> bool;
}

/// Answers whether work on a date under a shift counts as night work.
pub trait ShiftPolicy: Send + Sync {
    /// Returns true if `shift` worked on `date` is a night shift.
    fn is_night_shift(&self, date: NaiveDate, shift: &WorkShift) -> bool;
}

/// A calendar without holidays.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoHolidays;

impl HolidayCalendar for NoHolidays {
    fn is_holiday(&self, _date: NaiveDate) -> bool {
        false
    }
}

/// A calendar backed by a fixed set of dates.
///
/// # Example
///
/// ```
/// use payroll_engine::calendar::{HolidayCalendar, HolidayList};
/// use chrono::NaiveDate;
///
/// let christmas = NaiveDate::from_ymd_opt(2024, 12, 25).unwrap();
/// let calendar = HolidayList::new([christmas]);
///
/// assert!(calendar.is_holiday(christmas));
/// assert!(!calendar.is_holiday(christmas.succ_opt().unwrap()));
/// ```
#[derive(Debug, Clone, Default)]
pub struct HolidayList {
    dates: BTreeSet<NaiveDate>,
}

impl HolidayList {
    /// Creates a calendar from a collection of dates.
    pub fn new(dates: impl IntoIterator<Item = NaiveDate>) -> Self {
        Self {
            dates: dates.into_iter().collect(),
        }
    }

    /// Number of distinct holiday dates.
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    /// Returns true if the calendar has no holidays.
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }
}

impl HolidayCalendar for HolidayList {
    fn is_holiday(&self, date: NaiveDate) -> bool {
        self.dates.contains(&date)
    }
}

/// Uses the night-shift flag carried by the assigned shift.
#[derive(Debug, Clone, Copy, Default)]
pub struct AssignedShiftPolicy;

impl ShiftPolicy for AssignedShiftPolicy {
    fn is_night_shift(&self, _date: NaiveDate, shift: &WorkShift) -> bool {
        shift.is_night_shift
    }
}
