//! Attendance records.
//!
//! One [`AttendanceRecord`] exists per employee per working date. The payroll
//! calculation reads them to derive absences, lateness and overtime.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The attendance outcome for a single day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttendanceStatus {
    /// The employee worked the day.
    Present,
    /// The employee did not attend.
    Absent,
    /// The employee worked half the day.
    HalfDay,
    /// The employee was on leave.
    Leave,
    /// The date was a holiday.
    Holiday,
}

/// An attendance entry for an employee on a date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    /// The employee this record belongs to.
    pub employee_id: String,
    /// The attendance date.
    pub date: NaiveDate,
    /// Attendance outcome for the date.
    pub status: AttendanceStatus,
    /// Minutes the employee arrived late.
    #[serde(default)]
    pub late_minutes: u32,
    /// Minutes worked beyond the shift.
    #[serde(default)]
    pub overtime_minutes: u32,
}

impl AttendanceRecord {
    /// Returns the overtime worked as fractional hours.
    ///
    /// # Examples
    ///
    /// ```
    /// use payroll_engine::models::{AttendanceRecord, AttendanceStatus};
    /// use chrono::NaiveDate;
    /// use rust_decimal::Decimal;
    ///
    /// let record = AttendanceRecord {
    ///     employee_id: "emp_001".to_string(),
    ///     date: NaiveDate::from_ymd_opt(2024, 3, 4).unwrap(),
    ///     status: AttendanceStatus::Present,
    ///     late_minutes: 0,
    ///     overtime_minutes: 90,
    /// };
    /// assert_eq!(record.overtime_hours(), Decimal::new(15, 1));
    /// ```
    pub fn overtime_hours(&self) -> Decimal {
        Decimal::from(self.overtime_minutes) / Decimal::from(60)
    }
}
