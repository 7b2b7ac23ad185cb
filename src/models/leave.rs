//! Leave records.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::PayrollPeriod;

/// The kind of leave taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeaveType {
    /// Casual leave.
    Casual,
    /// Sick leave.
    Sick,
    /// Annual leave.
    Annual,
    /// Maternity leave.
    Maternity,
    /// Paternity leave.
    Paternity,
    /// Emergency leave.
    Emergency,
}

/// Approval state of a leave request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeaveStatus {
    /// Awaiting approval.
    Pending,
    /// Approved by a manager.
    Approved,
    /// Rejected by a manager.
    Rejected,
    /// Withdrawn by the employee.
    Cancelled,
}

/// A leave request covering a date range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveRecord {
    /// The employee who requested the leave.
    pub employee_id: String,
    /// The kind of leave.
    pub leave_type: LeaveType,
    /// First day of leave (inclusive).
    pub start_date: NaiveDate,
    /// Last day of leave (inclusive).
    pub end_date: NaiveDate,
    /// Number of days the employee is entitled to for this request.
    #[serde(default)]
    pub entitled_days: u32,
    /// Number of days taken.
    pub total_days: u32,
    /// Approval state.
    pub status: LeaveStatus,
}

impl LeaveRecord {
    /// Returns true if the leave starts or ends within the period.
    pub fn touches_period(&self, period: &PayrollPeriod) -> bool {
        period.contains_date(self.start_date) || period.contains_date(self.end_date)
    }

    /// Returns true if the leave starts within the period.
    ///
    /// Excess days of a leave spanning two months are charged to the month
    /// it starts in.
    pub fn starts_in(&self, period: &PayrollPeriod) -> bool {
        period.contains_date(self.start_date)
    }

    /// Returns the number of days taken beyond the entitlement.
    pub fn excess_days(&self) -> u32 {
        self.total_days.saturating_sub(self.entitled_days)
    }

    /// Returns true if the leave has been approved.
    pub fn is_approved(&self) -> bool {
        self.status == LeaveStatus::Approved
    }
}
