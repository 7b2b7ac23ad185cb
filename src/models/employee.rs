//! Employee model and related types.
//!
//! This module defines the [`Employee`] struct together with the personal,
//! employment and bank details the payroll run reads from it.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::shift::{ShiftAssignment, WorkShift};

/// Represents the employment status of an employee.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmploymentStatus {
    /// Employed and on the payroll.
    #[default]
    Active,
    /// Still in the probation period.
    Probation,
    /// Temporarily suspended.
    Suspended,
    /// Employment was terminated.
    Terminated,
    /// The employee resigned.
    Resigned,
}

/// Name details of an employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonalInfo {
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
}

/// Employment details that drive the payroll calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmploymentInfo {
    /// Monthly basic salary.
    pub basic_salary: Decimal,
    /// Department the employee belongs to (e.g., "science").
    pub department: String,
    /// Optional pay group used to split payroll runs.
    #[serde(default)]
    pub paygroup: Option<String>,
    /// Job title shown on the payslip.
    #[serde(default)]
    pub designation: Option<String>,
}

/// Bank details used for salary transfers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BankInfo {
    /// The account number salary is paid into.
    pub account_number: String,
    /// The name the account is held under.
    pub account_name: String,
    /// The bank's name.
    #[serde(default)]
    pub bank_name: Option<String>,
    /// The branch the account is held at.
    #[serde(default)]
    pub branch: Option<String>,
}

fn default_true() -> bool {
    true
}

/// Represents an employee whose salary is processed by the payroll engine.
///
/// Employees are owned by the HR module; the engine only reads them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    /// Unique identifier for the employee record.
    pub id: String,
    /// The human-facing employee number (e.g., "EMP-0042").
    pub employee_code: String,
    /// Name details.
    pub personal_info: PersonalInfo,
    /// Salary, department and pay group.
    pub employment_info: EmploymentInfo,
    /// Shift assignments; the first active one is used for overtime.
    #[serde(default)]
    pub shifts: Vec<ShiftAssignment>,
    /// Bank details for salary transfer.
    #[serde(default)]
    pub bank_info: Option<BankInfo>,
    /// Current employment status.
    #[serde(default)]
    pub employment_status: EmploymentStatus,
    /// Whether the employee record is active.
    #[serde(default = "default_true")]
    pub is_active: bool,
}

impl Employee {
    /// Returns the employee's display name.
    ///
    /// # Examples
    ///
    /// ```
    /// use payroll_engine::models::{Employee, EmploymentInfo, EmploymentStatus, PersonalInfo};
    /// use rust_decimal::Decimal;
    ///
    /// let employee = Employee {
    ///     id: "emp_001".to_string(),
    ///     employee_code: "EMP-0001".to_string(),
    ///     personal_info: PersonalInfo {
    ///         first_name: "Nimal".to_string(),
    ///         last_name: "Perera".to_string(),
    ///     },
    ///     employment_info: EmploymentInfo {
    ///         basic_salary: Decimal::from(66_000),
    ///         department: "science".to_string(),
    ///         paygroup: None,
    ///         designation: None,
    ///     },
    ///     shifts: vec![],
    ///     bank_info: None,
    ///     employment_status: EmploymentStatus::Active,
    ///     is_active: true,
    /// };
    /// assert_eq!(employee.full_name(), "Nimal Perera");
    /// ```
    pub fn full_name(&self) -> String {
        format!(
            "{} {}",
            self.personal_info.first_name, self.personal_info.last_name
        )
    }

    /// Returns the monthly basic salary.
    pub fn basic_salary(&self) -> Decimal {
        self.employment_info.basic_salary
    }

    /// Returns the shift of the first active shift assignment, if any.
    pub fn active_shift(&self) -> Option<&WorkShift> {
        self.shifts
            .iter()
            .find(|assignment| assignment.is_active)
            .map(|assignment| &assignment.shift)
    }

    /// Returns true if the employee should be included in a payroll run.
    pub fn is_payroll_eligible(&self) -> bool {
        self.is_active && self.employment_status == EmploymentStatus::Active
    }
}
