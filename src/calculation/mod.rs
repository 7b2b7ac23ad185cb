//! Calculation logic for the payroll engine.
//!
//! This module contains one function per payroll rule (attendance
//! adjustments, overtime, allowances, other deductions, statutory
//! contributions and PAYE) and the [`PayrollCalculator`] that applies them
//! in order for an employee and period.

mod allowances;
mod attendance_adjustments;
mod deductions;
mod overtime;
mod paye;
mod payroll;
mod statutory;

pub use allowances::{AllowanceResult, calculate_allowances};
pub use attendance_adjustments::{
    AttendanceAdjustmentResult, calculate_attendance_adjustments, per_day_salary,
};
pub use deductions::{OtherDeductionResult, calculate_other_deductions};
pub use overtime::{
    OvertimeKind, OvertimeResult, calculate_overtime, classify_overtime, overtime_hourly_rate,
};
pub use paye::{MONTHS_PER_YEAR, PayeResult, annual_tax, calculate_paye, find_bracket};
pub use payroll::{Calendars, PayrollCalculator, PayrollInputs, compute_payroll};
pub use statutory::{StatutoryResult, calculate_statutory_contributions};
