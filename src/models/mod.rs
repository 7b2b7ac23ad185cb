//! Core data models for the payroll engine.
//!
//! This module contains the domain models read and produced by a payroll run.

mod attendance;
mod employee;
mod leave;
mod pay_period;
mod payroll_result;
mod payslip;
mod shift;
mod statutory;

pub use attendance::{AttendanceRecord, AttendanceStatus};
pub use employee::{BankInfo, Employee, EmploymentInfo, EmploymentStatus, PersonalInfo};
pub use leave::{LeaveRecord, LeaveStatus, LeaveType};
pub use pay_period::PayrollPeriod;
pub use payroll_result::{
    AllowanceBreakdown, AttendanceAdjustments, AuditStep, AuditTrace, AuditWarning,
    OtherDeductions, OvertimeBreakdown, PaymentDetails, PaymentMethod, PaymentStatus,
    PayrollBreakdown, PayrollResult, PayrollSummary, StatutoryContributions,
};
pub use payslip::{
    CompanyInfo, EmployerContributions, Payslip, PayslipDeductions, PayslipEarnings,
    PayslipEmployee,
};
pub use shift::{ShiftAssignment, WorkShift};
pub use statutory::{StatutoryConfig, StatutoryInfo, StatutoryRates};
