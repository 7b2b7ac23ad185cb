//! Payroll calculation for one employee and period.
//!
//! [`compute_payroll`] applies every rule to already-fetched inputs and is
//! free of I/O. [`PayrollCalculator`] fetches those inputs through the
//! repositories and delegates to it.

use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;
use rust_decimal::Decimal;
use tracing::debug;
use uuid::Uuid;

use crate::calendar::{AssignedShiftPolicy, HolidayCalendar, NoHolidays, ShiftPolicy};
use crate::config::PayrollPolicy;
use crate::error::{EngineError, EngineResult};
use crate::models::{
    AttendanceRecord, AuditStep, AuditTrace, AuditWarning, Employee, LeaveRecord, PaymentDetails,
    PaymentMethod, PaymentStatus, PayrollBreakdown, PayrollPeriod, PayrollResult, PayrollSummary,
    StatutoryInfo,
};
use crate::repository::{
    AttendanceRepository, EmployeeRepository, LeaveRepository, StatutoryRepository,
};

use super::allowances::calculate_allowances;
use super::attendance_adjustments::calculate_attendance_adjustments;
use super::deductions::calculate_other_deductions;
use super::overtime::calculate_overtime;
use super::statutory::calculate_statutory_contributions;

/// Everything a payroll calculation reads.
#[derive(Debug, Clone)]
pub struct PayrollInputs<'a> {
    /// The employee being paid.
    pub employee: &'a Employee,
    /// The payroll period.
    pub period: PayrollPeriod,
    /// Attendance records dated inside the period.
    pub attendance: &'a [AttendanceRecord],
    /// Leave records touching the period.
    pub leaves: &'a [LeaveRecord],
    /// The employee's statutory rates.
    pub statutory: StatutoryInfo,
}

/// Holiday and night-shift lookups used by the overtime rule.
#[derive(Clone, Copy)]
pub struct Calendars<'a> {
    /// Holiday lookup.
    pub holidays: &'a dyn HolidayCalendar,
    /// Night-shift lookup.
    pub shift_policy: &'a dyn ShiftPolicy,
}

impl Default for Calendars<'_> {
    fn default() -> Self {
        Self {
            holidays: &NoHolidays,
            shift_policy: &AssignedShiftPolicy,
        }
    }
}

/// Validates the employee basic salary.
fn basic_salary_step(employee: &Employee, step_number: u32) -> EngineResult<(Decimal, AuditStep)> {
    let basic_salary = employee.basic_salary();
    if basic_salary < Decimal::ZERO {
        return Err(EngineError::InvalidEmployee {
            field: "employment_info.basic_salary".to_string(),
            message: format!("basic salary must not be negative, got {}", basic_salary),
        });
    }

    let audit_step = AuditStep {
        step_number,
        rule_id: "basic_salary".to_string(),
        rule_name: "Basic Salary".to_string(),
        input: serde_json::json!({
            "employee_id": employee.id,
            "employee_code": employee.employee_code
        }),
        output: serde_json::json!({
            "basic_salary": basic_salary.normalize().to_string()
        }),
        reasoning: format!("Monthly basic salary {} from employment record", basic_salary.normalize()),
    };

    Ok((basic_salary, audit_step))
}

/// Calculates the payroll of one employee for one period.
///
/// Steps run in a fixed order, each adding one audit step: basic salary,
/// attendance adjustments, overtime, allowances, other deductions,
/// statutory contributions and (for configured employees) PAYE.
///
/// # Errors
///
/// * `InvalidEmployee` if the basic salary is negative
/// * `CalculationError` if no PAYE bracket applies or net salary comes out
///   negative
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::{Calendars, PayrollInputs, compute_payroll};
/// use payroll_engine::config::PayrollPolicy;
/// use payroll_engine::models::{
///     Employee, EmploymentInfo, PayrollPeriod, PersonalInfo, StatutoryConfig, StatutoryInfo,
/// };
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
///     employment_status: Default::default(),
///     is_active: true,
/// };
/// let statutory = StatutoryConfig::with_default_rates("emp_001");
///
/// let inputs = PayrollInputs {
///     employee: &employee,
///     period: PayrollPeriod::new(2024, 3).unwrap(),
///     attendance: &[],
///     leaves: &[],
///     statutory: StatutoryInfo::from(Some(&statutory)),
/// };
///
/// let result = compute_payroll(&inputs, &PayrollPolicy::default(), Calendars::default()).unwrap();
/// assert_eq!(result.summary.net_salary, Decimal::from(82_760));
/// ```
pub fn compute_payroll(
    inputs: &PayrollInputs<'_>,
    policy: &PayrollPolicy,
    calendars: Calendars<'_>,
) -> EngineResult<PayrollResult> {
    let start_time = Instant::now();
    let employee = inputs.employee;
    let mut audit_steps: Vec<AuditStep> = Vec::new();
    let mut warnings: Vec<AuditWarning> = Vec::new();
    let mut step_number: u32 = 1;

    let (basic_salary, basic_step) = basic_salary_step(employee, step_number)?;
    audit_steps.push(basic_step);
    step_number += 1;

    // A leave spanning two months is charged once, in the month it starts
    let charged_leaves: Vec<LeaveRecord> = inputs
        .leaves
        .iter()
        .filter(|leave| leave.starts_in(&inputs.period))
        .cloned()
        .collect();
    let attendance_result = calculate_attendance_adjustments(
        basic_salary,
        inputs.attendance,
        &charged_leaves,
        policy,
        step_number,
    )?;
    audit_steps.push(attendance_result.audit_step);
    step_number += 1;

    let active_shift = employee.active_shift();
    if active_shift.is_none() && inputs.attendance.iter().any(|r| r.overtime_minutes > 0) {
        warnings.push(AuditWarning {
            code: "OVERTIME_WITHOUT_SHIFT".to_string(),
            message: "Overtime minutes recorded but the employee has no active shift; overtime not paid"
                .to_string(),
            severity: "low".to_string(),
        });
    }
    let overtime_result = calculate_overtime(
        basic_salary,
        inputs.attendance,
        active_shift,
        calendars.holidays,
        calendars.shift_policy,
        policy,
        step_number,
    );
    audit_steps.push(overtime_result.audit_step);
    step_number += 1;

    let allowance_result = calculate_allowances(basic_salary, &policy.allowances, step_number);
    audit_steps.push(allowance_result.audit_step);
    step_number += 1;

    let deduction_result = calculate_other_deductions(&policy.deductions, step_number);
    audit_steps.push(deduction_result.audit_step);
    step_number += 1;

    if inputs.statutory == StatutoryInfo::Unconfigured {
        warnings.push(AuditWarning {
            code: "STATUTORY_NOT_CONFIGURED".to_string(),
            message: "No active statutory configuration; EPF, ETF and PAYE not deducted".to_string(),
            severity: "medium".to_string(),
        });
    }
    let statutory_result =
        calculate_statutory_contributions(basic_salary, inputs.statutory, &policy.paye, step_number)?;
    audit_steps.extend(statutory_result.audit_steps());

    let breakdown = PayrollBreakdown {
        basic_salary,
        allowances: allowance_result.allowances,
        overtime: overtime_result.overtime,
        attendance_adjustments: attendance_result.adjustments,
        deductions: deduction_result.deductions,
        statutory: statutory_result.contributions,
    };
    let summary = PayrollSummary::from_breakdown(&breakdown);

    if summary.net_salary < Decimal::ZERO {
        return Err(EngineError::CalculationError {
            message: format!(
                "net salary for employee '{}' in {} is negative ({})",
                employee.id,
                inputs.period,
                summary.net_salary.round_dp(2)
            ),
        });
    }

    let duration_us = start_time.elapsed().as_micros() as u64;

    Ok(PayrollResult {
        payroll_id: Uuid::new_v4(),
        employee_id: employee.id.clone(),
        employee_code: employee.employee_code.clone(),
        employee_name: employee.full_name(),
        department: employee.employment_info.department.clone(),
        designation: employee.employment_info.designation.clone(),
        payroll_period: inputs.period,
        breakdown,
        summary,
        payment_details: PaymentDetails {
            bank_account: employee.bank_info.clone(),
            payment_method: PaymentMethod::BankTransfer,
            payment_status: PaymentStatus::Pending,
            transaction_id: None,
            paid_at: None,
        },
        calculated_at: Utc::now(),
        engine_version: env!("CARGO_PKG_VERSION").to_string(),
        audit_trace: AuditTrace {
            steps: audit_steps,
            warnings,
            duration_us,
        },
    })
}

/// Calculates payroll by reading its inputs from the repositories.
///
/// Holds the data sources, the policy and the calendar capabilities. Cloning
/// is cheap.
#[derive(Clone)]
pub struct PayrollCalculator {
    employees: Arc<dyn EmployeeRepository>,
    attendance: Arc<dyn AttendanceRepository>,
    leaves: Arc<dyn LeaveRepository>,
    statutory: Arc<dyn StatutoryRepository>,
    policy: Arc<PayrollPolicy>,
    holidays: Arc<dyn HolidayCalendar>,
    shift_policy: Arc<dyn ShiftPolicy>,
}

impl PayrollCalculator {
    /// Creates a calculator with no holidays and the assigned-shift
    /// night-shift policy.
    pub fn new(
        employees: Arc<dyn EmployeeRepository>,
        attendance: Arc<dyn AttendanceRepository>,
        leaves: Arc<dyn LeaveRepository>,
        statutory: Arc<dyn StatutoryRepository>,
        policy: PayrollPolicy,
    ) -> Self {
        Self {
            employees,
            attendance,
            leaves,
            statutory,
            policy: Arc::new(policy),
            holidays: Arc::new(NoHolidays),
            shift_policy: Arc::new(AssignedShiftPolicy),
        }
    }

    /// Replaces the holiday calendar.
    pub fn with_holiday_calendar(mut self, holidays: Arc<dyn HolidayCalendar>) -> Self {
        self.holidays = holidays;
        self
    }

    /// Replaces the night-shift policy.
    pub fn with_shift_policy(mut self, shift_policy: Arc<dyn ShiftPolicy>) -> Self {
        self.shift_policy = shift_policy;
        self
    }

    /// Returns the payroll policy.
    pub fn policy(&self) -> &PayrollPolicy {
        &self.policy
    }

    /// Calculates the payroll of an employee for a period.
    ///
    /// Returns `EmployeeNotFound` if the employee does not exist. A missing
    /// statutory configuration is not an error; the employee is paid with
    /// zero statutory contributions.
    pub fn calculate_payroll(
        &self,
        employee_id: &str,
        period: &PayrollPeriod,
    ) -> EngineResult<PayrollResult> {
        let employee =
            self.employees
                .find_employee(employee_id)?
                .ok_or_else(|| EngineError::EmployeeNotFound {
                    employee_id: employee_id.to_string(),
                })?;

        self.calculate_for_employee(&employee, period)
    }

    /// Calculates the payroll of an already-loaded employee.
    pub fn calculate_for_employee(
        &self,
        employee: &Employee,
        period: &PayrollPeriod,
    ) -> EngineResult<PayrollResult> {
        let attendance = self.attendance.attendance_for_period(&employee.id, period)?;
        let leaves: Vec<LeaveRecord> = self
            .leaves
            .leaves_for_period(&employee.id, period)?
            .into_iter()
            .filter(LeaveRecord::is_approved)
            .collect();
        let statutory_config = self.statutory.find_statutory(&employee.id)?;
        let statutory = StatutoryInfo::from(statutory_config.as_ref());

        debug!(
            employee_id = %employee.id,
            period = %period,
            attendance_records = attendance.len(),
            approved_leaves = leaves.len(),
            statutory_configured = matches!(statutory, StatutoryInfo::Configured(_)),
            "Calculating payroll"
        );

        let inputs = PayrollInputs {
            employee,
            period: *period,
            attendance: &attendance,
            leaves: &leaves,
            statutory,
        };
        let calendars = Calendars {
            holidays: self.holidays.as_ref(),
            shift_policy: self.shift_policy.as_ref(),
        };

        compute_payroll(&inputs, &self.policy, calendars)
    }
}
