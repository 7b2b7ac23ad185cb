//! Payroll result models.
//!
//! This module contains the [`PayrollResult`] type and its associated structures
//! that capture every output of a payroll calculation: the earnings and deduction
//! breakdown, the summary totals, payment details and the audit trace.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{BankInfo, PayrollPeriod};

/// Allowances paid on top of basic salary.
///
/// # Example
///
/// ```
/// use payroll_engine::models::AllowanceBreakdown;
/// use rust_decimal::Decimal;
///
/// let allowances = AllowanceBreakdown {
///     housing: Decimal::from(16_500),
///     transport: Decimal::from(5_000),
///     medical: Decimal::from(3_000),
///     total: Decimal::from(24_500),
/// };
/// assert_eq!(allowances.housing + allowances.transport + allowances.medical, allowances.total);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllowanceBreakdown {
    /// Housing allowance (a percentage of basic salary).
    pub housing: Decimal,
    /// Fixed transport allowance.
    pub transport: Decimal,
    /// Fixed medical allowance.
    pub medical: Decimal,
    /// Sum of all allowances.
    pub total: Decimal,
}

/// Overtime earnings for the period.
///
/// Only `regular` and `total` are populated; the holiday and night buckets
/// keep their place in the shape and stay zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OvertimeBreakdown {
    /// Total overtime hours worked.
    pub hours: Decimal,
    /// Base hourly rate used before multipliers.
    pub hourly_rate: Decimal,
    /// Overtime pay including holiday and night multipliers.
    pub regular: Decimal,
    /// Holiday overtime bucket.
    pub holiday: Decimal,
    /// Night overtime bucket.
    pub night: Decimal,
    /// Total overtime pay.
    pub total: Decimal,
}

impl OvertimeBreakdown {
    /// An overtime breakdown with every amount zero.
    pub fn zero() -> Self {
        Self {
            hours: Decimal::ZERO,
            hourly_rate: Decimal::ZERO,
            regular: Decimal::ZERO,
            holiday: Decimal::ZERO,
            night: Decimal::ZERO,
            total: Decimal::ZERO,
        }
    }
}

/// Attendance-driven adjustments to pay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceAdjustments {
    /// Days marked present.
    pub present_days: u32,
    /// Days marked absent.
    pub absent_days: u32,
    /// Days marked as leave.
    pub leave_days: u32,
    /// Late minutes accumulated on present days.
    pub late_minutes: u32,
    /// Basic salary divided by the working days in a month.
    pub per_day_salary: Decimal,
    /// Deduction for absent days.
    pub absent_deductions: Decimal,
    /// Deduction for late arrival.
    pub late_deductions: Decimal,
    /// Leave days taken beyond entitlement.
    pub unpaid_leave_days: u32,
    /// Deduction for unpaid leave days.
    pub unpaid_leaves: Decimal,
    /// Attendance-based earnings (reserved for attendance bonuses).
    pub total_earnings: Decimal,
    /// Sum of all attendance deductions.
    pub total_deductions: Decimal,
}

/// Non-statutory deductions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OtherDeductions {
    /// Loan repayment.
    pub loan: Decimal,
    /// Salary advance recovery.
    pub advance: Decimal,
    /// Insurance premium.
    pub insurance: Decimal,
    /// Sum of all other deductions.
    pub total: Decimal,
}

/// Statutory contributions for the period.
///
/// `total` only contains the employee-side amounts (EPF employee share and
/// PAYE). Employer EPF and ETF are liabilities of the employer and are
/// reported for information.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatutoryContributions {
    /// Whether the employee had statutory rates configured.
    pub configured: bool,
    /// Employee EPF contribution.
    pub epf_employee: Decimal,
    /// Employer EPF contribution.
    pub epf_employer: Decimal,
    /// Employer ETF contribution.
    pub etf_employer: Decimal,
    /// Monthly PAYE tax.
    pub paye: Decimal,
    /// Employee-side statutory deductions (`epf_employee + paye`).
    pub total: Decimal,
}

impl StatutoryContributions {
    /// Contributions for an employee without statutory configuration.
    pub fn unconfigured() -> Self {
        Self {
            configured: false,
            epf_employee: Decimal::ZERO,
            epf_employer: Decimal::ZERO,
            etf_employer: Decimal::ZERO,
            paye: Decimal::ZERO,
            total: Decimal::ZERO,
        }
    }
}

/// The full breakdown of a payroll calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollBreakdown {
    /// Monthly basic salary.
    pub basic_salary: Decimal,
    /// Allowances.
    pub allowances: AllowanceBreakdown,
    /// Overtime earnings.
    pub overtime: OvertimeBreakdown,
    /// Attendance adjustments.
    pub attendance_adjustments: AttendanceAdjustments,
    /// Non-statutory deductions.
    pub deductions: OtherDeductions,
    /// Statutory contributions.
    pub statutory: StatutoryContributions,
}

/// Summary totals of a payroll calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollSummary {
    /// Basic salary plus allowances, overtime and attendance earnings.
    pub gross_salary: Decimal,
    /// Other, statutory and attendance deductions.
    pub total_deductions: Decimal,
    /// Gross salary less total deductions.
    pub net_salary: Decimal,
}

impl PayrollSummary {
    /// Aggregates a breakdown into gross, deductions and net.
    ///
    /// # Example
    ///
    /// ```
    /// use payroll_engine::models::{
    ///     AllowanceBreakdown, AttendanceAdjustments, OtherDeductions, OvertimeBreakdown,
    ///     PayrollBreakdown, PayrollSummary, StatutoryContributions,
    /// };
    /// use rust_decimal::Decimal;
    ///
    /// let breakdown = PayrollBreakdown {
    ///     basic_salary: Decimal::from(66_000),
    ///     allowances: AllowanceBreakdown {
    ///         housing: Decimal::from(16_500),
    ///         transport: Decimal::from(5_000),
    ///         medical: Decimal::from(3_000),
    ///         total: Decimal::from(24_500),
    ///     },
    ///     overtime: OvertimeBreakdown::zero(),
    ///     attendance_adjustments: AttendanceAdjustments {
    ///         present_days: 22,
    ///         absent_days: 0,
    ///         leave_days: 0,
    ///         late_minutes: 0,
    ///         per_day_salary: Decimal::from(3_000),
    ///         absent_deductions: Decimal::ZERO,
    ///         late_deductions: Decimal::ZERO,
    ///         unpaid_leave_days: 0,
    ///         unpaid_leaves: Decimal::ZERO,
    ///         total_earnings: Decimal::ZERO,
    ///         total_deductions: Decimal::ZERO,
    ///     },
    ///     deductions: OtherDeductions {
    ///         loan: Decimal::ZERO,
    ///         advance: Decimal::ZERO,
    ///         insurance: Decimal::from(1_000),
    ///         total: Decimal::from(1_000),
    ///     },
    ///     statutory: StatutoryContributions {
    ///         configured: true,
    ///         epf_employee: Decimal::from(5_280),
    ///         epf_employer: Decimal::from(7_920),
    ///         etf_employer: Decimal::from(1_980),
    ///         paye: Decimal::from(1_460),
    ///         total: Decimal::from(6_740),
    ///     },
    /// };
    ///
    /// let summary = PayrollSummary::from_breakdown(&breakdown);
    /// assert_eq!(summary.gross_salary, Decimal::from(90_500));
    /// assert_eq!(summary.total_deductions, Decimal::from(7_740));
    /// assert_eq!(summary.net_salary, Decimal::from(82_760));
    /// ```
    pub fn from_breakdown(breakdown: &PayrollBreakdown) -> Self {
        let gross_salary = breakdown.basic_salary
            + breakdown.allowances.total
            + breakdown.overtime.total
            + breakdown.attendance_adjustments.total_earnings;
        let total_deductions = breakdown.deductions.total
            + breakdown.statutory.total
            + breakdown.attendance_adjustments.total_deductions;

        Self {
            gross_salary,
            total_deductions,
            net_salary: gross_salary - total_deductions,
        }
    }
}

/// How the salary is paid out.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    /// Transfer to the employee's bank account.
    #[default]
    BankTransfer,
}

/// Whether a payroll record has been paid out.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    /// Calculated but not yet paid.
    #[default]
    Pending,
    /// Paid to the employee.
    Paid,
}

/// Payment information attached to a payroll result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentDetails {
    /// The account the salary is paid into.
    pub bank_account: Option<BankInfo>,
    /// The payment method.
    pub payment_method: PaymentMethod,
    /// Current payment status.
    pub payment_status: PaymentStatus,
    /// Bank transaction reference once paid.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction_id: Option<String>,
    /// When the payment was made.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paid_at: Option<DateTime<Utc>>,
}

/// A single step in the audit trace recording a calculation decision.
///
/// Each step captures the input, output, and reasoning for a rule application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// A warning generated during calculation.
///
/// Warnings indicate potential issues that don't prevent calculation
/// but may require attention.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditWarning {
    /// A code identifying the type of warning.
    pub code: String,
    /// A human-readable description of the warning.
    pub message: String,
    /// The severity level (e.g., "low", "medium", "high").
    pub severity: String,
}

/// The complete audit trace for a calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditTrace {
    /// The sequence of calculation steps.
    pub steps: Vec<AuditStep>,
    /// Any warnings generated during calculation.
    pub warnings: Vec<AuditWarning>,
    /// The total calculation duration in microseconds.
    pub duration_us: u64,
}

/// The complete result of a payroll calculation for one employee and period.
///
/// Created once per employee per period. After it is stored, only the
/// payment status inside [`PaymentDetails`] changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollResult {
    /// Unique identifier for this payroll record.
    pub payroll_id: Uuid,
    /// The employee record id.
    pub employee_id: String,
    /// The human-facing employee number.
    pub employee_code: String,
    /// The employee's display name.
    pub employee_name: String,
    /// The employee's department.
    pub department: String,
    /// The employee's job title.
    #[serde(default)]
    pub designation: Option<String>,
    /// The payroll period.
    pub payroll_period: PayrollPeriod,
    /// Earnings and deductions breakdown.
    pub breakdown: PayrollBreakdown,
    /// Gross, deductions and net.
    pub summary: PayrollSummary,
    /// Payment information.
    pub payment_details: PaymentDetails,
    /// When the calculation was performed.
    pub calculated_at: DateTime<Utc>,
    /// The version of the engine that performed the calculation.
    pub engine_version: String,
    /// Complete audit trace of calculation decisions.
    pub audit_trace: AuditTrace,
}

impl PayrollResult {
    /// Returns true once the salary has been paid out.
    pub fn is_paid(&self) -> bool {
        self.payment_details.payment_status == PaymentStatus::Paid
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn create_sample_breakdown() -> PayrollBreakdown {
        PayrollBreakdown {
            basic_salary: dec("50000"),
            allowances: AllowanceBreakdown {
                housing: dec("12500"),
                transport: dec("5000"),
                medical: dec("3000"),
                total: dec("20500"),
            },
            overtime: OvertimeBreakdown {
                hours: dec("2"),
                hourly_rate: dec("284.09"),
                regular: dec("568.18"),
                holiday: Decimal::ZERO,
                night: Decimal::ZERO,
                total: dec("568.18"),
            },
            attendance_adjustments: AttendanceAdjustments {
                present_days: 20,
                absent_days: 2,
                leave_days: 0,
                late_minutes: 30,
                per_day_salary: dec("2272.72"),
                absent_deductions: dec("4545.44"),
                late_deductions: dec("142.05"),
                unpaid_leave_days: 0,
                unpaid_leaves: Decimal::ZERO,
                total_earnings: dec("100"),
                total_deductions: dec("4687.49"),
            },
            deductions: OtherDeductions {
                loan: Decimal::ZERO,
                advance: Decimal::ZERO,
                insurance: dec("1000"),
                total: dec("1000"),
            },
            statutory: StatutoryContributions {
                configured: true,
                epf_employee: dec("4000"),
                epf_employer: dec("6000"),
                etf_employer: dec("1500"),
                paye: dec("500"),
                total: dec("4500"),
            },
        }
    }

    fn create_sample_result() -> PayrollResult {
        let breakdown = create_sample_breakdown();
        let summary = PayrollSummary::from_breakdown(&breakdown);
        PayrollResult {
            payroll_id: Uuid::nil(),
            employee_id: "emp_001".to_string(),
            employee_code: "EMP-0001".to_string(),
            employee_name: "Nimal Perera".to_string(),
            department: "science".to_string(),
            designation: None,
            payroll_period: PayrollPeriod::new(2024, 3).unwrap(),
            breakdown,
            summary,
            payment_details: PaymentDetails {
                bank_account: None,
                payment_method: PaymentMethod::BankTransfer,
                payment_status: PaymentStatus::Pending,
                transaction_id: None,
                paid_at: None,
            },
            calculated_at: DateTime::parse_from_rfc3339("2024-04-01T10:00:00Z")
                .unwrap()
                .with_timezone(&Utc),
            engine_version: "0.1.0".to_string(),
            audit_trace: AuditTrace {
                steps: vec![],
                warnings: vec![],
                duration_us: 0,
            },
        }
    }

    #[test]
    fn test_summary_gross_includes_attendance_earnings() {
        let summary = PayrollSummary::from_breakdown(&create_sample_breakdown());
        // 50000 + 20500 + 568.18 + 100
        assert_eq!(summary.gross_salary, dec("71168.18"));
    }

    #[test]
    fn test_summary_deductions_and_net() {
        let summary = PayrollSummary::from_breakdown(&create_sample_breakdown());
        // 1000 + 4500 + 4687.49
        assert_eq!(summary.total_deductions, dec("10187.49"));
        assert_eq!(
            summary.net_salary,
            summary.gross_salary - summary.total_deductions
        );
    }

    #[test]
    fn test_employer_contributions_do_not_reduce_net() {
        let mut breakdown = create_sample_breakdown();
        let before = PayrollSummary::from_breakdown(&breakdown);
        breakdown.statutory.epf_employer = dec("99999");
        breakdown.statutory.etf_employer = dec("99999");
        assert_eq!(PayrollSummary::from_breakdown(&breakdown), before);
    }

    #[test]
    fn test_unconfigured_statutory_is_all_zero() {
        let statutory = StatutoryContributions::unconfigured();
        assert!(!statutory.configured);
        assert_eq!(statutory.total, Decimal::ZERO);
        assert_eq!(statutory.epf_employer, Decimal::ZERO);
    }

    #[test]
    fn test_payment_status_serialization() {
        assert_eq!(
            serde_json::to_string(&PaymentStatus::Pending).unwrap(),
            "\"pending\""
        );
        assert_eq!(
            serde_json::to_string(&PaymentMethod::BankTransfer).unwrap(),
            "\"bank_transfer\""
        );
    }

    #[test]
    fn test_payroll_result_serialization() {
        let json = serde_json::to_string(&create_sample_result()).unwrap();
        assert!(json.contains("\"payroll_id\":\"00000000-0000-0000-0000-000000000000\""));
        assert!(json.contains("\"payroll_period\":\"2024-03\""));
        assert!(json.contains("\"basic_salary\":\"50000\""));
        assert!(json.contains("\"payment_status\":\"pending\""));
        assert!(!json.contains("transaction_id"));
    }

    #[test]
    fn test_payroll_result_deserialization() {
        let json = serde_json::to_string(&create_sample_result()).unwrap();
        let result: PayrollResult = serde_json::from_str(&json).unwrap();
        assert_eq!(result, create_sample_result());
        assert!(!result.is_paid());
    }

    #[test]
    fn test_audit_step_serialization() {
        let step = AuditStep {
            step_number: 1,
            rule_id: "paye".to_string(),
            rule_name: "PAYE Tax".to_string(),
            input: serde_json::json!({"annual_income": "792000"}),
            output: serde_json::json!({"monthly_tax": "1460"}),
            reasoning: "Annual income falls in the 6% slab".to_string(),
        };

        let json = serde_json::to_string(&step).unwrap();
        assert!(json.contains("\"step_number\":1"));
        assert!(json.contains("\"rule_id\":\"paye\""));
    }
}
