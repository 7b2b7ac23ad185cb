//! Payslip rendering model.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{PaymentDetails, PayrollPeriod, PayrollResult};

/// Employer details printed on every payslip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyInfo {
    /// Registered name.
    pub name: String,
    /// Postal address.
    pub address: String,
    /// Logo shown in the payslip header.
    #[serde(default)]
    pub logo_url: Option<String>,
}

/// Employee block of a payslip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayslipEmployee {
    /// Employee number.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Job title.
    pub designation: Option<String>,
    /// Department.
    pub department: String,
}

/// Earnings block of a payslip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayslipEarnings {
    /// Basic salary.
    pub basic: Decimal,
    /// Total allowances.
    pub allowances: Decimal,
    /// Total overtime.
    pub overtime: Decimal,
    /// Gross salary.
    pub total_earnings: Decimal,
}

/// Deductions block of a payslip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayslipDeductions {
    /// Employee EPF contribution.
    pub epf: Decimal,
    /// PAYE tax.
    pub paye: Decimal,
    /// Attendance deductions (absence, lateness, unpaid leave).
    pub attendance: Decimal,
    /// Other deductions (insurance, loans, advances).
    pub other: Decimal,
    /// All deductions.
    pub total_deductions: Decimal,
}

/// Employer contributions shown for information.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployerContributions {
    /// Employer EPF contribution.
    pub epf: Decimal,
    /// Employer ETF contribution.
    pub etf: Decimal,
}

/// A payslip for one employee and period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payslip {
    /// Employer details.
    pub company: CompanyInfo,
    /// Employee details.
    pub employee: PayslipEmployee,
    /// The payroll period.
    pub payroll_period: PayrollPeriod,
    /// Earnings.
    pub earnings: PayslipEarnings,
    /// Deductions.
    pub deductions: PayslipDeductions,
    /// Employer contributions.
    pub employer_contributions: EmployerContributions,
    /// Net salary.
    pub net_salary: Decimal,
    /// Payment information.
    pub payment_details: PaymentDetails,
    /// When the payslip was generated.
    pub generated_on: DateTime<Utc>,
}

impl Payslip {
    /// Builds a payslip from a payroll result.
    pub fn from_result(
        result: &PayrollResult,
        company: &CompanyInfo,
        generated_on: DateTime<Utc>,
    ) -> Self {
        let breakdown = &result.breakdown;

        Self {
            company: company.clone(),
            employee: PayslipEmployee {
                id: result.employee_code.clone(),
                name: result.employee_name.clone(),
                designation: result.designation.clone(),
                department: result.department.clone(),
            },
            payroll_period: result.payroll_period,
            earnings: PayslipEarnings {
                basic: breakdown.basic_salary,
                allowances: breakdown.allowances.total,
                overtime: breakdown.overtime.total,
                total_earnings: result.summary.gross_salary,
            },
            deductions: PayslipDeductions {
                epf: breakdown.statutory.epf_employee,
                paye: breakdown.statutory.paye,
                attendance: breakdown.attendance_adjustments.total_deductions,
                other: breakdown.deductions.total,
                total_deductions: result.summary.total_deductions,
            },
            employer_contributions: EmployerContributions {
                epf: breakdown.statutory.epf_employer,
                etf: breakdown.statutory.etf_employer,
            },
            net_salary: result.summary.net_salary,
            payment_details: result.payment_details.clone(),
            generated_on,
        }
    }
}
