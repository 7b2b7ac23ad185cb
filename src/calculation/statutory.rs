//! Statutory contributions (EPF, ETF and PAYE).
//!
//! Employee EPF and PAYE are deducted from pay. Employer EPF and ETF are
//! reported alongside but never reduce net salary.

use rust_decimal::Decimal;

use crate::config::PayeConfig;
use crate::error::EngineResult;
use crate::models::{AuditStep, StatutoryContributions, StatutoryInfo, StatutoryRates};

use super::paye::{PayeResult, calculate_paye};

/// The result of calculating statutory contributions.
#[derive(Debug, Clone)]
pub struct StatutoryResult {
    /// The contributions.
    pub contributions: StatutoryContributions,
    /// The PAYE calculation, absent for unconfigured employees.
    pub paye: Option<PayeResult>,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

impl StatutoryResult {
    /// Returns the audit steps of this calculation in order.
    pub fn audit_steps(&self) -> Vec<AuditStep> {
        let mut steps = vec![self.audit_step.clone()];
        if let Some(paye) = &self.paye {
            steps.push(paye.audit_step.clone());
        }
        steps
    }
}

/// Calculates statutory contributions for a basic salary.
///
/// An unconfigured employee gets all-zero contributions and no PAYE. For a
/// configured employee the PAYE step is numbered `step_number + 1`.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::calculate_statutory_contributions;
/// use payroll_engine::config::PayrollPolicy;
/// use payroll_engine::models::{StatutoryConfig, StatutoryInfo};
/// use rust_decimal::Decimal;
///
/// let config = StatutoryConfig::with_default_rates("emp_001");
/// let info = StatutoryInfo::from(Some(&config));
/// let policy = PayrollPolicy::default();
///
/// let result =
///     calculate_statutory_contributions(Decimal::from(66_000), info, &policy.paye, 1).unwrap();
///
/// assert_eq!(result.contributions.epf_employee, Decimal::from(5_280));
/// assert_eq!(result.contributions.paye, Decimal::from(1_460));
/// assert_eq!(result.contributions.total, Decimal::from(6_740));
/// ```
pub fn calculate_statutory_contributions(
    basic_salary: Decimal,
    statutory: StatutoryInfo,
    paye_config: &PayeConfig,
    step_number: u32,
) -> EngineResult<StatutoryResult> {
    match statutory {
        StatutoryInfo::Unconfigured => Ok(unconfigured(basic_salary, step_number)),
        StatutoryInfo::Configured(rates) => {
            configured(basic_salary, rates, paye_config, step_number)
        }
    }
}

fn unconfigured(basic_salary: Decimal, step_number: u32) -> StatutoryResult {
    let audit_step = AuditStep {
        step_number,
        rule_id: "statutory_contributions".to_string(),
        rule_name: "Statutory Contributions".to_string(),
        input: serde_json::json!({
            "basic_salary": basic_salary.normalize().to_string(),
            "configured": false
        }),
        output: serde_json::json!({
            "total": "0"
        }),
        reasoning: "No active statutory configuration - EPF, ETF and PAYE not applied".to_string(),
    };

    StatutoryResult {
        contributions: StatutoryContributions::unconfigured(),
        paye: None,
        audit_step,
    }
}

fn configured(
    basic_salary: Decimal,
    rates: StatutoryRates,
    paye_config: &PayeConfig,
    step_number: u32,
) -> EngineResult<StatutoryResult> {
    let epf_employee = basic_salary * rates.epf_rate / Decimal::ONE_HUNDRED;
    let epf_employer = basic_salary * rates.employer_epf_rate / Decimal::ONE_HUNDRED;
    let etf_employer = basic_salary * rates.etf_rate / Decimal::ONE_HUNDRED;

    let paye = calculate_paye(basic_salary, paye_config, step_number + 1)?;
    let total = epf_employee + paye.monthly_tax;

    let audit_step = AuditStep {
        step_number,
        rule_id: "statutory_contributions".to_string(),
        rule_name: "Statutory Contributions".to_string(),
        input: serde_json::json!({
            "basic_salary": basic_salary.normalize().to_string(),
            "configured": true,
            "epf_rate": rates.epf_rate.normalize().to_string(),
            "employer_epf_rate": rates.employer_epf_rate.normalize().to_string(),
            "etf_rate": rates.etf_rate.normalize().to_string()
        }),
        output: serde_json::json!({
            "epf_employee": epf_employee.normalize().to_string(),
            "epf_employer": epf_employer.normalize().to_string(),
            "etf_employer": etf_employer.normalize().to_string(),
            "paye": paye.monthly_tax.normalize().to_string(),
            "total": total.normalize().to_string()
        }),
        reasoning: format!(
            "EPF {}% of {} = {} plus PAYE {}; employer EPF {} and ETF {} not deducted",
            rates.epf_rate.normalize(),
            basic_salary.normalize(),
            epf_employee.normalize(),
            paye.monthly_tax.round_dp(2),
            epf_employer.normalize(),
            etf_employer.normalize()
        ),
    };

    Ok(StatutoryResult {
        contributions: StatutoryContributions {
            configured: true,
            epf_employee,
            epf_employer,
            etf_employer,
            paye: paye.monthly_tax,
            total,
        },
        paye: Some(paye),
        audit_step,
    })
}
