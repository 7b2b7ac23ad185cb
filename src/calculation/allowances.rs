//! Allowance calculation.
//!
//! Every employee receives a housing allowance proportional to basic salary
//! plus fixed transport and medical allowances.

use rust_decimal::Decimal;

use crate::config::AllowancePolicy;
use crate::models::{AllowanceBreakdown, AuditStep};

/// The result of calculating allowances, including the breakdown and audit step.
#[derive(Debug, Clone)]
pub struct AllowanceResult {
    /// The allowance breakdown.
    pub allowances: AllowanceBreakdown,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Calculates the monthly allowances for a basic salary.
///
/// # Arguments
///
/// * `basic_salary` - The monthly basic salary
/// * `policy` - Housing percentage and the fixed allowance amounts
/// * `step_number` - The step number for audit trail sequencing
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::calculate_allowances;
/// use payroll_engine::config::PayrollPolicy;
/// use rust_decimal::Decimal;
///
/// let policy = PayrollPolicy::default();
/// let result = calculate_allowances(Decimal::from(66_000), &policy.allowances, 1);
///
/// assert_eq!(result.allowances.housing, Decimal::from(16_500));
/// assert_eq!(result.allowances.total, Decimal::from(24_500));
/// ```
pub fn calculate_allowances(
    basic_salary: Decimal,
    policy: &AllowancePolicy,
    step_number: u32,
) -> AllowanceResult {
    let housing = basic_salary * policy.housing_percent / Decimal::ONE_HUNDRED;
    let transport = policy.transport;
    let medical = policy.medical;
    let total = housing + transport + medical;

    let audit_step = AuditStep {
        step_number,
        rule_id: "allowances".to_string(),
        rule_name: "Allowances".to_string(),
        input: serde_json::json!({
            "basic_salary": basic_salary.normalize().to_string(),
            "housing_percent": policy.housing_percent.normalize().to_string(),
            "transport": transport.normalize().to_string(),
            "medical": medical.normalize().to_string()
        }),
        output: serde_json::json!({
            "housing": housing.normalize().to_string(),
            "transport": transport.normalize().to_string(),
            "medical": medical.normalize().to_string(),
            "total": total.normalize().to_string()
        }),
        reasoning: format!(
            "Housing {}% of {} = {}; transport {} + medical {}; total {}",
            policy.housing_percent.normalize(),
            basic_salary.normalize(),
            housing.normalize(),
            transport.normalize(),
            medical.normalize(),
            total.normalize()
        ),
    };

    AllowanceResult {
        allowances: AllowanceBreakdown {
            housing,
            transport,
            medical,
            total,
        },
        audit_step,
    }
}
