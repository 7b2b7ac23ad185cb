//! Non-statutory deductions.

use crate::config::DeductionPolicy;
use crate::models::{AuditStep, OtherDeductions};

/// The result of calculating other deductions.
#[derive(Debug, Clone)]
pub struct OtherDeductionResult {
    /// The deduction breakdown.
    pub deductions: OtherDeductions,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Calculates insurance, loan and advance deductions for the month.
pub fn calculate_other_deductions(
    policy: &DeductionPolicy,
    step_number: u32,
) -> OtherDeductionResult {
    let total = policy.loan + policy.advance + policy.insurance;

    let audit_step = AuditStep {
        step_number,
        rule_id: "other_deductions".to_string(),
        rule_name: "Other Deductions".to_string(),
        input: serde_json::json!({
            "insurance": policy.insurance.normalize().to_string(),
            "loan": policy.loan.normalize().to_string(),
            "advance": policy.advance.normalize().to_string()
        }),
        output: serde_json::json!({
            "total": total.normalize().to_string()
        }),
        reasoning: format!(
            "Insurance {} + loan {} + advance {} = {}",
            policy.insurance.normalize(),
            policy.loan.normalize(),
            policy.advance.normalize(),
            total.normalize()
        ),
    };

    OtherDeductionResult {
        deductions: OtherDeductions {
            loan: policy.loan,
            advance: policy.advance,
            insurance: policy.insurance,
            total,
        },
        audit_step,
    }
}
