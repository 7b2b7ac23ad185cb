//! PAYE income tax.
//!
//! Tax is assessed on the annualised basic salary against progressive
//! brackets and withheld monthly as one twelfth of the annual amount.

use rust_decimal::Decimal;

use crate::config::{PayeConfig, TaxBracket};
use crate::error::{EngineError, EngineResult};
use crate::models::AuditStep;

/// Months in a tax year.
pub const MONTHS_PER_YEAR: u32 = 12;

/// The result of a PAYE calculation.
#[derive(Debug, Clone)]
pub struct PayeResult {
    /// Basic salary multiplied by twelve.
    pub annual_income: Decimal,
    /// Tax on the annual income.
    pub annual_tax: Decimal,
    /// Tax withheld this month.
    pub monthly_tax: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Finds the bracket an annual income falls into.
///
/// Brackets are inclusive of their upper bound, so an income exactly on a
/// boundary belongs to the lower bracket.
pub fn find_bracket(annual_income: Decimal, brackets: &[TaxBracket]) -> Option<&TaxBracket> {
    brackets
        .iter()
        .find(|b| b.max_income.is_none_or(|max| annual_income <= max))
}

/// Computes the annual tax owed on an income.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::annual_tax;
/// use payroll_engine::config::PayrollPolicy;
/// use rust_decimal::Decimal;
///
/// let brackets = PayrollPolicy::default().paye.brackets;
///
/// assert_eq!(annual_tax(Decimal::from(400_000), &brackets), Some(Decimal::ZERO));
/// assert_eq!(annual_tax(Decimal::from(792_000), &brackets), Some(Decimal::from(17_520)));
/// assert_eq!(annual_tax(Decimal::from(1_200_000), &brackets), Some(Decimal::from(54_000)));
/// ```
pub fn annual_tax(annual_income: Decimal, brackets: &[TaxBracket]) -> Option<Decimal> {
    find_bracket(annual_income, brackets).map(|bracket| tax_in_bracket(annual_income, bracket))
}

fn tax_in_bracket(annual_income: Decimal, bracket: &TaxBracket) -> Decimal {
    bracket.base_tax + (annual_income - bracket.min_income) * bracket.rate / Decimal::ONE_HUNDRED
}

/// Calculates the monthly PAYE for a basic salary.
///
/// Returns `CalculationError` if no bracket covers the annualised income,
/// which a validated policy rules out.
pub fn calculate_paye(
    basic_salary: Decimal,
    config: &PayeConfig,
    step_number: u32,
) -> EngineResult<PayeResult> {
    let months = Decimal::from(MONTHS_PER_YEAR);
    let annual_income = basic_salary * months;

    let bracket = find_bracket(annual_income, &config.brackets).ok_or_else(|| {
        EngineError::CalculationError {
            message: format!("No PAYE bracket covers annual income {}", annual_income),
        }
    })?;

    let annual_tax = tax_in_bracket(annual_income, bracket);
    let monthly_tax = annual_tax / months;

    let bracket_label = match bracket.max_income {
        Some(max) => format!("{} - {}", bracket.min_income.normalize(), max.normalize()),
        None => format!("above {}", bracket.min_income.normalize()),
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "paye".to_string(),
        rule_name: "PAYE Tax".to_string(),
        input: serde_json::json!({
            "basic_salary": basic_salary.normalize().to_string(),
            "annual_income": annual_income.normalize().to_string()
        }),
        output: serde_json::json!({
            "bracket": bracket_label,
            "rate": bracket.rate.normalize().to_string(),
            "base_tax": bracket.base_tax.normalize().to_string(),
            "annual_tax": annual_tax.normalize().to_string(),
            "monthly_tax": monthly_tax.normalize().to_string()
        }),
        reasoning: format!(
            "Annual income {} in bracket {}: {} + ({} - {}) x {}% = {}; monthly {}",
            annual_income.normalize(),
            bracket_label,
            bracket.base_tax.normalize(),
            annual_income.normalize(),
            bracket.min_income.normalize(),
            bracket.rate.normalize(),
            annual_tax.normalize(),
            monthly_tax.normalize()
        ),
    };

    Ok(PayeResult {
        annual_income,
        annual_tax,
        monthly_tax,
        audit_step,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PayrollPolicy;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn config() -> PayeConfig {
        PayrollPolicy::default().paye
    }

    #[test]
    fn test_income_below_threshold_is_tax_free() {
        let result = calculate_paye(dec("33333.33"), &config(), 1).unwrap();
        assert_eq!(result.annual_income, dec("399999.96"));
        assert_eq!(result.monthly_tax, Decimal::ZERO);
    }

    #[test]
    fn test_exactly_on_first_boundary_is_tax_free() {
        let basic = dec("500000") / dec("12");
        let result = calculate_paye(basic, &config(), 1).unwrap();
        assert_eq!(annual_tax(dec("500000"), &config().brackets), Some(Decimal::ZERO));
        assert!(result.monthly_tax < dec("0.000001"));
    }

    #[test]
    fn test_just_above_first_boundary() {
        // 41,667 x 12 = 500,004 -> 4 x 6% = 0.24 a year, 0.02 a month
        let result = calculate_paye(dec("41667"), &config(), 1).unwrap();
        assert_eq!(result.annual_income, dec("500004"));
        assert_eq!(result.annual_tax, dec("0.24"));
        assert_eq!(result.monthly_tax, dec("0.02"));
    }

    #[test]
    fn test_middle_bracket() {
        // 66,000 x 12 = 792,000 -> 292,000 x 6% = 17,520 -> 1,460 a month
        let result = calculate_paye(dec("66000"), &config(), 1).unwrap();
        assert_eq!(result.annual_tax, dec("17520"));
        assert_eq!(result.monthly_tax, dec("1460"));
        assert_eq!(result.audit_step.output["bracket"], "500000 - 1000000");
    }

    #[test]
    fn test_exactly_on_second_boundary() {
        assert_eq!(
            annual_tax(dec("1000000"), &config().brackets),
            Some(dec("30000"))
        );
    }

    #[test]
    fn test_top_bracket() {
        // 150,000 x 12 = 1,800,000 -> 30,000 + 800,000 x 12% = 126,000 -> 10,500 a month
        let result = calculate_paye(dec("150000"), &config(), 1).unwrap();
        assert_eq!(result.annual_tax, dec("126000"));
        assert_eq!(result.monthly_tax, dec("10500"));
        assert_eq!(result.audit_step.output["bracket"], "above 1000000");
    }

    #[test]
    fn test_missing_bracket_is_calculation_error() {
        let config = PayeConfig {
            brackets: vec![TaxBracket {
                min_income: Decimal::ZERO,
                max_income: Some(dec("100000")),
                rate: Decimal::ZERO,
                base_tax: Decimal::ZERO,
            }],
        };
        let result = calculate_paye(dec("50000"), &config, 1);
        assert!(matches!(result, Err(EngineError::CalculationError { .. })));
    }

    #[test]
    fn test_monthly_tax_agrees_with_annual_tax() {
        let brackets = config().brackets;
        for basic in ["41667", "66000", "83333.34", "100000"] {
            let result = calculate_paye(dec(basic), &config(), 1).unwrap();
            let annual = annual_tax(result.annual_income, &brackets).unwrap();
            assert_eq!(result.annual_tax, annual);
            assert_eq!(result.monthly_tax, annual / dec("12"));
        }
    }

    #[test]
    fn test_find_bracket_upper_bound_inclusive() {
        let brackets = config().brackets;
        let bracket = find_bracket(dec("500000"), &brackets).unwrap();
        assert_eq!(bracket.rate, Decimal::ZERO);
        let bracket = find_bracket(dec("500000.01"), &brackets).unwrap();
        assert_eq!(bracket.rate, dec("6"));
    }
}
