//! Configuration types for the payroll engine.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calendar::Holiday;
use crate::error::{EngineError, EngineResult};
use crate::models::{CompanyInfo, LeaveType};

/// Allowances paid to every employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllowancePolicy {
    /// Housing allowance as a percentage of basic salary.
    pub housing_percent: Decimal,
    /// Fixed monthly transport allowance.
    pub transport: Decimal,
    /// Fixed monthly medical allowance.
    pub medical: Decimal,
}

/// Fixed non-statutory deductions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeductionPolicy {
    /// Monthly insurance premium.
    pub insurance: Decimal,
    /// Monthly loan repayment.
    #[serde(default)]
    pub loan: Decimal,
    /// Monthly advance recovery.
    #[serde(default)]
    pub advance: Decimal,
}

/// Overtime multipliers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OvertimePolicy {
    /// Multiplier for overtime worked on a holiday.
    pub holiday_multiplier: Decimal,
    /// Multiplier for overtime worked on a night shift.
    pub night_shift_multiplier: Decimal,
}

/// An annual income tax bracket.
///
/// Income above `min_income` and up to `max_income` is taxed at `rate`
/// percent on top of `base_tax`. The last bracket has no `max_income`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxBracket {
    /// Lower bound of annual income for the bracket.
    pub min_income: Decimal,
    /// Upper bound of annual income (inclusive); `None` for the top bracket.
    #[serde(default)]
    pub max_income: Option<Decimal>,
    /// Marginal rate in percent.
    pub rate: Decimal,
    /// Tax owed on all income up to `min_income`.
    #[serde(default)]
    pub base_tax: Decimal,
}

/// PAYE configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayeConfig {
    /// Brackets sorted by ascending `min_income`.
    pub brackets: Vec<TaxBracket>,
}

/// Organisation-wide payroll policy.
///
/// [`PayrollPolicy::default`] carries the standard policy: 22 working days of
/// 8 hours, 25% housing, 5000 transport, 3000 medical, 1000 insurance,
/// overtime at 2x on holidays and 1.5x on night shifts, and the
/// 0% / 6% / 12% PAYE slabs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollPolicy {
    /// Working days used to derive the daily salary.
    pub working_days_per_month: u32,
    /// Working hours per day.
    pub hours_per_day: u32,
    /// Allowances.
    pub allowances: AllowancePolicy,
    /// Other deductions.
    pub deductions: DeductionPolicy,
    /// Overtime multipliers.
    pub overtime: OvertimePolicy,
    /// Leave types whose days beyond entitlement are unpaid.
    pub unpaid_leave_types: Vec<LeaveType>,
    /// PAYE brackets.
    pub paye: PayeConfig,
    /// Employer details for payslips.
    pub company: CompanyInfo,
}

impl Default for PayrollPolicy {
    fn default() -> Self {
        Self {
            working_days_per_month: 22,
            hours_per_day: 8,
            allowances: AllowancePolicy {
                housing_percent: Decimal::from(25),
                transport: Decimal::from(5_000),
                medical: Decimal::from(3_000),
            },
            deductions: DeductionPolicy {
                insurance: Decimal::from(1_000),
                loan: Decimal::ZERO,
                advance: Decimal::ZERO,
            },
            overtime: OvertimePolicy {
                holiday_multiplier: Decimal::from(2),
                night_shift_multiplier: Decimal::new(15, 1),
            },
            unpaid_leave_types: vec![LeaveType::Casual, LeaveType::Sick],
            paye: PayeConfig {
                brackets: vec![
                    TaxBracket {
                        min_income: Decimal::ZERO,
                        max_income: Some(Decimal::from(500_000)),
                        rate: Decimal::ZERO,
                        base_tax: Decimal::ZERO,
                    },
                    TaxBracket {
                        min_income: Decimal::from(500_000),
                        max_income: Some(Decimal::from(1_000_000)),
                        rate: Decimal::from(6),
                        base_tax: Decimal::ZERO,
                    },
                    TaxBracket {
                        min_income: Decimal::from(1_000_000),
                        max_income: None,
                        rate: Decimal::from(12),
                        base_tax: Decimal::from(30_000),
                    },
                ],
            },
            company: CompanyInfo {
                name: "School".to_string(),
                address: String::new(),
                logo_url: None,
            },
        }
    }
}

impl PayrollPolicy {
    /// Checks that the policy can drive a calculation.
    ///
    /// `source` names where the policy came from and is used in the error.
    pub fn validate(&self, source: &str) -> EngineResult<()> {
        let invalid = |message: String| EngineError::ConfigParseError {
            path: source.to_string(),
            message,
        };

        if !(1..=31).contains(&self.working_days_per_month) {
            return Err(invalid("working_days_per_month must be between 1 and 31".to_string()));
        }
        if !(1..=24).contains(&self.hours_per_day) {
            return Err(invalid("hours_per_day must be between 1 and 24".to_string()));
        }

        let brackets = &self.paye.brackets;
        match brackets.first() {
            None => return Err(invalid("paye.brackets must not be empty".to_string())),
            Some(first) if !first.min_income.is_zero() => {
                return Err(invalid("the first paye bracket must start at 0".to_string()));
            }
            Some(_) => {}
        }
        for (index, pair) in brackets.windows(2).enumerate() {
            if pair[0].max_income != Some(pair[1].min_income) {
                return Err(invalid(format!(
                    "paye bracket {} must end where bracket {} starts",
                    index,
                    index + 1
                )));
            }
        }
        if brackets.iter().any(|b| b.rate.is_sign_negative()) {
            return Err(invalid("paye rates must not be negative".to_string()));
        }
        if brackets.last().is_some_and(|b| b.max_income.is_some()) {
            return Err(invalid("the last paye bracket must be open-ended".to_string()));
        }

        Ok(())
    }
}

/// Holiday calendar file structure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HolidaysConfig {
    /// Holidays recognised for overtime.
    #[serde(default)]
    pub holidays: Vec<Holiday>,
}

/// The complete payroll configuration loaded from YAML files.
#[derive(Debug, Clone, Default)]
pub struct PayrollConfig {
    policy: PayrollPolicy,
    holidays: Vec<Holiday>,
}

impl PayrollConfig {
    /// Creates a new PayrollConfig from its component parts.
    pub fn new(policy: PayrollPolicy, holidays: Vec<Holiday>) -> Self {
        let mut sorted_holidays = holidays;
        sorted_holidays.sort_by(|a, b| a.date.cmp(&b.date));
        Self {
            policy,
            holidays: sorted_holidays,
        }
    }

    /// Returns the payroll policy.
    pub fn policy(&self) -> &PayrollPolicy {
        &self.policy
    }

    /// Returns all configured holidays, sorted by date.
    pub fn holidays(&self) -> &[Holiday] {
        &self.holidays
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_policy_is_valid() {
        assert!(PayrollPolicy::default().validate("default").is_ok());
    }

    #[test]
    fn test_zero_working_days_rejected() {
        let mut policy = PayrollPolicy::default();
        policy.working_days_per_month = 0;
        match policy.validate("policy.yaml") {
            Err(EngineError::ConfigParseError { path, message }) => {
                assert_eq!(path, "policy.yaml");
                assert!(message.contains("working_days_per_month"));
            }
            other => panic!("Expected ConfigParseError, got {:?}", other),
        }
    }

    #[test]
    fn test_gap_between_brackets_rejected() {
        let mut policy = PayrollPolicy::default();
        policy.paye.brackets[1].min_income = Decimal::from(600_000);
        assert!(policy.validate("policy.yaml").is_err());
    }

    #[test]
    fn test_closed_top_bracket_rejected() {
        let mut policy = PayrollPolicy::default();
        policy.paye.brackets[2].max_income = Some(Decimal::from(5_000_000));
        assert!(policy.validate("policy.yaml").is_err());
    }

    #[test]
    fn test_first_bracket_above_zero_rejected() {
        let mut policy = PayrollPolicy::default();
        policy.paye.brackets[0].min_income = Decimal::from(100_000);
        match policy.validate("policy.yaml") {
            Err(EngineError::ConfigParseError { message, .. }) => {
                assert!(message.contains("first paye bracket"));
            }
            other => panic!("Expected ConfigParseError, got {:?}", other),
        }
    }

    #[test]
    fn test_absurd_hours_per_day_rejected() {
        let mut policy = PayrollPolicy::default();
        policy.hours_per_day = u32::MAX;
        assert!(policy.validate("policy.yaml").is_err());
    }

    #[test]
    fn test_empty_brackets_rejected() {
        let mut policy = PayrollPolicy::default();
        policy.paye.brackets.clear();
        assert!(policy.validate("policy.yaml").is_err());
    }

    #[test]
    fn test_config_sorts_holidays() {
        use chrono::NaiveDate;

        let config = PayrollConfig::new(
            PayrollPolicy::default(),
            vec![
                Holiday {
                    date: NaiveDate::from_ymd_opt(2024, 12, 25).unwrap(),
                    name: "Christmas Day".to_string(),
                },
                Holiday {
                    date: NaiveDate::from_ymd_opt(2024, 2, 4).unwrap(),
                    name: "Independence Day".to_string(),
                },
            ],
        );
        assert_eq!(config.holidays()[0].name, "Independence Day");
    }
}
