//! Statutory contribution configuration.
//!
//! Each employee may carry a [`StatutoryConfig`] holding the EPF/ETF rates
//! that apply to them. The calculator never sees the optional record
//! directly; it receives a [`StatutoryInfo`] which makes the unconfigured
//! case an explicit branch.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

fn default_epf_rate() -> Decimal {
    Decimal::from(8)
}

fn default_employer_epf_rate() -> Decimal {
    Decimal::from(12)
}

fn default_etf_rate() -> Decimal {
    Decimal::from(3)
}

fn default_true() -> bool {
    true
}

/// Per-employee statutory registration and contribution rates.
///
/// Rates are percentages of basic salary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatutoryConfig {
    /// The employee this configuration belongs to.
    pub employee_id: String,
    /// EPF membership number.
    #[serde(default)]
    pub epf_number: Option<String>,
    /// ETF membership number.
    #[serde(default)]
    pub etf_number: Option<String>,
    /// Employee EPF contribution rate.
    #[serde(default = "default_epf_rate")]
    pub epf_rate: Decimal,
    /// Employer EPF contribution rate.
    #[serde(default = "default_employer_epf_rate")]
    pub employer_epf_rate: Decimal,
    /// Employer ETF contribution rate.
    #[serde(default = "default_etf_rate")]
    pub etf_rate: Decimal,
    /// Flat PAYE rate on record. PAYE is computed from the tax slabs, so this
    /// value is carried for reference only.
    #[serde(default)]
    pub paye_rate: Option<Decimal>,
    /// Income tax file number.
    #[serde(default)]
    pub tax_number: Option<String>,
    /// Whether the configuration is in force.
    #[serde(default = "default_true")]
    pub is_active: bool,
}

impl StatutoryConfig {
    /// Creates a configuration with the default 8% / 12% / 3% rates.
    ///
    /// # Examples
    ///
    /// ```
    /// use payroll_engine::models::StatutoryConfig;
    /// use rust_decimal::Decimal;
    ///
    /// let config = StatutoryConfig::with_default_rates("emp_001");
    /// assert_eq!(config.epf_rate, Decimal::from(8));
    /// assert_eq!(config.employer_epf_rate, Decimal::from(12));
    /// assert_eq!(config.etf_rate, Decimal::from(3));
    /// ```
    pub fn with_default_rates(employee_id: impl Into<String>) -> Self {
        Self {
            employee_id: employee_id.into(),
            epf_number: None,
            etf_number: None,
            epf_rate: default_epf_rate(),
            employer_epf_rate: default_employer_epf_rate(),
            etf_rate: default_etf_rate(),
            paye_rate: None,
            tax_number: None,
            is_active: true,
        }
    }

    /// Returns the contribution rates carried by this configuration.
    pub fn rates(&self) -> StatutoryRates {
        StatutoryRates {
            epf_rate: self.epf_rate,
            employer_epf_rate: self.employer_epf_rate,
            etf_rate: self.etf_rate,
            paye_rate: self.paye_rate,
        }
    }
}

/// Contribution rates used by the statutory calculation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatutoryRates {
    /// Employee EPF rate.
    pub epf_rate: Decimal,
    /// Employer EPF rate.
    pub employer_epf_rate: Decimal,
    /// Employer ETF rate.
    pub etf_rate: Decimal,
    /// Flat PAYE rate on record (unused by the slab calculation).
    pub paye_rate: Option<Decimal>,
}

/// Statutory status of an employee for a payroll run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum StatutoryInfo {
    /// The employee has active statutory rates.
    Configured(StatutoryRates),
    /// No active statutory configuration; no contributions are taken.
    Unconfigured,
}

impl From<Option<&StatutoryConfig>> for StatutoryInfo {
    fn from(config: Option<&StatutoryConfig>) -> Self {
        match config {
            Some(config) if config.is_active => StatutoryInfo::Configured(config.rates()),
            _ => StatutoryInfo::Unconfigured,
        }
    }
}
