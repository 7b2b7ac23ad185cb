//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading the payroll
//! policy and holiday calendar from YAML files.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::calendar::{Holiday, HolidayList};
use crate::error::{EngineError, EngineResult};

use super::types::{HolidaysConfig, PayrollConfig, PayrollPolicy};

/// Loads and provides access to payroll configuration.
///
/// # Directory Structure
///
/// ```text
/// config/payroll/
/// ├── policy.yaml    # Allowances, deductions, overtime, PAYE brackets
/// └── holidays.yaml  # Optional holiday calendar
/// ```
///
/// # Example
///
/// ```no_run
/// use payroll_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/payroll").unwrap();
/// println!("Working days: {}", loader.policy().working_days_per_month);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    config: PayrollConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// Returns an error if `policy.yaml` is missing, if any file contains
    /// invalid YAML, or if the policy fails validation. A missing
    /// `holidays.yaml` means no holidays.
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let policy_path = path.join("policy.yaml");
        let policy = Self::load_yaml::<PayrollPolicy>(&policy_path)?;
        policy.validate(&policy_path.display().to_string())?;

        let holidays_path = path.join("holidays.yaml");
        let holidays = if holidays_path.exists() {
            Self::load_yaml::<HolidaysConfig>(&holidays_path)?.holidays
        } else {
            Vec::new()
        };

        debug!(
            config_dir = %path.display(),
            holidays = holidays.len(),
            "Loaded payroll configuration"
        );

        Ok(Self {
            config: PayrollConfig::new(policy, holidays),
        })
    }

    /// Wraps an already-built configuration.
    pub fn from_config(config: PayrollConfig) -> Self {
        Self { config }
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the underlying configuration.
    pub fn config(&self) -> &PayrollConfig {
        &self.config
    }

    /// Returns the payroll policy.
    pub fn policy(&self) -> &PayrollPolicy {
        self.config.policy()
    }

    /// Returns the configured holidays.
    pub fn holidays(&self) -> &[Holiday] {
        self.config.holidays()
    }

    /// Builds a holiday calendar from the configured holidays.
    pub fn holiday_calendar(&self) -> HolidayList {
        HolidayList::new(self.config.holidays().iter().map(|h| h.date))
    }
}
