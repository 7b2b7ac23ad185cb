//! Configuration loading and management for the payroll engine.
//!
//! This module provides functionality to load the organisation-wide payroll
//! policy and the holiday calendar from YAML files.
//!
//! # Example
//!
//! ```no_run
//! use payroll_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/payroll").unwrap();
//! println!("Payslips issued by: {}", config.policy().company.name);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    AllowancePolicy, DeductionPolicy, HolidaysConfig, OvertimePolicy, PayeConfig, PayrollConfig,
    PayrollPolicy, TaxBracket,
};
