//! Error types for the payroll engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while calculating, storing and
//! exporting payroll.

use thiserror::Error;

/// The main error type for the payroll engine.
///
/// All operations in the engine return this error type, making it easy
/// to handle errors consistently throughout the application.
///
/// # Example
///
/// ```
/// use payroll_engine::error::EngineError;
///
/// let error = EngineError::EmployeeNotFound {
///     employee_id: "emp_404".to_string(),
/// };
/// assert_eq!(error.to_string(), "Employee not found: emp_404");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// No employee exists with the given id.
    #[error("Employee not found: {employee_id}")]
    EmployeeNotFound {
        /// The id that was looked up.
        employee_id: String,
    },

    /// No stored payroll record exists with the given id.
    #[error("Payroll record not found: {payroll_id}")]
    PayrollNotFound {
        /// The payroll record id that was looked up.
        payroll_id: String,
    },

    /// No statutory configuration exists for the employee.
    #[error("Statutory configuration not found for employee: {employee_id}")]
    StatutoryNotFound {
        /// The employee id that was looked up.
        employee_id: String,
    },

    /// A payroll period string could not be parsed.
    #[error("Invalid payroll period '{value}': {message}")]
    InvalidPeriod {
        /// The raw period value.
        value: String,
        /// A description of what is wrong with it.
        message: String,
    },

    /// An employee record was invalid or contained inconsistent data.
    #[error("Invalid employee field '{field}': {message}")]
    InvalidEmployee {
        /// The field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// A request could not be honoured in the current state.
    #[error("Invalid request: {message}")]
    InvalidRequest {
        /// A description of the problem.
        message: String,
    },

    /// A payroll record already exists for the employee and period.
    #[error("Payroll already processed for employee '{employee_id}' in period {period}")]
    DuplicatePayroll {
        /// The employee id.
        employee_id: String,
        /// The payroll period.
        period: String,
    },

    /// A calculation produced a result that cannot be paid.
    #[error("Calculation error: {message}")]
    CalculationError {
        /// A description of the calculation error.
        message: String,
    },

    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// The backing store failed.
    #[error("Storage error: {message}")]
    Storage {
        /// A description of the storage failure.
        message: String,
    },

    /// An export file could not be produced.
    #[error("Export error: {message}")]
    Export {
        /// A description of the export failure.
        message: String,
    },
}

impl EngineError {
    /// Returns true for the not-found family of errors.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            EngineError::EmployeeNotFound { .. }
                | EngineError::PayrollNotFound { .. }
                | EngineError::StatutoryNotFound { .. }
        )
    }
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
