//! Request types for the payroll API.
//!
//! Periods arrive as `"YYYY-MM"` strings and are parsed in the handlers so
//! that a bad period is reported as a validation error rather than a JSON
//! error.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::EngineResult;
use crate::models::PayrollPeriod;
use crate::service::BatchFilter;

/// Request body for `POST /payroll/process`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessPayrollRequest {
    /// The period to process, as `"YYYY-MM"`.
    pub payroll_period: String,
    /// Only process this department.
    #[serde(default)]
    pub department: Option<String>,
    /// Only process this paygroup.
    #[serde(default)]
    pub paygroup: Option<String>,
}

impl ProcessPayrollRequest {
    /// Parses the period.
    pub fn period(&self) -> EngineResult<PayrollPeriod> {
        self.payroll_period.parse()
    }

    /// Returns the employee filter of the run.
    pub fn filter(&self) -> BatchFilter {
        BatchFilter {
            department: self.department.clone(),
            paygroup: self.paygroup.clone(),
        }
    }
}

/// Request body for `POST /payroll/calculate`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculatePayrollRequest {
    /// The employee to calculate.
    pub employee_id: String,
    /// The period, as `"YYYY-MM"`.
    pub payroll_period: String,
}

impl CalculatePayrollRequest {
    /// Parses the period.
    pub fn period(&self) -> EngineResult<PayrollPeriod> {
        self.payroll_period.parse()
    }
}

/// Request body for `POST /payroll/bank-file`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BankFileRequest {
    /// The period, as `"YYYY-MM"`.
    pub payroll_period: String,
}

impl BankFileRequest {
    /// Parses the period.
    pub fn period(&self) -> EngineResult<PayrollPeriod> {
        self.payroll_period.parse()
    }
}

/// Request body for `POST /payroll/payments`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordPaymentRequest {
    /// The stored payroll record.
    pub payroll_id: Uuid,
    /// Reference of the bank transaction.
    #[serde(default)]
    pub transaction_id: Option<String>,
    /// When the payment was made; defaults to now.
    #[serde(default)]
    pub paid_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_process_request_optional_filters() {
        let json = r#"{"payroll_period": "2024-03"}"#;
        let request: ProcessPayrollRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.period().unwrap().to_string(), "2024-03");
        assert_eq!(request.filter(), BatchFilter::default());
    }

    #[test]
    fn test_process_request_with_department() {
        let json = r#"{"payroll_period": "2024-03", "department": "science"}"#;
        let request: ProcessPayrollRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.filter().department.as_deref(), Some("science"));
        assert!(request.filter().paygroup.is_none());
    }

    #[test]
    fn test_bad_period_is_engine_error() {
        let request = CalculatePayrollRequest {
            employee_id: "emp_001".to_string(),
            payroll_period: "March".to_string(),
        };
        assert!(request.period().is_err());
    }

    #[test]
    fn test_payment_request_defaults() {
        let json = r#"{"payroll_id": "6f1c2d4e-8a9b-4c3d-9e8f-1a2b3c4d5e6f"}"#;
        let request: RecordPaymentRequest = serde_json::from_str(json).unwrap();
        assert!(request.transaction_id.is_none());
        assert!(request.paid_at.is_none());
    }
}
