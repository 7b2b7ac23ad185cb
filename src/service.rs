//! Payroll operations built on the calculator and the repositories.
//!
//! [`PayrollService`] runs payroll for a batch of employees and persists the
//! results, and serves everything downstream of a stored result: history,
//! payslips, the bank-transfer file and payment recording. It also maintains
//! per-employee statutory configuration.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::calculation::PayrollCalculator;
use crate::config::ConfigLoader;
use crate::error::{EngineError, EngineResult};
use crate::export::{BankTransferFile, build_bank_transfer_file};
use crate::models::{
    CompanyInfo, Employee, PayrollPeriod, PayrollResult, Payslip, StatutoryConfig,
};
use crate::repository::{
    EmployeeRepository, InMemoryStore, PayrollRepository, StatutoryRepository,
};

/// Restricts a payroll run to part of the workforce.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchFilter {
    /// Only employees of this department.
    #[serde(default)]
    pub department: Option<String>,
    /// Only employees of this paygroup.
    #[serde(default)]
    pub paygroup: Option<String>,
}

impl BatchFilter {
    /// Returns true if the employee is eligible for payroll and passes the
    /// filter.
    pub fn matches(&self, employee: &Employee) -> bool {
        let department_matches = self
            .department
            .as_ref()
            .is_none_or(|department| employee.employment_info.department == *department);
        let paygroup_matches = self
            .paygroup
            .as_ref()
            .is_none_or(|paygroup| employee.employment_info.paygroup.as_ref() == Some(paygroup));

        employee.is_payroll_eligible() && department_matches && paygroup_matches
    }
}

/// A per-employee failure in a payroll run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchError {
    /// The employee record id.
    pub employee_id: String,
    /// The employee number.
    pub employee_code: String,
    /// What went wrong.
    pub error: String,
}

/// Totals of a payroll run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchSummary {
    /// Number of employees paid.
    pub total_employees: usize,
    /// Sum of gross salaries.
    pub total_gross_salary: Decimal,
    /// Sum of net salaries.
    pub total_net_salary: Decimal,
    /// Sum of total deductions.
    pub total_deductions: Decimal,
    /// Net salary per employee paid; zero for an empty run.
    pub average_salary: Decimal,
}

impl BatchSummary {
    /// Totals a set of results.
    ///
    /// # Example
    ///
    /// ```
    /// use payroll_engine::service::BatchSummary;
    /// use rust_decimal::Decimal;
    ///
    /// let summary = BatchSummary::from_results(&[]);
    /// assert_eq!(summary.total_employees, 0);
    /// assert_eq!(summary.average_salary, Decimal::ZERO);
    /// ```
    pub fn from_results(results: &[PayrollResult]) -> Self {
        let total_gross_salary: Decimal = results.iter().map(|r| r.summary.gross_salary).sum();
        let total_net_salary: Decimal = results.iter().map(|r| r.summary.net_salary).sum();
        let total_deductions: Decimal = results.iter().map(|r| r.summary.total_deductions).sum();

        let average_salary = if results.is_empty() {
            Decimal::ZERO
        } else {
            total_net_salary / Decimal::from(results.len())
        };

        Self {
            total_employees: results.len(),
            total_gross_salary,
            total_net_salary,
            total_deductions,
            average_salary,
        }
    }
}

/// The outcome of a payroll run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchOutcome {
    /// Results calculated and stored.
    pub payroll_results: Vec<PayrollResult>,
    /// Employees that could not be processed.
    pub errors: Vec<BatchError>,
    /// Totals over `payroll_results`.
    pub summary: BatchSummary,
}

/// Changes to an employee's statutory configuration.
///
/// Fields left as `None` keep their current value, or the default for a
/// new configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatutoryUpdate {
    /// The employee id.
    pub employee_id: String,
    /// EPF membership number.
    #[serde(default)]
    pub epf_number: Option<String>,
    /// ETF membership number.
    #[serde(default)]
    pub etf_number: Option<String>,
    /// Employee EPF rate in percent.
    #[serde(default)]
    pub epf_rate: Option<Decimal>,
    /// Employer EPF rate in percent.
    #[serde(default)]
    pub employer_epf_rate: Option<Decimal>,
    /// Employer ETF rate in percent.
    #[serde(default)]
    pub etf_rate: Option<Decimal>,
    /// Recorded PAYE rate.
    #[serde(default)]
    pub paye_rate: Option<Decimal>,
    /// Tax file number.
    #[serde(default)]
    pub tax_number: Option<String>,
    /// Whether the configuration applies.
    #[serde(default)]
    pub is_active: Option<bool>,
}

impl StatutoryUpdate {
    fn apply_to(self, mut config: StatutoryConfig) -> StatutoryConfig {
        if let Some(v) = self.epf_number {
            config.epf_number = Some(v);
        }
        if let Some(v) = self.etf_number {
            config.etf_number = Some(v);
        }
        if let Some(v) = self.epf_rate {
            config.epf_rate = v;
        }
        if let Some(v) = self.employer_epf_rate {
            config.employer_epf_rate = v;
        }
        if let Some(v) = self.etf_rate {
            config.etf_rate = v;
        }
        if let Some(v) = self.paye_rate {
            config.paye_rate = Some(v);
        }
        if let Some(v) = self.tax_number {
            config.tax_number = Some(v);
        }
        if let Some(v) = self.is_active {
            config.is_active = v;
        }
        config
    }
}

fn validate_rate(name: &str, rate: Decimal) -> EngineResult<()> {
    if rate < Decimal::ZERO || rate > Decimal::ONE_HUNDRED {
        return Err(EngineError::InvalidRequest {
            message: format!("{} must be between 0 and 100, got {}", name, rate),
        });
    }
    Ok(())
}

/// Payroll operations over a set of repositories.
#[derive(Clone)]
pub struct PayrollService {
    calculator: PayrollCalculator,
    employees: Arc<dyn EmployeeRepository>,
    statutory: Arc<dyn StatutoryRepository>,
    payrolls: Arc<dyn PayrollRepository>,
}

impl PayrollService {
    /// Creates a service from a calculator and the repositories it writes to.
    pub fn new(
        calculator: PayrollCalculator,
        employees: Arc<dyn EmployeeRepository>,
        statutory: Arc<dyn StatutoryRepository>,
        payrolls: Arc<dyn PayrollRepository>,
    ) -> Self {
        Self {
            calculator,
            employees,
            statutory,
            payrolls,
        }
    }

    /// Wires a service to an in-memory store, using the loaded policy and
    /// holiday calendar.
    pub fn in_memory(store: Arc<InMemoryStore>, config: &ConfigLoader) -> Self {
        let calculator = PayrollCalculator::new(
            store.clone(),
            store.clone(),
            store.clone(),
            store.clone(),
            config.policy().clone(),
        )
        .with_holiday_calendar(Arc::new(config.holiday_calendar()));

        Self::new(calculator, store.clone(), store.clone(), store)
    }

    /// Returns the employer details printed on payslips.
    pub fn company(&self) -> &CompanyInfo {
        &self.calculator.policy().company
    }

    /// Lists employees eligible for payroll that pass the filter.
    pub fn eligible_employees(&self, filter: &BatchFilter) -> EngineResult<Vec<Employee>> {
        Ok(self
            .employees
            .list_employees()?
            .into_iter()
            .filter(|e| filter.matches(e))
            .collect())
    }

    /// Runs payroll for every eligible employee and stores the results.
    ///
    /// Employees are processed one after another. A failure for one
    /// employee, including an already-stored result for the period, is
    /// recorded in `errors` and does not stop the run.
    pub fn process_payroll(
        &self,
        period: &PayrollPeriod,
        filter: &BatchFilter,
    ) -> EngineResult<BatchOutcome> {
        let employees = self.eligible_employees(filter)?;
        info!(
            period = %period,
            department = filter.department.as_deref().unwrap_or("*"),
            paygroup = filter.paygroup.as_deref().unwrap_or("*"),
            eligible = employees.len(),
            "Starting payroll run"
        );

        let mut payroll_results = Vec::with_capacity(employees.len());
        let mut errors = Vec::new();

        for employee in &employees {
            let outcome = self
                .calculator
                .calculate_for_employee(employee, period)
                .and_then(|result| self.payrolls.insert_payroll(result));

            match outcome {
                Ok(result) => {
                    debug!(
                        employee_id = %employee.id,
                        net_salary = %result.summary.net_salary,
                        "Payroll stored"
                    );
                    payroll_results.push(result);
                }
                Err(err) => {
                    warn!(
                        employee_id = %employee.id,
                        period = %period,
                        error = %err,
                        "Payroll failed for employee"
                    );
                    errors.push(BatchError {
                        employee_id: employee.id.clone(),
                        employee_code: employee.employee_code.clone(),
                        error: err.to_string(),
                    });
                }
            }
        }

        let summary = BatchSummary::from_results(&payroll_results);
        info!(
            period = %period,
            processed = summary.total_employees,
            failed = errors.len(),
            total_net_salary = %summary.total_net_salary,
            "Payroll run completed"
        );

        Ok(BatchOutcome {
            payroll_results,
            errors,
            summary,
        })
    }

    /// Calculates an employee's payroll without storing it.
    pub fn calculate_payroll(
        &self,
        employee_id: &str,
        period: &PayrollPeriod,
    ) -> EngineResult<PayrollResult> {
        self.calculator.calculate_payroll(employee_id, period)
    }

    /// Returns all stored results of an employee, newest period first.
    pub fn payroll_history(&self, employee_id: &str) -> EngineResult<Vec<PayrollResult>> {
        self.require_employee(employee_id)?;
        self.payrolls.payroll_history(employee_id)
    }

    /// Builds the payslip of an employee for a period.
    ///
    /// Uses the stored result when one exists, otherwise a fresh calculation
    /// that is not stored.
    pub fn payslip(&self, employee_id: &str, period: &PayrollPeriod) -> EngineResult<Payslip> {
        let result = match self.payrolls.find_payroll_for_period(employee_id, period)? {
            Some(stored) => stored,
            None => {
                debug!(
                    employee_id = %employee_id,
                    period = %period,
                    "No stored payroll, calculating payslip on the fly"
                );
                self.calculator.calculate_payroll(employee_id, period)?
            }
        };

        Ok(Payslip::from_result(&result, self.company(), Utc::now()))
    }

    /// Builds the bank-transfer file for every stored result of a period.
    pub fn bank_transfer_file(&self, period: &PayrollPeriod) -> EngineResult<BankTransferFile> {
        let results = self.payrolls.payrolls_for_period(period)?;
        let file = build_bank_transfer_file(period, &results)?;

        if !file.skipped.is_empty() {
            warn!(
                period = %period,
                skipped = file.skipped.len(),
                "Employees without bank details left out of bank file"
            );
        }
        info!(
            period = %period,
            employees = file.total_employees,
            total_amount = %file.total_amount,
            "Bank transfer file generated"
        );

        Ok(file)
    }

    /// Marks a stored result as paid.
    ///
    /// Returns `PayrollNotFound` for an unknown id and `InvalidRequest` if
    /// the result is already paid.
    pub fn record_payment(
        &self,
        payroll_id: Uuid,
        transaction_id: Option<String>,
        paid_at: DateTime<Utc>,
    ) -> EngineResult<PayrollResult> {
        let updated = self
            .payrolls
            .mark_paid(payroll_id, transaction_id, paid_at)?;
        info!(
            payroll_id = %payroll_id,
            employee_id = %updated.employee_id,
            period = %updated.payroll_period,
            "Payroll marked as paid"
        );
        Ok(updated)
    }

    /// Returns the statutory configuration of an employee.
    pub fn statutory_config(&self, employee_id: &str) -> EngineResult<StatutoryConfig> {
        self.statutory
            .find_statutory(employee_id)?
            .ok_or_else(|| EngineError::StatutoryNotFound {
                employee_id: employee_id.to_string(),
            })
    }

    /// Creates or updates the statutory configuration of an employee.
    ///
    /// Rates must lie between 0 and 100.
    pub fn upsert_statutory(&self, update: StatutoryUpdate) -> EngineResult<StatutoryConfig> {
        self.require_employee(&update.employee_id)?;

        let current = self
            .statutory
            .find_statutory(&update.employee_id)?
            .unwrap_or_else(|| StatutoryConfig::with_default_rates(update.employee_id.clone()));
        let config = update.apply_to(current);

        validate_rate("epf_rate", config.epf_rate)?;
        validate_rate("employer_epf_rate", config.employer_epf_rate)?;
        validate_rate("etf_rate", config.etf_rate)?;

        let stored = self.statutory.upsert_statutory(config)?;
        info!(employee_id = %stored.employee_id, "Statutory configuration updated");
        Ok(stored)
    }

    fn require_employee(&self, employee_id: &str) -> EngineResult<Employee> {
        self.employees
            .find_employee(employee_id)?
            .ok_or_else(|| EngineError::EmployeeNotFound {
                employee_id: employee_id.to_string(),
            })
    }
}
