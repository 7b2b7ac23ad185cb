//! Data access for the payroll engine.
//!
//! The calculator and service read employees, attendance, leave and
//! statutory configuration through these traits, and store payroll results
//! through [`PayrollRepository`]. [`InMemoryStore`] implements all of them.

mod memory;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::error::EngineResult;
use crate::models::{
    AttendanceRecord, Employee, LeaveRecord, PayrollPeriod, PayrollResult, StatutoryConfig,
};

pub use memory::{InMemoryStore, SeedData};

/// Read access to employees.
pub trait EmployeeRepository: Send + Sync {
    /// Looks up an employee by record id.
    fn find_employee(&self, employee_id: &str) -> EngineResult<Option<Employee>>;

    /// Lists all employees, ordered by employee code.
    fn list_employees(&self) -> EngineResult<Vec<Employee>>;
}

/// Read access to attendance records.
pub trait AttendanceRepository: Send + Sync {
    /// Returns the employee's attendance records dated inside the period,
    /// ordered by date.
    fn attendance_for_period(
        &self,
        employee_id: &str,
        period: &PayrollPeriod,
    ) -> EngineResult<Vec<AttendanceRecord>>;
}

/// Read access to leave records.
pub trait LeaveRepository: Send + Sync {
    /// Returns the employee's leave records whose start or end date falls
    /// inside the period, whatever their status.
    fn leaves_for_period(
        &self,
        employee_id: &str,
        period: &PayrollPeriod,
    ) -> EngineResult<Vec<LeaveRecord>>;
}

/// Access to per-employee statutory configuration.
pub trait StatutoryRepository: Send + Sync {
    /// Looks up the statutory configuration of an employee.
    fn find_statutory(&self, employee_id: &str) -> EngineResult<Option<StatutoryConfig>>;

    /// Creates or replaces the statutory configuration of an employee.
    fn upsert_statutory(&self, config: StatutoryConfig) -> EngineResult<StatutoryConfig>;
}

/// Storage for payroll results.
///
/// At most one result exists per employee and period.
pub trait PayrollRepository: Send + Sync {
    /// Stores a new result.
    ///
    /// Returns `DuplicatePayroll` if a result already exists for the same
    /// employee and period.
    fn insert_payroll(&self, result: PayrollResult) -> EngineResult<PayrollResult>;

    /// Looks up a result by id.
    fn find_payroll(&self, payroll_id: Uuid) -> EngineResult<Option<PayrollResult>>;

    /// Looks up the result of an employee for a period.
    fn find_payroll_for_period(
        &self,
        employee_id: &str,
        period: &PayrollPeriod,
    ) -> EngineResult<Option<PayrollResult>>;

    /// Lists all results of an employee, newest period first.
    fn payroll_history(&self, employee_id: &str) -> EngineResult<Vec<PayrollResult>>;

    /// Lists all results of a period, ordered by employee code.
    fn payrolls_for_period(&self, period: &PayrollPeriod) -> EngineResult<Vec<PayrollResult>>;

    /// Moves a stored result from pending to paid.
    ///
    /// The status check and the update happen as one step, so a result is
    /// paid at most once. Returns `PayrollNotFound` if no result has the id
    /// and `InvalidRequest` if it is already paid.
    fn mark_paid(
        &self,
        payroll_id: Uuid,
        transaction_id: Option<String>,
        paid_at: DateTime<Utc>,
    ) -> EngineResult<PayrollResult>;
}
