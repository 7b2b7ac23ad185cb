//! In-memory implementation of the repositories.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::error::{EngineError, EngineResult};
use crate::models::{
    AttendanceRecord, Employee, LeaveRecord, PaymentStatus, PayrollPeriod, PayrollResult,
    StatutoryConfig,
};

use super::{
    AttendanceRepository, EmployeeRepository, LeaveRepository, PayrollRepository,
    StatutoryRepository,
};

/// Initial contents of an [`InMemoryStore`], usually read from a JSON file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SeedData {
    /// Employees.
    #[serde(default)]
    pub employees: Vec<Employee>,
    /// Attendance records.
    #[serde(default)]
    pub attendance: Vec<AttendanceRecord>,
    /// Leave records.
    #[serde(default)]
    pub leaves: Vec<LeaveRecord>,
    /// Statutory configurations.
    #[serde(default)]
    pub statutory: Vec<StatutoryConfig>,
}

impl SeedData {
    /// Reads seed data from a JSON file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| EngineError::Storage {
            message: format!("failed to read seed file {}: {}", path.display(), e),
        })?;

        serde_json::from_str(&content).map_err(|e| EngineError::Storage {
            message: format!("failed to parse seed file {}: {}", path.display(), e),
        })
    }
}

#[derive(Debug, Default)]
struct PayrollTable {
    by_id: HashMap<Uuid, PayrollResult>,
    by_employee_period: HashMap<(String, PayrollPeriod), Uuid>,
}

/// A thread-safe store holding all payroll data in memory.
///
/// # Example
///
/// ```
/// use payroll_engine::repository::{EmployeeRepository, InMemoryStore};
///
/// let store = InMemoryStore::new();
/// assert!(store.find_employee("emp_001").unwrap().is_none());
/// ```
#[derive(Debug, Default)]
pub struct InMemoryStore {
    employees: RwLock<HashMap<String, Employee>>,
    attendance: RwLock<HashMap<(String, chrono::NaiveDate), AttendanceRecord>>,
    leaves: RwLock<Vec<LeaveRecord>>,
    statutory: RwLock<HashMap<String, StatutoryConfig>>,
    payrolls: RwLock<PayrollTable>,
}

impl InMemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store populated from seed data.
    pub fn from_seed(seed: SeedData) -> Self {
        let store = Self::new();
        debug!(
            employees = seed.employees.len(),
            attendance = seed.attendance.len(),
            leaves = seed.leaves.len(),
            statutory = seed.statutory.len(),
            "Seeding in-memory store"
        );

        for employee in seed.employees {
            store.add_employee(employee);
        }
        for record in seed.attendance {
            store.add_attendance(record);
        }
        for leave in seed.leaves {
            store.add_leave(leave);
        }
        for config in seed.statutory {
            store.statutory.write().insert(config.employee_id.clone(), config);
        }
        store
    }

    /// Adds or replaces an employee.
    pub fn add_employee(&self, employee: Employee) {
        self.employees.write().insert(employee.id.clone(), employee);
    }

    /// Adds an attendance record, replacing any record for the same
    /// employee and date.
    pub fn add_attendance(&self, record: AttendanceRecord) {
        self.attendance
            .write()
            .insert((record.employee_id.clone(), record.date), record);
    }

    /// Adds a leave record.
    pub fn add_leave(&self, leave: LeaveRecord) {
        self.leaves.write().push(leave);
    }
}

impl EmployeeRepository for InMemoryStore {
    fn find_employee(&self, employee_id: &str) -> EngineResult<Option<Employee>> {
        Ok(self.employees.read().get(employee_id).cloned())
    }

    fn list_employees(&self) -> EngineResult<Vec<Employee>> {
        let mut employees: Vec<Employee> = self.employees.read().values().cloned().collect();
        employees.sort_by(|a, b| a.employee_code.cmp(&b.employee_code));
        Ok(employees)
    }
}

impl AttendanceRepository for InMemoryStore {
    fn attendance_for_period(
        &self,
        employee_id: &str,
        period: &PayrollPeriod,
    ) -> EngineResult<Vec<AttendanceRecord>> {
        let mut records: Vec<AttendanceRecord> = self
            .attendance
            .read()
            .values()
            .filter(|r| r.employee_id == employee_id && period.contains_date(r.date))
            .cloned()
            .collect();
        records.sort_by_key(|r| r.date);
        Ok(records)
    }
}

impl LeaveRepository for InMemoryStore {
    fn leaves_for_period(
        &self,
        employee_id: &str,
        period: &PayrollPeriod,
    ) -> EngineResult<Vec<LeaveRecord>> {
        Ok(self
            .leaves
            .read()
            .iter()
            .filter(|l| l.employee_id == employee_id && l.touches_period(period))
            .cloned()
            .collect())
    }
}

impl StatutoryRepository for InMemoryStore {
    fn find_statutory(&self, employee_id: &str) -> EngineResult<Option<StatutoryConfig>> {
        Ok(self.statutory.read().get(employee_id).cloned())
    }

    fn upsert_statutory(&self, config: StatutoryConfig) -> EngineResult<StatutoryConfig> {
        self.statutory
            .write()
            .insert(config.employee_id.clone(), config.clone());
        Ok(config)
    }
}

impl PayrollRepository for InMemoryStore {
    fn insert_payroll(&self, result: PayrollResult) -> EngineResult<PayrollResult> {
        let mut table = self.payrolls.write();
        let key = (result.employee_id.clone(), result.payroll_period);

        if table.by_employee_period.contains_key(&key) {
            return Err(EngineError::DuplicatePayroll {
                employee_id: result.employee_id,
                period: result.payroll_period.to_string(),
            });
        }

        table.by_employee_period.insert(key, result.payroll_id);
        table.by_id.insert(result.payroll_id, result.clone());
        Ok(result)
    }

    fn find_payroll(&self, payroll_id: Uuid) -> EngineResult<Option<PayrollResult>> {
        Ok(self.payrolls.read().by_id.get(&payroll_id).cloned())
    }

    fn find_payroll_for_period(
        &self,
        employee_id: &str,
        period: &PayrollPeriod,
    ) -> EngineResult<Option<PayrollResult>> {
        let table = self.payrolls.read();
        Ok(table
            .by_employee_period
            .get(&(employee_id.to_string(), *period))
            .and_then(|id| table.by_id.get(id))
            .cloned())
    }

    fn payroll_history(&self, employee_id: &str) -> EngineResult<Vec<PayrollResult>> {
        let mut history: Vec<PayrollResult> = self
            .payrolls
            .read()
            .by_id
            .values()
            .filter(|r| r.employee_id == employee_id)
            .cloned()
            .collect();
        history.sort_by(|a, b| b.payroll_period.cmp(&a.payroll_period));
        Ok(history)
    }

    fn payrolls_for_period(&self, period: &PayrollPeriod) -> EngineResult<Vec<PayrollResult>> {
        let mut results: Vec<PayrollResult> = self
            .payrolls
            .read()
            .by_id
            .values()
            .filter(|r| r.payroll_period == *period)
            .cloned()
            .collect();
        results.sort_by(|a, b| a.employee_code.cmp(&b.employee_code));
        Ok(results)
    }

    fn mark_paid(
        &self,
        payroll_id: Uuid,
        transaction_id: Option<String>,
        paid_at: DateTime<Utc>,
    ) -> EngineResult<PayrollResult> {
        let mut table = self.payrolls.write();
        let result = table
            .by_id
            .get_mut(&payroll_id)
            .ok_or_else(|| EngineError::PayrollNotFound {
                payroll_id: payroll_id.to_string(),
            })?;

        if result.is_paid() {
            return Err(EngineError::InvalidRequest {
                message: format!("payroll {} is already paid", payroll_id),
            });
        }

        let details = &mut result.payment_details;
        details.payment_status = PaymentStatus::Paid;
        details.transaction_id = transaction_id;
        details.paid_at = Some(paid_at);
        Ok(result.clone())
    }
}
