//! Shared fixtures for unit tests.

use rust_decimal::Decimal;

use crate::calculation::{Calendars, PayrollInputs, compute_payroll};
use crate::config::PayrollPolicy;
use crate::models::{
    BankInfo, Employee, EmploymentInfo, PayrollPeriod, PayrollResult, PersonalInfo,
    StatutoryConfig, StatutoryInfo,
};

pub fn sample_employee(employee_id: &str, basic_salary: i64) -> Employee {
    Employee {
        id: employee_id.to_string(),
        employee_code: format!("EMP-{}", employee_id),
        personal_info: PersonalInfo {
            first_name: "Test".to_string(),
            last_name: employee_id.to_string(),
        },
        employment_info: EmploymentInfo {
            basic_salary: Decimal::from(basic_salary),
            department: "science".to_string(),
            paygroup: Some("teaching".to_string()),
            designation: Some("Teacher".to_string()),
        },
        shifts: vec![],
        bank_info: Some(BankInfo {
            account_number: format!("ACC-{}", employee_id),
            account_name: format!("Test {}", employee_id),
            bank_name: None,
            branch: None,
        }),
        employment_status: Default::default(),
        is_active: true,
    }
}

pub fn sample_result(employee_id: &str, period: PayrollPeriod) -> PayrollResult {
    let employee = sample_employee(employee_id, 66_000);
    let statutory = StatutoryConfig::with_default_rates(employee_id);
    let inputs = PayrollInputs {
        employee: &employee,
        period,
        attendance: &[],
        leaves: &[],
        statutory: StatutoryInfo::from(Some(&statutory)),
    };
    compute_payroll(&inputs, &PayrollPolicy::default(), Calendars::default()).unwrap()
}
