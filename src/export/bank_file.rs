//! Bank-transfer CSV file.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::{PayrollPeriod, PayrollResult};

/// Column headings of the bank-transfer file.
pub const BANK_FILE_HEADER: [&str; 5] = [
    "Employee ID",
    "Account Number",
    "Account Name",
    "Amount",
    "Reference",
];

/// A payroll result left out of the bank file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedPayment {
    /// The employee record id.
    pub employee_id: String,
    /// The employee number.
    pub employee_code: String,
    /// Why the result was skipped.
    pub reason: String,
}

/// A generated bank-transfer file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BankTransferFile {
    /// Suggested file name, `salary_payment_<period>.csv`.
    pub file_name: String,
    /// CSV content including the header row.
    pub file_content: String,
    /// Sum of the amounts in the file.
    pub total_amount: Decimal,
    /// Number of payment lines.
    pub total_employees: usize,
    /// Results that could not be included.
    pub skipped: Vec<SkippedPayment>,
}

fn export_error(e: impl std::fmt::Display) -> EngineError {
    EngineError::Export {
        message: e.to_string(),
    }
}

/// Builds the bank-transfer file for a period.
///
/// Each result with bank details becomes one line of
/// `employee code, account number, employee name, net salary, SALARY<period>`.
/// Amounts are rounded to two decimal places, midpoint away from zero.
/// Results without bank details are listed in `skipped`.
///
/// # Example
///
/// ```
/// use payroll_engine::export::build_bank_transfer_file;
/// use payroll_engine::models::PayrollPeriod;
///
/// let period = PayrollPeriod::new(2024, 3).unwrap();
/// let file = build_bank_transfer_file(&period, &[]).unwrap();
///
/// assert_eq!(file.file_name, "salary_payment_2024-03.csv");
/// assert_eq!(
///     file.file_content,
///     "Employee ID,Account Number,Account Name,Amount,Reference\n"
/// );
/// ```
pub fn build_bank_transfer_file(
    period: &PayrollPeriod,
    results: &[PayrollResult],
) -> EngineResult<BankTransferFile> {
    let reference = format!("SALARY{}", period);
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(BANK_FILE_HEADER).map_err(export_error)?;

    let mut total_amount = Decimal::ZERO;
    let mut total_employees = 0;
    let mut skipped = Vec::new();

    for result in results {
        let Some(account) = &result.payment_details.bank_account else {
            skipped.push(SkippedPayment {
                employee_id: result.employee_id.clone(),
                employee_code: result.employee_code.clone(),
                reason: "no bank account on record".to_string(),
            });
            continue;
        };

        let amount = result
            .summary
            .net_salary
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        let amount_text = format!("{:.2}", amount);

        writer
            .write_record([
                result.employee_code.as_str(),
                account.account_number.as_str(),
                result.employee_name.as_str(),
                amount_text.as_str(),
                reference.as_str(),
            ])
            .map_err(export_error)?;

        total_amount += amount;
        total_employees += 1;
    }

    let bytes = writer.into_inner().map_err(export_error)?;
    let file_content = String::from_utf8(bytes).map_err(export_error)?;

    Ok(BankTransferFile {
        file_name: format!("salary_payment_{}.csv", period),
        file_content,
        total_amount,
        total_employees,
        skipped,
    })
}
