//! Export of payroll results to external formats.
//!
//! Currently this is the bank-transfer CSV file handed to the bank to pay
//! out net salaries for a period.

mod bank_file;

pub use bank_file::{
    BANK_FILE_HEADER, BankTransferFile, SkippedPayment, build_bank_transfer_file,
};
