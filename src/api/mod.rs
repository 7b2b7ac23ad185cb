//! HTTP API module for the payroll engine.
//!
//! This module provides the REST endpoints for running payroll, previewing
//! calculations, fetching payslips and history, producing the bank-transfer
//! file, recording payments and maintaining statutory configuration.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{
    BankFileRequest, CalculatePayrollRequest, ProcessPayrollRequest, RecordPaymentRequest,
};
pub use response::{ApiError, ApiErrorResponse};
pub use state::AppState;
