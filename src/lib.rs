//! Payroll and statutory deduction engine.
//!
//! This crate calculates monthly payroll for school staff: basic salary,
//! fixed allowances, overtime, attendance and unpaid-leave deductions, and
//! the statutory contributions (EPF, ETF and PAYE). Results carry a full
//! breakdown and an audit trace of the rules applied, and feed payslips and
//! the bank-transfer file.
//!
//! The [`service::PayrollService`] runs payroll over a repository and the
//! [`api`] module exposes it over HTTP.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod calendar;
pub mod config;
pub mod error;
pub mod export;
pub mod models;
pub mod repository;
pub mod service;

#[cfg(test)]
mod test_support;
