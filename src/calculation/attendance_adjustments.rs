//! Attendance-based pay adjustments.
//!
//! This module derives the deductions for absence, late arrival and unpaid
//! leave from the attendance and leave records of a payroll period.

use rust_decimal::Decimal;

use crate::config::PayrollPolicy;
use crate::error::{EngineError, EngineResult};
use crate::models::{
    AttendanceAdjustments, AttendanceRecord, AttendanceStatus, AuditStep, LeaveRecord,
};

/// The result of calculating attendance adjustments.
#[derive(Debug, Clone)]
pub struct AttendanceAdjustmentResult {
    /// The attendance adjustments.
    pub adjustments: AttendanceAdjustments,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Returns basic salary divided by the working days in a month.
pub fn per_day_salary(basic_salary: Decimal, policy: &PayrollPolicy) -> Decimal {
    basic_salary / Decimal::from(policy.working_days_per_month)
}

/// Calculates attendance adjustments for one employee and period.
///
/// * Present days accumulate late minutes, charged at the hourly share of
///   the daily salary.
/// * Absent days are deducted at the daily salary.
/// * Approved leave of an unpaid-excess type (casual and sick by default)
///   is deducted at the daily salary for every day beyond entitlement.
///
/// Half days and holidays carry no adjustment. Attendance earnings are
/// always zero.
///
/// # Arguments
///
/// * `basic_salary` - The monthly basic salary
/// * `attendance` - Attendance records in the period
/// * `leaves` - Leave records touching the period
/// * `policy` - Working days, hours per day and unpaid leave types
/// * `step_number` - The step number for audit trail sequencing
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::calculate_attendance_adjustments;
/// use payroll_engine::config::PayrollPolicy;
/// use payroll_engine::models::{AttendanceRecord, AttendanceStatus};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let absent = AttendanceRecord {
///     employee_id: "emp_001".to_string(),
///     date: NaiveDate::from_ymd_opt(2024, 3, 4).unwrap(),
///     status: AttendanceStatus::Absent,
///     late_minutes: 0,
///     overtime_minutes: 0,
/// };
///
/// let result = calculate_attendance_adjustments(
///     Decimal::from(66_000),
///     &[absent],
///     &[],
///     &PayrollPolicy::default(),
///     1,
/// )
/// .unwrap();
///
/// assert_eq!(result.adjustments.absent_deductions, Decimal::from(3_000));
/// ```
pub fn calculate_attendance_adjustments(
    basic_salary: Decimal,
    attendance: &[AttendanceRecord],
    leaves: &[LeaveRecord],
    policy: &PayrollPolicy,
    step_number: u32,
) -> EngineResult<AttendanceAdjustmentResult> {
    let per_day = per_day_salary(basic_salary, policy);
    let per_hour = per_day / Decimal::from(policy.hours_per_day);

    let mut present_days: u32 = 0;
    let mut absent_days: u32 = 0;
    let mut leave_days: u32 = 0;
    let mut late_minutes: u32 = 0;

    for record in attendance {
        match record.status {
            AttendanceStatus::Present => {
                present_days = present_days.saturating_add(1);
                late_minutes = late_minutes.checked_add(record.late_minutes).ok_or_else(|| {
                    EngineError::CalculationError {
                        message: format!(
                            "late minutes of employee {} overflow on {}",
                            record.employee_id, record.date
                        ),
                    }
                })?;
            }
            AttendanceStatus::Absent => absent_days = absent_days.saturating_add(1),
            AttendanceStatus::Leave => leave_days = leave_days.saturating_add(1),
            AttendanceStatus::HalfDay | AttendanceStatus::Holiday => {}
        }
    }

    let absent_deductions = Decimal::from(absent_days) * per_day;
    let late_deductions = Decimal::from(late_minutes) / Decimal::from(60) * per_hour;

    let unpaid_leave_days = leaves
        .iter()
        .filter(|leave| leave.is_approved())
        .filter(|leave| policy.unpaid_leave_types.contains(&leave.leave_type))
        .map(LeaveRecord::excess_days)
        .try_fold(0u32, u32::checked_add)
        .ok_or_else(|| EngineError::CalculationError {
            message: "unpaid leave days overflow".to_string(),
        })?;
    let unpaid_leaves = Decimal::from(unpaid_leave_days) * per_day;

    let total_deductions = absent_deductions + late_deductions + unpaid_leaves;
    let total_earnings = Decimal::ZERO;

    let audit_step = AuditStep {
        step_number,
        rule_id: "attendance_adjustments".to_string(),
        rule_name: "Attendance Adjustments".to_string(),
        input: serde_json::json!({
            "basic_salary": basic_salary.normalize().to_string(),
            "working_days_per_month": policy.working_days_per_month,
            "hours_per_day": policy.hours_per_day,
            "attendance_records": attendance.len(),
            "leave_records": leaves.len()
        }),
        output: serde_json::json!({
            "present_days": present_days,
            "absent_days": absent_days,
            "leave_days": leave_days,
            "late_minutes": late_minutes,
            "unpaid_leave_days": unpaid_leave_days,
            "per_day_salary": per_day.normalize().to_string(),
            "absent_deductions": absent_deductions.normalize().to_string(),
            "late_deductions": late_deductions.normalize().to_string(),
            "unpaid_leaves": unpaid_leaves.normalize().to_string(),
            "total_deductions": total_deductions.normalize().to_string()
        }),
        reasoning: format!(
            "{} absent day(s), {} late minute(s) and {} unpaid leave day(s) at {} per day = {}",
            absent_days,
            late_minutes,
            unpaid_leave_days,
            per_day.round_dp(2),
            total_deductions.round_dp(2)
        ),
    };

    Ok(AttendanceAdjustmentResult {
        adjustments: AttendanceAdjustments {
            present_days,
            absent_days,
            leave_days,
            late_minutes,
            per_day_salary: per_day,
            absent_deductions,
            late_deductions,
            unpaid_leave_days,
            unpaid_leaves,
            total_earnings,
            total_deductions,
        },
        audit_step,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{LeaveStatus, LeaveType};
    use chrono::NaiveDate;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn record(day: u32, status: AttendanceStatus, late_minutes: u32) -> AttendanceRecord {
        AttendanceRecord {
            employee_id: "emp_001".to_string(),
            date: NaiveDate::from_ymd_opt(2024, 3, day).unwrap(),
            status,
            late_minutes,
            overtime_minutes: 0,
        }
    }

    fn leave(leave_type: LeaveType, entitled: u32, total: u32, status: LeaveStatus) -> LeaveRecord {
        LeaveRecord {
            employee_id: "emp_001".to_string(),
            leave_type,
            start_date: NaiveDate::from_ymd_opt(2024, 3, 11).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
            entitled_days: entitled,
            total_days: total,
            status,
        }
    }

    fn full_month_present() -> Vec<AttendanceRecord> {
        (1..=22)
            .map(|day| record(day, AttendanceStatus::Present, 0))
            .collect()
    }

    /// AA-001: Full attendance carries no deduction
    #[test]
    fn test_aa_001_full_attendance_no_deductions() {
        let result = calculate_attendance_adjustments(
            dec("66000"),
            &full_month_present(),
            &[],
            &PayrollPolicy::default(),
            1,
        )
        .unwrap();

        let adj = result.adjustments;
        assert_eq!(adj.present_days, 22);
        assert_eq!(adj.per_day_salary, dec("3000"));
        assert_eq!(adj.total_deductions, Decimal::ZERO);
        assert_eq!(adj.total_earnings, Decimal::ZERO);
    }

    /// AA-002: Two absent days at 3,000 per day
    #[test]
    fn test_aa_002_absent_days_deducted_at_daily_rate() {
        let records = vec![
            record(4, AttendanceStatus::Absent, 0),
            record(5, AttendanceStatus::Absent, 0),
            record(6, AttendanceStatus::Present, 0),
        ];
        let result =
            calculate_attendance_adjustments(dec("66000"), &records, &[], &PayrollPolicy::default(), 1)
                .unwrap();

        assert_eq!(result.adjustments.absent_days, 2);
        assert_eq!(result.adjustments.absent_deductions, dec("6000"));
        assert_eq!(result.adjustments.total_deductions, dec("6000"));
    }

    /// AA-003: 90 late minutes at 375 per hour
    #[test]
    fn test_aa_003_late_minutes_charged_hourly() {
        let records = vec![
            record(4, AttendanceStatus::Present, 30),
            record(5, AttendanceStatus::Present, 60),
        ];
        let result =
            calculate_attendance_adjustments(dec("66000"), &records, &[], &PayrollPolicy::default(), 1)
                .unwrap();

        // 3,000 / 8 = 375 per hour; 1.5 h = 562.5
        assert_eq!(result.adjustments.late_minutes, 90);
        assert_eq!(result.adjustments.late_deductions, dec("562.5"));
    }

    /// AA-004: Late minutes on non-present days are ignored
    #[test]
    fn test_aa_004_late_minutes_only_count_when_present() {
        let records = vec![
            record(4, AttendanceStatus::Absent, 45),
            record(5, AttendanceStatus::HalfDay, 20),
        ];
        let result =
            calculate_attendance_adjustments(dec("66000"), &records, &[], &PayrollPolicy::default(), 1)
                .unwrap();

        assert_eq!(result.adjustments.late_minutes, 0);
        assert_eq!(result.adjustments.late_deductions, Decimal::ZERO);
    }

    /// AA-005: Half days and holidays carry no adjustment
    #[test]
    fn test_aa_005_half_day_and_holiday_ignored() {
        let records = vec![
            record(4, AttendanceStatus::HalfDay, 0),
            record(5, AttendanceStatus::Holiday, 0),
            record(6, AttendanceStatus::Leave, 0),
        ];
        let result =
            calculate_attendance_adjustments(dec("66000"), &records, &[], &PayrollPolicy::default(), 1)
                .unwrap();

        assert_eq!(result.adjustments.present_days, 0);
        assert_eq!(result.adjustments.absent_days, 0);
        assert_eq!(result.adjustments.leave_days, 1);
        assert_eq!(result.adjustments.total_deductions, Decimal::ZERO);
    }

    /// AA-006: Casual leave beyond entitlement is unpaid
    #[test]
    fn test_aa_006_casual_leave_excess_unpaid() {
        let leaves = vec![leave(LeaveType::Casual, 3, 5, LeaveStatus::Approved)];
        let result = calculate_attendance_adjustments(
            dec("66000"),
            &full_month_present(),
            &leaves,
            &PayrollPolicy::default(),
            1,
        )
        .unwrap();

        assert_eq!(result.adjustments.unpaid_leave_days, 2);
        assert_eq!(result.adjustments.unpaid_leaves, dec("6000"));
        assert_eq!(result.adjustments.total_deductions, dec("6000"));
    }

    /// AA-007: Annual leave, pending leave and leave within entitlement stay paid
    #[test]
    fn test_aa_007_paid_leave_not_deducted() {
        let leaves = vec![
            leave(LeaveType::Annual, 0, 5, LeaveStatus::Approved),
            leave(LeaveType::Sick, 0, 3, LeaveStatus::Pending),
            leave(LeaveType::Sick, 7, 2, LeaveStatus::Approved),
        ];
        let result = calculate_attendance_adjustments(
            dec("66000"),
            &full_month_present(),
            &leaves,
            &PayrollPolicy::default(),
            1,
        )
        .unwrap();

        assert_eq!(result.adjustments.unpaid_leave_days, 0);
        assert_eq!(result.adjustments.unpaid_leaves, Decimal::ZERO);
    }

    /// AA-008: All three deductions combine
    #[test]
    fn test_aa_008_combined_deductions() {
        let records = vec![
            record(4, AttendanceStatus::Absent, 0),
            record(5, AttendanceStatus::Present, 60),
        ];
        let leaves = vec![leave(LeaveType::Sick, 1, 2, LeaveStatus::Approved)];
        let result = calculate_attendance_adjustments(
            dec("66000"),
            &records,
            &leaves,
            &PayrollPolicy::default(),
            3,
        )
        .unwrap();

        // 3,000 absent + 375 late + 3,000 unpaid leave
        assert_eq!(result.adjustments.total_deductions, dec("6375"));
        assert_eq!(result.audit_step.step_number, 3);
        assert_eq!(result.audit_step.output["total_deductions"], "6375");
    }

    #[test]
    fn test_late_minutes_overflow_is_calculation_error() {
        let records = vec![
            record(4, AttendanceStatus::Present, u32::MAX),
            record(5, AttendanceStatus::Present, 1),
        ];
        let result =
            calculate_attendance_adjustments(dec("66000"), &records, &[], &PayrollPolicy::default(), 1);

        assert!(matches!(result, Err(EngineError::CalculationError { .. })));
    }

    #[test]
    fn test_per_day_salary_keeps_precision() {
        let per_day = per_day_salary(dec("50000"), &PayrollPolicy::default());
        assert_eq!(per_day.round_dp(2), dec("2272.73"));
    }
}
