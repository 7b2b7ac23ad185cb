//! Overtime calculation.
//!
//! Overtime is paid at the hourly share of basic salary. Hours worked on a
//! holiday earn the holiday multiplier; otherwise hours worked under a night
//! shift earn the night-shift multiplier. All other overtime is paid at
//! the plain hourly rate.

use rust_decimal::Decimal;

use crate::calendar::{HolidayCalendar, ShiftPolicy};
use crate::config::PayrollPolicy;
use crate::models::{AttendanceRecord, AuditStep, OvertimeBreakdown, WorkShift};

/// The kind of day an overtime entry was worked on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OvertimeKind {
    /// An ordinary day.
    Regular,
    /// A holiday.
    Holiday,
    /// A night shift on a non-holiday.
    Night,
}

impl OvertimeKind {
    fn as_str(&self) -> &'static str {
        match self {
            OvertimeKind::Regular => "regular",
            OvertimeKind::Holiday => "holiday",
            OvertimeKind::Night => "night",
        }
    }
}

/// The result of calculating overtime.
#[derive(Debug, Clone)]
pub struct OvertimeResult {
    /// The overtime breakdown.
    pub overtime: OvertimeBreakdown,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Returns the base overtime hourly rate for a basic salary.
pub fn overtime_hourly_rate(basic_salary: Decimal, policy: &PayrollPolicy) -> Decimal {
    let monthly_hours =
        Decimal::from(policy.working_days_per_month) * Decimal::from(policy.hours_per_day);
    basic_salary / monthly_hours
}

/// Classifies an overtime date. Holidays take precedence over night shifts.
pub fn classify_overtime(
    record: &AttendanceRecord,
    shift: &WorkShift,
    holidays: &dyn HolidayCalendar,
    shift_policy: &dyn ShiftPolicy,
) -> OvertimeKind {
    if holidays.is_holiday(record.date) {
        OvertimeKind::Holiday
    } else if shift_policy.is_night_shift(record.date, shift) {
        OvertimeKind::Night
    } else {
        OvertimeKind::Regular
    }
}

/// Calculates overtime pay for one employee and period.
///
/// An employee without an active shift assignment earns no overtime, even
/// if overtime minutes were recorded.
///
/// # Arguments
///
/// * `basic_salary` - The monthly basic salary
/// * `attendance` - Attendance records in the period
/// * `shift` - The employee's active shift, if any
/// * `holidays` - Holiday lookup
/// * `shift_policy` - Night-shift lookup
/// * `policy` - Working time and overtime multipliers
/// * `step_number` - The step number for audit trail sequencing
pub fn calculate_overtime(
    basic_salary: Decimal,
    attendance: &[AttendanceRecord],
    shift: Option<&WorkShift>,
    holidays: &dyn HolidayCalendar,
    shift_policy: &dyn ShiftPolicy,
    policy: &PayrollPolicy,
    step_number: u32,
) -> OvertimeResult {
    let overtime_records: Vec<&AttendanceRecord> = attendance
        .iter()
        .filter(|record| record.overtime_minutes > 0)
        .collect();

    let Some(shift) = shift else {
        let recorded_minutes: u32 = overtime_records.iter().map(|r| r.overtime_minutes).sum();
        let audit_step = AuditStep {
            step_number,
            rule_id: "overtime".to_string(),
            rule_name: "Overtime".to_string(),
            input: serde_json::json!({
                "basic_salary": basic_salary.normalize().to_string(),
                "has_active_shift": false,
                "recorded_overtime_minutes": recorded_minutes
            }),
            output: serde_json::json!({
                "total": "0"
            }),
            reasoning: "No active shift assignment - overtime is not paid".to_string(),
        };

        return OvertimeResult {
            overtime: OvertimeBreakdown::zero(),
            audit_step,
        };
    };

    let hourly_rate = overtime_hourly_rate(basic_salary, policy);

    let mut hours = Decimal::ZERO;
    let mut total = Decimal::ZERO;
    let mut entries = Vec::with_capacity(overtime_records.len());

    for record in &overtime_records {
        let kind = classify_overtime(record, shift, holidays, shift_policy);
        let multiplier = match kind {
            OvertimeKind::Holiday => policy.overtime.holiday_multiplier,
            OvertimeKind::Night => policy.overtime.night_shift_multiplier,
            OvertimeKind::Regular => Decimal::ONE,
        };
        let entry_hours = record.overtime_hours();
        let amount = entry_hours * hourly_rate * multiplier;

        hours += entry_hours;
        total += amount;
        entries.push(serde_json::json!({
            "date": record.date.to_string(),
            "kind": kind.as_str(),
            "hours": entry_hours.normalize().to_string(),
            "multiplier": multiplier.normalize().to_string(),
            "amount": amount.normalize().to_string()
        }));
    }

    // TODO: split holiday and night overtime into their own buckets once
    // payslips and reports read them; until then `regular` carries the total.
    let overtime = OvertimeBreakdown {
        hours,
        hourly_rate,
        regular: total,
        holiday: Decimal::ZERO,
        night: Decimal::ZERO,
        total,
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "overtime".to_string(),
        rule_name: "Overtime".to_string(),
        input: serde_json::json!({
            "basic_salary": basic_salary.normalize().to_string(),
            "has_active_shift": true,
            "shift": shift.name,
            "hourly_rate": hourly_rate.normalize().to_string()
        }),
        output: serde_json::json!({
            "entries": entries,
            "hours": hours.normalize().to_string(),
            "total": total.normalize().to_string()
        }),
        reasoning: format!(
            "{} overtime hour(s) across {} day(s) at base rate {} = {}",
            hours.normalize(),
            overtime_records.len(),
            hourly_rate.round_dp(2),
            total.round_dp(2)
        ),
    };

    OvertimeResult {
        overtime,
        audit_step,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::{AssignedShiftPolicy, HolidayList, NoHolidays};
    use crate::models::AttendanceStatus;
    use chrono::{NaiveDate, NaiveTime};
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, day).unwrap()
    }

    fn record(day: u32, overtime_minutes: u32) -> AttendanceRecord {
        AttendanceRecord {
            employee_id: "emp_001".to_string(),
            date: date(day),
            status: AttendanceStatus::Present,
            late_minutes: 0,
            overtime_minutes,
        }
    }

    fn shift(is_night_shift: bool) -> WorkShift {
        WorkShift {
            name: if is_night_shift { "Night" } else { "Day" }.to_string(),
            start_time: NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
            end_time: NaiveTime::from_hms_opt(16, 0, 0).unwrap(),
            is_night_shift,
        }
    }

    fn run(
        records: &[AttendanceRecord],
        shift: Option<&WorkShift>,
        holidays: &dyn HolidayCalendar,
    ) -> OvertimeResult {
        calculate_overtime(
            dec("70400"),
            records,
            shift,
            holidays,
            &AssignedShiftPolicy,
            &PayrollPolicy::default(),
            1,
        )
    }

    /// OT-001: Regular overtime at the base hourly rate
    #[test]
    fn test_hourly_rate_with_large_policy_values() {
        let mut policy = PayrollPolicy::default();
        policy.working_days_per_month = u32::MAX;
        policy.hours_per_day = 2;
        let rate = overtime_hourly_rate(dec("66000"), &policy);
        assert!(rate > Decimal::ZERO && rate < dec("0.0001"));
    }

    #[test]
    fn test_ot_001_regular_overtime() {
        // 70,400 / 176 = 400 per hour; 2 h = 800
        let day = shift(false);
        let result = run(&[record(6, 120)], Some(&day), &NoHolidays);

        assert_eq!(result.overtime.hourly_rate, dec("400"));
        assert_eq!(result.overtime.hours, dec("2"));
        assert_eq!(result.overtime.total, dec("800"));
        assert_eq!(result.overtime.regular, dec("800"));
        assert_eq!(result.overtime.holiday, Decimal::ZERO);
        assert_eq!(result.overtime.night, Decimal::ZERO);
    }

    /// OT-002: Holiday overtime is paid double
    #[test]
    fn test_ot_002_holiday_overtime_double() {
        let day = shift(false);
        let holidays = HolidayList::new([date(1)]);
        let result = run(&[record(1, 120)], Some(&day), &holidays);

        assert_eq!(result.overtime.total, dec("1600"));
        assert_eq!(result.audit_step.output["entries"][0]["kind"], "holiday");
    }

    /// OT-003: Night shift overtime is paid at one and a half
    #[test]
    fn test_ot_003_night_shift_overtime() {
        let night = shift(true);
        let result = run(&[record(6, 120)], Some(&night), &NoHolidays);

        assert_eq!(result.overtime.total, dec("1200"));
        assert_eq!(result.audit_step.output["entries"][0]["kind"], "night");
    }

    /// OT-004: A holiday on a night shift uses the holiday multiplier
    #[test]
    fn test_ot_004_holiday_beats_night_shift() {
        let night = shift(true);
        let holidays = HolidayList::new([date(1)]);
        let result = run(&[record(1, 60)], Some(&night), &holidays);

        assert_eq!(result.overtime.total, dec("800"));
    }

    /// OT-005: No active shift means no overtime
    #[test]
    fn test_ot_005_no_shift_no_overtime() {
        let result = run(&[record(6, 180)], None, &NoHolidays);

        assert_eq!(result.overtime, OvertimeBreakdown::zero());
        assert_eq!(result.audit_step.input["has_active_shift"], false);
        assert_eq!(result.audit_step.input["recorded_overtime_minutes"], 180);
    }

    /// OT-006: Mixed entries sum, records without overtime are skipped
    #[test]
    fn test_ot_006_mixed_entries_sum() {
        let day = shift(false);
        let holidays = HolidayList::new([date(1)]);
        let records = vec![record(1, 30), record(2, 0), record(3, 45)];
        let result = run(&records, Some(&day), &holidays);

        // 0.5 h x 400 x 2 = 400; 0.75 h x 400 = 300
        assert_eq!(result.overtime.hours, dec("1.25"));
        assert_eq!(result.overtime.total, dec("700"));
        assert_eq!(result.audit_step.output["entries"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_hourly_rate_uses_working_time() {
        let rate = overtime_hourly_rate(dec("66000"), &PayrollPolicy::default());
        assert_eq!(rate, dec("375"));
    }
}
