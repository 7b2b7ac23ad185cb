//! Work shift model and shift assignments.
//!
//! A [`WorkShift`] is a named working pattern (day, evening, night) and a
//! [`ShiftAssignment`] links it to an employee.

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

/// A named working shift.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkShift {
    /// Display name of the shift (e.g., "Boarding Night").
    pub name: String,
    /// Time of day the shift starts.
    pub start_time: NaiveTime,
    /// Time of day the shift ends.
    pub end_time: NaiveTime,
    /// Whether the shift is classed as a night shift for overtime.
    #[serde(default)]
    pub is_night_shift: bool,
}

impl WorkShift {
    /// Returns true if the shift ends on the day after it starts.
    ///
    /// # Examples
    ///
    /// ```
    /// use payroll_engine::models::WorkShift;
    /// use chrono::NaiveTime;
    ///
    /// let shift = WorkShift {
    ///     name: "Boarding Night".to_string(),
    ///     start_time: NaiveTime::from_hms_opt(22, 0, 0).unwrap(),
    ///     end_time: NaiveTime::from_hms_opt(6, 0, 0).unwrap(),
    ///     is_night_shift: true,
    /// };
    /// assert!(shift.crosses_midnight());
    /// ```
    pub fn crosses_midnight(&self) -> bool {
        self.end_time <= self.start_time
    }
}

/// Assignment of a shift to an employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftAssignment {
    /// The assigned shift.
    pub shift: WorkShift,
    /// Whether the assignment is currently in force.
    #[serde(default)]
    pub is_active: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn time(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn test_day_shift_does_not_cross_midnight() {
        let shift = WorkShift {
            name: "Day".to_string(),
            start_time: time(7, 30),
            end_time: time(15, 30),
            is_night_shift: false,
        };
        assert!(!shift.crosses_midnight());
    }

    #[test]
    fn test_night_shift_crosses_midnight() {
        let shift = WorkShift {
            name: "Night".to_string(),
            start_time: time(22, 0),
            end_time: time(6, 0),
            is_night_shift: true,
        };
        assert!(shift.crosses_midnight());
    }

    #[test]
    fn test_deserialize_assignment() {
        let json = r#"{
            "shift": {
                "name": "Night",
                "start_time": "22:00:00",
                "end_time": "06:00:00",
                "is_night_shift": true
            },
            "is_active": true
        }"#;

        let assignment: ShiftAssignment = serde_json::from_str(json).unwrap();
        assert!(assignment.is_active);
        assert!(assignment.shift.is_night_shift);
        assert_eq!(assignment.shift.start_time, time(22, 0));
    }

    #[test]
    fn test_night_flag_defaults_to_false() {
        let json = r#"{"name": "Day", "start_time": "08:00:00", "end_time": "16:00:00"}"#;
        let shift: WorkShift = serde_json::from_str(json).unwrap();
        assert!(!shift.is_night_shift);
    }
}
