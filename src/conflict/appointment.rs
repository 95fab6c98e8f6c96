//! Appointment time-of-day arithmetic.
//!
//! Appointment times are 24-hour "HH:MM" strings. Because the format is
//! fixed-width, string order equals chronological order.

use chrono::{NaiveTime, Timelike};

/// Hour at which the work day begins.
pub const WORK_START_HOUR: f64 = 8.0;

/// Parses a strict 24-hour "HH:MM" time.
///
/// Returns `None` for anything else ("9:30", "24:00", "12:60", "noon").
pub fn parse_appointment_time(s: &str) -> Option<NaiveTime> {
    let bytes = s.as_bytes();
    if bytes.len() != 5 || bytes[2] != b':' {
        return None;
    }
    NaiveTime::parse_from_str(s, "%H:%M").ok()
}

/// Time of day as fractional hours (`"13:30"` → 13.5).
pub fn time_as_hours(time: NaiveTime) -> f64 {
    time.hour() as f64 + time.minute() as f64 / 60.0
}

/// Hours of flexible work that fit between 08:00 and the appointment.
///
/// Appointments at or before 08:00 leave no room.
pub fn hours_before(time: NaiveTime) -> f64 {
    (time_as_hours(time) - WORK_START_HOUR).max(0.0)
}
