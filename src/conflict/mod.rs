//! Conflict detection between flexible work and fixed appointments.
//!
//! Consumes a computed schedule plus the milestones it came from and
//! reports, per task, whether flexible work collides with a pinned
//! appointment. Signals are advisory: the scheduler never moves or
//! truncates work because of them.

mod appointment;
mod detector;

pub use appointment::{hours_before, parse_appointment_time, time_as_hours, WORK_START_HOUR};
pub use detector::detect_conflicts;
