//! Day scheduler and schedule summaries.
//!
//! Turns ordered milestones into a day-by-day plan under per-weekday
//! capacity, milestone ordering, and pinned-appointment constraints.
//!
//! # Algorithm
//!
//! `calculate_schedule` is a sequential first-fit bin-packer over calendar
//! days with two exceptions: pinned appointments always land on their date
//! (boosting that day's capacity), and zero-hour errands become markers.
//!
//! # Summary
//!
//! `ScheduleSummary` groups a schedule by ISO week and reports totals and
//! the plan span.

mod cursor;
mod day_book;
mod sequential;
mod summary;

pub use cursor::SchedulingCursor;
pub use day_book::{DayBook, PartHandle};
pub use sequential::{calculate_schedule, SequentialScheduler};
pub use summary::{hours_for_task, parts_for_task, ScheduleSummary, WeekGroup};
