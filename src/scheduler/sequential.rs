//! Sequential capacity-driven day scheduler.
//!
//! # Algorithm
//!
//! 1. Milestones run strictly in list order. Each starts no earlier than
//!    the day after the previous milestone's latest placed work, no earlier
//!    than its own `start_date`, and on a working weekday.
//! 2. Tasks within a milestone share one cursor: a task continues where
//!    the previous one stopped.
//! 3. Each task is placed by kind:
//!    - **Errand** (0h): one zero-hour marker on its pinned date or the
//!      cursor date. No capacity used, cursor unchanged.
//!    - **Pinned**: cursor jumps to the pinned date (even backwards). The
//!      day's capacity is boosted until the task fits. Non-working
//!      weekdays are allowed.
//!    - **Flexible**: packed first-fit into consecutive working days,
//!      splitting across days as capacity runs out. Never truncated.
//! 4. `total_parts` is backfilled once a task is fully placed.
//!
//! # Complexity
//! O(D log D) where D = number of scheduled days (roughly total hours
//! divided by daily capacity).

use chrono::NaiveDate;
use tracing::{debug, trace, warn};

use super::cursor::SchedulingCursor;
use super::day_book::{DayBook, PartHandle};
use crate::models::{next_day, DayCapacities, DaySchedule, Milestone, ProjectConfig, Task, TaskPart};

/// Schedules milestones into days.
///
/// Returns days in ascending date order, each carrying at least one part.
/// Inputs are not modified.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use u_renovate::models::{DayCapacities, Milestone, ProjectConfig, Task};
/// use u_renovate::scheduler::calculate_schedule;
///
/// let start = NaiveDate::from_ymd_opt(2026, 3, 3).unwrap(); // Tuesday
/// let config = ProjectConfig::new(start).with_capacities(DayCapacities::weekdays(8.0));
/// let milestones = vec![
///     Milestone::new("m1", "Forberedelse Bad").with_task(Task::new("t1", "Rive flis", 10.0)),
/// ];
///
/// let days = calculate_schedule(&milestones, &config);
/// assert_eq!(days.len(), 2);
/// assert_eq!(days[0].parts[0].hours_spent, 8.0);
/// assert_eq!(days[1].parts[0].hours_spent, 2.0);
/// ```
pub fn calculate_schedule(milestones: &[Milestone], config: &ProjectConfig) -> Vec<DaySchedule> {
    SequentialScheduler::new(config).schedule(milestones)
}

/// Result of placing one task.
#[derive(Debug, Clone, Copy)]
struct Placement {
    /// Cursor after the task.
    cursor: SchedulingCursor,
    /// Day of the last capacity-consuming fragment, if any.
    last_placed: Option<NaiveDate>,
}

/// Sequential milestone/task scheduler bound to a project config.
#[derive(Debug, Clone, Copy)]
pub struct SequentialScheduler<'a> {
    config: &'a ProjectConfig,
}

impl<'a> SequentialScheduler<'a> {
    /// Creates a scheduler for `config`.
    pub fn new(config: &'a ProjectConfig) -> Self {
        Self { config }
    }

    fn capacities(&self) -> &DayCapacities {
        &self.config.day_capacities
    }

    /// Schedules all milestones.
    pub fn schedule(&self, milestones: &[Milestone]) -> Vec<DaySchedule> {
        let mut book = DayBook::new();
        let mut previous_end: Option<NaiveDate> = None;

        for milestone in milestones {
            let min_start = previous_end.map_or(self.config.start_date, next_day);
            let mut cursor =
                SchedulingCursor::milestone_start(min_start, milestone.start_date, self.capacities());
            debug!(
                milestone = %milestone.id,
                start = %cursor.date(),
                tasks = milestone.tasks.len(),
                "scheduling milestone"
            );

            let mut last_placed: Option<NaiveDate> = None;
            for task in &milestone.tasks {
                let placement = if task.is_errand() {
                    self.place_errand(&mut book, milestone, task, cursor)
                } else if let Some(pinned) = task.hard_start_date {
                    self.place_pinned(&mut book, milestone, task, cursor.jump_to(pinned))
                } else {
                    self.place_flexible(&mut book, milestone, task, cursor)
                };
                cursor = placement.cursor;
                last_placed = last_placed.max(placement.last_placed);
            }

            if last_placed.is_some() {
                previous_end = last_placed;
            }
        }

        book.into_days()
    }

    /// Zero-hour marker on the pinned date or the cursor date.
    fn place_errand(
        &self,
        book: &mut DayBook,
        milestone: &Milestone,
        task: &Task,
        cursor: SchedulingCursor,
    ) -> Placement {
        let date = task.hard_start_date.unwrap_or_else(|| cursor.date());
        let slot = book.get_or_create(date, self.capacities().for_date(date));
        book.place(slot, TaskPart::marker(task, milestone));
        trace!(task = %task.id, %date, "placed errand marker");

        Placement {
            cursor,
            last_placed: None,
        }
    }

    /// Pinned appointment starting on the cursor's (pinned) date.
    fn place_pinned(
        &self,
        book: &mut DayBook,
        milestone: &Milestone,
        task: &Task,
        mut cursor: SchedulingCursor,
    ) -> Placement {
        let mut remaining = task.estimate_hours;
        let mut handles: Vec<PartHandle> = Vec::new();
        let mut last_placed = None;

        while remaining > 0.0 {
            let date = cursor.date();
            let slot = match book.slot_of(date) {
                None => {
                    let capacity = self.capacities().for_date(date).max(remaining);
                    book.get_or_create(date, capacity)
                }
                Some(slot) => {
                    let day = book.day_mut(slot);
                    if day.remaining_capacity < remaining {
                        let extra = remaining - day.remaining_capacity;
                        debug!(task = %task.id, %date, extra, "boosting day capacity for pinned task");
                        day.boost(extra);
                    }
                    slot
                }
            };

            let hours = remaining.min(book.day(slot).remaining_capacity);
            if hours <= 0.0 {
                cursor = cursor.next_day();
                continue;
            }

            let part = TaskPart::new(task, milestone, hours, handles.len() + 1);
            handles.push(book.place(slot, part));
            trace!(task = %task.id, %date, hours, "placed pinned fragment");
            last_placed = Some(date);
            remaining -= hours;

            if remaining > 0.0 {
                let next = cursor.next_day();
                cursor = next.to_working_day(self.capacities()).unwrap_or(next);
            }
        }

        book.finalize(&handles);
        Placement {
            cursor,
            last_placed,
        }
    }

    /// Flexible work packed into consecutive working days.
    fn place_flexible(
        &self,
        book: &mut DayBook,
        milestone: &Milestone,
        task: &Task,
        mut cursor: SchedulingCursor,
    ) -> Placement {
        let mut remaining = task.estimate_hours;
        let mut handles: Vec<PartHandle> = Vec::new();
        let mut last_placed = None;

        if remaining > 0.0 && !self.capacities().has_working_day() {
            warn!(task = %task.id, hours = remaining, "no working weekday; flexible task left unscheduled");
            return Placement {
                cursor,
                last_placed,
            };
        }

        while remaining > 0.0 {
            if let Some(working) = cursor.to_working_day(self.capacities()) {
                cursor = working;
            }
            let date = cursor.date();
            let slot = book.get_or_create(date, self.capacities().for_date(date));

            let available = book.day(slot).remaining_capacity;
            if available <= 0.0 {
                cursor = cursor.next_day();
                continue;
            }

            let hours = remaining.min(available);
            let part = TaskPart::new(task, milestone, hours, handles.len() + 1);
            handles.push(book.place(slot, part));
            trace!(task = %task.id, %date, hours, "placed fragment");
            last_placed = Some(date);
            remaining -= hours;

            if remaining > 0.0 && book.day(slot).remaining_capacity <= 0.0 {
                cursor = cursor.next_day();
            }
        }

        book.finalize(&handles);
        Placement {
            cursor,
            last_placed,
        }
    }
}
