//! Renovation planning domain models.
//!
//! Provides the input types (milestones, tasks, project calendar) and the
//! output types (day schedule, conflict report) shared by the scheduler
//! and the conflict detector.
//!
//! # Domain Mappings
//!
//! | u-renovate | Meaning |
//! |------------|---------|
//! | Milestone | Ordered phase of work (e.g. demolition, plumbing) |
//! | Task | Work item with an hour estimate and a labor role |
//! | Pinned task | Fixed appointment (`hard_start_date`) |
//! | DaySchedule | One calendar day's placed work |
//! | TaskPart | One day's fragment of a task |

mod calendar;
mod conflict;
mod milestone;
mod schedule;
mod task;

pub use calendar::{next_day, weekday_number, DayCapacities, ProjectConfig, MAX_DAY_HOURS};
pub use conflict::{ConflictInfo, ConflictMap};
pub use milestone::Milestone;
pub use schedule::{DaySchedule, TaskPart};
pub use task::{Assignee, EquipmentCategory, EquipmentItem, Task};
