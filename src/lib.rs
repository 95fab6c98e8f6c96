//! Renovation project planning for the U-Engine ecosystem.
//!
//! Turns ordered milestones of estimated tasks into a day-by-day work
//! schedule under per-weekday capacity, and flags where flexible work
//! collides with fixed appointments.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Milestone`, `Task`, `ProjectConfig`,
//!   `DaySchedule`, `TaskPart`, `ConflictInfo`
//! - **`scheduler`**: Sequential day scheduler and ISO-week summaries
//! - **`conflict`**: Hours-based and date-overflow conflict detection
//! - **`validation`**: Input integrity checks (duplicate IDs, estimates,
//!   appointment times, capacities)
//! - **`planner`**: `PlanRequest` running both passes in one call
//!
//! # Architecture
//!
//! Scheduler and conflict detector are pure, synchronous functions of
//! their inputs. The detector depends on the scheduler's output shape
//! only:
//!
//! ```text
//! milestones + config ─► calculate_schedule ─► days
//! days + milestones + config ─► detect_conflicts ─► conflict map
//! ```

pub mod conflict;
pub mod error;
pub mod models;
pub mod planner;
pub mod scheduler;
pub mod validation;

pub use error::PlanError;
