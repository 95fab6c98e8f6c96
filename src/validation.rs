//! Input validation for renovation plans.
//!
//! Checks the caller-side contract before scheduling. Detects:
//! - Duplicate milestone and task IDs
//! - Negative or non-finite hour estimates
//! - Malformed or orphaned appointment times
//! - Weekday capacities outside `0..=24` hours or keys outside `0..=6`
//! - Flexible work with no working weekday to land on
//!
//! The scheduler and conflict detector never call this; they assume
//! well-formed input. Callers that accept untrusted input run it first
//! (see [`PlanRequest::evaluate_checked`](crate::planner::PlanRequest::evaluate_checked)).

use std::collections::HashSet;

use thiserror::Error;

use crate::conflict::parse_appointment_time;
use crate::models::{Milestone, ProjectConfig, MAX_DAY_HOURS};

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{message}")]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two milestones or two tasks share the same ID.
    DuplicateId,
    /// A task estimate is negative, NaN or infinite.
    NegativeEstimate,
    /// A start time is not a 24-hour "HH:MM" string.
    InvalidStartTime,
    /// A start time is set on a task without a hard start date.
    StartTimeWithoutDate,
    /// A weekday capacity is out of range.
    CapacityOutOfRange,
    /// Flexible work exists but no weekday has capacity.
    NoWorkingDays,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates milestones and config.
///
/// Checks:
/// 1. No duplicate milestone IDs
/// 2. No duplicate task IDs (across all milestones)
/// 3. Every estimate is finite and non-negative
/// 4. Every start time parses as "HH:MM"
/// 5. Start times only appear on pinned tasks
/// 6. Weekday capacities lie in `0..=24` under keys `0..=6`
/// 7. If any flexible task has hours, some weekday has capacity
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_input(milestones: &[Milestone], config: &ProjectConfig) -> ValidationResult {
    let mut errors = Vec::new();

    let mut milestone_ids = HashSet::new();
    let mut task_ids = HashSet::new();
    let mut has_flexible_work = false;

    for milestone in milestones {
        if !milestone_ids.insert(milestone.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate milestone ID: {}", milestone.id),
            ));
        }

        for task in &milestone.tasks {
            if !task_ids.insert(task.id.as_str()) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::DuplicateId,
                    format!("Duplicate task ID: {}", task.id),
                ));
            }

            if !task.estimate_hours.is_finite() || task.estimate_hours < 0.0 {
                errors.push(ValidationError::new(
                    ValidationErrorKind::NegativeEstimate,
                    format!(
                        "Task '{}' has invalid estimate {}",
                        task.id, task.estimate_hours
                    ),
                ));
            } else if task.estimate_hours > 0.0 && !task.is_pinned() {
                has_flexible_work = true;
            }

            if let Some(ref time) = task.start_time {
                if parse_appointment_time(time).is_none() {
                    errors.push(ValidationError::new(
                        ValidationErrorKind::InvalidStartTime,
                        format!("Task '{}' has malformed start time '{}'", task.id, time),
                    ));
                }
                if !task.is_pinned() {
                    errors.push(ValidationError::new(
                        ValidationErrorKind::StartTimeWithoutDate,
                        format!(
                            "Task '{}' has start time '{}' but no hard start date",
                            task.id, time
                        ),
                    ));
                }
            }
        }
    }

    for (weekday, hours) in config.day_capacities.entries() {
        if weekday > 6 || !(0.0..=MAX_DAY_HOURS).contains(&hours) {
            errors.push(ValidationError::new(
                ValidationErrorKind::CapacityOutOfRange,
                format!("Weekday {weekday} has capacity {hours} (expected 0..=24 on 0..=6)"),
            ));
        }
    }

    if has_flexible_work && !config.day_capacities.has_working_day() {
        errors.push(ValidationError::new(
            ValidationErrorKind::NoWorkingDays,
            "Flexible tasks have hours but no weekday has capacity",
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
