//! Schedule summary metrics.
//!
//! Aggregates a computed schedule for timeline views.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Weeks | Days grouped by ISO week, with hours per week |
//! | Total hours | Sum of all fragment hours |
//! | Working days | Number of days carrying work |
//! | First / last date | Span of the plan |
//! | Boosted days | Days whose capacity was raised by an appointment |

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::models::{DaySchedule, TaskPart};

/// Days of one ISO week.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeekGroup {
    /// `"{iso_year}-W{week}"`, e.g. `"2026-W10"`.
    pub week_id: String,
    /// ISO week number (1..=53).
    pub week_number: u32,
    /// Dates of the days in this week, ascending.
    pub days: Vec<NaiveDate>,
    /// Hours placed in this week.
    pub total_hours: f64,
}

/// Aggregate view of a schedule.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleSummary {
    /// Days grouped by ISO week, in date order.
    pub weeks: Vec<WeekGroup>,
    /// Sum of all fragment hours.
    pub total_hours: f64,
    /// Number of days carrying work (markers included).
    pub working_days: usize,
    /// Earliest scheduled date.
    pub first_date: Option<NaiveDate>,
    /// Latest scheduled date.
    pub last_date: Option<NaiveDate>,
    /// Days whose total capacity exceeds the configured weekday capacity.
    pub boosted_days: Vec<NaiveDate>,
}

impl ScheduleSummary {
    /// Summarizes a date-ordered schedule.
    ///
    /// `weekday_capacity` maps a date to its configured capacity; it is
    /// used to spot boosted days.
    pub fn calculate(days: &[DaySchedule], weekday_capacity: impl Fn(NaiveDate) -> f64) -> Self {
        let mut weeks: Vec<WeekGroup> = Vec::new();
        let mut total_hours = 0.0;
        let mut boosted_days = Vec::new();

        for day in days {
            let iso = day.date.iso_week();
            let week_id = format!("{}-W{}", iso.year(), iso.week());
            let hours = day.hours_used();
            total_hours += hours;

            match weeks.last_mut() {
                Some(group) if group.week_id == week_id => {
                    group.days.push(day.date);
                    group.total_hours += hours;
                }
                _ => weeks.push(WeekGroup {
                    week_id,
                    week_number: iso.week(),
                    days: vec![day.date],
                    total_hours: hours,
                }),
            }

            if day.total_capacity > weekday_capacity(day.date) {
                boosted_days.push(day.date);
            }
        }

        Self {
            weeks,
            total_hours,
            working_days: days.len(),
            first_date: days.first().map(|d| d.date),
            last_date: days.last().map(|d| d.date),
            boosted_days,
        }
    }

    /// Calendar span from first to last date, inclusive (days).
    pub fn span_days(&self) -> i64 {
        match (self.first_date, self.last_date) {
            (Some(first), Some(last)) => (last - first).num_days() + 1,
            _ => 0,
        }
    }
}

/// Total hours scheduled for a task.
pub fn hours_for_task(days: &[DaySchedule], task_id: &str) -> f64 {
    days.iter()
        .flat_map(move |d| d.parts_for_task(task_id))
        .map(|p| p.hours_spent)
        .sum()
}

/// A task's fragments with their dates, in chronological order.
pub fn parts_for_task<'a>(days: &'a [DaySchedule], task_id: &str) -> Vec<(NaiveDate, &'a TaskPart)> {
    days.iter()
        .flat_map(move |d| {
            d.parts
                .iter()
                .filter(move |p| p.task_id == task_id)
                .map(move |p| (d.date, p))
        })
        .collect()
}
