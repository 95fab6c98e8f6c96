//! Schedule (output) model.
//!
//! The scheduler produces one `DaySchedule` per calendar day that carries
//! work, in ascending date order. Each day holds the `TaskPart` fragments
//! worked that day.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{Assignee, EquipmentItem, Milestone, Task};

/// One day's fragment of a task.
///
/// For a task with `estimate_hours > 0`, the `hours_spent` of all its parts
/// sum to the estimate. Zero-hour errands produce exactly one marker part
/// with `hours_spent == 0`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskPart {
    pub task_id: String,
    pub task_name: String,
    pub assignee: Assignee,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub equipment: Vec<EquipmentItem>,
    /// Hours worked on this fragment.
    pub hours_spent: f64,
    /// 1-based position among the task's fragments.
    pub part_index: usize,
    /// Total fragment count of the task.
    pub total_parts: usize,
    pub milestone_id: String,
    pub milestone_name: String,
}

impl TaskPart {
    /// Creates a fragment of `task` within `milestone`.
    ///
    /// `total_parts` starts at 0 until the task is fully placed.
    pub fn new(task: &Task, milestone: &Milestone, hours_spent: f64, part_index: usize) -> Self {
        Self {
            task_id: task.id.clone(),
            task_name: task.name.clone(),
            assignee: task.assignee,
            equipment: task.equipment.clone(),
            hours_spent,
            part_index,
            total_parts: 0,
            milestone_id: milestone.id.clone(),
            milestone_name: milestone.name.clone(),
        }
    }

    /// Zero-hour errand marker (the task's only part).
    pub fn marker(task: &Task, milestone: &Milestone) -> Self {
        Self {
            total_parts: 1,
            ..Self::new(task, milestone, 0.0, 1)
        }
    }

    /// Whether this is a zero-hour marker.
    #[inline]
    pub fn is_marker(&self) -> bool {
        self.hours_spent == 0.0
    }
}

/// A calendar day with scheduled work.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DaySchedule {
    pub date: NaiveDate,
    /// Fragments in placement order.
    pub parts: Vec<TaskPart>,
    /// Capacity left after placing `parts` (hours).
    pub remaining_capacity: f64,
    /// Day capacity, possibly boosted above the weekday default by a
    /// pinned appointment (hours).
    pub total_capacity: f64,
}

impl DaySchedule {
    /// Creates an empty day with the given capacity.
    pub fn new(date: NaiveDate, capacity: f64) -> Self {
        Self {
            date,
            parts: Vec::new(),
            remaining_capacity: capacity,
            total_capacity: capacity,
        }
    }

    /// Raises both remaining and total capacity by `extra` hours.
    pub fn boost(&mut self, extra: f64) {
        if extra > 0.0 {
            self.remaining_capacity += extra;
            self.total_capacity += extra;
        }
    }

    /// Hours placed on this day.
    pub fn hours_used(&self) -> f64 {
        self.parts.iter().map(|p| p.hours_spent).sum()
    }

    /// Fragments of a given task.
    pub fn parts_for_task<'a>(&'a self, task_id: &'a str) -> impl Iterator<Item = &'a TaskPart> {
        self.parts.iter().filter(move |p| p.task_id == task_id)
    }

    /// Whether any fragment of `task_id` lands on this day.
    pub fn contains_task(&self, task_id: &str) -> bool {
        self.parts.iter().any(|p| p.task_id == task_id)
    }
}
