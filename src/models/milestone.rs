//! Milestone (phase) model.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::Task;

/// An ordered phase of work.
///
/// Milestones are scheduled strictly in list order: a milestone never
/// begins before the day after the previous milestone's last placed work.
/// `start_date` can only push a milestone later, never earlier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Milestone {
    /// Unique milestone identifier.
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Tasks in execution order.
    #[serde(default)]
    pub tasks: Vec<Task>,
    /// Earliest permitted start date.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
}

impl Milestone {
    /// Creates an empty milestone.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            tasks: Vec::new(),
            start_date: None,
        }
    }

    /// Appends a task.
    pub fn with_task(mut self, task: Task) -> Self {
        self.tasks.push(task);
        self
    }

    /// Sets the earliest start date.
    pub fn with_start_date(mut self, date: NaiveDate) -> Self {
        self.start_date = Some(date);
        self
    }

    /// Pinned tasks appearing after `task_id` in list order.
    ///
    /// Empty if `task_id` is not part of this milestone.
    pub fn pinned_after<'a>(&'a self, task_id: &str) -> impl Iterator<Item = &'a Task> + 'a {
        let start = self
            .tasks
            .iter()
            .position(|t| t.id == task_id)
            .map_or(self.tasks.len(), |i| i + 1);
        self.tasks[start..].iter().filter(|t| t.is_pinned())
    }
}
