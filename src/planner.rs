//! One-call planning: schedule, then detect conflicts.

use serde::{Deserialize, Serialize};

use crate::conflict::detect_conflicts;
use crate::error::PlanError;
use crate::models::{ConflictMap, DaySchedule, Milestone, ProjectConfig};
use crate::scheduler::{calculate_schedule, ScheduleSummary};
use crate::validation::validate_input;

/// Input container for planning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanRequest {
    /// Milestones in execution order.
    pub milestones: Vec<Milestone>,
    /// Project calendar.
    pub config: ProjectConfig,
}

/// Schedule plus its conflict report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectPlan {
    /// Days with work, ascending.
    pub days: Vec<DaySchedule>,
    /// Conflict flags per task id.
    pub conflicts: ConflictMap,
}

impl PlanRequest {
    /// Creates a request.
    pub fn new(milestones: Vec<Milestone>, config: ProjectConfig) -> Self {
        Self { milestones, config }
    }

    /// Loads a request from JSON.
    pub fn from_json(json: &str) -> Result<Self, PlanError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Runs the scheduler, then the conflict detector.
    pub fn evaluate(&self) -> ProjectPlan {
        let days = calculate_schedule(&self.milestones, &self.config);
        let conflicts = detect_conflicts(&days, &self.milestones, &self.config);
        ProjectPlan { days, conflicts }
    }

    /// Validates the input, then evaluates.
    pub fn evaluate_checked(&self) -> Result<ProjectPlan, PlanError> {
        validate_input(&self.milestones, &self.config)?;
        Ok(self.evaluate())
    }
}

impl ProjectPlan {
    /// Ids of tasks with either conflict flag set, sorted.
    pub fn conflicted_task_ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self
            .conflicts
            .iter()
            .filter(|(_, info)| info.has_conflict())
            .map(|(id, _)| id.as_str())
            .collect();
        ids.sort_unstable();
        ids
    }

    /// Summary of the schedule against the request's calendar.
    pub fn summary(&self, config: &ProjectConfig) -> ScheduleSummary {
        ScheduleSummary::calculate(&self.days, |d| config.capacity_for(d))
    }
}
