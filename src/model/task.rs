use serde::{Deserialize, Serialize};

/// Identifier of a task within one import (the schedule's `ID` column).
pub type TaskId = i64;

/// A single line item of the schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: TaskId,
    /// Label with its leading indentation stripped.
    pub name: String,
    /// Actual percent complete, 0 to 100.
    pub completion_percent: f64,
    pub physical_percent: f64,
    pub replan_percent: f64,
    /// Duration exactly as exported (e.g. "10 days", "3,5 dias").
    pub duration: String,
    pub start: String,
    /// Forecast finish date.
    pub finish: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actual_start: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actual_finish: Option<String>,
    pub predecessors: String,
    pub baseline_start: String,
    pub baseline_finish: String,
    #[serde(default)]
    pub physical_planned_baseline: f64,
    #[serde(default)]
    pub physical_planned_replan: f64,
    #[serde(default)]
    pub physical_calculated: f64,
    /// Outline depth (0 = top level).
    pub level: u32,
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<TaskId>,
    /// Ids of the direct children, in schedule order.
    #[serde(default)]
    pub children: Vec<TaskId>,
}

impl Task {
    /// Create a task with empty dates and zero progress.
    pub fn new(id: TaskId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            completion_percent: 0.0,
            physical_percent: 0.0,
            replan_percent: 0.0,
            duration: String::new(),
            start: String::new(),
            finish: String::new(),
            actual_start: None,
            actual_finish: None,
            predecessors: String::new(),
            baseline_start: String::new(),
            baseline_finish: String::new(),
            physical_planned_baseline: 0.0,
            physical_planned_replan: 0.0,
            physical_calculated: 0.0,
            level: 0,
            category: String::new(),
            parent_id: None,
            children: Vec::new(),
        }
    }

    pub fn is_complete(&self) -> bool {
        self.completion_percent >= 100.0
    }

    pub fn is_pending(&self) -> bool {
        self.completion_percent <= 0.0
    }

    pub fn is_in_progress(&self) -> bool {
        !self.is_complete() && !self.is_pending()
    }

    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }
}
