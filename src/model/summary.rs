use serde::{Deserialize, Serialize};

use super::health::ScheduleHealthCounts;

/// Project-wide rollup for one import.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub total_tasks: usize,
    pub completed_tasks: usize,
    pub in_progress_tasks: usize,
    pub pending_tasks: usize,
    pub overall_progress: f64,
    pub remaining_days: i64,
    /// Resolved finish date formatted as DD/MM/YYYY.
    pub projected_completion_date: String,
    pub schedule_health: ScheduleHealthCounts,
    pub category_outlook: CategoryOutlook,
}

/// How many categories are predominantly on time, late, ahead or at risk.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryOutlook {
    pub total_categories: usize,
    pub on_time: usize,
    pub late: usize,
    pub ahead: usize,
    pub at_risk: usize,
    /// Mean of the categories' average progress.
    pub average_progress: f64,
}
