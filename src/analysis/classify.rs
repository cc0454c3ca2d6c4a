use chrono::NaiveDate;

use crate::io::lenient::parse_date;
use crate::model::{Category, ScheduleHealth, ScheduleHealthCounts, Task};

/// Days before the forecast finish during which an incomplete task is at risk.
pub const DEFAULT_AT_RISK_DAYS: i64 = 3;

/// Classify an incomplete task against its baseline as seen on `reference`.
///
/// Returns `None` for completed tasks, which are not classified at all.
/// Rules, first match wins:
/// 1. late: forecast finish before `reference`, or after the baseline finish;
/// 2. at risk: forecast finish within `0..=at_risk_days` days of `reference`;
/// 3. ahead: forecast finish before the baseline finish;
/// 4. on time.
///
/// An unparsable forecast finish classifies as on time. Without a usable
/// baseline finish only the baseline comparisons are skipped.
pub fn classify(task: &Task, reference: NaiveDate, at_risk_days: i64) -> Option<ScheduleHealth> {
    if task.is_complete() {
        return None;
    }

    let Some(forecast) = parse_date(&task.finish) else {
        return Some(ScheduleHealth::OnTime);
    };
    let baseline = parse_date(&task.baseline_finish);

    let days_left = (forecast - reference).num_days();
    let health = if forecast < reference || baseline.is_some_and(|b| forecast > b) {
        ScheduleHealth::Late
    } else if (0..=at_risk_days).contains(&days_left) {
        ScheduleHealth::AtRisk
    } else if baseline.is_some_and(|b| forecast < b) {
        ScheduleHealth::Ahead
    } else {
        ScheduleHealth::OnTime
    };
    Some(health)
}

/// Tally the classification of every incomplete task in `tasks`.
pub fn tally(tasks: &[Task], reference: NaiveDate, at_risk_days: i64) -> ScheduleHealthCounts {
    let mut counts = ScheduleHealthCounts::default();
    for health in tasks.iter().filter_map(|t| classify(t, reference, at_risk_days)) {
        counts.record(health);
    }
    counts
}

/// Fill in each category's own schedule-health counts.
pub fn classify_categories(categories: &mut [Category], reference: NaiveDate, at_risk_days: i64) {
    for category in categories {
        category.schedule_health = tally(&category.tasks, reference, at_risk_days);
    }
}
