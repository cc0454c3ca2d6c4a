use chrono::NaiveDate;

use crate::analysis::categories::mean_progress;
use crate::io::lenient::{display_date, parse_date};
use crate::model::{Category, CategoryOutlook, ScheduleHealth, Summary, Task, TaskForest};

/// The task standing for the whole project: the single top-level root.
///
/// When the forest has several roots, or its only root is indented, there
/// is no project root.
pub fn project_root(forest: &TaskForest) -> Option<&Task> {
    match forest.root_ids() {
        [only] => forest.get(*only).filter(|t| t.level == 0),
        _ => None,
    }
}

/// Roll tasks and categories up into the project summary.
///
/// Schedule-health counts are summed from the categories so the category and
/// project figures always reconcile.
pub fn summarize(
    forest: &TaskForest,
    categories: &[Category],
    reference: NaiveDate,
    fallback_finish: NaiveDate,
) -> Summary {
    let tasks = forest.tasks();
    let total_tasks = tasks.len();
    let completed_tasks = tasks.iter().filter(|t| t.is_complete()).count();
    let pending_tasks = tasks.iter().filter(|t| t.is_pending()).count();
    let in_progress_tasks = total_tasks - completed_tasks - pending_tasks;

    let root = project_root(forest);
    let overall_progress = root
        .map(|r| r.completion_percent)
        .unwrap_or_else(|| mean_progress(tasks));

    let finish = root
        .and_then(|r| parse_date(&r.finish))
        .unwrap_or(fallback_finish);
    let remaining_days = (finish - reference).num_days().max(0);

    Summary {
        total_tasks,
        completed_tasks,
        in_progress_tasks,
        pending_tasks,
        overall_progress,
        remaining_days,
        projected_completion_date: display_date(finish),
        schedule_health: categories.iter().map(|c| c.schedule_health).sum(),
        category_outlook: outlook(categories),
    }
}

/// Count categories by their predominant schedule health.
pub fn outlook(categories: &[Category]) -> CategoryOutlook {
    let mut out = CategoryOutlook {
        total_categories: categories.len(),
        ..CategoryOutlook::default()
    };
    for category in categories {
        match category.schedule_health.predominant() {
            ScheduleHealth::OnTime => out.on_time += 1,
            ScheduleHealth::Late => out.late += 1,
            ScheduleHealth::Ahead => out.ahead += 1,
            ScheduleHealth::AtRisk => out.at_risk += 1,
        }
    }
    if !categories.is_empty() {
        out.average_progress = categories.iter().map(|c| c.average_progress).sum::<f64>()
            / categories.len() as f64;
    }
    out
}
