use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::model::{Category, CategoryVocabulary, ScheduleHealthCounts, Task};

/// Order in which categories are emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryOrder {
    /// Alphabetical by name.
    #[default]
    Alphabetical,
    /// The vocabulary's principal list first, then the rest alphabetically.
    Principal,
}

/// Partition tasks by their `category` field.
///
/// Each task lands in exactly one category; empty categories are never
/// produced. Schedule-health counts are left zeroed for the classifier.
pub fn group_by_category(
    tasks: &[Task],
    vocabulary: &CategoryVocabulary,
    order: CategoryOrder,
) -> Vec<Category> {
    let mut groups: BTreeMap<&str, Vec<Task>> = BTreeMap::new();
    for task in tasks {
        groups.entry(task.category.as_str()).or_default().push(task.clone());
    }

    let mut categories: Vec<Category> = Vec::with_capacity(groups.len());
    if order == CategoryOrder::Principal {
        for name in &vocabulary.principal {
            if let Some(members) = groups.remove(name.as_str()) {
                categories.push(make_category(name, members, vocabulary));
            }
        }
    }
    // BTreeMap iteration is already alphabetical.
    for (name, members) in groups {
        categories.push(make_category(name, members, vocabulary));
    }

    categories
}

fn make_category(name: &str, mut tasks: Vec<Task>, vocabulary: &CategoryVocabulary) -> Category {
    tasks.sort_by_key(|t| t.id);
    let (color, icon) = vocabulary.style_of(name);

    Category {
        name: name.to_string(),
        color_tag: color.to_string(),
        icon_tag: icon.to_string(),
        average_progress: mean_progress(&tasks),
        completed_tasks: tasks.iter().filter(|t| t.is_complete()).count(),
        in_progress_tasks: tasks.iter().filter(|t| t.is_in_progress()).count(),
        pending_tasks: tasks.iter().filter(|t| t.is_pending()).count(),
        tasks,
        schedule_health: ScheduleHealthCounts::default(),
    }
}

/// Unweighted mean of completion percent; 0 for an empty slice.
pub fn mean_progress(tasks: &[Task]) -> f64 {
    if tasks.is_empty() {
        return 0.0;
    }
    tasks.iter().map(|t| t.completion_percent).sum::<f64>() / tasks.len() as f64
}
