use std::collections::BTreeSet;

use chrono::NaiveDate;

use crate::io::lenient::{display_date, parse_date};
use crate::model::{Category, EvolutionSeries, Task};

/// One series per category: each member task's completion percent.
pub fn category_series(categories: &[Category]) -> Vec<EvolutionSeries> {
    categories
        .iter()
        .map(|category| {
            let mut series = EvolutionSeries::new(&category.name);
            for task in &category.tasks {
                series.push(&task.name, task.completion_percent);
            }
            series
        })
        .collect()
}

/// Cumulative share of tasks due by each date, on the baseline and on the forecast.
///
/// Both series share the same date labels: every distinct parsable baseline
/// or forecast finish, ascending. Tasks with unparsable dates count towards
/// the total but never towards a point.
pub fn s_curves(tasks: &[Task]) -> (EvolutionSeries, EvolutionSeries) {
    let baseline: Vec<NaiveDate> = tasks.iter().filter_map(|t| parse_date(&t.baseline_finish)).collect();
    let forecast: Vec<NaiveDate> = tasks.iter().filter_map(|t| parse_date(&t.finish)).collect();
    let dates: BTreeSet<NaiveDate> = baseline.iter().chain(forecast.iter()).copied().collect();

    let mut planned = EvolutionSeries::new("Baseline");
    let mut projected = EvolutionSeries::new("Forecast");
    if tasks.is_empty() {
        return (planned, projected);
    }

    let share = |set: &[NaiveDate], date: NaiveDate| {
        100.0 * set.iter().filter(|d| **d <= date).count() as f64 / tasks.len() as f64
    };
    for date in dates {
        let label = display_date(date);
        planned.push(label.clone(), share(&baseline[..], date));
        projected.push(label, share(&forecast[..], date));
    }

    (planned, projected)
}
