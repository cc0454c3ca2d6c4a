use tracing::warn;

use crate::model::{Task, TaskForest};

/// Link a flat, level-annotated task list into a forest.
///
/// Tasks are first sorted by id. An explicit stack holds the open ancestors:
/// before placing a task, every ancestor at the same or a deeper indentation
/// is closed; the remaining top (if any) becomes its parent.
///
/// A task indented more than one level below its parent is re-levelled to
/// `parent.level + 1`. Tasks with no open ancestor are roots whatever their
/// indentation, so a schedule may have several roots.
///
/// A task whose id equals its would-be parent's id is kept as a root, so
/// ids strictly increase along every parent-to-child link.
pub fn build_forest(mut tasks: Vec<Task>) -> TaskForest {
    tasks.sort_by_key(|t| t.id);
    if tasks.windows(2).any(|w| w[0].id == w[1].id) {
        warn!("Schedule contains duplicate task ids; parent links may be ambiguous");
    }

    let indent: Vec<u32> = tasks.iter().map(|t| t.level).collect();
    let mut roots = Vec::new();
    let mut stack: Vec<usize> = Vec::new();

    for i in 0..tasks.len() {
        tasks[i].parent_id = None;
        tasks[i].children.clear();

        while stack.last().is_some_and(|&top| indent[top] >= indent[i]) {
            stack.pop();
        }

        match stack.last() {
            Some(&p) if tasks[p].id == tasks[i].id => {
                warn!(id = tasks[i].id, "Task repeats its parent's id; kept as a root");
                roots.push(tasks[i].id);
            }
            Some(&p) => {
                let child_id = tasks[i].id;
                tasks[i].parent_id = Some(tasks[p].id);
                tasks[i].level = tasks[p].level + 1;
                tasks[p].children.push(child_id);
            }
            None => roots.push(tasks[i].id),
        }

        stack.push(i);
    }

    TaskForest::from_parts(tasks, roots)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(id: i64, level: u32) -> Task {
        let mut t = Task::new(id, format!("T{id}"));
        t.level = level;
        t
    }

    #[test]
    fn nests_by_indentation() {
        let forest = build_forest(vec![
            task(0, 0),
            task(1, 1),
            task(2, 2),
            task(3, 2),
            task(4, 1),
        ]);
        assert_eq!(forest.root_ids(), &[0]);
        let kids: Vec<_> = forest.children_of(0).map(|t| t.id).collect();
        assert_eq!(kids, vec![1, 4]);
        let kids: Vec<_> = forest.children_of(1).map(|t| t.id).collect();
        assert_eq!(kids, vec![2, 3]);
        assert_eq!(forest.parent_of(3).map(|t| t.id), Some(1));
    }

    #[test]
    fn sorts_by_id_before_linking() {
        let forest = build_forest(vec![task(2, 1), task(1, 0)]);
        assert_eq!(forest.get(2).and_then(|t| t.parent_id), Some(1));
    }

    #[test]
    fn indented_first_task_is_a_root() {
        let forest = build_forest(vec![task(1, 2), task(2, 3), task(3, 0)]);
        assert_eq!(forest.root_ids(), &[1, 3]);
        assert_eq!(forest.get(1).map(|t| t.level), Some(2));
        assert_eq!(forest.get(2).map(|t| t.level), Some(3));
    }

    #[test]
    fn level_jumps_are_normalised() {
        let forest = build_forest(vec![task(1, 0), task(2, 2), task(3, 2), task(4, 3)]);
        for t in forest.tasks() {
            if let Some(parent) = forest.parent_of(t.id) {
                assert_eq!(parent.level + 1, t.level);
            }
        }
        // Equal raw indentation keeps them siblings.
        assert_eq!(forest.get(3).and_then(|t| t.parent_id), Some(1));
        assert_eq!(forest.get(4).and_then(|t| t.parent_id), Some(3));
        assert_eq!(forest.get(4).map(|t| t.level), Some(2));
    }

    #[test]
    fn every_task_has_at_most_one_parent() {
        let forest = build_forest(vec![
            task(1, 0),
            task(2, 1),
            task(3, 0),
            task(4, 1),
            task(5, 2),
        ]);
        let mut seen = std::collections::HashSet::new();
        for t in forest.tasks() {
            for child in &t.children {
                assert!(seen.insert(*child), "task {child} has two parents");
            }
        }
        assert_eq!(forest.walk().len(), forest.len());
    }

    #[test]
    fn repeated_id_is_never_its_own_parent() {
        let forest = build_forest(vec![task(1, 0), task(1, 1), task(2, 2)]);
        for t in forest.tasks() {
            assert_ne!(t.parent_id, Some(t.id));
            assert!(!t.children.contains(&t.id));
        }
        assert_eq!(forest.root_ids(), &[1, 1]);
        // The walk terminates; the repeated id resolves to one task.
        assert!(forest.walk().len() <= forest.len() * 2);
    }
}
