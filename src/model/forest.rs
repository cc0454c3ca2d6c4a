use serde::{Deserialize, Serialize};

use super::task::{Task, TaskId};

/// Arena of tasks plus the ids of the top-level tasks.
///
/// Tasks are stored sorted by id; parent/child links are ids into the same
/// arena, never references, so the structure cannot form a cycle.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TaskForest {
    tasks: Vec<Task>,
    roots: Vec<TaskId>,
}

impl TaskForest {
    pub(crate) fn from_parts(tasks: Vec<Task>, roots: Vec<TaskId>) -> Self {
        Self { tasks, roots }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn into_tasks(self) -> Vec<Task> {
        self.tasks
    }

    pub fn roots(&self) -> impl Iterator<Item = &Task> {
        self.roots.iter().filter_map(|id| self.get(*id))
    }

    pub fn root_ids(&self) -> &[TaskId] {
        &self.roots
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.tasks
            .binary_search_by_key(&id, |t| t.id)
            .ok()
            .map(|idx| &self.tasks[idx])
    }

    pub fn children_of(&self, id: TaskId) -> impl Iterator<Item = &Task> {
        self.get(id)
            .map(|t| t.children.as_slice())
            .unwrap_or(&[])
            .iter()
            .filter_map(move |child| self.get(*child))
    }

    pub fn parent_of(&self, id: TaskId) -> Option<&Task> {
        self.get(id)
            .and_then(|t| t.parent_id)
            .and_then(|pid| self.get(pid))
    }

    /// Depth-first, pre-order walk over every tree in root order.
    pub fn walk(&self) -> Vec<&Task> {
        let mut out = Vec::with_capacity(self.tasks.len());
        let mut stack: Vec<TaskId> = self.roots.iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            if let Some(task) = self.get(id) {
                out.push(task);
                stack.extend(task.children.iter().rev().copied());
            }
        }
        out
    }
}
