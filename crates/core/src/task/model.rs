//! Task model definitions
//!
//! `TaskList` is the in-memory form of the persisted snapshot. All list
//! mutations live here; the stores only load, delegate and save.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use uuid::Uuid;

use super::selection::Selection;
use crate::{Error, Result};

/// Task category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskType {
    /// Long-term task, may carry a deadline
    Long,
    /// Plain to-do item, never has a deadline
    Todo,
}

impl TaskType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Long => "long",
            Self::Todo => "todo",
        }
    }
}

impl std::fmt::Display for TaskType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single task record, serialized exactly as stored in the snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: Uuid,
    #[serde(rename = "type")]
    pub task_type: TaskType,
    pub title: String,
    #[serde(default)]
    pub deadline: Option<String>,
    #[serde(default)]
    pub completed: bool,
    /// Creation timestamp in millis until the category is reordered,
    /// then the task's position within its category.
    #[serde(default)]
    pub order: Option<i64>,
}

impl Task {
    /// Create a new incomplete task ordered after everything created before it
    pub fn new(task_type: TaskType, title: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            task_type,
            title: title.into(),
            deadline: None,
            completed: false,
            order: Some(Utc::now().timestamp_millis()),
        }
    }

    /// Set the deadline; ignored for to-do tasks
    pub fn with_deadline(mut self, deadline: impl Into<String>) -> Self {
        self.deadline = normalize_deadline(self.task_type, Some(deadline.into()));
        self
    }
}

/// User-supplied fields for creating or editing a task
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskDraft {
    #[serde(rename = "type")]
    pub task_type: TaskType,
    pub title: String,
    #[serde(default)]
    pub deadline: Option<String>,
}

impl TaskDraft {
    pub fn new(task_type: TaskType, title: impl Into<String>) -> Self {
        Self {
            task_type,
            title: title.into(),
            deadline: None,
        }
    }

    pub fn with_deadline(mut self, deadline: impl Into<String>) -> Self {
        self.deadline = Some(deadline.into());
        self
    }

    /// Trimmed title, or `InvalidInput` when nothing is left
    fn validated_title(&self) -> Result<String> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(Error::InvalidInput("Title cannot be empty".to_string()));
        }
        Ok(title.to_string())
    }
}

/// To-do tasks never keep a deadline; blank deadlines count as absent.
fn normalize_deadline(task_type: TaskType, deadline: Option<String>) -> Option<String> {
    match task_type {
        TaskType::Todo => None,
        TaskType::Long => deadline
            .map(|d| d.trim().to_string())
            .filter(|d| !d.is_empty()),
    }
}

/// The full task collection as one snapshot
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskList {
    tasks: Vec<Task>,
}

impl From<Vec<Task>> for TaskList {
    fn from(tasks: Vec<Task>) -> Self {
        Self { tasks }
    }
}

impl TaskList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Task> {
        self.tasks.iter()
    }

    pub fn as_slice(&self) -> &[Task] {
        &self.tasks
    }

    pub fn into_vec(self) -> Vec<Task> {
        self.tasks
    }

    /// Check a caller-supplied snapshot before it replaces the stored one.
    ///
    /// Duplicate ids and blank titles are rejected; titles are trimmed and
    /// deadlines normalized the same way `add` and `edit` do it.
    pub fn normalize(&mut self) -> Result<()> {
        let mut seen = HashSet::with_capacity(self.tasks.len());
        for task in &mut self.tasks {
            if !seen.insert(task.id) {
                return Err(Error::InvalidInput(format!("Duplicate task id {}", task.id)));
            }

            let title = task.title.trim();
            if title.is_empty() {
                return Err(Error::InvalidInput(format!(
                    "Title cannot be empty (task {})",
                    task.id
                )));
            }
            task.title = title.to_string();
            task.deadline = normalize_deadline(task.task_type, task.deadline.take());
        }
        Ok(())
    }

    /// Get a task by ID
    pub fn get(&self, id: Uuid) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    fn get_mut(&mut self, id: Uuid) -> Option<&mut Task> {
        self.tasks.iter_mut().find(|t| t.id == id)
    }

    /// Append a new task built from the draft
    pub fn add(&mut self, draft: TaskDraft) -> Result<Task> {
        let title = draft.validated_title()?;

        let mut task = Task::new(draft.task_type, title);
        while self.get(task.id).is_some() {
            task.id = Uuid::new_v4();
        }
        task.deadline = normalize_deadline(draft.task_type, draft.deadline);

        self.tasks.push(task.clone());
        Ok(task)
    }

    /// Overwrite type, title and deadline of an existing task.
    ///
    /// `order` and `completed` are left as they are.
    pub fn edit(&mut self, id: Uuid, draft: TaskDraft) -> Result<Task> {
        let title = draft.validated_title()?;
        let task = self
            .get_mut(id)
            .ok_or_else(|| Error::TaskNotFound(id.to_string()))?;

        task.task_type = draft.task_type;
        task.title = title;
        task.deadline = normalize_deadline(draft.task_type, draft.deadline);
        Ok(task.clone())
    }

    /// Flip completion for the selection, or for `id` when nothing is selected.
    ///
    /// A non-empty selection is consumed and `id` is ignored; selected ids
    /// that are no longer stored are skipped.
    pub fn toggle_complete(&mut self, id: Uuid, selection: &mut Selection) -> Result<Vec<Task>> {
        if !selection.is_empty() {
            let toggled = self
                .tasks
                .iter_mut()
                .filter(|t| selection.contains(t.id))
                .map(|t| {
                    t.completed = !t.completed;
                    t.clone()
                })
                .collect();
            selection.clear();
            return Ok(toggled);
        }

        let task = self
            .get_mut(id)
            .ok_or_else(|| Error::TaskNotFound(id.to_string()))?;
        task.completed = !task.completed;
        Ok(vec![task.clone()])
    }

    /// Remove the selection, or the task with `id` when nothing is selected.
    ///
    /// Returns the removed tasks; removing nothing is not an error.
    pub fn delete(&mut self, id: Uuid, selection: &mut Selection) -> Vec<Task> {
        if selection.is_empty() {
            return self.remove_where(|t| t.id == id);
        }

        let removed = self.remove_where(|t| selection.contains(t.id));
        selection.clear();
        removed
    }

    /// Rewrite `order` of the category's tasks to their position in `ids`.
    ///
    /// Unknown ids, ids of the other category and repeated ids are skipped,
    /// so the matched tasks always end up with `0..n`. Returns `n`.
    pub fn reorder(&mut self, category: TaskType, ids: &[Uuid]) -> usize {
        let mut seen = HashSet::with_capacity(ids.len());
        let mut next = 0i64;

        for id in ids {
            if !seen.insert(*id) {
                tracing::debug!(%id, "Skipping repeated id in reorder");
                continue;
            }
            match self.get_mut(*id) {
                Some(task) if task.task_type == category => {
                    task.order = Some(next);
                    next += 1;
                }
                Some(_) => tracing::debug!(%id, %category, "Skipping id from other category"),
                None => tracing::debug!(%id, "Skipping unknown id in reorder"),
            }
        }

        next as usize
    }

    /// Remove every completed task of the category
    pub fn clear_completed(&mut self, category: TaskType) -> Vec<Task> {
        self.remove_where(|t| t.task_type == category && t.completed)
    }

    fn remove_where(&mut self, mut pred: impl FnMut(&Task) -> bool) -> Vec<Task> {
        let (removed, kept): (Vec<Task>, Vec<Task>) = std::mem::take(&mut self.tasks)
            .into_iter()
            .partition(|t| pred(t));
        self.tasks = kept;
        removed
    }
}
