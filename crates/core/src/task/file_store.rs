//! File-based task storage implementation
//!
//! Stores the whole task list as one JSON array in a file on disk. Every
//! operation reloads the file, applies the change and rewrites it.

use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;
use uuid::Uuid;

use super::model::{Task, TaskDraft, TaskList, TaskType};
use super::repository::TaskRepository;
use super::selection::Selection;
use crate::Result;

/// Storage key of the task snapshot; the file is named after it.
pub const STORAGE_KEY: &str = "lls_tasks";

/// File-based task store using JSON
pub struct FileTaskStore {
    /// Path to the JSON file
    path: PathBuf,
    /// Serializes load/modify/save cycles
    lock: Mutex<()>,
}

impl FileTaskStore {
    /// Create a store keeping its snapshot in `data_dir`
    ///
    /// Nothing is touched on disk until the first write.
    pub fn new(data_dir: impl AsRef<Path>) -> Self {
        Self::at_path(data_dir.as_ref().join(format!("{STORAGE_KEY}.json")))
    }

    /// Create a store backed by an explicit file
    pub fn at_path(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_snapshot(&self) -> Result<TaskList> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(TaskList::new()),
            Err(e) => return Err(e.into()),
        };

        if content.trim().is_empty() {
            return Ok(TaskList::new());
        }

        match serde_json::from_str(&content) {
            Ok(tasks) => Ok(tasks),
            Err(e) => {
                tracing::warn!(path = ?self.path, error = %e, "Discarding unreadable task snapshot");
                Ok(TaskList::new())
            }
        }
    }

    async fn write_snapshot(&self, tasks: &TaskList) -> Result<()> {
        let content = serde_json::to_string_pretty(tasks)?;

        // Ensure parent directory exists
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let tmp_path = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp_path, content).await?;
        tokio::fs::rename(&tmp_path, &self.path).await?;
        Ok(())
    }

    /// Run one load/modify/save cycle under the store lock.
    ///
    /// `apply` returns its result and whether the snapshot changed; nothing
    /// is written when it errors or reports no change.
    async fn modify<T>(
        &self,
        apply: impl FnOnce(&mut TaskList) -> Result<(T, bool)>,
    ) -> Result<T> {
        let _guard = self.lock.lock().await;
        let mut tasks = self.read_snapshot().await?;
        let (out, changed) = apply(&mut tasks)?;
        if changed {
            self.write_snapshot(&tasks).await?;
        }
        Ok(out)
    }
}

#[async_trait]
impl TaskRepository for FileTaskStore {
    async fn load(&self) -> Result<TaskList> {
        let _guard = self.lock.lock().await;
        self.read_snapshot().await
    }

    async fn save(&self, tasks: &TaskList) -> Result<()> {
        let mut tasks = tasks.clone();
        tasks.normalize()?;

        let _guard = self.lock.lock().await;
        self.write_snapshot(&tasks).await?;
        tracing::info!(count = tasks.len(), "Saved task snapshot");
        Ok(())
    }

    async fn get(&self, id: Uuid) -> Result<Option<Task>> {
        let tasks = self.load().await?;
        Ok(tasks.get(id).cloned())
    }

    async fn add(&self, draft: TaskDraft) -> Result<Task> {
        let task = self.modify(|tasks| Ok((tasks.add(draft)?, true))).await?;
        tracing::info!(id = %task.id, task_type = %task.task_type, "Added task");
        Ok(task)
    }

    async fn edit(&self, id: Uuid, draft: TaskDraft) -> Result<Task> {
        let task = self
            .modify(|tasks| Ok((tasks.edit(id, draft)?, true)))
            .await?;
        tracing::info!(%id, "Edited task");
        Ok(task)
    }

    async fn toggle_complete(&self, id: Uuid, selection: &mut Selection) -> Result<Vec<Task>> {
        let mut pending = selection.clone();
        let toggled = self
            .modify(|tasks| {
                let toggled = tasks.toggle_complete(id, &mut pending)?;
                let changed = !toggled.is_empty();
                Ok((toggled, changed))
            })
            .await?;
        *selection = pending;

        tracing::info!(count = toggled.len(), "Toggled task completion");
        Ok(toggled)
    }

    async fn delete(&self, id: Uuid, selection: &mut Selection) -> Result<Vec<Task>> {
        let mut pending = selection.clone();
        let removed = self
            .modify(|tasks| {
                let removed = tasks.delete(id, &mut pending);
                let changed = !removed.is_empty();
                Ok((removed, changed))
            })
            .await?;
        *selection = pending;

        tracing::info!(count = removed.len(), "Deleted tasks");
        Ok(removed)
    }

    async fn reorder(&self, category: TaskType, ids: &[Uuid]) -> Result<usize> {
        let count = self
            .modify(|tasks| {
                let count = tasks.reorder(category, ids);
                Ok((count, count > 0))
            })
            .await?;
        tracing::info!(%category, count, "Reordered tasks");
        Ok(count)
    }

    async fn clear_completed(&self, category: TaskType) -> Result<Vec<Task>> {
        let removed = self
            .modify(|tasks| {
                let removed = tasks.clear_completed(category);
                let changed = !removed.is_empty();
                Ok((removed, changed))
            })
            .await?;
        tracing::info!(%category, count = removed.len(), "Cleared completed tasks");
        Ok(removed)
    }
}
