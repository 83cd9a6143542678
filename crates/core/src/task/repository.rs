//! Task repository trait
//!
//! Defines the interface for task storage operations.

use async_trait::async_trait;
use uuid::Uuid;

use super::board::Board;
use super::model::{Task, TaskDraft, TaskList, TaskType};
use super::selection::Selection;
use crate::Result;

/// Repository interface over the persisted task snapshot
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Load the full snapshot; empty when nothing usable is stored
    async fn load(&self) -> Result<TaskList>;

    /// Replace the full snapshot
    async fn save(&self, tasks: &TaskList) -> Result<()>;

    /// Get a task by ID
    async fn get(&self, id: Uuid) -> Result<Option<Task>>;

    /// Create a new task
    async fn add(&self, draft: TaskDraft) -> Result<Task>;

    /// Overwrite type, title and deadline of a task
    async fn edit(&self, id: Uuid, draft: TaskDraft) -> Result<Task>;

    /// Flip completion of the selection, or of `id` when nothing is selected
    async fn toggle_complete(&self, id: Uuid, selection: &mut Selection) -> Result<Vec<Task>>;

    /// Delete the selection, or `id` when nothing is selected
    async fn delete(&self, id: Uuid, selection: &mut Selection) -> Result<Vec<Task>>;

    /// Store the displayed order of one category
    async fn reorder(&self, category: TaskType, ids: &[Uuid]) -> Result<usize>;

    /// Remove completed tasks of one category
    async fn clear_completed(&self, category: TaskType) -> Result<Vec<Task>>;

    /// Grouped and sorted view of the snapshot
    async fn board(&self) -> Result<Board> {
        let tasks = self.load().await?;
        Ok(Board::project(tasks.iter()))
    }
}
