//! Task module
//!
//! This module contains task-related types and logic.

mod board;
mod file_store;
mod model;
mod repository;
mod selection;

pub use board::{compare_tasks, Board};
pub use file_store::{FileTaskStore, STORAGE_KEY};
pub use model::*;
pub use repository::TaskRepository;
pub use selection::Selection;
