//! Application state

use std::path::{Path, PathBuf};
use std::sync::Arc;

use taskdeck_core::task::FileTaskStore;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    data_dir: PathBuf,
    task_store: FileTaskStore,
}

impl AppState {
    /// Create a new AppState with the given data directory
    pub fn new(data_dir: PathBuf) -> Self {
        let task_store = FileTaskStore::new(&data_dir);

        Self {
            inner: Arc::new(AppStateInner {
                data_dir,
                task_store,
            }),
        }
    }

    /// Get reference to the task store
    pub fn task_store(&self) -> &FileTaskStore {
        &self.inner.task_store
    }

    pub fn data_dir(&self) -> &Path {
        &self.inner.data_dir
    }
}
