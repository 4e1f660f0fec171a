//! The task store: sole owner of the ordered task list.
//!
//! Every operation saves the whole list through the storage slot right after
//! applying it. A failed save is logged and otherwise ignored, so the
//! in-memory list is always the source of truth for the running session.

use crate::io::event_log::EventLog;
use crate::io::storage::Storage;
use crate::io::task_io::{load_tasks, save_tasks};
use crate::model::task::{Task, TaskId};
use crate::ops::task_ops::{self, TaskError};

pub struct TaskStore<S: Storage> {
    tasks: Vec<Task>,
    storage: S,
    key: String,
    log: EventLog,
}

impl<S: Storage> TaskStore<S> {
    /// Open the store, restoring whatever list was saved under `key`.
    pub fn open(storage: S, key: impl Into<String>, log: EventLog) -> Self {
        let key = key.into();
        let tasks = load_tasks(&storage, &key, &log);
        TaskStore {
            tasks,
            storage,
            key,
            log,
        }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn get(&self, id: &TaskId) -> Option<&Task> {
        task_ops::find_task(&self.tasks, id)
    }

    pub fn position(&self, id: &TaskId) -> Option<usize> {
        task_ops::position_of(&self.tasks, id)
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn storage_mut(&mut self) -> &mut S {
        &mut self.storage
    }

    /// Append a task. Blank text is a validation error and nothing is saved.
    pub fn create(&mut self, description: impl Into<String>) -> Result<TaskId, TaskError> {
        let id = task_ops::add_task(&mut self.tasks, description.into())?;
        self.persist();
        Ok(id)
    }

    pub fn mark_complete(&mut self, id: &TaskId) -> bool {
        let changed = task_ops::set_completed(&mut self.tasks, id, true);
        self.persist();
        changed
    }

    pub fn cancel_completion(&mut self, id: &TaskId) -> bool {
        let changed = task_ops::set_completed(&mut self.tasks, id, false);
        self.persist();
        changed
    }

    pub fn toggle_complete(&mut self, id: &TaskId) -> bool {
        let changed = task_ops::toggle_completed(&mut self.tasks, id);
        self.persist();
        changed
    }

    pub fn delete(&mut self, id: &TaskId) -> bool {
        let changed = task_ops::delete_task(&mut self.tasks, id);
        self.persist();
        changed
    }

    pub fn increase_priority(&mut self, id: &TaskId) -> bool {
        let changed = task_ops::raise_task(&mut self.tasks, id);
        self.persist();
        changed
    }

    pub fn decrease_priority(&mut self, id: &TaskId) -> bool {
        let changed = task_ops::lower_task(&mut self.tasks, id);
        self.persist();
        changed
    }

    fn persist(&mut self) {
        save_tasks(&mut self.storage, &self.key, &self.tasks, &self.log);
    }
}
