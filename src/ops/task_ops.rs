use crate::model::task::{Task, TaskId};

/// Error type for task operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TaskError {
    /// Validation failure: a task needs some text
    #[error("please input todo (task description cannot be empty)")]
    EmptyDescription,
}

// ---------------------------------------------------------------------------
// Create / delete
// ---------------------------------------------------------------------------

/// Append a new task at the tail (lowest priority). Returns its id.
/// Empty descriptions are rejected and leave the list untouched.
pub fn add_task(tasks: &mut Vec<Task>, description: String) -> Result<TaskId, TaskError> {
    if description.is_empty() {
        return Err(TaskError::EmptyDescription);
    }
    let task = Task::new(description);
    let id = task.id.clone();
    tasks.push(task);
    Ok(id)
}

/// Remove the task with the given id. Returns false if there was none.
pub fn delete_task(tasks: &mut Vec<Task>, id: &TaskId) -> bool {
    match position_of(tasks, id) {
        Some(idx) => {
            tasks.remove(idx);
            true
        }
        None => false,
    }
}

// ---------------------------------------------------------------------------
// Completion
// ---------------------------------------------------------------------------

/// Set the completed flag. Returns true only if the flag actually changed.
pub fn set_completed(tasks: &mut [Task], id: &TaskId, completed: bool) -> bool {
    match find_task_mut(tasks, id) {
        Some(task) if task.completed != completed => {
            task.completed = completed;
            true
        }
        _ => false,
    }
}

/// Flip the completed flag. Returns false if the id is unknown.
pub fn toggle_completed(tasks: &mut [Task], id: &TaskId) -> bool {
    match find_task_mut(tasks, id) {
        Some(task) => {
            task.completed = !task.completed;
            true
        }
        None => false,
    }
}

// ---------------------------------------------------------------------------
// Reorder (list position is priority)
// ---------------------------------------------------------------------------

/// Swap the task with its predecessor. No-op at the head or for unknown ids.
pub fn raise_task(tasks: &mut [Task], id: &TaskId) -> bool {
    match position_of(tasks, id) {
        Some(idx) if idx > 0 => {
            tasks.swap(idx, idx - 1);
            true
        }
        _ => false,
    }
}

/// Swap the task with its successor. No-op at the tail or for unknown ids.
pub fn lower_task(tasks: &mut [Task], id: &TaskId) -> bool {
    match position_of(tasks, id) {
        Some(idx) if idx + 1 < tasks.len() => {
            tasks.swap(idx, idx + 1);
            true
        }
        _ => false,
    }
}

// ---------------------------------------------------------------------------
// Lookup
// ---------------------------------------------------------------------------

pub fn position_of(tasks: &[Task], id: &TaskId) -> Option<usize> {
    tasks.iter().position(|t| &t.id == id)
}

pub fn find_task<'a>(tasks: &'a [Task], id: &TaskId) -> Option<&'a Task> {
    tasks.iter().find(|t| &t.id == id)
}

fn find_task_mut<'a>(tasks: &'a mut [Task], id: &TaskId) -> Option<&'a mut Task> {
    tasks.iter_mut().find(|t| &t.id == id)
}

/// Result of resolving a user-typed id or id prefix
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdMatch {
    /// Exactly one task matches
    Found(TaskId),
    /// No task matches
    Missing,
    /// The prefix matches several tasks
    Ambiguous(Vec<TaskId>),
}

/// Resolve a full id, or a prefix of exactly one id.
pub fn match_id(tasks: &[Task], query: &str) -> IdMatch {
    if let Some(task) = tasks.iter().find(|t| t.id.as_str() == query) {
        return IdMatch::Found(task.id.clone());
    }
    if query.is_empty() {
        return IdMatch::Missing;
    }

    let mut hits: Vec<TaskId> = tasks
        .iter()
        .filter(|t| t.id.as_str().starts_with(query))
        .map(|t| t.id.clone())
        .collect();
    match hits.len() {
        0 => IdMatch::Missing,
        1 => IdMatch::Found(hits.remove(0)),
        _ => IdMatch::Ambiguous(hits),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
