use serde::Serialize;

use crate::model::Task;

#[derive(Serialize)]
pub struct TaskJson {
    pub position: usize,
    pub id: String,
    pub task: String,
    pub completed: bool,
}

pub fn task_to_json(position: usize, task: &Task) -> TaskJson {
    TaskJson {
        position: position + 1,
        id: task.id.to_string(),
        task: task.description.clone(),
        completed: task.completed,
    }
}

/// Format a single task line: `<pos>. [x] <text>  (<short id>)`
pub fn format_task_line(position: usize, task: &Task) -> String {
    format!(
        "{}. [{}] {}  ({})",
        position + 1,
        task.checkbox_char(),
        task.description,
        task.id.short()
    )
}
