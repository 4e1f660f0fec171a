//! Saving and restoring the task list through a [`Storage`] slot.
//!
//! The slot holds the whole list as a JSON array of task records. Loading
//! happens once at startup; saving happens after every change. Neither ever
//! fails from the caller's point of view: problems are written to the event
//! log and the in-memory list stays authoritative.

use std::collections::HashSet;

use crate::io::event_log::{EventCategory, EventLog, LogEntry};
use crate::io::storage::Storage;
use crate::model::Task;

/// Encode a task list into the slot format
pub fn encode_tasks(tasks: &[Task]) -> Result<String, serde_json::Error> {
    serde_json::to_string(tasks)
}

/// Decode the slot format into a task list
pub fn decode_tasks(blob: &str) -> Result<Vec<Task>, serde_json::Error> {
    serde_json::from_str(blob)
}

/// Restore the saved task list. Absent, unreadable, or undecodable slots
/// all yield an empty list.
pub fn load_tasks<S: Storage>(storage: &S, key: &str, log: &EventLog) -> Vec<Task> {
    let blob = match storage.get_item(key) {
        Ok(Some(blob)) => blob,
        Ok(None) => return Vec::new(),
        Err(e) => {
            log.append(
                LogEntry::now(EventCategory::Load, "could not read saved tasks")
                    .with_field("Key", key)
                    .with_field("Error", e.to_string()),
            );
            return Vec::new();
        }
    };

    let tasks = match decode_tasks(&blob) {
        Ok(tasks) => tasks,
        Err(e) => {
            log.append(
                LogEntry::now(EventCategory::Decode, "saved tasks are not a valid task list")
                    .with_field("Key", key)
                    .with_field("Error", e.to_string())
                    .with_body(blob),
            );
            return Vec::new();
        }
    };

    dedup_ids(tasks, key, log)
}

/// Save the full task list. Returns whether the write succeeded.
pub fn save_tasks<S: Storage>(storage: &mut S, key: &str, tasks: &[Task], log: &EventLog) -> bool {
    let blob = match encode_tasks(tasks) {
        Ok(blob) => blob,
        Err(e) => {
            log.append(
                LogEntry::now(EventCategory::Save, "could not encode tasks")
                    .with_field("Key", key)
                    .with_field("Error", e.to_string()),
            );
            return false;
        }
    };

    match storage.set_item(key, &blob) {
        Ok(()) => true,
        Err(e) => {
            log.append(
                LogEntry::now(EventCategory::Save, "could not write tasks")
                    .with_field("Key", key)
                    .with_field("Error", e.to_string())
                    .with_body(blob),
            );
            false
        }
    }
}

/// Keep the first task for each id; later duplicates are logged and dropped.
fn dedup_ids(tasks: Vec<Task>, key: &str, log: &EventLog) -> Vec<Task> {
    let mut seen = HashSet::new();
    let mut kept = Vec::with_capacity(tasks.len());
    let mut dropped = Vec::new();

    for task in tasks {
        if seen.insert(task.id.clone()) {
            kept.push(task);
        } else {
            dropped.push(task);
        }
    }

    if !dropped.is_empty() {
        let body = dropped
            .iter()
            .map(|t| format!("{} {}", t.id, t.description))
            .collect::<Vec<_>>()
            .join("\n");
        log.append(
            LogEntry::now(EventCategory::Decode, "dropped tasks with duplicate ids")
                .with_field("Key", key)
                .with_field("Count", dropped.len().to_string())
                .with_body(body),
        );
    }

    kept
}
