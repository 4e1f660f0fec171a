use std::fmt;
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};

/// Size past which old entries are trimmed on the next append (1 MB).
const MAX_LOG_SIZE: u64 = 1_048_576;

/// Entries older than this many days are dropped when trimming.
pub const PRUNE_AGE_DAYS: i64 = 30;

const FILE_HEADER: &str = "\
<!-- todo-list event log
     Storage problems that were recovered from without interrupting you.
     View with: td log
     Safe to delete. -->

---
";

// ---------------------------------------------------------------------------
// Data types
// ---------------------------------------------------------------------------

/// What kind of storage problem an entry records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventCategory {
    /// The saved slot could not be read
    Load,
    /// The saved slot was read but its contents were unusable
    Decode,
    /// The task list could not be written
    Save,
}

impl fmt::Display for EventCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventCategory::Load => write!(f, "load"),
            EventCategory::Decode => write!(f, "decode"),
            EventCategory::Save => write!(f, "save"),
        }
    }
}

impl EventCategory {
    pub fn parse_category(s: &str) -> Option<Self> {
        match s {
            "load" => Some(EventCategory::Load),
            "decode" => Some(EventCategory::Decode),
            "save" => Some(EventCategory::Save),
            _ => None,
        }
    }
}

/// A single entry in the event log.
#[derive(Debug, Clone, PartialEq)]
pub struct LogEntry {
    pub timestamp: DateTime<Utc>,
    pub category: EventCategory,
    pub description: String,
    pub fields: Vec<(String, String)>,
    pub body: String,
}

impl LogEntry {
    /// Entry stamped with the current time, no fields or body.
    pub fn now(category: EventCategory, description: impl Into<String>) -> Self {
        LogEntry {
            timestamp: Utc::now(),
            category,
            description: description.into(),
            fields: Vec::new(),
            body: String::new(),
        }
    }

    pub fn with_field(mut self, key: &str, value: impl Into<String>) -> Self {
        self.fields.push((key.to_string(), value.into()));
        self
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    /// Markdown block as written to the log file.
    pub fn to_markdown(&self) -> String {
        let mut out = String::new();

        out.push_str(&format!(
            "## {} [{}] {}\n",
            self.timestamp
                .to_rfc3339_opts(chrono::SecondsFormat::Secs, true),
            self.category,
            self.description,
        ));
        out.push('\n');

        for (key, value) in &self.fields {
            out.push_str(&format!("{}: {}\n", key, value));
        }

        if !self.body.is_empty() {
            let fence = fence_for(&self.body);
            out.push('\n');
            out.push_str(&format!("{}text\n", fence));
            out.push_str(&self.body);
            if !self.body.ends_with('\n') {
                out.push('\n');
            }
            out.push_str(&fence);
            out.push('\n');
        }

        out.push('\n');
        out.push_str("---\n");
        out
    }

    pub fn to_json(&self) -> serde_json::Value {
        let fields: serde_json::Map<String, serde_json::Value> = self
            .fields
            .iter()
            .map(|(k, v)| (k.clone(), serde_json::Value::String(v.clone())))
            .collect();

        serde_json::json!({
            "timestamp": self.timestamp.to_rfc3339_opts(chrono::SecondsFormat::Secs, true),
            "category": self.category.to_string(),
            "description": self.description,
            "fields": fields,
            "body": self.body,
        })
    }
}

// ---------------------------------------------------------------------------
// Log handle
// ---------------------------------------------------------------------------

/// Append-only log of recovered storage failures.
///
/// A disabled log drops every entry; tests and in-memory stores use it.
#[derive(Debug, Clone)]
pub struct EventLog {
    path: Option<PathBuf>,
}

impl EventLog {
    /// Log stored as `.events.log` inside `dir`
    pub fn in_dir(dir: &Path) -> Self {
        EventLog {
            path: Some(dir.join(".events.log")),
        }
    }

    pub fn disabled() -> Self {
        EventLog { path: None }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Append an entry. Failures are reported on stderr and otherwise ignored.
    pub fn append(&self, entry: LogEntry) {
        let Some(path) = &self.path else {
            return;
        };
        if let Err(e) = append_inner(path, &entry) {
            eprintln!("warning: could not write to event log: {}", e);
        }
    }

    /// Read entries oldest-first, keeping only the last `limit` if given.
    pub fn read_entries(&self, limit: Option<usize>) -> Vec<LogEntry> {
        let Some(path) = &self.path else {
            return Vec::new();
        };
        let content = match fs::read_to_string(path) {
            Ok(c) => c,
            Err(_) => return Vec::new(),
        };

        let entries = parse_entries(&content);
        match limit {
            Some(n) => {
                let skip = entries.len().saturating_sub(n);
                entries.into_iter().skip(skip).collect()
            }
            None => entries,
        }
    }
}

fn append_inner(path: &Path, entry: &LogEntry) -> io::Result<()> {
    if let Ok(meta) = fs::metadata(path)
        && meta.len() > MAX_LOG_SIZE
    {
        trim_old_entries(path)?;
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let needs_header = fs::metadata(path).map_or(true, |m| m.len() == 0);
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    if needs_header {
        file.write_all(FILE_HEADER.as_bytes())?;
    }
    file.write_all(entry.to_markdown().as_bytes())?;
    Ok(())
}

fn trim_old_entries(path: &Path) -> io::Result<()> {
    let content = fs::read_to_string(path)?;
    let cutoff = Utc::now() - chrono::Duration::days(PRUNE_AGE_DAYS);
    let trimmed = prune_entries_before(&content, &cutoff);
    if trimmed.len() < content.len() {
        fs::write(path, trimmed)?;
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Parsing
// ---------------------------------------------------------------------------

fn parse_entries(content: &str) -> Vec<LogEntry> {
    let mut entries = Vec::new();
    let mut lines = content.lines();

    while let Some(line) = lines.next() {
        let Some(header) = line.strip_prefix("## ") else {
            continue;
        };
        let Some((timestamp, category, description)) = parse_entry_header(header) else {
            continue;
        };

        let mut fields = Vec::new();
        let mut body = String::new();
        let mut fence: Option<usize> = None;

        for line in lines.by_ref() {
            if let Some(len) = fence {
                if closes_fence(line, len) {
                    fence = None;
                } else {
                    if !body.is_empty() {
                        body.push('\n');
                    }
                    body.push_str(line);
                }
                continue;
            }

            if line == "---" || line.starts_with("## ") {
                break;
            }
            if let Some(len) = opening_fence(line) {
                fence = Some(len);
                continue;
            }

            let trimmed = line.trim();
            if let Some((key, value)) = trimmed.split_once(": ") {
                fields.push((key.to_string(), value.to_string()));
            }
        }

        entries.push(LogEntry {
            timestamp,
            category,
            description,
            fields,
            body,
        });
    }

    entries
}

/// Backtick fence longer than any backtick run inside `body`
fn fence_for(body: &str) -> String {
    let longest = body
        .split(|c: char| c != '`')
        .map(str::len)
        .max()
        .unwrap_or(0);
    "`".repeat((longest + 1).max(3))
}

/// Length of the backtick run opening a fenced body, if `line` opens one
fn opening_fence(line: &str) -> Option<usize> {
    let len = line.len() - line.trim_start_matches('`').len();
    (len >= 3).then_some(len)
}

fn closes_fence(line: &str, len: usize) -> bool {
    line.len() >= len && line.bytes().all(|b| b == b'`')
}

/// Parse `<timestamp> [<category>] <description>`
fn parse_entry_header(header: &str) -> Option<(DateTime<Utc>, EventCategory, String)> {
    let (timestamp_str, rest) = header.split_once(" [")?;
    let (category_str, description) = rest.split_once("] ")?;

    let timestamp = DateTime::parse_from_rfc3339(timestamp_str)
        .ok()?
        .with_timezone(&Utc);
    let category = EventCategory::parse_category(category_str)?;

    Some((timestamp, category, description.to_string()))
}

/// Drop entries stamped before `cutoff`, keeping the file header.
fn prune_entries_before(content: &str, cutoff: &DateTime<Utc>) -> String {
    let mut result = String::new();
    let mut current_entry = String::new();
    let mut current_timestamp: Option<DateTime<Utc>> = None;
    let mut in_header = true;
    let mut fence: Option<usize> = None;

    for line in content.lines() {
        if in_header {
            result.push_str(line);
            result.push('\n');
            if line == "---" {
                in_header = false;
            }
            continue;
        }

        // Body lines never start a new entry
        if let Some(len) = fence {
            if closes_fence(line, len) {
                fence = None;
            }
        } else if let Some(len) = opening_fence(line) {
            fence = Some(len);
        } else if let Some(stripped) = line.strip_prefix("## ") {
            if current_timestamp.is_some_and(|ts| ts >= *cutoff) {
                result.push_str(&current_entry);
            }
            current_entry.clear();
            current_timestamp = parse_entry_header(stripped).map(|(ts, _, _)| ts);
        }
        current_entry.push_str(line);
        current_entry.push('\n');
    }

    if current_timestamp.is_some_and(|ts| ts >= *cutoff) {
        result.push_str(&current_entry);
    }

    result
}
