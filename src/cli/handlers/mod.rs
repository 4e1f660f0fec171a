use std::error::Error;
use std::path::Path;

use crate::cli::commands::*;
use crate::cli::output::*;
use crate::io::config_io::{read_config, resolve_data_dir};
use crate::io::event_log::EventLog;
use crate::io::storage::FileStorage;
use crate::model::TaskId;
use crate::ops::store::TaskStore;
use crate::ops::task_ops::{IdMatch, match_id};

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

pub fn dispatch(cli: Cli) -> Result<(), Box<dyn Error>> {
    let json = cli.json;

    let Some(cmd) = cli.command else {
        // No subcommand → launch TUI
        return crate::tui::run(cli.data_dir.as_deref());
    };

    let data_dir = resolve_data_dir(cli.data_dir.as_deref());

    match cmd {
        Commands::List => cmd_list(&data_dir, json),
        Commands::Add(args) => cmd_add(&data_dir, args),
        Commands::Done(args) => cmd_update(&data_dir, &args.id, Update::Done),
        Commands::Undone(args) => cmd_update(&data_dir, &args.id, Update::Undone),
        Commands::Up(args) => cmd_update(&data_dir, &args.id, Update::Up),
        Commands::Down(args) => cmd_update(&data_dir, &args.id, Update::Down),
        Commands::Rm(args) => cmd_rm(&data_dir, &args.id),
        Commands::Log(args) => cmd_log(&data_dir, args, json),
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn open_store(data_dir: &Path) -> Result<TaskStore<FileStorage>, Box<dyn Error>> {
    let config = read_config(data_dir)?;
    Ok(TaskStore::open(
        FileStorage::new(data_dir),
        config.storage.key,
        EventLog::in_dir(data_dir),
    ))
}

/// Resolve a full id or unique prefix. Unknown ids pass through unchanged
/// so the store treats them as a lookup miss.
fn resolve_id(store: &TaskStore<FileStorage>, query: &str) -> Result<TaskId, Box<dyn Error>> {
    match match_id(store.tasks(), query) {
        IdMatch::Found(id) => Ok(id),
        IdMatch::Missing => Ok(TaskId::from(query)),
        IdMatch::Ambiguous(ids) => {
            let candidates: Vec<&str> = ids.iter().map(|id| id.short()).collect();
            Err(format!(
                "ambiguous id '{}': matches {}",
                query,
                candidates.join(", ")
            )
            .into())
        }
    }
}

fn print_task_at(store: &TaskStore<FileStorage>, id: &TaskId) {
    if let Some(pos) = store.position(id) {
        println!("{}", format_task_line(pos, &store.tasks()[pos]));
    }
}

// ---------------------------------------------------------------------------
// Read commands
// ---------------------------------------------------------------------------

fn cmd_list(data_dir: &Path, json: bool) -> Result<(), Box<dyn Error>> {
    let store = open_store(data_dir)?;

    if json {
        let tasks: Vec<TaskJson> = store
            .tasks()
            .iter()
            .enumerate()
            .map(|(i, t)| task_to_json(i, t))
            .collect();
        println!("{}", serde_json::to_string_pretty(&tasks)?);
    } else if store.is_empty() {
        println!("no tasks");
    } else {
        for (i, task) in store.tasks().iter().enumerate() {
            println!("{}", format_task_line(i, task));
        }
    }
    Ok(())
}

fn cmd_log(data_dir: &Path, args: LogArgs, json: bool) -> Result<(), Box<dyn Error>> {
    let entries = EventLog::in_dir(data_dir).read_entries(args.limit);

    if json {
        let values: Vec<serde_json::Value> = entries.iter().map(|e| e.to_json()).collect();
        println!("{}", serde_json::to_string_pretty(&values)?);
    } else if entries.is_empty() {
        println!("no log entries");
    } else {
        for entry in &entries {
            print!("{}", entry.to_markdown());
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Write commands
// ---------------------------------------------------------------------------

fn cmd_add(data_dir: &Path, args: AddArgs) -> Result<(), Box<dyn Error>> {
    let mut store = open_store(data_dir)?;
    let id = store.create(args.text.join(" "))?;
    println!("{}", id);
    Ok(())
}

enum Update {
    Done,
    Undone,
    Up,
    Down,
}

fn cmd_update(data_dir: &Path, query: &str, update: Update) -> Result<(), Box<dyn Error>> {
    let mut store = open_store(data_dir)?;
    let id = resolve_id(&store, query)?;

    let changed = match update {
        Update::Done => store.mark_complete(&id),
        Update::Undone => store.cancel_completion(&id),
        Update::Up => store.increase_priority(&id),
        Update::Down => store.decrease_priority(&id),
    };

    if changed {
        print_task_at(&store, &id);
    } else {
        println!("no change");
    }
    Ok(())
}

fn cmd_rm(data_dir: &Path, query: &str) -> Result<(), Box<dyn Error>> {
    let mut store = open_store(data_dir)?;
    let id = resolve_id(&store, query)?;

    let removed = store.get(&id).map(|t| t.description.clone());
    if store.delete(&id) {
        println!("removed {}  ({})", removed.unwrap_or_default(), id.short());
    } else {
        println!("no change");
    }
    Ok(())
}

