use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "td", about = concat!("td v", env!("CARGO_PKG_VERSION"), " - one list, one stopwatch"), version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Keep tasks, config and the event log in this directory
    #[arg(short = 'C', long = "data-dir", global = true)]
    pub data_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List tasks in order
    List,
    /// Add a task to the end of the list
    Add(AddArgs),
    /// Mark a task complete
    Done(IdArgs),
    /// Cancel a task's completion
    Undone(IdArgs),
    /// Delete a task
    Rm(IdArgs),
    /// Move a task one place up
    Up(IdArgs),
    /// Move a task one place down
    Down(IdArgs),
    /// Show recorded load and save failures
    Log(LogArgs),
}

#[derive(Args)]
pub struct AddArgs {
    /// Task text (words are joined with spaces)
    #[arg(required = true)]
    pub text: Vec<String>,
}

#[derive(Args)]
pub struct IdArgs {
    /// Task id, or a unique prefix of one
    pub id: String,
}

#[derive(Args)]
pub struct LogArgs {
    /// Show only the last N entries
    #[arg(long)]
    pub limit: Option<usize>,
}
