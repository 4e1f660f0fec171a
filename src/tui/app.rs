use std::io;
use std::path::Path;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use crate::io::config_io::{read_config, resolve_data_dir};
use crate::io::event_log::EventLog;
use crate::io::storage::{FileStorage, Storage};
use crate::model::{AppConfig, Task, TaskId};
use crate::ops::stopwatch::Stopwatch;
use crate::ops::store::TaskStore;
use crate::ops::task_ops::TaskError;

use super::input;
use super::render;
use super::theme::{TextColor, Theme};
use super::ticker::Ticker;

/// Longest the event loop sleeps when no tick is due sooner
const IDLE_POLL: Duration = Duration::from_millis(250);

/// Current interaction mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Moving through the list and acting on the selected task
    Navigate,
    /// Typing into the new-task input
    Edit,
}

/// A blocking message box; all input goes to it until dismissed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub title: String,
    pub message: String,
}

/// Main application state
pub struct App {
    pub store: TaskStore<Box<dyn Storage>>,
    pub mode: Mode,
    pub should_quit: bool,
    pub theme: Theme,
    pub show_key_hints: bool,
    /// Index of the selected task
    pub cursor: usize,
    /// First visible row of the task list
    pub scroll_offset: usize,
    /// New-task input text
    pub input: String,
    /// Byte offset of the input cursor
    pub input_cursor: usize,
    pub alert: Option<Alert>,
    pub show_help: bool,
    pub stopwatch: Stopwatch,
    pub ticker: Ticker,
    pub text_color: TextColor,
}

impl App {
    pub fn new(store: TaskStore<Box<dyn Storage>>, config: &AppConfig) -> Self {
        App {
            store,
            mode: Mode::Navigate,
            should_quit: false,
            theme: Theme::from_config(&config.ui),
            show_key_hints: config.ui.show_key_hints,
            cursor: 0,
            scroll_offset: 0,
            input: String::new(),
            input_cursor: 0,
            alert: None,
            show_help: false,
            stopwatch: Stopwatch::new(),
            ticker: Ticker::new(Duration::from_millis(config.stopwatch.tick_ms)),
            text_color: TextColor::default(),
        }
    }

    pub fn tasks(&self) -> &[Task] {
        self.store.tasks()
    }

    pub fn selected_task(&self) -> Option<&Task> {
        self.store.tasks().get(self.cursor)
    }

    fn selected_id(&self) -> Option<TaskId> {
        self.selected_task().map(|t| t.id.clone())
    }

    /// Keep the cursor on a real row after the list shrinks
    pub fn clamp_cursor(&mut self) {
        let len = self.store.len();
        if len == 0 {
            self.cursor = 0;
        } else if self.cursor >= len {
            self.cursor = len - 1;
        }
    }

    pub fn move_cursor_by(&mut self, delta: isize) {
        let len = self.store.len();
        if len == 0 {
            return;
        }
        self.cursor = self.cursor.saturating_add_signed(delta).min(len - 1);
    }

    // -----------------------------------------------------------------------
    // Task actions
    // -----------------------------------------------------------------------

    /// Add the input text as a task. Empty input raises the alert and keeps
    /// the list as it was.
    pub fn submit_input(&mut self) {
        match self.store.create(self.input.clone()) {
            Ok(_) => {
                self.input.clear();
                self.input_cursor = 0;
                self.cursor = self.store.len() - 1;
            }
            Err(TaskError::EmptyDescription) => {
                self.alert = Some(Alert {
                    title: "Error".into(),
                    message: "Please input todo".into(),
                });
            }
        }
    }

    /// Mark the selected task complete, or cancel its completion
    pub fn toggle_selected(&mut self) {
        let Some(task) = self.selected_task() else {
            return;
        };
        let id = task.id.clone();
        if task.completed {
            self.store.cancel_completion(&id);
        } else {
            self.store.mark_complete(&id);
        }
    }

    pub fn delete_selected(&mut self) {
        if let Some(id) = self.selected_id() {
            self.store.delete(&id);
            self.clamp_cursor();
        }
    }

    /// Raise the selected task one place; the cursor follows it
    pub fn raise_selected(&mut self) {
        if let Some(id) = self.selected_id()
            && self.store.increase_priority(&id)
        {
            self.cursor -= 1;
        }
    }

    /// Lower the selected task one place; the cursor follows it
    pub fn lower_selected(&mut self) {
        if let Some(id) = self.selected_id()
            && self.store.decrease_priority(&id)
        {
            self.cursor += 1;
        }
    }

    // -----------------------------------------------------------------------
    // Stopwatch and color
    // -----------------------------------------------------------------------

    pub fn toggle_stopwatch(&mut self, now: Instant) {
        // Any run/stop change drops the pending tick before re-arming
        self.ticker.cancel();
        if self.stopwatch.toggle() {
            self.ticker.start(now);
        }
    }

    pub fn reset_stopwatch(&mut self) {
        self.ticker.cancel();
        self.stopwatch.reset();
    }

    pub fn toggle_text_color(&mut self) {
        self.text_color = self.text_color.toggle();
    }

    /// Feed the time covered by elapsed ticks to the stopwatch
    pub fn on_tick(&mut self, now: Instant) {
        let fired = self.ticker.fire_due(now);
        if fired > 0 {
            self.stopwatch.advance(self.ticker.period().saturating_mul(fired));
        }
    }

    /// Release view-bound resources. Called when the screen is torn down.
    pub fn teardown(&mut self) {
        self.ticker.cancel();
    }

    /// How long the event loop may block waiting for input
    pub fn poll_timeout(&self, now: Instant) -> Duration {
        self.ticker
            .time_until_due(now)
            .map_or(IDLE_POLL, |d| d.min(IDLE_POLL))
    }
}

/// Open the store, run the TUI until the user quits, then restore the terminal.
pub fn run(data_dir: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let data_dir = resolve_data_dir(data_dir);
    let config = read_config(&data_dir)?;
    let storage: Box<dyn Storage> = Box::new(FileStorage::new(&data_dir));
    let store = TaskStore::open(storage, config.storage.key.clone(), EventLog::in_dir(&data_dir));

    let mut app = App::new(store, &config);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Install panic hook to restore terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    let result = run_event_loop(&mut terminal, &mut app);

    app.teardown();

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        terminal.draw(|frame| render::render(frame, app))?;

        if event::poll(app.poll_timeout(Instant::now()))?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            input::handle_key(app, key);
        }

        app.on_tick(Instant::now());

        if app.should_quit {
            break;
        }
    }
    Ok(())
}
