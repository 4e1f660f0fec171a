use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::tui::app::{App, Mode};

pub(super) fn handle_navigate(app: &mut App, key: KeyEvent) {
    match (key.modifiers, key.code) {
        (_, KeyCode::Char('q')) => app.should_quit = true,
        (_, KeyCode::Char('?')) => app.show_help = true,

        // Reorder (checked before plain arrows so Shift wins)
        (m, KeyCode::Up) if m.contains(KeyModifiers::SHIFT) => app.raise_selected(),
        (m, KeyCode::Down) if m.contains(KeyModifiers::SHIFT) => app.lower_selected(),
        (_, KeyCode::Char('K')) => app.raise_selected(),
        (_, KeyCode::Char('J')) => app.lower_selected(),

        // Cursor
        (_, KeyCode::Char('k') | KeyCode::Up) => app.move_cursor_by(-1),
        (_, KeyCode::Char('j') | KeyCode::Down) => app.move_cursor_by(1),
        (_, KeyCode::Char('g') | KeyCode::Home) => app.cursor = 0,
        (_, KeyCode::Char('G') | KeyCode::End) => {
            app.cursor = app.tasks().len().saturating_sub(1);
        }

        // Task actions
        (_, KeyCode::Char(' ') | KeyCode::Char('x')) => app.toggle_selected(),
        (_, KeyCode::Char('d') | KeyCode::Delete) => app.delete_selected(),
        (_, KeyCode::Char('a') | KeyCode::Char('i') | KeyCode::Enter) => {
            app.input_cursor = app.input.len();
            app.mode = Mode::Edit;
        }

        // Stopwatch and color
        (_, KeyCode::Char('s')) => app.toggle_stopwatch(Instant::now()),
        (_, KeyCode::Char('r')) => app.reset_stopwatch(),
        (_, KeyCode::Char('c')) => app.toggle_text_color(),

        _ => {}
    }
}
