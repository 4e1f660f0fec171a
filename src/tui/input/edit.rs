use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::tui::app::{App, Mode};

pub(super) fn handle_edit(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.mode = Mode::Navigate,
        KeyCode::Enter => app.submit_input(),
        KeyCode::Backspace => {
            if let Some(prev) = prev_boundary(&app.input, app.input_cursor) {
                app.input.replace_range(prev..app.input_cursor, "");
                app.input_cursor = prev;
            }
        }
        KeyCode::Delete => {
            if let Some(next) = next_boundary(&app.input, app.input_cursor) {
                app.input.replace_range(app.input_cursor..next, "");
            }
        }
        KeyCode::Left => {
            if let Some(prev) = prev_boundary(&app.input, app.input_cursor) {
                app.input_cursor = prev;
            }
        }
        KeyCode::Right => {
            if let Some(next) = next_boundary(&app.input, app.input_cursor) {
                app.input_cursor = next;
            }
        }
        KeyCode::Home => app.input_cursor = 0,
        KeyCode::End => app.input_cursor = app.input.len(),
        KeyCode::Char(c)
            if !key
                .modifiers
                .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
        {
            app.input.insert(app.input_cursor, c);
            app.input_cursor += c.len_utf8();
        }
        _ => {}
    }
}

/// Byte offset of the char boundary before `pos`
fn prev_boundary(s: &str, pos: usize) -> Option<usize> {
    s[..pos].char_indices().next_back().map(|(i, _)| i)
}

/// Byte offset of the char boundary after `pos`
fn next_boundary(s: &str, pos: usize) -> Option<usize> {
    s[pos..].chars().next().map(|c| pos + c.len_utf8())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::render::test_helpers::*;

    fn code(c: KeyCode) -> KeyEvent {
        KeyEvent::new(c, KeyModifiers::NONE)
    }

    fn type_str(app: &mut App, s: &str) {
        for c in s.chars() {
            handle_edit(app, key(c));
        }
    }

    fn editing_app() -> App {
        let mut app = app_with_tasks(&[]);
        app.mode = Mode::Edit;
        app
    }

    #[test]
    fn typing_and_enter_adds_task() {
        let mut app = editing_app();
        type_str(&mut app, "buy milk");
        handle_edit(&mut app, code(KeyCode::Enter));

        assert_eq!(app.tasks().len(), 1);
        assert_eq!(app.tasks()[0].description, "buy milk");
        assert!(app.input.is_empty());
        // Stays in edit for the next entry
        assert_eq!(app.mode, Mode::Edit);
    }

    #[test]
    fn enter_on_empty_input_alerts() {
        let mut app = editing_app();
        handle_edit(&mut app, code(KeyCode::Enter));
        assert!(app.tasks().is_empty());
        assert!(app.alert.is_some());
    }

    #[test]
    fn cursor_movement_and_deletion() {
        let mut app = editing_app();
        type_str(&mut app, "helo");
        handle_edit(&mut app, code(KeyCode::Left));
        type_str(&mut app, "l");
        assert_eq!(app.input, "hello");

        handle_edit(&mut app, code(KeyCode::Home));
        handle_edit(&mut app, code(KeyCode::Delete));
        assert_eq!(app.input, "ello");

        handle_edit(&mut app, code(KeyCode::End));
        handle_edit(&mut app, code(KeyCode::Backspace));
        assert_eq!(app.input, "ell");
        assert_eq!(app.input_cursor, 3);
    }

    #[test]
    fn multibyte_chars_edit_cleanly() {
        let mut app = editing_app();
        type_str(&mut app, "할 일");
        handle_edit(&mut app, code(KeyCode::Backspace));
        assert_eq!(app.input, "할 ");
        handle_edit(&mut app, code(KeyCode::Left));
        handle_edit(&mut app, code(KeyCode::Left));
        handle_edit(&mut app, code(KeyCode::Delete));
        assert_eq!(app.input, " ");
        assert_eq!(app.input_cursor, 0);
    }

    #[test]
    fn esc_leaves_edit_and_keeps_text() {
        let mut app = editing_app();
        type_str(&mut app, "draft");
        handle_edit(&mut app, code(KeyCode::Esc));
        assert_eq!(app.mode, Mode::Navigate);
        assert_eq!(app.input, "draft");
    }

    #[test]
    fn control_chars_are_not_inserted() {
        let mut app = editing_app();
        handle_edit(&mut app, KeyEvent::new(KeyCode::Char('w'), KeyModifiers::CONTROL));
        assert!(app.input.is_empty());
    }

    #[test]
    fn edit_keys_do_not_trigger_navigate_actions() {
        let mut app = app_with_tasks(&["keep"]);
        app.mode = Mode::Edit;
        type_str(&mut app, "dq");
        assert_eq!(app.tasks().len(), 1);
        assert!(!app.should_quit);
        assert_eq!(app.input, "dq");
    }
}
