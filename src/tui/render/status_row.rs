use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::{App, Mode};

const NAVIGATE_HINTS: &str = "a add  space done  d delete  K/J move  s timer  ? help";
const EDIT_HINTS: &str = "Enter add  Esc done";

/// Render the status row (bottom of screen)
pub fn render_status_row(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let width = area.width as usize;

    let (label, hint) = match app.mode {
        Mode::Navigate => ("", NAVIGATE_HINTS),
        Mode::Edit => ("-- INSERT --", EDIT_HINTS),
    };

    let mut spans = vec![Span::styled(
        format!(" {}", label),
        Style::default().fg(app.theme.highlight).bg(bg),
    )];

    if app.show_key_hints {
        let content_width: usize = spans.iter().map(|s| s.content.chars().count()).sum();
        let hint_width = hint.chars().count();
        if content_width + hint_width < width {
            let padding = width - content_width - hint_width;
            spans.push(Span::styled(" ".repeat(padding), Style::default().bg(bg)));
            spans.push(Span::styled(hint, Style::default().fg(app.theme.dim).bg(bg)));
        }
    }

    let paragraph = Paragraph::new(Line::from(spans)).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}
