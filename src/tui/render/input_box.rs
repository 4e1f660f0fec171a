use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::tui::app::{App, Mode};
use crate::util::unicode::scroll_to_cursor;

const PLACEHOLDER: &str = "Press a to add a task";

/// Render the bordered new-task input with a block cursor while editing
pub fn render_input_box(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let editing = app.mode == Mode::Edit;

    let border_color = if editing {
        app.theme.highlight
    } else {
        app.theme.dim
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color).bg(bg))
        .title(Span::styled(
            " New task ",
            Style::default()
                .fg(app.theme.text_bright)
                .bg(bg)
                .add_modifier(Modifier::BOLD),
        ))
        .style(Style::default().bg(bg));

    let inner = block.inner(area);
    let inner_w = inner.width as usize;

    let line = if app.input.is_empty() && !editing {
        Line::from(Span::styled(
            PLACEHOLDER,
            Style::default().fg(app.theme.dim).bg(bg),
        ))
    } else {
        let text_style = Style::default().fg(app.theme.text_bright).bg(bg);
        let (visible, _) = scroll_to_cursor(&app.input, app.input_cursor, inner_w);
        if !editing {
            Line::from(Span::styled(visible.to_string(), text_style))
        } else {
            let at = app.input_cursor.min(app.input.len()) - (app.input.len() - visible.len());
            let (before, rest) = visible.split_at(at);
            let mut chars = rest.chars();
            let cursor_span = match chars.next() {
                // Cursor over a char: draw it reversed
                Some(c) => Span::styled(
                    c.to_string(),
                    text_style.add_modifier(Modifier::REVERSED),
                ),
                None => Span::styled("\u{258C}", Style::default().fg(app.theme.highlight).bg(bg)), // ▌ cursor
            };
            Line::from(vec![
                Span::styled(before.to_string(), text_style),
                cursor_span,
                Span::styled(chars.as_str().to_string(), text_style),
            ])
        }
    };

    frame.render_widget(Paragraph::new(line).block(block), area);
}
