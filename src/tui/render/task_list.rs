use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::App;
use crate::util::unicode::{display_width, truncate_to_width};

/// Render the task list, keeping the cursor row in view
pub fn render_task_list(frame: &mut Frame, app: &mut App, area: Rect) {
    let bg = app.theme.background;

    if app.tasks().is_empty() {
        let empty = Paragraph::new(" No tasks yet")
            .style(Style::default().fg(app.theme.dim).bg(bg));
        frame.render_widget(empty, area);
        return;
    }

    let visible_height = area.height as usize;
    adjust_scroll(app, visible_height);

    let width = area.width as usize;
    let text_color = app.theme.task_text(app.text_color);

    let lines: Vec<Line> = app
        .tasks()
        .iter()
        .enumerate()
        .skip(app.scroll_offset)
        .take(visible_height)
        .map(|(i, task)| {
            let is_cursor = i == app.cursor;
            let row_bg = if is_cursor { app.theme.selection_bg } else { bg };

            let marker = if is_cursor { "\u{258E}" } else { " " }; // ▎
            let checkbox = format!("[{}] ", task.checkbox_char());
            let prefix_w = 1 + checkbox.len();

            let mut text_style = Style::default().fg(text_color).bg(row_bg);
            if task.completed {
                text_style = text_style.add_modifier(Modifier::CROSSED_OUT);
            }
            if is_cursor {
                text_style = text_style.add_modifier(Modifier::BOLD);
            }
            let check_color = if task.completed {
                app.theme.green
            } else {
                app.theme.dim
            };

            let text = truncate_to_width(&task.description, width.saturating_sub(prefix_w));
            let text_w = display_width(&text);

            let mut spans = vec![
                Span::styled(
                    marker,
                    Style::default().fg(app.theme.selection_border).bg(row_bg),
                ),
                Span::styled(checkbox, Style::default().fg(check_color).bg(row_bg)),
                Span::styled(text, text_style),
            ];

            // Pad cursor line
            if is_cursor && prefix_w + text_w < width {
                spans.push(Span::styled(
                    " ".repeat(width - prefix_w - text_w),
                    Style::default().bg(row_bg),
                ));
            }
            Line::from(spans)
        })
        .collect();

    let paragraph = Paragraph::new(lines).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}

fn adjust_scroll(app: &mut App, visible_height: usize) {
    app.clamp_cursor();
    if visible_height == 0 {
        return;
    }
    if app.cursor < app.scroll_offset {
        app.scroll_offset = app.cursor;
    } else if app.cursor >= app.scroll_offset + visible_height {
        app.scroll_offset = app.cursor + 1 - visible_height;
    }
    // Don't leave blank rows below the last task
    let max_offset = app.tasks().len().saturating_sub(visible_height);
    app.scroll_offset = app.scroll_offset.min(max_offset);
}
