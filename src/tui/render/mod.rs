pub mod alert_popup;
pub mod help_overlay;
pub mod input_box;
pub mod status_row;
pub mod stopwatch_row;
pub mod task_list;

#[cfg(test)]
pub mod test_helpers;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};

use super::app::App;

/// Draw the whole screen: fixed rows, the list, then any overlays
pub fn render(frame: &mut Frame, app: &mut App) {
    let area = frame.area();

    // Background fill
    let bg_style = Style::default().bg(app.theme.background);
    frame.render_widget(Block::default().style(bg_style), area);

    // Layout: heading | input box | stopwatch | task list | status row
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // heading
            Constraint::Length(3), // bordered input
            Constraint::Length(1), // stopwatch
            Constraint::Min(1),    // task list
            Constraint::Length(1), // status row
        ])
        .split(area);

    render_heading(frame, app, chunks[0]);
    input_box::render_input_box(frame, app, chunks[1]);
    stopwatch_row::render_stopwatch_row(frame, app, chunks[2]);
    task_list::render_task_list(frame, app, chunks[3]);
    status_row::render_status_row(frame, app, chunks[4]);

    // Help overlay (rendered on top of everything)
    if app.show_help {
        help_overlay::render_help_overlay(frame, app, area);
    }

    // The alert sits above the help overlay
    if app.alert.is_some() {
        alert_popup::render_alert_popup(frame, app, area);
    }
}

fn render_heading(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let total = app.tasks().len();
    let done = app.tasks().iter().filter(|t| t.completed).count();

    let title = Span::styled(
        " Todo List",
        Style::default()
            .fg(app.theme.text_bright)
            .bg(bg)
            .add_modifier(Modifier::BOLD),
    );
    let counts = format!("{} done / {} total ", done, total);

    let width = area.width as usize;
    let title_w = title.content.chars().count();
    let mut spans = vec![title];
    if title_w + counts.len() < width {
        spans.push(Span::styled(
            " ".repeat(width - title_w - counts.len()),
            Style::default().bg(bg),
        ));
        spans.push(Span::styled(counts, Style::default().fg(app.theme.dim).bg(bg)));
    }

    frame.render_widget(
        Paragraph::new(Line::from(spans)).style(Style::default().bg(bg)),
        area,
    );
}
