use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::App;

/// Render the stopwatch readout with its run state
pub fn render_stopwatch_row(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let running = app.stopwatch.is_running();

    let (state, state_color) = if running {
        ("running", app.theme.green)
    } else {
        ("stopped", app.theme.dim)
    };

    let spans = vec![
        Span::styled(" \u{23F1} ", Style::default().fg(app.theme.dim).bg(bg)),
        Span::styled(
            app.stopwatch.display(),
            Style::default()
                .fg(app.theme.text_bright)
                .bg(bg)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled("  ", Style::default().bg(bg)),
        Span::styled(state, Style::default().fg(state_color).bg(bg)),
    ];

    frame.render_widget(
        Paragraph::new(Line::from(spans)).style(Style::default().bg(bg)),
        area,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::render::test_helpers::*;
    use std::time::{Duration, Instant};

    #[test]
    fn shows_elapsed_and_state() {
        let mut app = app_with_tasks(&[]);
        let output = render_to_string(30, 1, |frame, area| {
            render_stopwatch_row(frame, &app, area);
        });
        assert!(output.contains("00:00"));
        assert!(output.contains("stopped"));

        let t0 = Instant::now();
        app.toggle_stopwatch(t0);
        app.on_tick(t0 + Duration::from_secs(75));
        let output = render_to_string(30, 1, |frame, area| {
            render_stopwatch_row(frame, &app, area);
        });
        assert!(output.contains("01:15"));
        assert!(output.contains("running"));
    }
}
