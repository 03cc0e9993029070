// Status line widget: latest status message plus a busy marker while any
// advisory call or league sync is in flight.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::protocol::UiSnapshot;

/// Render the status line into the given area.
pub fn render(frame: &mut Frame, area: Rect, snap: &UiSnapshot) {
    let mut spans = vec![Span::styled(
        format!(" {}", snap.status),
        Style::default().fg(Color::White),
    )];

    if snap.loading.any() {
        spans.push(Span::styled(
            "  [working...]",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ));
    }

    let paragraph = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(paragraph, area);
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::testutil;

    fn rendered_line(snap: &UiSnapshot) -> String {
        let backend = ratatui::backend::TestBackend::new(60, 1);
        let mut terminal = ratatui::Terminal::new(backend).unwrap();
        terminal
            .draw(|frame| render(frame, frame.area(), snap))
            .unwrap();
        let buffer = terminal.backend().buffer().clone();
        (0..buffer.area.width)
            .map(|x| buffer[(x, 0)].symbol().to_string())
            .collect()
    }

    #[test]
    fn shows_status_message() {
        let snap = testutil::snapshot();
        let line = rendered_line(&snap);
        assert!(line.contains("Ready"));
        assert!(!line.contains("[working...]"));
    }

    #[test]
    fn shows_busy_marker_while_loading() {
        let mut snap = testutil::snapshot();
        snap.loading.insights = true;
        let line = rendered_line(&snap);
        assert!(line.contains("[working...]"));
    }
}
