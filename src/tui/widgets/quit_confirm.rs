// Quit confirmation overlay, drawn on top of whatever section is active
// while `ViewState::confirm_quit` is set.

use ratatui::layout::{Constraint, Flex, Layout, Rect};
use ratatui::style::{Color, Modifier, Style, Stylize};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

const DIALOG: (u16, u16) = (34, 5);

pub fn render(frame: &mut Frame, area: Rect) {
    let dialog_area = center(area, DIALOG.0, DIALOG.1);
    frame.render_widget(Clear, dialog_area);

    let prompt = Line::from(vec![
        "  Leave the dashboard? ".into(),
        "y".fg(Color::Green).add_modifier(Modifier::BOLD),
        "/".into(),
        "n".fg(Color::Red).add_modifier(Modifier::BOLD),
    ]);

    let dialog = Paragraph::new(prompt)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Yellow))
                .title(" Quit? ".fg(Color::Yellow).add_modifier(Modifier::BOLD)),
        )
        .style(Style::default().bg(Color::Black));
    frame.render_widget(dialog, dialog_area);
}

/// A rect of the requested size centered in `area`, shrunk to fit when the
/// terminal is smaller than the dialog.
fn center(area: Rect, width: u16, height: u16) -> Rect {
    let [row] = Layout::vertical([Constraint::Length(height.min(area.height))])
        .flex(Flex::Center)
        .areas(area);
    let [cell] = Layout::horizontal([Constraint::Length(width.min(area.width))])
        .flex(Flex::Center)
        .areas(row);
    cell
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
