// AI Coach widget: team insights text plus the latest player deep dive.

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

use crate::protocol::UiSnapshot;
use crate::tui::ViewState;

/// Render the AI coach into the given area.
pub fn render(frame: &mut Frame, area: Rect, state: &ViewState, snap: &UiSnapshot) {
    let zones = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(area);

    let scroll = state.scroll_offset.get("coach").copied().unwrap_or(0);

    let insights = panel_text(
        snap.loading.insights,
        snap.coach_text.as_deref(),
        "Press 'a' for team insights.",
    );
    let paragraph = Paragraph::new(insights)
        .wrap(Wrap { trim: false })
        .scroll((scroll as u16, 0))
        .block(Block::default().borders(Borders::ALL).title("AI Coach"));
    frame.render_widget(paragraph, zones[0]);

    let dive = panel_text(
        snap.loading.deep_dive,
        snap.deep_dive_text.as_deref(),
        "Press 'd' on a player for a deep dive.",
    );
    let paragraph = Paragraph::new(dive)
        .wrap(Wrap { trim: false })
        .style(Style::default().fg(Color::White))
        .block(Block::default().borders(Borders::ALL).title("Player Deep Dive"));
    frame.render_widget(paragraph, zones[1]);
}

/// Text for an advisory panel: busy marker, content, or the idle hint.
pub fn panel_text(loading: bool, text: Option<&str>, hint: &str) -> String {
    if loading {
        "Thinking...".to_string()
    } else {
        text.unwrap_or(hint).to_string()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
