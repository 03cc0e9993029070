// League Hub widget: standings table with the AI scouting report for the
// highlighted team alongside.

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table, Wrap};
use ratatui::Frame;

use crate::protocol::{SectionId, UiSnapshot};
use crate::tui::ViewState;

/// Render the league hub into the given area.
pub fn render(frame: &mut Frame, area: Rect, state: &ViewState, snap: &UiSnapshot) {
    let zones = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(area);

    render_standings(frame, zones[0], state, snap);
    render_scout_report(frame, zones[1], snap);
}

fn render_standings(frame: &mut Frame, area: Rect, state: &ViewState, snap: &UiSnapshot) {
    let selected = state.selected_index(SectionId::LeagueHub);

    let header = Row::new(vec![
        Cell::from("Rank"),
        Cell::from("Team"),
        Cell::from("Owner"),
        Cell::from("Record"),
    ])
    .style(
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD),
    );

    let rows: Vec<Row> = snap
        .teams
        .iter()
        .enumerate()
        .map(|(i, t)| {
            let style = if i == selected {
                Style::default()
                    .bg(Color::DarkGray)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            Row::new(vec![
                Cell::from(format!("{}", t.rank)),
                Cell::from(t.name.clone()),
                Cell::from(t.owner.clone()),
                Cell::from(t.record.clone()),
            ])
            .style(style)
        })
        .collect();

    let widths = [
        Constraint::Length(5),
        Constraint::Min(18),
        Constraint::Min(12),
        Constraint::Length(8),
    ];

    let table = Table::new(rows, widths).header(header).block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!("League Hub ({})", snap.teams.len())),
    );

    frame.render_widget(table, area);
}

fn render_scout_report(frame: &mut Frame, area: Rect, snap: &UiSnapshot) {
    let text = if snap.loading.opponent_scout {
        "Scouting...".to_string()
    } else {
        snap.scout_text
            .clone()
            .unwrap_or_else(|| "Highlight a team and press 'a' for a scouting report.".to_string())
    };

    let paragraph = Paragraph::new(text)
        .wrap(Wrap { trim: false })
        .block(Block::default().borders(Borders::ALL).title("Scouting Report"));

    frame.render_widget(paragraph, area);
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::testutil;

    #[test]
    fn render_does_not_panic() {
        let backend = ratatui::backend::TestBackend::new(120, 30);
        let mut terminal = ratatui::Terminal::new(backend).unwrap();
        let snap = testutil::snapshot();
        let mut state = ViewState::default();
        state.apply_snapshot(snap.clone());
        terminal
            .draw(|frame| render(frame, frame.area(), &state, &snap))
            .unwrap();
    }

    #[test]
    fn render_does_not_panic_with_scout_text() {
        let backend = ratatui::backend::TestBackend::new(120, 30);
        let mut terminal = ratatui::Terminal::new(backend).unwrap();
        let mut snap = testutil::snapshot();
        snap.scout_text = Some("They are thin at center and punt assists.".to_string());
        let mut state = ViewState::default();
        state.apply_snapshot(snap.clone());
        terminal
            .draw(|frame| render(frame, frame.area(), &state, &snap))
            .unwrap();
    }
}
