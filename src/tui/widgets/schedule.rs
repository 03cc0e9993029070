// Schedule widget: season week list with past results and pre-week
// scouting notes for upcoming opponents.

use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Cell, Row, Table};
use ratatui::Frame;

use crate::league::team::{Outcome, ScheduleEntry, WeekStatus};
use crate::protocol::{SectionId, UiSnapshot};
use crate::tui::ViewState;

/// Render the season schedule into the given area.
pub fn render(frame: &mut Frame, area: Rect, state: &ViewState, snap: &UiSnapshot) {
    let selected = state.selected_index(SectionId::Schedule);

    let header = Row::new(vec![
        Cell::from("Week"),
        Cell::from("Opponent"),
        Cell::from("Status"),
        Cell::from("Result / Outlook"),
    ])
    .style(
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD),
    );

    let rows: Vec<Row> = snap
        .schedule
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            let base = if i == selected {
                Style::default()
                    .bg(Color::DarkGray)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            Row::new(vec![
                Cell::from(format!("{}", entry.week)),
                Cell::from(entry.opponent.clone()),
                Cell::from(status_label(entry.status))
                    .style(base.fg(status_color(entry.status))),
                Cell::from(detail_line(entry)),
            ])
            .style(base)
        })
        .collect();

    let widths = [
        Constraint::Length(5),
        Constraint::Min(20),
        Constraint::Length(9),
        Constraint::Min(40),
    ];

    let table = Table::new(rows, widths).header(header).block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!("Schedule ({} weeks)", snap.schedule.len())),
    );

    frame.render_widget(table, area);
}

pub fn status_label(status: WeekStatus) -> &'static str {
    match status {
        WeekStatus::Past => "final",
        WeekStatus::Current => "live",
        WeekStatus::Future => "upcoming",
    }
}

fn status_color(status: WeekStatus) -> Color {
    match status {
        WeekStatus::Past => Color::Gray,
        WeekStatus::Current => Color::Yellow,
        WeekStatus::Future => Color::Cyan,
    }
}

/// Past weeks show the final score; future weeks show the scouting note.
pub fn detail_line(entry: &ScheduleEntry) -> String {
    if let Some(result) = &entry.result {
        let tag = match result.outcome {
            Outcome::W => "W",
            Outcome::L => "L",
            Outcome::D => "D",
        };
        return format!("{} {}", tag, result.score);
    }
    if let Some(note) = &entry.strategy_note {
        return format!(
            "{} vs {} games - attack {}, guard {}",
            note.games_mine, note.games_opp, note.target_cat, note.threat_cat
        );
    }
    String::new()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::league::team::{StrategyNote, WeekResult};
    use crate::tui::testutil;

    #[test]
    fn past_week_shows_result() {
        let entry = ScheduleEntry {
            week: 3,
            opponent: "Brick City".to_string(),
            status: WeekStatus::Past,
            result: Some(WeekResult {
                score: "6-3".to_string(),
                outcome: Outcome::W,
            }),
            strategy_note: None,
        };
        assert_eq!(detail_line(&entry), "W 6-3");
    }

    #[test]
    fn future_week_shows_scouting_note() {
        let entry = ScheduleEntry {
            week: 15,
            opponent: "Logo Lillard".to_string(),
            status: WeekStatus::Future,
            result: None,
            strategy_note: Some(StrategyNote {
                games_mine: 38,
                games_opp: 41,
                target_cat: "AST".to_string(),
                threat_cat: "BLK".to_string(),
            }),
        };
        assert_eq!(
            detail_line(&entry),
            "38 vs 41 games - attack AST, guard BLK"
        );
    }

    #[test]
    fn week_without_detail_is_blank() {
        let entry = ScheduleEntry {
            week: 14,
            opponent: "Brick City".to_string(),
            status: WeekStatus::Current,
            result: None,
            strategy_note: None,
        };
        assert_eq!(detail_line(&entry), "");
    }

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
}
